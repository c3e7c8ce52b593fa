//! Intermediate data shared by all format parsers.
//!
//! Each parser fills a [`RawCitation`] with whatever it managed to extract and
//! converts it into a [`Citation`], which applies the normalization rules.

use crate::Citation;

/// Fields extracted from one entry, before normalization.
#[derive(Debug, Clone, Default)]
pub(crate) struct RawCitation {
    pub(crate) source_file: String,
    pub(crate) original_text: String,
    pub(crate) identifier: Option<String>,
    pub(crate) doi: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) authors: Vec<String>,
    pub(crate) year: Option<String>,
}

impl RawCitation {
    pub(crate) fn new(source_file: &str, original_text: String) -> Self {
        Self {
            source_file: source_file.to_string(),
            original_text,
            ..Default::default()
        }
    }
}

impl From<RawCitation> for Citation {
    fn from(
        RawCitation {
            source_file,
            original_text,
            identifier,
            doi,
            title,
            authors,
            year,
        }: RawCitation,
    ) -> Self {
        let mut citation = Citation::new(source_file, original_text)
            .with_title(title.unwrap_or_default())
            .with_authors(authors);
        if let Some(identifier) = identifier {
            citation = citation.with_identifier(identifier);
        }
        if let Some(doi) = doi {
            citation = citation.with_doi(doi);
        }
        if let Some(year) = year {
            citation = citation.with_year(year);
        }
        citation
    }
}
