//! The source formats understood by the crate.

use crate::ris::END_OF_RECORD;
use crate::{BibTexParser, CitationParser, PubMedParser, RisParser};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A supported citation export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitationFormat {
    /// PubMed/MEDLINE flat records, one `PMID- ` line per entry.
    PubMed,
    /// BibTeX `@type{ ... }` entries.
    BibTeX,
    /// RIS records closed by `ER  -`.
    Ris,
}

impl CitationFormat {
    /// A parser for this format that labels its citations with `source`.
    pub fn parser(self, source: &str) -> Box<dyn CitationParser> {
        match self {
            CitationFormat::PubMed => Box::new(PubMedParser::new().with_source(source)),
            CitationFormat::BibTeX => Box::new(BibTexParser::new().with_source(source)),
            CitationFormat::Ris => Box::new(RisParser::new().with_source(source)),
        }
    }

    /// Count entries in `text` by this format's boundary rule.
    ///
    /// # Examples
    ///
    /// ```
    /// use bibdedup::CitationFormat;
    ///
    /// let text = "PMID- 1\nTI  - One\n\nPMID- 2\nTI  - Two";
    /// assert_eq!(CitationFormat::PubMed.count_entries(text), 2);
    /// ```
    pub fn count_entries(self, text: &str) -> usize {
        self.parser("").count_entries(text)
    }

    /// Guess the format from a file extension.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "txt" | "nbib" | "medline" => Some(CitationFormat::PubMed),
            "bib" | "bibtex" => Some(CitationFormat::BibTeX),
            "ris" => Some(CitationFormat::Ris),
            _ => None,
        }
    }

    /// Guess the format from the first non-blank line of a file's content.
    ///
    /// # Examples
    ///
    /// ```
    /// use bibdedup::CitationFormat;
    ///
    /// assert_eq!(CitationFormat::detect("\nPMID- 1\n"), Some(CitationFormat::PubMed));
    /// assert_eq!(CitationFormat::detect("@article{a,\n}"), Some(CitationFormat::BibTeX));
    /// assert_eq!(CitationFormat::detect("TY  - JOUR\n"), Some(CitationFormat::Ris));
    /// assert_eq!(CitationFormat::detect("hello"), None);
    /// ```
    pub fn detect(text: &str) -> Option<Self> {
        let first = text.lines().map(str::trim).find(|line| !line.is_empty())?;
        if first.starts_with(crate::pubmed::ENTRY_MARKER) {
            Some(CitationFormat::PubMed)
        } else if first.starts_with('@') {
            Some(CitationFormat::BibTeX)
        } else if first.starts_with("TY  -") || first == END_OF_RECORD {
            Some(CitationFormat::Ris)
        } else {
            None
        }
    }
}

impl fmt::Display for CitationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CitationFormat::PubMed => "PubMed",
            CitationFormat::BibTeX => "BibTeX",
            CitationFormat::Ris => "RIS",
        };
        f.write_str(name)
    }
}
