//! Cross-database citation deduplication for systematic-review screening.
//!
//! `bibdedup` reads literature-database exports in three shapes, reduces every
//! entry to a common comparable [`Citation`], and removes citations that describe
//! the same work, both within a single export and across all exports of a run.
//!
//! # Key Features
//!
//! - **Multiple Format Support**: Parse citations from:
//!   - PubMed/MEDLINE flat records
//!   - BibTeX entries (Web of Science, Scopus exports)
//!   - RIS
//!
//! - **Evidence Hierarchy**:
//!   - DOI match
//!   - Database identifier (PMID) match
//!   - Normalized title match
//!   - Fuzzy title similarity, with the publication year as tie-breaker
//!
//! - **Lossless Output**: surviving records are written back using their verbatim
//!   source text, in their original format.
//!
//! # Basic Usage
//!
//! ```rust
//! use bibdedup::{CitationParser, RisParser};
//!
//! let input = r#"TY  - JOUR
//! TI  - Example Article
//! AU  - Smith, John
//! ER  -"#;
//!
//! let parser = RisParser::new();
//! let citations = parser.parse(input);
//! assert_eq!(citations[0].title(), "Example Article");
//! ```
//!
//! # Deduplicating Several Sources
//!
//! ```rust
//! use bibdedup::dedupe::{CorpusState, Deduplicator};
//! use bibdedup::{CitationParser, PubMedParser, RisParser};
//!
//! let pubmed = PubMedParser::new().with_source("PubMed").parse(
//!     "PMID- 1\nTI  - Shared title\nLID - 10.1/abc [doi]\n",
//! );
//! let ris = RisParser::new().with_source("RIS").parse(
//!     "TY  - JOUR\nTI  - Shared title, again\nDO  - 10.1/ABC\nER  -\n",
//! );
//!
//! let deduplicator = Deduplicator::new();
//! let mut state = CorpusState::new();
//! let first = deduplicator.dedupe_source("PubMed", &mut state, pubmed);
//! let second = deduplicator.dedupe_source("RIS", &mut state, ris);
//!
//! assert_eq!(first.unique.len(), 1);
//! assert!(second.unique.is_empty());
//! ```
//!
//! # Error Handling
//!
//! Parsers are best-effort and never fail. Errors only arise at the run boundary
//! (reading inputs, writing outputs, loading configuration) and are reported as
//! [`CitationError`] through the crate [`Result`] alias.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

pub mod bibtex;
pub mod dedupe;
pub mod format;
pub mod pubmed;
mod regex;
pub mod ris;
pub mod run;
pub mod similarity;
mod split;
mod structure;
mod utils;
pub mod writer;

// Reexports
pub use bibtex::BibTexParser;
pub use format::CitationFormat;
pub use pubmed::PubMedParser;
pub use ris::RisParser;
pub use utils::normalize_title;

/// A specialized Result type for citation operations.
pub type Result<T> = std::result::Result<T, CitationError>;

/// Represents errors that can occur while running a deduplication pass.
#[derive(Error, Debug)]
pub enum CitationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read source {}: {source}", path.display())]
    ReadSource {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write output {}: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown citation format: {0}")]
    UnknownFormat(String),

    #[error("Output {} holds {found} entries, expected {expected}", path.display())]
    CountMismatch {
        path: PathBuf,
        expected: usize,
        found: usize,
    },
}

impl From<toml::de::Error> for CitationError {
    fn from(err: toml::de::Error) -> Self {
        CitationError::Config(err.to_string())
    }
}

/// A single bibliographic entry extracted from any supported source format.
///
/// Citations are immutable once built: the DOI is lowercased and the title
/// trimmed and normalized at construction, and the verbatim source text is kept
/// untouched for re-serialization.
#[derive(Debug, Clone, Serialize)]
pub struct Citation {
    id: String,
    source_file: String,
    original_text: String,
    identifier: Option<String>,
    doi: Option<String>,
    title: String,
    normalized_title: String,
    authors: Vec<String>,
    year: Option<String>,
}

impl Citation {
    /// Creates a citation with no extracted fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use bibdedup::Citation;
    ///
    /// let citation = Citation::new("pubmed_input.txt", "PMID- 1\nTI  - A Title")
    ///     .with_title("  A Title ")
    ///     .with_doi("10.1000/ABC");
    /// assert_eq!(citation.title(), "A Title");
    /// assert_eq!(citation.normalized_title(), "atitle");
    /// assert_eq!(citation.doi(), Some("10.1000/abc"));
    /// ```
    #[must_use]
    pub fn new(source_file: impl Into<String>, original_text: impl Into<String>) -> Self {
        Self {
            id: nanoid::nanoid!(),
            source_file: source_file.into(),
            original_text: original_text.into(),
            identifier: None,
            doi: None,
            title: String::new(),
            normalized_title: String::new(),
            authors: Vec::new(),
            year: None,
        }
    }

    /// Sets the database identifier. Blank values are treated as absent.
    #[must_use]
    pub fn with_identifier(mut self, identifier: impl AsRef<str>) -> Self {
        self.identifier = utils::non_blank(identifier.as_ref());
        self
    }

    /// Sets the DOI, lowercased. Blank values are treated as absent.
    #[must_use]
    pub fn with_doi(mut self, doi: impl AsRef<str>) -> Self {
        self.doi = utils::normalize_doi(doi.as_ref());
        self
    }

    /// Sets the title and recomputes its normalized key.
    #[must_use]
    pub fn with_title(mut self, title: impl AsRef<str>) -> Self {
        self.title = title.as_ref().trim().to_string();
        self.normalized_title = normalize_title(&self.title);
        self
    }

    #[must_use]
    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the publication year. Blank values are treated as absent.
    #[must_use]
    pub fn with_year(mut self, year: impl AsRef<str>) -> Self {
        self.year = utils::non_blank(year.as_ref());
        self
    }

    /// Random identifier assigned at construction, unique within a run.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Label of the source this citation was parsed from.
    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    /// The exact text span this citation was parsed from.
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Lowercased DOI, if one was found.
    pub fn doi(&self) -> Option<&str> {
        self.doi.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Lowercase ASCII-alphanumeric reduction of [`Citation::title`].
    pub fn normalized_title(&self) -> &str {
        &self.normalized_title
    }

    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    pub fn year(&self) -> Option<&str> {
        self.year.as_deref()
    }

    /// Returns `true` if `other` describes the same work, using the default
    /// thresholds. See [`dedupe::is_duplicate`].
    pub fn is_duplicate_of(&self, other: &Citation) -> bool {
        dedupe::is_duplicate(self, other)
    }
}

/// Trait for implementing citation parsers.
///
/// Parsers are best-effort extractors: a field that cannot be found is left
/// absent and never aborts the whole input.
pub trait CitationParser {
    /// Parse a string containing zero or more citations, in input order.
    fn parse(&self, input: &str) -> Vec<Citation>;

    /// Count the entries in `input` using the same boundary rule as
    /// [`CitationParser::parse`], without extracting any fields.
    fn count_entries(&self, input: &str) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_citation_error_display() {
        let error = CitationError::Config("missing sources".to_string());
        assert_eq!(error.to_string(), "Configuration error: missing sources");

        let error = CitationError::CountMismatch {
            path: PathBuf::from("out.ris"),
            expected: 3,
            found: 2,
        };
        assert_eq!(error.to_string(), "Output out.ris holds 2 entries, expected 3");
    }

    #[test]
    fn test_citation_construction_normalizes() {
        let citation = Citation::new("wos_input.bib", "@article{a,\n}")
            .with_doi("  10.1016/J.CELL.2020.01.001 ")
            .with_title("  A Study: Of Things!  ")
            .with_identifier("")
            .with_year("2021");

        assert_eq!(citation.source_file(), "wos_input.bib");
        assert_eq!(citation.doi(), Some("10.1016/j.cell.2020.01.001"));
        assert_eq!(citation.title(), "A Study: Of Things!");
        assert_eq!(citation.normalized_title(), "astudyofthings");
        assert_eq!(citation.identifier(), None);
        assert_eq!(citation.year(), Some("2021"));
    }

    #[test]
    fn test_empty_title_has_empty_key() {
        let citation = Citation::new("x", "").with_title("   ");
        assert_eq!(citation.title(), "");
        assert_eq!(citation.normalized_title(), "");
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Citation::new("x", "");
        let b = Citation::new("x", "");
        assert_ne!(a.id(), b.id());
    }
}
