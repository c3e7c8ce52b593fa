//! PubMed format parser implementation.
//!
//! Provides functionality to parse PubMed (MEDLINE) formatted citations. Each
//! entry starts at a `PMID- ` line and runs until the next one.
//!
//! # Example
//!
//! ```
//! use bibdedup::{CitationParser, PubMedParser};
//!
//! let input = r#"PMID- 12345678
//! TI  - Example Title
//! FAU - Smith, John
//!
//! "#;
//!
//! let parser = PubMedParser::new();
//!
//! let citations = parser.parse(input);
//! assert_eq!(citations[0].title(), "Example Title");
//! assert_eq!(citations[0].identifier(), Some("12345678"));
//! ```

mod parse;
mod tags;

use crate::pubmed::parse::pubmed_parse_entry;
use crate::split::{Boundary, MarkerSplit};
use crate::{Citation, CitationParser};

/// The line that opens every PubMed entry.
pub(crate) const ENTRY_MARKER: &str = "PMID- ";

/// Parser for PubMed format citations.
///
/// PubMed format is commonly used by PubMed and the National Library of Medicine
/// for bibliographic citations.
#[derive(Debug, Clone, Default)]
pub struct PubMedParser {
    source: Option<String>,
}

impl PubMedParser {
    /// Creates a new PubMed parser instance.
    ///
    /// # Examples
    ///
    /// ```
    /// use bibdedup::PubMedParser;
    /// let parser = PubMedParser::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels every parsed citation with `source`.
    #[must_use]
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }

    fn entries(input: &str) -> impl Iterator<Item = &str> {
        MarkerSplit::new(input, Boundary::Opens, |line| line.starts_with(ENTRY_MARKER)).filter_map(
            |(line_number, block)| {
                if block.starts_with(ENTRY_MARKER) {
                    Some(block)
                } else {
                    if !block.trim().is_empty() {
                        tracing::trace!(line_number, "skipped text before first PubMed entry");
                    }
                    None
                }
            },
        )
    }
}

impl CitationParser for PubMedParser {
    fn parse(&self, input: &str) -> Vec<Citation> {
        let source = self.source.as_deref().unwrap_or_default();
        Self::entries(input)
            .map(|block| pubmed_parse_entry(source, block).into())
            .collect()
    }

    fn count_entries(&self, input: &str) -> usize {
        Self::entries(input).count()
    }
}
