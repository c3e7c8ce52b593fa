//! RIS format parser implementation.
//!
//! Records are separated by `ER  -` lines. The closing line is consumed by the
//! split, so every parsed citation gets a canonical `ER  -` line appended to its
//! original text; the record can then be written back on its own.
//!
//! # Example
//!
//! ```
//! use bibdedup::{CitationParser, RisParser};
//!
//! let input = r#"TY  - JOUR
//! TI  - Example Title
//! AU  - Smith, John
//! ER  -"#;
//!
//! let parser = RisParser::new()
//!     .with_source("Google Scholar");
//!
//! let citations = parser.parse(input);
//! assert_eq!(citations[0].title(), "Example Title");
//! assert_eq!(citations[0].source_file(), "Google Scholar");
//! ```

mod parse;
mod tags;

use crate::ris::parse::{is_end_of_record, ris_parse_entry, split_off_end_of_record};
use crate::split::{Boundary, MarkerSplit};
use crate::{Citation, CitationParser};

/// The line appended to every record's original text.
pub(crate) const END_OF_RECORD: &str = "ER  -";

/// Parser for RIS format citations.
///
/// RIS is a standardized format for bibliographic citations that uses two-letter
/// tags at the start of each line to denote different citation fields.
#[derive(Debug, Default, Clone)]
pub struct RisParser {
    source: Option<String>,
}

impl RisParser {
    /// Creates a new RIS parser instance.
    ///
    /// # Examples
    ///
    /// ```
    /// use bibdedup::RisParser;
    /// let parser = RisParser::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self { source: None }
    }

    /// Labels every parsed citation with `source`.
    #[must_use]
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }

    /// Record bodies, without their closing `ER` lines.
    fn bodies(input: &str) -> impl Iterator<Item = &str> {
        MarkerSplit::new(input, Boundary::Closes, is_end_of_record)
            .map(|(_, chunk)| split_off_end_of_record(chunk))
            .filter(|body| !body.trim().is_empty())
    }
}

impl CitationParser for RisParser {
    fn parse(&self, input: &str) -> Vec<Citation> {
        let source = self.source.as_deref().unwrap_or_default();
        Self::bodies(input)
            .map(|body| {
                let original_text = format!("{}\n{END_OF_RECORD}", body.trim_end());
                ris_parse_entry(source, body, original_text).into()
            })
            .collect()
    }

    fn count_entries(&self, input: &str) -> usize {
        Self::bodies(input).count()
    }
}
