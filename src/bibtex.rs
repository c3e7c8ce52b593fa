//! BibTeX format parser implementation.
//!
//! Reads the BibTeX exports produced by Web of Science and Scopus. Every
//! balanced `@type{ ... }` block is an entry, except `@comment`, `@preamble`
//! and `@string` directives.
//!
//! # Example
//!
//! ```
//! use bibdedup::{BibTexParser, CitationParser};
//!
//! let input = r#"@article{smith2020,
//!   author = {Smith, John and Doe, Jane},
//!   title = {Example {BibTeX} Title},
//!   year = {2020}
//! }"#;
//!
//! let citations = BibTexParser::new().parse(input);
//! assert_eq!(citations[0].title(), "Example BibTeX Title");
//! assert_eq!(citations[0].authors().len(), 2);
//! ```

mod parse;

use crate::bibtex::parse::{EntryBlocks, bibtex_parse_entry};
use crate::{Citation, CitationParser};

/// Parser for BibTeX format citations.
#[derive(Debug, Clone, Default)]
pub struct BibTexParser {
    source: Option<String>,
}

impl BibTexParser {
    /// Creates a new BibTeX parser instance.
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
}

impl CitationParser for BibTexParser {
    fn parse(&self, input: &str) -> Vec<Citation> {
        let source = self.source.as_deref().unwrap_or_default();
        EntryBlocks::new(input)
            .filter(|block| block.is_citation())
            .map(|block| bibtex_parse_entry(source, &block).into())
            .collect()
    }

    fn count_entries(&self, input: &str) -> usize {
        EntryBlocks::new(input)
            .filter(|block| block.is_citation())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SCOPUS_EXPORT: &str = r#"Scopus
EXPORT DATE: 01 January 2025

@ARTICLE{Lee2021,
	author = {Lee, Min and Park, Ji},
	title = {Sleep quality and {COVID-19}: a cross-sectional survey},
	year = {2021},
	journal = {Sleep Medicine},
	doi = {10.1016/J.SLEEP.2021.01.001},
	type = {Article}
}

@inproceedings{Chen2019,
	author = {Chen, Wei},
	title = "Graph methods for screening",
	booktitle = {Proceedings of Something},
	year = 2019
}

@comment{jabref-meta: databaseType:bibtex;}
"#;

    #[test]
    fn test_parse_export() {
        let parser = BibTexParser::new().with_source("scopus_input.bib");
        let result = parser.parse(SCOPUS_EXPORT);
        assert_eq!(result.len(), 2);

        let first = &result[0];
        assert_eq!(first.title(), "Sleep quality and COVID-19: a cross-sectional survey");
        assert_eq!(first.doi(), Some("10.1016/j.sleep.2021.01.001"));
        assert_eq!(first.year(), Some("2021"));
        assert_eq!(first.authors(), ["Lee, Min".to_string(), "Park, Ji".to_string()]);
        assert_eq!(first.identifier(), None);
        assert_eq!(first.source_file(), "scopus_input.bib");
        assert!(first.original_text().starts_with("@ARTICLE{Lee2021,"));
        assert!(first.original_text().ends_with("type = {Article}\n}"));

        let second = &result[1];
        assert_eq!(second.title(), "Graph methods for screening");
        assert_eq!(second.year(), Some("2019"));
        assert_eq!(second.doi(), None);
    }

    #[test]
    fn test_count_matches_parse() {
        let parser = BibTexParser::new();
        assert_eq!(parser.count_entries(SCOPUS_EXPORT), 2);
        assert_eq!(parser.count_entries(""), 0);
    }

    #[test]
    fn test_entry_without_fields() {
        let result = BibTexParser::new().parse("@misc{key,\n}\n");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title(), "");
        assert!(result[0].authors().is_empty());
    }
}
