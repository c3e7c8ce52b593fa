//! Re-serialization of surviving citations.
//!
//! Output is built only from each citation's verbatim original text, so a
//! written file has the same shape as the export it came from.

use crate::{Citation, CitationError, Result};
use itertools::Itertools;
use std::path::Path;

/// Joins the trimmed original text of `citations` with blank lines.
///
/// # Examples
///
/// ```
/// use bibdedup::{CitationParser, PubMedParser};
/// use bibdedup::writer::write_citations;
///
/// let citations = PubMedParser::new().parse("PMID- 1\nTI  - One\n\n\nPMID- 2\nTI  - Two\n");
/// assert_eq!(write_citations(&citations), "PMID- 1\nTI  - One\n\nPMID- 2\nTI  - Two");
/// ```
pub fn write_citations(citations: &[Citation]) -> String {
    citations
        .iter()
        .map(|citation| citation.original_text().trim())
        .join("\n\n")
}

/// Writes [`write_citations`] output to `path`, replacing any existing file.
pub fn write_citations_to(path: &Path, citations: &[Citation]) -> Result<()> {
    std::fs::write(path, write_citations(citations)).map_err(|source| {
        CitationError::WriteOutput {
            path: path.to_path_buf(),
            source,
        }
    })?;
    tracing::debug!(path = %path.display(), records = citations.len(), "wrote output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BibTexParser, CitationFormat, CitationParser, PubMedParser, RisParser};
    use pretty_assertions::assert_eq;

    const PUBMED: &str = "\nPMID- 1\nTI  - First\n      title\nLID - 10.1/a [doi]\n\nPMID- 2\nTI  - Second\n\n\nPMID- 3\nTI  - Third\n";
    const BIBTEX: &str = "@article{a,\n  title = {First}\n}\n\nnoise between entries\n@misc{b,\n  title = {Second}\n}\n";
    const RIS: &str = "TY  - JOUR\nTI  - First\nER  - \n\n\nTY  - JOUR\nTI  - Second\nER  -\nTY  - JOUR\nTI  - Third\n";

    #[test]
    fn test_round_trip_preserves_entry_count() {
        let cases: [(CitationFormat, &str, usize); 3] = [
            (CitationFormat::PubMed, PUBMED, 3),
            (CitationFormat::BibTeX, BIBTEX, 2),
            (CitationFormat::Ris, RIS, 3),
        ];
        for (format, text, expected) in cases {
            let citations = format.parser("input").parse(text);
            assert_eq!(citations.len(), expected, "{format}");
            let written = write_citations(&citations);
            assert_eq!(format.count_entries(&written), expected, "{format}");
        }
    }

    #[test]
    fn test_round_trip_preserves_fields() {
        let original = PubMedParser::new().parse(PUBMED);
        let reparsed = PubMedParser::new().parse(&write_citations(&original));
        let titles = |c: &[Citation]| c.iter().map(|c| c.title().to_string()).collect::<Vec<_>>();
        assert_eq!(titles(&reparsed), titles(&original));
        assert_eq!(reparsed[0].doi(), Some("10.1/a"));
    }

    #[test]
    fn test_subset_output() {
        let citations = RisParser::new().parse(RIS);
        let written = write_citations(&citations[1..]);
        assert_eq!(
            written,
            "TY  - JOUR\nTI  - Second\nER  -\n\nTY  - JOUR\nTI  - Third\nER  -"
        );
    }

    #[test]
    fn test_bibtex_output_is_verbatim() {
        let citations = BibTexParser::new().parse(BIBTEX);
        assert_eq!(
            write_citations(&citations),
            "@article{a,\n  title = {First}\n}\n\n@misc{b,\n  title = {Second}\n}"
        );
    }

    #[test]
    fn test_empty_output() {
        assert_eq!(write_citations(&[]), "");
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.ris");
        let citations = RisParser::new().parse(RIS);
        write_citations_to(&path, &citations).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(CitationFormat::Ris.count_entries(&written), 3);
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.ris");
        let err = write_citations_to(&path, &[]).unwrap_err();
        assert!(matches!(err, CitationError::WriteOutput { .. }));
    }
}
