use crate::pubmed::tags::PubmedTag;
use crate::structure::RawCitation;
use crate::utils::leading_year;
use either::{Either, Left, Right};
use itertools::Itertools;

/// Extract the fields of one PubMed entry. `block` is kept verbatim as the
/// citation's original text.
pub(crate) fn pubmed_parse_entry(source: &str, block: &str) -> RawCitation {
    let (ignored_lines, pairs): (Vec<_>, Vec<_>) =
        WholeLinesIter::new(block.lines()).partition_map(parse_complete_entry);
    let ignored = ignored_lines.iter().filter(|l| !l.trim().is_empty()).count();
    if ignored > 0 {
        tracing::trace!(ignored, "skipped untagged lines in PubMed entry");
    }

    let mut raw = RawCitation::new(source, block.to_string());
    let mut full_authors = Vec::new();
    let mut short_authors = Vec::new();
    let mut lid_doi = None;
    let mut aid_doi = None;

    for (tag, value) in pairs {
        match tag {
            PubmedTag::PubmedUniqueIdentifier => {
                raw.identifier.get_or_insert(value);
            }
            PubmedTag::Title => {
                raw.title.get_or_insert(value);
            }
            PubmedTag::LocationId if lid_doi.is_none() => lid_doi = parse_doi_from_lid(&value),
            PubmedTag::ArticleIdentifier if aid_doi.is_none() => {
                aid_doi = parse_doi_from_lid(&value)
            }
            PubmedTag::PublicationDate if raw.year.is_none() => raw.year = leading_year(&value),
            PubmedTag::FullAuthorName => full_authors.push(value),
            PubmedTag::Author => short_authors.push(value),
            _ => {}
        }
    }

    raw.doi = lid_doi.or(aid_doi);
    raw.authors = if full_authors.is_empty() {
        short_authors
    } else {
        full_authors
    };
    raw
}

/// `LID`/`AID` values name their kind in a trailing marker, e.g. `10.1/abc [doi]`.
fn parse_doi_from_lid(s: &str) -> Option<String> {
    s.trim_end()
        .strip_suffix("[doi]")
        .map(str::trim)
        .filter(|doi| !doi.is_empty())
        .map(str::to_string)
}

/// Parse the string as a key-value pair from a PubMed formatted .nbib file.
fn parse_complete_entry(line: String) -> Either<String, (PubmedTag, String)> {
    split_on_dash(&line)
        .and_then(|(k, v)| PubmedTag::from_tag(k).map(|tag| (tag, v.to_string())))
        .map(Right)
        .unwrap_or_else(|| Left(line))
}

/// Split on the first `-` character and remove the whitespace surrounding the removed `-`.
fn split_on_dash(line: &str) -> Option<(&str, &str)> {
    line.split_once('-')
        .map(|(l, r)| (l.trim_end(), r.trim()))
}

/// An [Iterator] which yields lines containing whole values from a PubMed .nbib formatted string.
///
/// Values may be wrapped over several lines, with continuation lines indented:
///
/// ```plain
/// TI  - Fantastic yeasts and where to find them: the hidden diversity of dimorphic fungal
///       pathogens.
/// ```
///
/// [WholeLinesIter] joins the pieces with single spaces, so:
///
/// ```plain
/// TI  - Fantastic yeasts and where to find them: the hidden diversity of dimorphic fungal pathogens.
/// ```
///
/// A value ends at the next unindented line, which is either the next tag or a blank line.
/// A line holding only whitespace counts as blank.
struct WholeLinesIter<'a, I: Iterator<Item = &'a str>> {
    lines: I,
    current: Option<&'a str>,
}

impl<'a, I: Iterator<Item = &'a str>> WholeLinesIter<'a, I> {
    fn new(mut lines: I) -> Self {
        Self {
            current: lines.next(),
            lines,
        }
    }

    /// Consume items from `self.lines` until the next key-value pair is reached.
    /// Sets `self.current` to be the first line of the next key-value pair,
    /// then return the consumed previous key-value pair.
    fn consume_complete_value(&mut self, first_line: &'a str) -> String {
        let mut value = vec![first_line.trim_end()];
        self.current = None;
        for line in self.lines.by_ref() {
            if line.starts_with([' ', '\t']) && !line.trim().is_empty() {
                value.push(line.trim());
            } else {
                self.current = Some(line);
                break;
            }
        }
        value.into_iter().filter(|piece| !piece.is_empty()).join(" ")
    }
}

impl<'a, I: Iterator<Item = &'a str>> Iterator for WholeLinesIter<'a, I> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.map(|x| self.consume_complete_value(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("", &[])]
    #[case(r#"PMID- 123456
FOO - bar
BOB - Alice"#, &["PMID- 123456", "FOO - bar", "BOB - Alice"])]
    #[case(r#"PMID- 123456
TI  - I am a very long line containing so
      much text that there is a line break
AB  - next"#,
&["PMID- 123456", "TI  - I am a very long line containing so much text that there is a line break", "AB  - next"])]
    #[case("TI  - Self-\n      assembled structures\n\nAB  - x",
&["TI  - Self- assembled structures", "", "AB  - x"])]
    #[case("TI  - Short title\n   \nAB  - x", &["TI  - Short title", "", "AB  - x"])]
    fn test_continued_lines_iterator(#[case] text: &str, #[case] expected: &[&str]) {
        let actual: Vec<_> = WholeLinesIter::new(text.lines()).collect();
        assert_eq!(&actual.iter().map(String::as_str).collect_vec(), expected)
    }

    #[rstest]
    #[case("", Left(""))]
    #[case("DNE - tag does not exist", Left("DNE - tag does not exist"))]
    #[case("no dash here", Left("no dash here"))]
    #[case("AU - Albert Einstein", Right((PubmedTag::Author, "Albert Einstein")))]
    #[case("AU- Albert Einstein", Right((PubmedTag::Author, "Albert Einstein")))]
    #[case("AU  - Albert Einstein", Right((PubmedTag::Author, "Albert Einstein")))]
    #[case("TI  - Self-assembly of things", Right((PubmedTag::Title, "Self-assembly of things")))]
    fn test_parse_complete_entry(
        #[case] line: &str,
        #[case] expected: Either<&str, (PubmedTag, &str)>,
    ) {
        let actual = parse_complete_entry(line.to_string());
        assert_eq!(
            actual
                .as_ref()
                .map_either(|s| s.as_str(), |(t, s)| (*t, s.as_str())),
            expected
        );
    }

    #[rstest]
    #[case("10.1000/test [doi]", Some("10.1000/test"))]
    #[case("10.1000/test [doi]  ", Some("10.1000/test"))]
    #[case("S0140-6736(20)30183-5 [pii]", None)]
    #[case(" [doi]", None)]
    fn test_parse_doi_from_lid(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(parse_doi_from_lid(input).as_deref(), expected);
    }

    #[test]
    fn test_lid_preferred_over_aid() {
        let block = "PMID- 1\nAID - 10.2/aid [doi]\nLID - 10.1/lid [doi]\n";
        let raw = pubmed_parse_entry("pubmed", block);
        assert_eq!(raw.doi.as_deref(), Some("10.1/lid"));
    }

    #[test]
    fn test_aid_used_when_lid_is_not_a_doi() {
        let block = "PMID- 1\nLID - S0000 [pii]\nAID - 10.2/aid [doi]\nAID - S0000 [pii]\n";
        let raw = pubmed_parse_entry("pubmed", block);
        assert_eq!(raw.doi.as_deref(), Some("10.2/aid"));
    }

    #[test]
    fn test_first_dated_line_gives_year() {
        let block = "PMID- 1\nDP  - Winter\nDP  - 2019 Dec\n";
        let raw = pubmed_parse_entry("pubmed", block);
        assert_eq!(raw.year.as_deref(), Some("2019"));
    }

    #[test]
    fn test_whitespace_only_line_ends_title() {
        let block = "PMID- 1\nTI  - Short title\n   \n      stray indented text\nDP  - 2020\n";
        let raw = pubmed_parse_entry("pubmed", block);
        assert_eq!(raw.title.as_deref(), Some("Short title"));
        assert_eq!(raw.year.as_deref(), Some("2020"));
    }
}
