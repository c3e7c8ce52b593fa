//! BibTeX entry scanning and field extraction.

use crate::regex::Regex;
use crate::structure::RawCitation;
use crate::utils::{join_wrapped, leading_year};
use std::sync::LazyLock;

/// `@<type>` directives that are not bibliographic entries.
const NON_ENTRY_TYPES: [&str; 3] = ["comment", "preamble", "string"];

static ENTRY_START_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([A-Za-z]+)\s*\{").unwrap());

static TITLE_FIELD_REGEX: LazyLock<Regex> = LazyLock::new(|| field_regex("title"));
static DOI_FIELD_REGEX: LazyLock<Regex> = LazyLock::new(|| field_regex("doi"));
static YEAR_FIELD_REGEX: LazyLock<Regex> = LazyLock::new(|| field_regex("year"));
static AUTHOR_FIELD_REGEX: LazyLock<Regex> = LazyLock::new(|| field_regex("author"));

/// Matches `name =` at the start of a field, so `title` does not match inside
/// `booktitle`.
fn field_regex(name: &str) -> Regex {
    Regex::new(&format!(r"(?i)(?:^|[\s,{{]){name}\s*=\s*")).unwrap()
}

/// A balanced `@type{ ... }` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EntryBlock<'a> {
    pub(crate) entry_type: &'a str,
    pub(crate) text: &'a str,
}

impl EntryBlock<'_> {
    pub(crate) fn is_citation(&self) -> bool {
        !NON_ENTRY_TYPES
            .iter()
            .any(|t| self.entry_type.eq_ignore_ascii_case(t))
    }
}

/// An [Iterator] over the `@type{ ... }` blocks of a BibTeX file, in order.
///
/// A block ends at the brace that balances its opening brace. A block whose
/// braces never balance runs to the end of the input.
pub(crate) struct EntryBlocks<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> EntryBlocks<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl<'a> Iterator for EntryBlocks<'a> {
    type Item = EntryBlock<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let caps = ENTRY_START_REGEX.captures(&self.text[self.pos..])?;
        let whole = caps.get(0)?;
        let start = self.pos + whole.start();
        let open_brace = self.pos + whole.end() - 1;
        let end = balanced_end(self.text, open_brace).unwrap_or(self.text.len());
        self.pos = end;
        Some(EntryBlock {
            entry_type: caps.get(1)?.as_str(),
            text: &self.text[start..end],
        })
    }
}

/// Byte offset just past the `}` that closes the `{` at `open`.
fn balanced_end(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in text.bytes().enumerate().skip(open) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// Extract the fields of one BibTeX entry. The block text is kept verbatim as
/// the citation's original text.
pub(crate) fn bibtex_parse_entry(source: &str, block: &EntryBlock<'_>) -> RawCitation {
    let text = block.text;
    let mut raw = RawCitation::new(source, text.to_string());

    raw.title = field_value(text, &TITLE_FIELD_REGEX)
        .map(|title| join_wrapped(&title.replace(['{', '}'], "")));
    raw.doi = field_value(text, &DOI_FIELD_REGEX).map(|doi| doi.trim().to_string());
    raw.year = field_value(text, &YEAR_FIELD_REGEX).and_then(leading_year);
    raw.authors = field_value(text, &AUTHOR_FIELD_REGEX)
        .map(|authors| split_authors(&join_wrapped(authors)))
        .unwrap_or_default();
    raw
}

fn split_authors(authors: &str) -> Vec<String> {
    authors
        .split(" and ")
        .map(str::trim)
        .filter(|author| !author.is_empty())
        .map(str::to_string)
        .collect()
}

/// The raw value of the first field matched by `field`, without its delimiters.
///
/// Values may be brace-delimited (braces may nest), quote-delimited, or bare
/// (`year = 2020`).
fn field_value<'a>(entry: &'a str, field: &Regex) -> Option<&'a str> {
    let value_start = field.find(entry)?.end();
    let rest = &entry[value_start..];
    match rest.as_bytes().first()? {
        b'{' => {
            let end = balanced_end(rest, 0).unwrap_or(rest.len());
            Some(rest[1..end].strip_suffix('}').unwrap_or(&rest[1..end]))
        }
        b'"' => {
            let mut depth = 0usize;
            for (i, b) in rest.bytes().enumerate().skip(1) {
                match b {
                    b'{' => depth += 1,
                    b'}' => depth = depth.saturating_sub(1),
                    b'"' if depth == 0 => return Some(&rest[1..i]),
                    _ => {}
                }
            }
            Some(&rest[1..])
        }
        _ => {
            let end = rest.find([',', '}', '\n']).unwrap_or(rest.len());
            Some(rest[..end].trim())
        }
    }
}
