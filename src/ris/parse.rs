//! RIS format parsing implementation.
//!
//! This module handles the low-level parsing of RIS formatted text.

use crate::ris::tags::RisTag;
use crate::structure::RawCitation;
use crate::utils::leading_year;

/// Check if a line closes a RIS record: `ER`, whitespace, then a dash.
pub(crate) fn is_end_of_record(line: &str) -> bool {
    line.strip_prefix("ER").is_some_and(|rest| {
        rest.starts_with(char::is_whitespace) && rest.trim_start().starts_with('-')
    })
}

/// Separate a chunk ending in an `ER` line into the record body and the
/// closing line. Chunks without a closing line are all body.
pub(crate) fn split_off_end_of_record(chunk: &str) -> &str {
    let content = chunk.trim_end_matches(['\n', '\r']);
    let last_line_start = content.rfind('\n').map_or(0, |i| i + 1);
    if is_end_of_record(&content[last_line_start..]) {
        &chunk[..last_line_start]
    } else {
        chunk
    }
}

/// Extract the fields of one RIS record body.
pub(crate) fn ris_parse_entry(source: &str, body: &str, original_text: String) -> RawCitation {
    let mut raw = RawCitation::new(source, original_text);

    for (line_number, line) in body.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || is_metadata_line(line) {
            continue;
        }
        let Some((tag, content)) = parse_ris_line(line) else {
            tracing::trace!(line_number = line_number + 1, line, "skipped malformed RIS line");
            continue;
        };
        match tag {
            tag if tag.is_title_tag() => {
                raw.title.get_or_insert_with(|| content.to_string());
            }
            tag if tag.is_author_tag() => {
                if !content.is_empty() {
                    raw.authors.push(content.to_string());
                }
            }
            RisTag::Doi if raw.doi.is_none() => raw.doi = Some(content.to_string()),
            RisTag::PublicationYear if raw.year.is_none() => raw.year = leading_year(content),
            _ => {}
        }
    }

    raw
}

/// Parse a single RIS line into a tag and content.
fn parse_ris_line(line: &str) -> Option<(RisTag, &str)> {
    let tag_str = line.get(..2)?;
    if !tag_str.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    let content = extract_ris_content(&line[2..])?;
    Some((RisTag::from_tag(tag_str), content))
}

/// Extract content following a tag. The tag must be followed by whitespace and a
/// dash, as in `  - value` or `  -`, so wrapped text such as `do not respond`
/// is never read as a tag line.
fn extract_ris_content(after_tag: &str) -> Option<&str> {
    if !after_tag.starts_with(char::is_whitespace) {
        return None;
    }
    let content = after_tag.trim_start().strip_prefix('-')?;
    if content.is_empty() || content.starts_with(char::is_whitespace) {
        Some(content.trim())
    } else {
        None
    }
}

/// Check if a line is export metadata rather than a tagged field.
fn is_metadata_line(line: &str) -> bool {
    line.starts_with("Record #")
        || line.starts_with("Provider:")
        || line.starts_with("Content:")
        || line.starts_with("Database:")
}
