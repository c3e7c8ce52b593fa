//! RIS format tags read by the deduplicator.
//!
//! See: http://en.wikipedia.org/wiki/RIS_(file_format)

/// RIS format tags.
///
/// RIS (Research Information Systems) is a standardized tag format developed by
/// Research Information Systems for expressing bibliographic citations.
#[derive(Debug, Eq, PartialEq, Hash, Clone)]
pub(crate) enum RisTag {
    /// TI - Primary title
    Title,
    /// T1 - Primary title (alternative)
    TitleAlternative,
    /// AU - Author
    Author,
    /// A1 - Primary author
    AuthorPrimary,
    /// PY - Publication year
    PublicationYear,
    /// DO - DOI
    Doi,
    /// ER - End of reference
    EndOfReference,
    /// Any tag the deduplicator does not read
    Unknown(String),
}

impl RisTag {
    /// Convert a string tag to a RisTag enum, ignoring case.
    pub(crate) fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_uppercase().as_str() {
            "TI" => RisTag::Title,
            "T1" => RisTag::TitleAlternative,
            "AU" => RisTag::Author,
            "A1" => RisTag::AuthorPrimary,
            "PY" => RisTag::PublicationYear,
            "DO" => RisTag::Doi,
            "ER" => RisTag::EndOfReference,
            _ => RisTag::Unknown(tag.to_string()),
        }
    }

    /// Check if this tag represents an author field.
    pub(crate) fn is_author_tag(&self) -> bool {
        matches!(self, RisTag::Author | RisTag::AuthorPrimary)
    }

    /// Check if this tag holds the primary title.
    pub(crate) fn is_title_tag(&self) -> bool {
        matches!(self, RisTag::Title | RisTag::TitleAlternative)
    }
}
