/// PubMed Format tags read by the deduplicator.
///
/// See https://pubmed.ncbi.nlm.nih.gov/help/#pubmed-format
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone)]
pub(crate) enum PubmedTag {
    /// AID - Article Identifier: Article ID values supplied by the publisher may include the pii (controlled publisher identifier), doi (digital object identifier), or book accession
    ArticleIdentifier,
    /// AU - Author: Authors
    Author,
    /// DP - Publication Date: The date the article was published
    PublicationDate,
    /// FAU - Full Author Name: Full author names
    FullAuthorName,
    /// LID - Location ID: The pii or doi that serves the role of pagination
    LocationId,
    /// PMID - PubMed Unique Identifier: Unique number assigned to each PubMed citation
    PubmedUniqueIdentifier,
    /// TI - Title: The title of the article
    Title,
}

impl PubmedTag {
    pub(crate) fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "AID" => Some(Self::ArticleIdentifier),
            "AU" => Some(Self::Author),
            "DP" => Some(Self::PublicationDate),
            "FAU" => Some(Self::FullAuthorName),
            "LID" => Some(Self::LocationId),
            "PMID" => Some(Self::PubmedUniqueIdentifier),
            "TI" => Some(Self::Title),
            _ => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn as_tag(&self) -> &'static str {
        match self {
            Self::ArticleIdentifier => "AID",
            Self::Author => "AU",
            Self::PublicationDate => "DP",
            Self::FullAuthorName => "FAU",
            Self::LocationId => "LID",
            Self::PubmedUniqueIdentifier => "PMID",
            Self::Title => "TI",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case(PubmedTag::ArticleIdentifier)]
    #[case(PubmedTag::Author)]
    #[case(PubmedTag::PublicationDate)]
    #[case(PubmedTag::FullAuthorName)]
    #[case(PubmedTag::LocationId)]
    #[case(PubmedTag::PubmedUniqueIdentifier)]
    #[case(PubmedTag::Title)]
    fn test_tag_names_agree(#[case] tag: PubmedTag) {
        assert_eq!(PubmedTag::from_tag(tag.as_tag()), Some(tag));
    }

    #[rstest]
    #[case("AB")]
    #[case("ti")]
    #[case("")]
    fn test_unread_tags(#[case] tag: &str) {
        assert_eq!(PubmedTag::from_tag(tag), None);
    }
}
