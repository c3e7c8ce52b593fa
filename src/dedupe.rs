//! Citations deduplicator implementation.
//!
//! A module for detecting duplicate academic citations within one source and
//! across every source of a run.
//!
//! ## Matching Criteria
//!
//! Two citations are duplicates when the first of these rules holds:
//!
//! 1. Both have a DOI and the DOIs are equal.
//! 2. Both have a database identifier (PMID) and the identifiers are equal.
//! 3. Both have a non-empty normalized title and the normalized titles are equal.
//! 4. Their raw titles differ in length by fewer than 20 characters and their
//!    similarity ratio is ≥ 0.95, or ≥ 0.90 with equal publication years.
//!
//! ## Usage
//!
//! ```rust
//! use bibdedup::Citation;
//! use bibdedup::dedupe::{CorpusState, Deduplicator};
//!
//! let pubmed = vec![
//!     Citation::new("PubMed", "PMID- 1").with_doi("10.1/ABC").with_title("First"),
//!     Citation::new("PubMed", "PMID- 2").with_doi("10.1/abc").with_title("Again"),
//! ];
//! let scopus = vec![
//!     Citation::new("Scopus", "@article{a,\n}").with_title("FIRST!"),
//!     Citation::new("Scopus", "@article{b,\n}").with_title("Something else"),
//! ];
//!
//! let deduplicator = Deduplicator::new();
//! let mut state = CorpusState::new();
//!
//! let pubmed = deduplicator.dedupe_source("PubMed", &mut state, pubmed);
//! let scopus = deduplicator.dedupe_source("Scopus", &mut state, scopus);
//!
//! assert_eq!(pubmed.unique.len(), 1);
//! assert_eq!(scopus.unique.len(), 1);
//! assert_eq!(scopus.unique[0].title(), "Something else");
//! assert_eq!(state.len(), 2);
//! ```
//!
//! ## Source Priority
//!
//! Sources are processed one at a time against a shared [`CorpusState`]. A
//! citation is kept in the first source that contains it; later copies are
//! dropped, never merged. The order in which sources are passed in is therefore
//! the provenance preference of the run.

use crate::Citation;
use crate::similarity::{DEFAULT_LENGTH_GATE, gated_similarity};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

const SIMILARITY_THRESHOLD: f64 = 0.95;
const YEAR_SIMILARITY_THRESHOLD: f64 = 0.90;
const MAX_TITLE_LENGTH_DIFFERENCE: usize = 20;

/// Configuration options for the duplicate classifier.
///
/// The defaults reproduce the documented matching rules.
///
/// # Examples
///
/// ```
/// use bibdedup::dedupe::DeduplicatorConfig;
///
/// let config = DeduplicatorConfig {
///     similarity_threshold: 0.97,
///     ..Default::default()
/// };
/// assert_eq!(config.year_similarity_threshold, 0.90);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeduplicatorConfig {
    /// Title similarity at or above which two citations are duplicates.
    pub similarity_threshold: f64,
    /// Title similarity at or above which two citations with the same year are
    /// duplicates.
    pub year_similarity_threshold: f64,
    /// Raw titles must differ in length by fewer than this many characters for
    /// the similarity rule to be tried.
    pub max_title_length_difference: usize,
    /// Length difference, as a fraction of the longer title, above which the
    /// similarity score is 0.
    pub length_gate: f64,
}

impl Default for DeduplicatorConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: SIMILARITY_THRESHOLD,
            year_similarity_threshold: YEAR_SIMILARITY_THRESHOLD,
            max_title_length_difference: MAX_TITLE_LENGTH_DIFFERENCE,
            length_gate: DEFAULT_LENGTH_GATE,
        }
    }
}

/// The rule of the evidence hierarchy that matched two citations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchRule {
    Doi,
    Identifier,
    NormalizedTitle,
    SimilarTitle,
    SimilarTitleAndYear,
}

impl fmt::Display for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchRule::Doi => "doi",
            MatchRule::Identifier => "identifier",
            MatchRule::NormalizedTitle => "normalized title",
            MatchRule::SimilarTitle => "similar title",
            MatchRule::SimilarTitleAndYear => "similar title and year",
        };
        f.write_str(name)
    }
}

/// Why a citation was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RemovalReason {
    /// Its DOI was already kept.
    SeenDoi,
    /// Its normalized title was already kept.
    SeenTitle,
    /// It matched a citation kept from an earlier source.
    EarlierSource { kept_id: String, rule: MatchRule },
    /// It matched a citation kept earlier from the same source.
    SameSource { kept_id: String, rule: MatchRule },
}

/// A dropped citation and the reason it was dropped.
#[derive(Debug, Clone, Serialize)]
pub struct Removal {
    pub citation: Citation,
    pub reason: RemovalReason,
}

/// The result of deduplicating one source.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SourceOutcome {
    /// Kept citations, in input order.
    pub unique: Vec<Citation>,
    /// Dropped citations, in input order.
    pub removed: Vec<Removal>,
}

/// Everything kept so far in a run: the master list and the DOI and
/// normalized-title sets used for fast rejection.
#[derive(Debug, Clone, Default)]
pub struct CorpusState {
    seen_dois: HashSet<String>,
    seen_titles: HashSet<String>,
    master: Vec<Citation>,
}

impl CorpusState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All citations kept so far, in the order they were kept.
    pub fn master(&self) -> &[Citation] {
        &self.master
    }

    pub fn len(&self) -> usize {
        self.master.len()
    }

    pub fn is_empty(&self) -> bool {
        self.master.is_empty()
    }

    pub fn has_seen_doi(&self, doi: &str) -> bool {
        self.seen_dois.contains(doi)
    }

    pub fn has_seen_title(&self, normalized_title: &str) -> bool {
        self.seen_titles.contains(normalized_title)
    }

    fn keep(&mut self, citation: Citation) {
        if let Some(doi) = citation.doi() {
            self.seen_dois.insert(doi.to_string());
        }
        if !citation.normalized_title().is_empty() {
            self.seen_titles.insert(citation.normalized_title().to_string());
        }
        self.master.push(citation);
    }
}

/// Returns the first rule of the evidence hierarchy matching `a` and `b`,
/// using the default thresholds.
pub fn match_rule(a: &Citation, b: &Citation) -> Option<MatchRule> {
    classify(a, b, &DeduplicatorConfig::default())
}

/// Returns `true` if `a` and `b` describe the same work, using the default
/// thresholds.
///
/// # Examples
///
/// ```
/// use bibdedup::Citation;
/// use bibdedup::dedupe::is_duplicate;
///
/// let a = Citation::new("x", "").with_title("A Study: Of Things!");
/// let b = Citation::new("y", "").with_title("a study of things");
/// assert!(is_duplicate(&a, &b));
/// ```
pub fn is_duplicate(a: &Citation, b: &Citation) -> bool {
    match_rule(a, b).is_some()
}

fn classify(a: &Citation, b: &Citation, config: &DeduplicatorConfig) -> Option<MatchRule> {
    if a.doi().zip(b.doi()).is_some_and(|(x, y)| x == y) {
        return Some(MatchRule::Doi);
    }
    if a.identifier().zip(b.identifier()).is_some_and(|(x, y)| x == y) {
        return Some(MatchRule::Identifier);
    }
    if !a.normalized_title().is_empty() && a.normalized_title() == b.normalized_title() {
        return Some(MatchRule::NormalizedTitle);
    }

    let length_difference = a.title().chars().count().abs_diff(b.title().chars().count());
    if length_difference < config.max_title_length_difference {
        let similarity = gated_similarity(a.title(), b.title(), config.length_gate);
        if similarity >= config.similarity_threshold {
            return Some(MatchRule::SimilarTitle);
        }
        let same_year = a.year().zip(b.year()).is_some_and(|(x, y)| x == y);
        if similarity >= config.year_similarity_threshold && same_year {
            return Some(MatchRule::SimilarTitleAndYear);
        }
    }
    None
}

/// Core deduplication engine.
///
/// # Performance
///
/// - Time complexity: O(n × m) for n incoming citations against m kept ones
/// - Exact DOI and normalized-title repeats are rejected in O(1) before any scan
#[derive(Debug, Default, Clone)]
pub struct Deduplicator {
    config: DeduplicatorConfig,
}

impl Deduplicator {
    /// Creates a new Deduplicator with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new Deduplicator with custom configuration.
    #[must_use]
    pub fn with_config(mut self, config: DeduplicatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &DeduplicatorConfig {
        &self.config
    }

    /// Classifies a pair of citations with this deduplicator's thresholds.
    pub fn match_rule(&self, a: &Citation, b: &Citation) -> Option<MatchRule> {
        classify(a, b, &self.config)
    }

    /// Deduplicates one source's citations against everything kept so far,
    /// then records the survivors in `state`.
    ///
    /// Each citation, in order, is dropped if its DOI or normalized title was
    /// already kept, if it matches a citation kept from an earlier source, or if
    /// it matches a citation kept earlier from this source. Otherwise it is kept.
    pub fn dedupe_source(
        &self,
        label: &str,
        state: &mut CorpusState,
        citations: Vec<Citation>,
    ) -> SourceOutcome {
        tracing::info!(source = label, records = citations.len(), "deduplicating source");

        let earlier_sources = state.master.len();
        let mut removed = Vec::new();

        for citation in citations {
            match self.removal_reason(state, earlier_sources, &citation) {
                Some(reason) => {
                    tracing::debug!(
                        source = label,
                        title = citation.title(),
                        ?reason,
                        "dropped duplicate"
                    );
                    removed.push(Removal { citation, reason });
                }
                None => state.keep(citation),
            }
        }

        let unique = state.master[earlier_sources..].to_vec();
        tracing::info!(
            source = label,
            kept = unique.len(),
            removed = removed.len(),
            "source deduplicated"
        );
        SourceOutcome { unique, removed }
    }

    /// Deduplicates several sources in order with a fresh [`CorpusState`].
    pub fn dedupe_sources<S: AsRef<str>>(
        &self,
        sources: Vec<(S, Vec<Citation>)>,
    ) -> Vec<SourceOutcome> {
        let mut state = CorpusState::new();
        sources
            .into_iter()
            .map(|(label, citations)| self.dedupe_source(label.as_ref(), &mut state, citations))
            .collect()
    }

    /// `state.master[..earlier_sources]` holds citations from earlier sources,
    /// the rest were kept from the source being processed.
    fn removal_reason(
        &self,
        state: &CorpusState,
        earlier_sources: usize,
        citation: &Citation,
    ) -> Option<RemovalReason> {
        if citation.doi().is_some_and(|doi| state.has_seen_doi(doi)) {
            return Some(RemovalReason::SeenDoi);
        }
        let title = citation.normalized_title();
        if !title.is_empty() && state.has_seen_title(title) {
            return Some(RemovalReason::SeenTitle);
        }

        let (earlier, same_source) = state.master.split_at(earlier_sources);
        if let Some((kept, rule)) = self.first_match(earlier, citation) {
            return Some(RemovalReason::EarlierSource {
                kept_id: kept.id().to_string(),
                rule,
            });
        }
        self.first_match(same_source, citation)
            .map(|(kept, rule)| RemovalReason::SameSource {
                kept_id: kept.id().to_string(),
                rule,
            })
    }

    fn first_match<'a>(
        &self,
        kept: &'a [Citation],
        citation: &Citation,
    ) -> Option<(&'a Citation, MatchRule)> {
        kept.iter()
            .find_map(|k| self.match_rule(citation, k).map(|rule| (k, rule)))
    }
}
