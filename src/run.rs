//! One deduplication run over a configured list of source files.
//!
//! A run reads every configured export that exists, deduplicates the sources in
//! the configured order against one shared [`CorpusState`], writes each
//! source's survivors next to it and checks that every written file re-parses
//! to the expected number of entries.
//!
//! # Configuration
//!
//! ```toml
//! [[sources]]
//! label = "PubMed"
//! input = "pubmed_input.txt"
//! output = "pubmed_deduplicated.txt"
//!
//! [[sources]]
//! label = "Embase"
//! input = "embase.txt"
//! output = "embase_deduplicated.ris"
//! format = "ris"
//!
//! [dedupe]
//! similarity_threshold = 0.97
//! ```
//!
//! Omitted sections fall back to [`RunConfig::default`].

use crate::dedupe::{CorpusState, Deduplicator, DeduplicatorConfig, SourceOutcome};
use crate::writer::write_citations_to;
use crate::{Citation, CitationError, CitationFormat, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One export taking part in a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Name used in logs and reports.
    pub label: String,
    pub input: PathBuf,
    pub output: PathBuf,
    /// Inferred from the input when absent.
    #[serde(default)]
    pub format: Option<CitationFormat>,
}

impl SourceConfig {
    pub fn new(
        label: impl Into<String>,
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            label: label.into(),
            input: input.into(),
            output: output.into(),
            format: None,
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: CitationFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// The configured format, else the one implied by the input extension,
    /// else the one recognised from `text`.
    pub fn resolve_format(&self, text: &str) -> Result<CitationFormat> {
        self.format
            .or_else(|| CitationFormat::from_extension(&self.input))
            .or_else(|| CitationFormat::detect(text))
            .ok_or_else(|| CitationError::UnknownFormat(self.input.display().to_string()))
    }
}

/// The sources of a run, in priority order, and the classifier thresholds.
///
/// A citation found in several sources is kept in the first one listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub sources: Vec<SourceConfig>,
    pub dedupe: DeduplicatorConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            sources: vec![
                SourceConfig::new("PubMed", "pubmed_input.txt", "pubmed_deduplicated.txt"),
                SourceConfig::new("Web of Science", "wos_input.bib", "wos_deduplicated.bib"),
                SourceConfig::new("Scopus", "scopus_input.bib", "scopus_deduplicated.bib"),
                SourceConfig::new("RIS", "articles.ris", "ris_deduplicated.ris"),
            ],
            dedupe: DeduplicatorConfig::default(),
        }
    }
}

impl RunConfig {
    /// Parses a TOML run configuration. Paths are left as written.
    ///
    /// # Examples
    ///
    /// ```
    /// use bibdedup::run::RunConfig;
    ///
    /// let config = RunConfig::from_toml_str("[dedupe]\nsimilarity_threshold = 0.97\n").unwrap();
    /// assert_eq!(config.sources.len(), 4);
    /// assert_eq!(config.dedupe.similarity_threshold, 0.97);
    /// assert_eq!(config.dedupe.year_similarity_threshold, 0.90);
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: RunConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a TOML run configuration. Relative source paths are resolved
    /// against the directory holding the file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CitationError::ReadSource {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        tracing::debug!(path = %path.display(), sources = config.sources.len(), "loaded run configuration");
        Ok(config.with_base_dir(base))
    }

    /// Resolves relative input and output paths against `base`.
    #[must_use]
    pub fn with_base_dir(mut self, base: &Path) -> Self {
        for source in &mut self.sources {
            if source.input.is_relative() {
                source.input = base.join(&source.input);
            }
            if source.output.is_relative() {
                source.output = base.join(&source.output);
            }
        }
        self
    }

    fn validate(&self) -> Result<()> {
        if let Some(source) = self.sources.iter().find(|s| s.label.trim().is_empty()) {
            return Err(CitationError::Config(format!(
                "source reading {} has an empty label",
                source.input.display()
            )));
        }
        if let Some(label) = self.sources.iter().map(|s| s.label.as_str()).duplicates().next() {
            return Err(CitationError::Config(format!("duplicate source label {label:?}")));
        }
        if let Some(output) = self.sources.iter().map(|s| &s.output).duplicates().next() {
            return Err(CitationError::Config(format!(
                "output {} is shared by several sources",
                output.display()
            )));
        }
        Ok(())
    }
}

/// What happened to one source during a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceSummary {
    pub label: String,
    pub format: CitationFormat,
    pub output: PathBuf,
    /// Entries parsed from the input.
    pub parsed: usize,
    /// Entries written to the output.
    pub kept: usize,
    /// Entries dropped as duplicates.
    pub removed: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    /// One summary per processed source, in processing order.
    pub sources: Vec<SourceSummary>,
}

impl RunReport {
    pub fn total_kept(&self) -> usize {
        self.sources.iter().map(|s| s.kept).sum()
    }

    pub fn total_removed(&self) -> usize {
        self.sources.iter().map(|s| s.removed).sum()
    }
}

/// The result of [`run`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RunOutcome {
    /// None of the configured inputs exist. Nothing was written.
    NothingToDo,
    Completed(RunReport),
}

struct QueuedSource<'a> {
    config: &'a SourceConfig,
    format: CitationFormat,
    citations: Vec<Citation>,
}

/// Runs a full deduplication pass.
///
/// Missing inputs are skipped with a warning. Any other failure to read an
/// input, write an output or verify a written output aborts the run.
pub fn run(config: &RunConfig) -> Result<RunOutcome> {
    let queued = read_sources(&config.sources)?;
    if queued.is_empty() {
        tracing::warn!("none of the configured inputs exist, nothing to do");
        return Ok(RunOutcome::NothingToDo);
    }

    let deduplicator = Deduplicator::new().with_config(config.dedupe.clone());
    let mut state = CorpusState::new();
    let outcomes: Vec<(QueuedSource<'_>, usize, SourceOutcome)> = queued
        .into_iter()
        .map(|mut source| {
            let citations = std::mem::take(&mut source.citations);
            let parsed = citations.len();
            let outcome = deduplicator.dedupe_source(&source.config.label, &mut state, citations);
            (source, parsed, outcome)
        })
        .collect();

    let mut report = RunReport::default();
    for (source, parsed, outcome) in outcomes {
        let output = &source.config.output;
        write_citations_to(output, &outcome.unique)?;
        verify_output(output, source.format, outcome.unique.len())?;
        report.sources.push(SourceSummary {
            label: source.config.label.clone(),
            format: source.format,
            output: output.clone(),
            parsed,
            kept: outcome.unique.len(),
            removed: outcome.removed.len(),
        });
    }

    tracing::info!(
        kept = report.total_kept(),
        removed = report.total_removed(),
        "deduplication run complete"
    );
    Ok(RunOutcome::Completed(report))
}

fn read_sources(sources: &[SourceConfig]) -> Result<Vec<QueuedSource<'_>>> {
    let mut queued = Vec::with_capacity(sources.len());
    for config in sources {
        if !config.input.exists() {
            tracing::warn!(
                source = config.label.as_str(),
                path = %config.input.display(),
                "input not found, skipping source"
            );
            continue;
        }
        let text = read_text(&config.input)?;
        let format = config.resolve_format(&text)?;
        let citations = format.parser(&config.label).parse(&text);
        tracing::info!(
            source = config.label.as_str(),
            %format,
            records = citations.len(),
            "parsed source"
        );
        queued.push(QueuedSource {
            config,
            format,
            citations,
        });
    }
    Ok(queued)
}

/// Re-reads a written output and checks it holds `expected` entries.
fn verify_output(path: &Path, format: CitationFormat, expected: usize) -> Result<()> {
    let found = format.count_entries(&read_text(path)?);
    if found != expected {
        return Err(CitationError::CountMismatch {
            path: path.to_path_buf(),
            expected,
            found,
        });
    }
    tracing::debug!(path = %path.display(), entries = found, "verified output");
    Ok(())
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| CitationError::ReadSource {
        path: path.to_path_buf(),
        source,
    })
}
