//! Exploration modes and dispatch
//!
//! A request names a mode plus the selector values the user picked; the
//! dispatcher turns it into one report computed from the dataset.

use crate::aggregate::{mean_length_by_journal, yearly_journal_summary, JournalMean, JournalYearSummary};
use crate::coauthor::{CoauthorGraph, LayoutConfig, NetworkReport};
use crate::distribution::{Histogram, LengthStats};
use crate::pages::collect_lengths;
use bizpub_common::config::ChartConfig;
use bizpub_common::errors::AppError;
use bizpub_common::Dataset;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// What the user wants to look at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExploreMode {
    /// Page-length histogram of one journal
    Length,
    /// Co-authorship network
    Network,
    /// Mean page length per journal within a year
    Yearly,
}

impl ExploreMode {
    pub const ALL: [ExploreMode; 3] = [ExploreMode::Length, ExploreMode::Network, ExploreMode::Yearly];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExploreMode::Length => "length",
            ExploreMode::Network => "network",
            ExploreMode::Yearly => "yearly",
        }
    }

    /// Human-readable name for selectors
    pub fn label(&self) -> &'static str {
        match self {
            ExploreMode::Length => "Article length distribution",
            ExploreMode::Network => "Co-authorship network",
            ExploreMode::Yearly => "Yearly average length by journal",
        }
    }
}

impl fmt::Display for ExploreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExploreMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "length" | "article-length" | "distribution" => Ok(ExploreMode::Length),
            "network" | "coauthor-network" | "coauthors" => Ok(ExploreMode::Network),
            "yearly" | "yearly-average" | "year" => Ok(ExploreMode::Yearly),
            _ => Err(AppError::UnknownMode { mode: s.to_string() }),
        }
    }
}

/// Selector values for one exploration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExploreRequest {
    pub mode: ExploreMode,
    pub journal: Option<String>,
    pub year: Option<i32>,
    pub author: Option<String>,
}

impl ExploreRequest {
    pub fn new(mode: ExploreMode) -> Self {
        Self {
            mode,
            journal: None,
            year: None,
            author: None,
        }
    }

    pub fn with_journal(mut self, journal: impl Into<String>) -> Self {
        self.journal = Some(journal.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

/// Tunables for the computations behind each mode
#[derive(Debug, Clone)]
pub struct ExploreOptions {
    pub histogram_bins: usize,
    pub max_network_nodes: usize,
    pub layout: LayoutConfig,
}

impl Default for ExploreOptions {
    fn default() -> Self {
        Self::from(&ChartConfig::default())
    }
}

impl From<&ChartConfig> for ExploreOptions {
    fn from(config: &ChartConfig) -> Self {
        Self {
            histogram_bins: config.histogram_bins,
            max_network_nodes: config.max_network_nodes,
            layout: LayoutConfig {
                iterations: config.layout_iterations,
                seed: config.layout_seed,
                ..LayoutConfig::default()
            },
        }
    }
}

/// Page-length distribution of one journal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthReport {
    pub journal: String,
    pub histogram: Histogram,
    pub stats: LengthStats,
    /// Articles of this journal without a usable page range
    pub dropped: usize,
    /// Mean length of every journal, for comparison
    pub journal_means: Vec<JournalMean>,
}

/// Per-journal averages within one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyReport {
    pub year: i32,
    pub journals: Vec<JournalYearSummary>,
}

/// Result of one exploration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Exploration {
    Length(LengthReport),
    Network(NetworkReport),
    Yearly(YearlyReport),
    NoData { mode: ExploreMode, message: String },
}

impl Exploration {
    pub fn mode(&self) -> ExploreMode {
        match self {
            Exploration::Length(_) => ExploreMode::Length,
            Exploration::Network(_) => ExploreMode::Network,
            Exploration::Yearly(_) => ExploreMode::Yearly,
            Exploration::NoData { mode, .. } => *mode,
        }
    }

    pub fn has_data(&self) -> bool {
        !matches!(self, Exploration::NoData { .. })
    }

    fn no_data(mode: ExploreMode, message: impl Into<String>) -> Self {
        Exploration::NoData {
            mode,
            message: message.into(),
        }
    }
}

/// Compute the report for `request` from `dataset`
pub fn explore(dataset: &Dataset, request: &ExploreRequest, options: &ExploreOptions) -> Exploration {
    debug!(
        mode = %request.mode,
        journal = ?request.journal,
        year = ?request.year,
        author = ?request.author,
        "Exploring dataset"
    );

    match request.mode {
        ExploreMode::Length => length_distribution(dataset, request.journal.as_deref(), options),
        ExploreMode::Network => coauthor_network(dataset, request.author.as_deref(), options),
        ExploreMode::Yearly => yearly_average(dataset, request.year),
    }
}

fn length_distribution(dataset: &Dataset, journal: Option<&str>, options: &ExploreOptions) -> Exploration {
    let journals = dataset.journals();
    let journal = match journal.map(str::trim).filter(|j| !j.is_empty()) {
        Some(journal) => journal,
        None => match journals.first() {
            Some(first) => *first,
            None => return Exploration::no_data(ExploreMode::Length, "No data available: the dataset is empty."),
        },
    };

    let (lengths, dropped) = collect_lengths(dataset.for_journal(journal));
    let stats = match LengthStats::from_lengths(&lengths) {
        Some(stats) => stats,
        None => {
            return Exploration::no_data(
                ExploreMode::Length,
                format!("No data available for {}.", journal),
            )
        }
    };

    Exploration::Length(LengthReport {
        journal: journal.to_string(),
        histogram: Histogram::build(&lengths, options.histogram_bins),
        stats,
        dropped,
        journal_means: mean_length_by_journal(dataset.articles()),
    })
}

fn coauthor_network(dataset: &Dataset, author: Option<&str>, options: &ExploreOptions) -> Exploration {
    let graph = CoauthorGraph::from_author_lists(dataset.articles().iter().map(|a| a.author_list()));
    if graph.edge_count() == 0 {
        return Exploration::no_data(ExploreMode::Network, "No co-authorship data available.");
    }

    let author = author.map(str::trim).filter(|a| !a.is_empty());
    let (view, pinned) = match author {
        Some(name) => match graph.ego(name) {
            Some(ego) => (ego, vec![name]),
            None => {
                return Exploration::no_data(
                    ExploreMode::Network,
                    format!("No data available for author {}.", name),
                )
            }
        },
        None => (graph, Vec::new()),
    };

    let total_authors = view.node_count();
    let total_links = view.edge_count();
    let drawn = view.top_by_degree(options.max_network_nodes, &pinned);

    Exploration::Network(NetworkReport::build(
        &drawn,
        author,
        total_authors,
        total_links,
        &options.layout,
    ))
}

fn yearly_average(dataset: &Dataset, year: Option<i32>) -> Exploration {
    let year = match year.or_else(|| dataset.latest_year()) {
        Some(year) => year,
        None => return Exploration::no_data(ExploreMode::Yearly, "No data available: the dataset is empty."),
    };

    let journals = yearly_journal_summary(dataset.articles(), year);
    if journals.is_empty() {
        return Exploration::no_data(ExploreMode::Yearly, format!("No data available for {}.", year));
    }

    Exploration::Yearly(YearlyReport { year, journals })
}
