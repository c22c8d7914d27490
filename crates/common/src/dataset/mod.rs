//! Article metadata dataset
//!
//! Loads the journal article CSV into memory and exposes the selector
//! values the dashboard offers (journals, years).

pub mod models;

pub use models::Article;

use crate::errors::{AppError, Result};
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashSet};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

/// In-memory article table
#[derive(Debug, Clone)]
pub struct Dataset {
    articles: Vec<Article>,
    source: Option<PathBuf>,
    loaded_at: DateTime<Utc>,
}

impl Dataset {
    /// Build a dataset from already-parsed records
    pub fn new(articles: Vec<Article>) -> Self {
        Self {
            articles,
            source: None,
            loaded_at: Utc::now(),
        }
    }

    /// Load the CSV at `path`
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| AppError::DatasetUnavailable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut dataset = Self::from_reader(file)?;
        dataset.source = Some(path.to_path_buf());

        info!(
            path = %path.display(),
            rows = dataset.len(),
            journals = dataset.journals().len(),
            "Dataset loaded"
        );

        Ok(dataset)
    }

    /// Parse CSV content from any reader. A row that does not fit the
    /// record shape fails the whole load.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let mut articles = Vec::new();
        for record in csv.deserialize() {
            let article: Article = record?;
            articles.push(article);
        }

        Ok(Self::new(articles))
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// File the dataset came from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Distinct journal names in order of first appearance
    pub fn journals(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.articles
            .iter()
            .map(|a| a.journal.as_str())
            .filter(|j| seen.insert(*j))
            .collect()
    }

    /// Distinct publication years, ascending
    pub fn years(&self) -> Vec<i32> {
        self.articles
            .iter()
            .map(|a| a.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Most recent publication year
    pub fn latest_year(&self) -> Option<i32> {
        self.articles.iter().map(|a| a.year).max()
    }

    /// Records published in `journal`
    pub fn for_journal<'a>(&'a self, journal: &'a str) -> impl Iterator<Item = &'a Article> + 'a {
        self.articles.iter().filter(move |a| a.journal == journal)
    }

    /// Records published in `year`
    pub fn for_year(&self, year: i32) -> impl Iterator<Item = &Article> + '_ {
        self.articles.iter().filter(move |a| a.year == year)
    }
}
