//! Per-journal aggregates
//!
//! Mean page length per journal, over the whole table or within one
//! publication year. Journals without a single valid page range are left
//! out rather than reported with a zero mean.

use crate::distribution::mean;
use crate::pages::article_length;
use bizpub_common::Article;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Mean page length of one journal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalMean {
    pub journal: String,
    pub mean_length: f64,
    /// Articles that contributed a valid length
    pub articles: usize,
}

/// Mean page length of one journal within a year, with the
/// volumes and issues it published that year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalYearSummary {
    pub journal: String,
    pub mean_length: f64,
    pub articles: usize,
    pub volumes: Vec<String>,
    pub issues: Vec<String>,
    /// e.g. `"Vol. 74 / Issue 1, 2"`
    pub volume_issue: String,
}

#[derive(Default)]
struct Group<'a> {
    lengths: Vec<u32>,
    volumes: BTreeSet<&'a str>,
    issues: BTreeSet<&'a str>,
}

fn group_by_journal<'a, I>(articles: I) -> BTreeMap<&'a str, Group<'a>>
where
    I: IntoIterator<Item = &'a Article>,
{
    let mut groups: BTreeMap<&str, Group> = BTreeMap::new();
    for article in articles {
        let group = groups.entry(article.journal.as_str()).or_default();
        if let Some(len) = article_length(article) {
            group.lengths.push(len);
        }
        if let Some(volume) = non_blank(article.volume.as_deref()) {
            group.volumes.insert(volume);
        }
        if let Some(issue) = non_blank(article.issue.as_deref()) {
            group.issues.insert(issue);
        }
    }
    groups
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Mean page length per journal, ordered by journal name
pub fn mean_length_by_journal<'a, I>(articles: I) -> Vec<JournalMean>
where
    I: IntoIterator<Item = &'a Article>,
{
    group_by_journal(articles)
        .into_iter()
        .filter_map(|(journal, group)| {
            Some(JournalMean {
                journal: journal.to_string(),
                mean_length: mean(&group.lengths)?,
                articles: group.lengths.len(),
            })
        })
        .collect()
}

/// Mean page length per journal for articles published in `year`
pub fn yearly_journal_summary<'a, I>(articles: I, year: i32) -> Vec<JournalYearSummary>
where
    I: IntoIterator<Item = &'a Article>,
{
    group_by_journal(articles.into_iter().filter(|a| a.year == year))
        .into_iter()
        .filter_map(|(journal, group)| {
            let mean_length = mean(&group.lengths)?;
            let volumes = sorted_values(group.volumes);
            let issues = sorted_values(group.issues);
            let volume_issue = volume_issue_label(&volumes, &issues);
            Some(JournalYearSummary {
                journal: journal.to_string(),
                mean_length,
                articles: group.lengths.len(),
                volumes,
                issues,
                volume_issue,
            })
        })
        .collect()
}

/// Distinct values with numeric ones first in numeric order
fn sorted_values(values: BTreeSet<&str>) -> Vec<String> {
    let mut values: Vec<&str> = values.into_iter().collect();
    values.sort_by(|a, b| compare_natural(a, b));
    values.into_iter().map(String::from).collect()
}

fn compare_natural(a: &str, b: &str) -> Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

fn volume_issue_label(volumes: &[String], issues: &[String]) -> String {
    let mut parts = Vec::new();
    if !volumes.is_empty() {
        parts.push(format!("Vol. {}", volumes.join(", ")));
    }
    if !issues.is_empty() {
        parts.push(format!("Issue {}", issues.join(", ")));
    }
    if parts.is_empty() {
        "n/a".to_string()
    } else {
        parts.join(" / ")
    }
}
