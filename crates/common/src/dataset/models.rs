//! Article record

use serde::{Deserialize, Serialize};

/// One row of the journal article metadata table.
///
/// Column names follow the published CSV headers. Older exports name the page
/// column `Article Length(Pages)`; either spelling lands in [`Article::pages`],
/// and `Pages` wins when a file carries both.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ArticleRow")]
pub struct Article {
    #[serde(rename = "Journal")]
    pub journal: String,

    /// `"; "`-delimited author names
    #[serde(rename = "Authors", default)]
    pub authors: Option<String>,

    /// Printed page range, expected as `"start-end"`
    #[serde(rename = "Pages", default)]
    pub pages: Option<String>,

    #[serde(rename = "Year")]
    pub year: i32,

    #[serde(rename = "Volume", default)]
    pub volume: Option<String>,

    #[serde(rename = "Issue", default)]
    pub issue: Option<String>,
}

impl Article {
    /// Author list with surrounding whitespace removed, `None` when blank
    pub fn author_list(&self) -> Option<&str> {
        self.authors
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// CSV row as exported, before the two page columns are merged
#[derive(Deserialize)]
struct ArticleRow {
    #[serde(rename = "Journal")]
    journal: String,

    #[serde(rename = "Authors", default)]
    authors: Option<String>,

    #[serde(rename = "Pages", default)]
    pages: Option<String>,

    #[serde(rename = "Article Length(Pages)", default)]
    article_length_pages: Option<String>,

    #[serde(rename = "Year")]
    year: i32,

    #[serde(rename = "Volume", default)]
    volume: Option<String>,

    #[serde(rename = "Issue", default)]
    issue: Option<String>,
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        Self {
            journal: row.journal,
            authors: row.authors,
            pages: row.pages.or(row.article_length_pages),
            year: row.year,
            volume: row.volume,
            issue: row.issue,
        }
    }
}
