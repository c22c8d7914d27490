//! Markdown summaries shown next to each chart

use crate::mode::{Exploration, LengthReport, YearlyReport};
use crate::coauthor::NetworkReport;
use std::fmt::Write;

impl Exploration {
    /// Markdown text describing the exploration
    pub fn summary_markdown(&self) -> String {
        match self {
            Exploration::Length(report) => length_summary(report),
            Exploration::Network(report) => network_summary(report),
            Exploration::Yearly(report) => yearly_summary(report),
            Exploration::NoData { message, .. } => format!("**{}**", message),
        }
    }
}

fn length_summary(report: &LengthReport) -> String {
    let stats = &report.stats;
    let mut out = format!("### {}\n\n", report.journal);
    let _ = writeln!(
        out,
        "{} articles with a page range: mean **{:.1}** pages, median {:.1}, shortest {}, longest {}.",
        stats.count, stats.mean, stats.median, stats.min, stats.max
    );
    if report.dropped > 0 {
        let _ = writeln!(
            out,
            "\n{} articles had a missing or malformed page range and are not counted.",
            report.dropped
        );
    }

    let rank = report
        .journal_means
        .iter()
        .filter(|m| m.mean_length > stats.mean)
        .count()
        + 1;
    let _ = writeln!(
        out,
        "\nRanks {} of {} journals by mean article length.",
        rank,
        report.journal_means.len()
    );
    out
}

fn network_summary(report: &NetworkReport) -> String {
    let mut out = match &report.focus {
        Some(author) => format!(
            "### Co-authors of {}\n\n{} co-authors, {} collaborations among them.\n",
            author,
            report.total_authors.saturating_sub(1),
            report.total_links
        ),
        None => format!(
            "### Co-authorship network\n\n{} authors, {} collaborations.\n",
            report.total_authors, report.total_links
        ),
    };

    if report.is_trimmed() {
        let _ = writeln!(
            out,
            "\nShowing the {} best-connected authors.",
            report.nodes.len()
        );
    }

    if !report.strongest.is_empty() {
        out.push_str("\n**Strongest collaborations**\n\n");
        for (a, b, shared) in &report.strongest {
            let _ = writeln!(out, "- {} & {}: {} shared articles", a, b, shared);
        }
    }
    out
}

fn yearly_summary(report: &YearlyReport) -> String {
    let mut out = format!("### Average article length in {}\n\n", report.year);
    out.push_str("| Journal | Mean pages | Articles | Volume / Issue |\n");
    out.push_str("|---|---:|---:|---|\n");
    for j in &report.journals {
        let _ = writeln!(
            out,
            "| {} | {:.1} | {} | {} |",
            escape_cell(&j.journal),
            j.mean_length,
            j.articles,
            escape_cell(&j.volume_issue)
        );
    }
    out
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::{explore, ExploreMode, ExploreOptions, ExploreRequest};
    use bizpub_common::Dataset;

    const SAMPLE: &str = "\
Journal,Authors,Pages,Year,Volume,Issue
Journal of Finance,A; B,10-15,2019,74,1
Journal of Finance,A; B,bad,2019,74,2
Management Science,B; C,1-30,2019,65,3
";

    fn run(request: ExploreRequest) -> String {
        let dataset = Dataset::from_reader(SAMPLE.as_bytes()).unwrap();
        explore(&dataset, &request, &ExploreOptions::default()).summary_markdown()
    }

    #[test]
    fn test_length_summary() {
        let text = run(ExploreRequest::new(ExploreMode::Length));
        assert!(text.starts_with("### Journal of Finance"));
        assert!(text.contains("mean **6.0** pages"));
        assert!(text.contains("1 articles had a missing or malformed page range"));
        assert!(text.contains("Ranks 2 of 2 journals"));
    }

    #[test]
    fn test_network_summary() {
        let text = run(ExploreRequest::new(ExploreMode::Network).with_author("B"));
        assert!(text.contains("### Co-authors of B"));
        assert!(text.contains("2 co-authors"));
        assert!(text.contains("- A & B: 2 shared articles"));
    }

    #[test]
    fn test_yearly_table() {
        let text = run(ExploreRequest::new(ExploreMode::Yearly).with_year(2019));
        assert!(text.contains("| Journal of Finance | 6.0 | 1 | Vol. 74 / Issue 1, 2 |"));
        assert!(text.contains("| Management Science | 30.0 | 1 | Vol. 65 / Issue 3 |"));
    }

    #[test]
    fn test_no_data_summary() {
        let text = run(ExploreRequest::new(ExploreMode::Yearly).with_year(1990));
        assert_eq!(text, "**No data available for 1990.**");
    }
}
