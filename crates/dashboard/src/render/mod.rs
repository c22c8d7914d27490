//! SVG chart rendering
//!
//! Each exploration becomes zero or more standalone SVG documents drawn
//! with plotters. A no-data exploration produces no charts.

mod bars;
mod histogram;
mod network;

use bizpub_common::config::ChartConfig;
use bizpub_common::errors::{AppError, Result};
use bizpub_explore::Exploration;
use plotters::style::RGBColor;
use serde::Serialize;

/// Primary bar/node color
pub(crate) const BAR_COLOR: RGBColor = RGBColor(70, 130, 180);

/// Color for the selected journal or ego-network center
pub(crate) const HIGHLIGHT_COLOR: RGBColor = RGBColor(220, 90, 60);

/// Chart shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Histogram,
    HorizontalBar,
    VerticalBar,
    Network,
}

/// Rendered chart
#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub svg: String,
}

/// Draw every chart for `exploration`
pub fn render(exploration: &Exploration, config: &ChartConfig) -> Result<Vec<Chart>> {
    match exploration {
        Exploration::Length(report) => Ok(vec![
            histogram::render(report, config)?,
            bars::journal_means(&report.journal_means, Some(report.journal.as_str()), config)?,
        ]),
        Exploration::Network(report) => Ok(vec![network::render(report, config)?]),
        Exploration::Yearly(report) => Ok(vec![bars::yearly(report, config)?]),
        Exploration::NoData { .. } => Ok(Vec::new()),
    }
}

pub(crate) fn render_error<E: std::fmt::Display>(err: E) -> AppError {
    AppError::Render {
        message: err.to_string(),
    }
}

/// Shorten long journal names for axis labels
pub(crate) fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let mut short: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    short.push('…');
    short
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizpub_common::Dataset;
    use bizpub_explore::{explore, ExploreMode, ExploreOptions, ExploreRequest};

    const SAMPLE: &str = "\
Journal,Authors,Pages,Year,Volume,Issue
Journal of Finance,Alice Smith; Bob Jones,10-15,2019,74,1
Journal of Finance,Alice Smith; Bob Jones,1-20,2020,75,2
Management Science,Carol White; Bob Jones,101-130,2019,65,3
";

    fn charts_for(request: ExploreRequest) -> Vec<Chart> {
        let dataset = Dataset::from_reader(SAMPLE.as_bytes()).unwrap();
        let exploration = explore(&dataset, &request, &ExploreOptions::default());
        render(&exploration, &ChartConfig::default()).unwrap()
    }

    fn assert_svg(chart: &Chart) {
        assert!(chart.svg.contains("<svg"), "not an svg document");
        assert!(chart.svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_length_charts() {
        let charts = charts_for(ExploreRequest::new(ExploreMode::Length).with_journal("Management Science"));
        assert_eq!(charts.len(), 2);
        assert_eq!(charts[0].kind, ChartKind::Histogram);
        assert_eq!(charts[1].kind, ChartKind::HorizontalBar);
        charts.iter().for_each(assert_svg);
        assert!(charts[0].svg.contains("Management Science"));
    }

    #[test]
    fn test_network_chart() {
        let charts = charts_for(ExploreRequest::new(ExploreMode::Network));
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].kind, ChartKind::Network);
        assert_svg(&charts[0]);
        assert!(charts[0].svg.contains("Bob Jones"));
        assert!(charts[0].svg.contains("<circle"));
    }

    #[test]
    fn test_yearly_chart() {
        let charts = charts_for(ExploreRequest::new(ExploreMode::Yearly).with_year(2019));
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].kind, ChartKind::VerticalBar);
        assert_svg(&charts[0]);
    }

    #[test]
    fn test_no_data_has_no_chart() {
        let charts = charts_for(ExploreRequest::new(ExploreMode::Yearly).with_year(1999));
        assert!(charts.is_empty());
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("Short", 10), "Short");
        assert_eq!(truncate_label("A very long journal name", 8), "A very …");
    }
}
