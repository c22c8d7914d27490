//! Bar charts of per-journal mean lengths

use super::{render_error, truncate_label, Chart, ChartKind, BAR_COLOR, HIGHLIGHT_COLOR};
use bizpub_common::config::ChartConfig;
use bizpub_common::errors::Result;
use bizpub_explore::aggregate::JournalMean;
use bizpub_explore::YearlyReport;
use plotters::prelude::*;

/// Vertical space per journal in the horizontal chart
const ROW_HEIGHT: u32 = 24;

/// Upper end of a value axis with a little headroom
fn axis_end(max: f64) -> f64 {
    if max > 0.0 { max * 1.1 } else { 1.0 }
}

/// Horizontal bars: one row per journal, first journal on top.
/// `highlight` marks the journal currently selected.
pub fn journal_means(means: &[JournalMean], highlight: Option<&str>, config: &ChartConfig) -> Result<Chart> {
    let title = "Mean article length by journal".to_string();

    let n = means.len() as u32;
    let height = config.height.max(80 + ROW_HEIGHT * n);
    let x_end = axis_end(means.iter().map(|m| m.mean_length).fold(0.0, f64::max));

    // segment 0 is the bottom row
    let rows: Vec<&JournalMean> = means.iter().rev().collect();
    let labels: Vec<String> = rows.iter().map(|m| truncate_label(&m.journal, 40)).collect();

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (config.width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&title, ("sans-serif", 20))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(260)
            .build_cartesian_2d(0f64..x_end, (0u32..n).into_segmented())
            .map_err(render_error)?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(n as usize)
            .y_label_formatter(&|v| match v {
                SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .x_desc("Mean pages")
            .draw()
            .map_err(render_error)?;

        chart
            .draw_series(rows.iter().enumerate().map(|(i, m)| {
                let color = if highlight == Some(m.journal.as_str()) { HIGHLIGHT_COLOR } else { BAR_COLOR };
                let i = i as u32;
                Rectangle::new(
                    [(0.0, SegmentValue::Exact(i)), (m.mean_length, SegmentValue::Exact(i + 1))],
                    color.mix(0.85).filled(),
                )
            }))
            .map_err(render_error)?;

        root.present().map_err(render_error)?;
    }

    Ok(Chart {
        kind: ChartKind::HorizontalBar,
        title,
        svg,
    })
}

/// Vertical bars: one column per journal for the selected year
pub fn yearly(report: &YearlyReport, config: &ChartConfig) -> Result<Chart> {
    let title = format!("Average article length by journal, {}", report.year);

    let n = report.journals.len() as u32;
    let y_end = axis_end(report.journals.iter().map(|j| j.mean_length).fold(0.0, f64::max));
    let labels: Vec<String> = report
        .journals
        .iter()
        .map(|j| truncate_label(&j.journal, 18))
        .collect();

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (config.width, config.height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&title, ("sans-serif", 20))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(50)
            .build_cartesian_2d((0u32..n).into_segmented(), 0f64..y_end)
            .map_err(render_error)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n as usize)
            .x_label_style(("sans-serif", 11))
            .x_label_formatter(&|v| match v {
                SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .y_desc("Mean pages")
            .draw()
            .map_err(render_error)?;

        chart
            .draw_series(report.journals.iter().enumerate().map(|(i, j)| {
                let i = i as u32;
                Rectangle::new(
                    [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), j.mean_length)],
                    BAR_COLOR.mix(0.85).filled(),
                )
            }))
            .map_err(render_error)?;

        root.present().map_err(render_error)?;
    }

    Ok(Chart {
        kind: ChartKind::VerticalBar,
        title,
        svg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_end_has_headroom() {
        assert!((axis_end(10.0) - 11.0).abs() < 1e-9);
        assert_eq!(axis_end(0.0), 1.0);
    }

    #[test]
    fn test_many_journals_grow_the_chart() {
        let means: Vec<JournalMean> = (0..40)
            .map(|i| JournalMean {
                journal: format!("Journal {}", i),
                mean_length: 10.0 + i as f64,
                articles: 3,
            })
            .collect();

        let chart = journal_means(&means, Some("Journal 3"), &ChartConfig::default()).unwrap();
        let expected_height = format!("height=\"{}\"", 80 + ROW_HEIGHT * 40);
        assert!(chart.svg.contains(&expected_height));
    }
}
