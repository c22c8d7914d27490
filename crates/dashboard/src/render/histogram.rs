//! Page-length histogram

use super::{render_error, Chart, ChartKind, BAR_COLOR};
use bizpub_common::config::ChartConfig;
use bizpub_common::errors::Result;
use bizpub_explore::LengthReport;
use plotters::prelude::*;

pub fn render(report: &LengthReport, config: &ChartConfig) -> Result<Chart> {
    let title = format!("{}: article page counts", report.journal);
    let hist = &report.histogram;

    let x_start = hist.bins.first().map(|b| b.start).unwrap_or(0);
    let x_end = hist.bins.last().map(|b| b.end + 1).unwrap_or(x_start + 1);
    let max_count = hist.max_count() as u32;
    let y_end = max_count + (max_count / 10).max(1);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (config.width, config.height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&title, ("sans-serif", 20))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x_start..x_end, 0u32..y_end)
            .map_err(render_error)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Pages")
            .y_desc("Articles")
            .draw()
            .map_err(render_error)?;

        chart
            .draw_series(hist.bins.iter().map(|bin| {
                Rectangle::new(
                    [(bin.start, 0), (bin.end + 1, bin.count as u32)],
                    BAR_COLOR.mix(0.85).filled(),
                )
            }))
            .map_err(render_error)?;

        root.present().map_err(render_error)?;
    }

    Ok(Chart {
        kind: ChartKind::Histogram,
        title,
        svg,
    })
}
