//! Node-link diagram of the co-author network

use super::{render_error, Chart, ChartKind, BAR_COLOR, HIGHLIGHT_COLOR};
use bizpub_common::config::ChartConfig;
use bizpub_common::errors::Result;
use bizpub_explore::NetworkReport;
use plotters::prelude::*;

/// Beyond this many authors names are left off the diagram
const LABEL_LIMIT: usize = 60;

/// Layout coordinates live in [-1, 1]; leave room for labels
const EXTENT: f64 = 1.15;

pub fn render(report: &NetworkReport, config: &ChartConfig) -> Result<Chart> {
    let title = match &report.focus {
        Some(author) => format!("Co-authors of {}", author),
        None => "Co-authorship network".to_string(),
    };

    let max_weight = report.links.iter().map(|l| l.weight).max().unwrap_or(1).max(1);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (config.width, config.height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&title, ("sans-serif", 20))
            .margin(20)
            .build_cartesian_2d(-EXTENT..EXTENT, -EXTENT..EXTENT)
            .map_err(render_error)?;

        chart
            .draw_series(report.links.iter().map(|link| {
                let a = report.nodes[link.source].position;
                let b = report.nodes[link.target].position;
                let width = 1 + link.weight * 4 / max_weight;
                PathElement::new(vec![(a.x, a.y), (b.x, b.y)], BLACK.mix(0.35).stroke_width(width))
            }))
            .map_err(render_error)?;

        chart
            .draw_series(report.nodes.iter().map(|node| {
                let radius = 3 + node.degree.min(12) as i32;
                let color = if node.focus { HIGHLIGHT_COLOR } else { BAR_COLOR };
                Circle::new((node.position.x, node.position.y), radius, color.filled())
            }))
            .map_err(render_error)?;

        if report.nodes.len() <= LABEL_LIMIT {
            chart
                .draw_series(report.nodes.iter().map(|node| {
                    Text::new(
                        node.name.clone(),
                        (node.position.x, node.position.y),
                        ("sans-serif", 11).into_font(),
                    )
                }))
                .map_err(render_error)?;
        }

        root.present().map_err(render_error)?;
    }

    Ok(Chart {
        kind: ChartKind::Network,
        title,
        svg,
    })
}
