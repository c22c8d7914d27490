//! Co-authorship network
//!
//! Builds the author collaboration graph from article author lists,
//! optionally narrows it to one author's ego network, and lays it out
//! for drawing.

mod graph;
mod layout;

pub use graph::{CoauthorEdge, CoauthorGraph, AUTHOR_SEPARATOR};
pub use layout::{Layout, LayoutConfig, Point};

use serde::{Deserialize, Serialize};

/// Author node ready for drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkNode {
    pub name: String,

    /// Distinct co-authors within the drawn network
    pub degree: usize,

    pub position: Point,

    /// Whether this is the ego-network center
    pub focus: bool,
}

/// Collaboration link ready for drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkLink {
    /// Index into [`NetworkReport::nodes`]
    pub source: usize,
    pub target: usize,
    pub weight: u32,
}

/// Laid-out co-author network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkReport {
    /// Ego-network center, if one was requested
    pub focus: Option<String>,

    pub nodes: Vec<NetworkNode>,
    pub links: Vec<NetworkLink>,

    /// Authors in the graph before trimming for display
    pub total_authors: usize,

    /// Collaborations in the graph before trimming for display
    pub total_links: usize,

    /// Heaviest collaborations as (author, author, shared articles)
    pub strongest: Vec<(String, String, u32)>,
}

impl NetworkReport {
    /// Lay out `graph` (already filtered and trimmed) for drawing
    pub fn build(
        graph: &CoauthorGraph,
        focus: Option<&str>,
        total_authors: usize,
        total_links: usize,
        layout: &LayoutConfig,
    ) -> Self {
        let positions = layout.layout(graph).positions;

        let nodes = graph
            .authors()
            .iter()
            .zip(positions)
            .enumerate()
            .map(|(id, (name, position))| NetworkNode {
                name: name.clone(),
                degree: graph.degree_of(id),
                position,
                focus: focus == Some(name.as_str()),
            })
            .collect();

        let links = graph
            .indexed_edges()
            .map(|(source, target, weight)| NetworkLink { source, target, weight })
            .collect();

        let strongest = graph
            .strongest_edges(5)
            .into_iter()
            .map(|e| (e.source.to_string(), e.target.to_string(), e.weight))
            .collect();

        Self {
            focus: focus.map(String::from),
            nodes,
            links,
            total_authors,
            total_links,
            strongest,
        }
    }

    /// Whether some authors were left out of the drawing
    pub fn is_trimmed(&self) -> bool {
        self.nodes.len() < self.total_authors
    }
}
