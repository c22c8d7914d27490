//! Force-directed node placement
//!
//! Fruchterman-Reingold spring layout: every pair of authors repels,
//! co-authors attract in proportion to how many articles they share, and
//! the step size cools linearly over the iterations.

use super::graph::CoauthorGraph;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Minimum distance used in force computations
const MIN_DISTANCE: f64 = 0.01;

/// Spring layout parameters
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Number of cooling iterations
    pub iterations: usize,

    /// Seed for the initial random placement
    pub seed: u64,

    /// Initial maximum displacement per iteration
    pub initial_temperature: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: 50,
            seed: 42,
            initial_temperature: 0.1,
        }
    }
}

/// Position of one node in `[-1, 1]²`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Node positions indexed like [`CoauthorGraph::authors`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub positions: Vec<Point>,
}

impl LayoutConfig {
    /// Place every node of `graph`
    pub fn layout(&self, graph: &CoauthorGraph) -> Layout {
        let n = graph.node_count();
        match n {
            0 => return Layout { positions: Vec::new() },
            1 => return Layout { positions: vec![Point { x: 0.0, y: 0.0 }] },
            _ => {}
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut pos: Vec<[f64; 2]> = (0..n).map(|_| [rng.gen::<f64>(), rng.gen::<f64>()]).collect();
        let edges: Vec<(usize, usize, f64)> = graph
            .indexed_edges()
            .map(|(a, b, w)| (a, b, f64::from(w)))
            .collect();

        let k = (1.0 / n as f64).sqrt();
        let mut temperature = self.initial_temperature;
        let cooling = temperature / (self.iterations as f64 + 1.0);

        for _ in 0..self.iterations {
            let mut disp = vec![[0.0f64; 2]; n];

            for i in 0..n {
                for j in (i + 1)..n {
                    let dx = pos[i][0] - pos[j][0];
                    let dy = pos[i][1] - pos[j][1];
                    let dist = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                    let force = k * k / dist;
                    let (fx, fy) = (dx / dist * force, dy / dist * force);
                    disp[i][0] += fx;
                    disp[i][1] += fy;
                    disp[j][0] -= fx;
                    disp[j][1] -= fy;
                }
            }

            for &(a, b, weight) in &edges {
                let dx = pos[a][0] - pos[b][0];
                let dy = pos[a][1] - pos[b][1];
                let dist = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                let force = weight * dist * dist / k;
                let (fx, fy) = (dx / dist * force, dy / dist * force);
                disp[a][0] -= fx;
                disp[a][1] -= fy;
                disp[b][0] += fx;
                disp[b][1] += fy;
            }

            for (p, d) in pos.iter_mut().zip(&disp) {
                let len = (d[0] * d[0] + d[1] * d[1]).sqrt().max(MIN_DISTANCE);
                let step = len.min(temperature);
                p[0] += d[0] / len * step;
                p[1] += d[1] / len * step;
            }

            temperature -= cooling;
        }

        Layout { positions: rescale(&pos) }
    }
}

/// Center on the origin and scale the largest coordinate to 1
fn rescale(pos: &[[f64; 2]]) -> Vec<Point> {
    let n = pos.len() as f64;
    let cx = pos.iter().map(|p| p[0]).sum::<f64>() / n;
    let cy = pos.iter().map(|p| p[1]).sum::<f64>() / n;

    let extent = pos
        .iter()
        .map(|p| (p[0] - cx).abs().max((p[1] - cy).abs()))
        .fold(0.0f64, f64::max);
    let scale = if extent > 0.0 { 1.0 / extent } else { 1.0 };

    pos.iter()
        .map(|p| Point {
            x: (p[0] - cx) * scale,
            y: (p[1] - cy) * scale,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_with_tail() -> CoauthorGraph {
        CoauthorGraph::from_author_lists(vec![Some("A; B; C"), Some("C; D"), Some("E")])
    }

    #[test]
    fn test_empty_and_single() {
        let config = LayoutConfig::default();
        assert!(config.layout(&CoauthorGraph::new()).positions.is_empty());

        let single = CoauthorGraph::from_author_lists(vec![Some("Solo")]);
        assert_eq!(config.layout(&single).positions, vec![Point { x: 0.0, y: 0.0 }]);
    }

    #[test]
    fn test_deterministic_for_seed() {
        let graph = triangle_with_tail();
        let config = LayoutConfig::default();
        assert_eq!(config.layout(&graph), config.layout(&graph));

        let other = LayoutConfig { seed: 7, ..LayoutConfig::default() };
        assert_ne!(config.layout(&graph), other.layout(&graph));
    }

    #[test]
    fn test_positions_bounded() {
        let graph = triangle_with_tail();
        let layout = LayoutConfig::default().layout(&graph);

        assert_eq!(layout.positions.len(), graph.node_count());
        for p in &layout.positions {
            assert!(p.x.is_finite() && p.y.is_finite());
            assert!(p.x.abs() <= 1.0 + 1e-9);
            assert!(p.y.abs() <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn test_coauthors_end_up_closer_than_isolated_node() {
        let graph = triangle_with_tail();
        let layout = LayoutConfig { iterations: 200, ..LayoutConfig::default() }.layout(&graph);
        let at = |name: &str| layout.positions[graph.node_id(name).unwrap()];
        let dist = |p: Point, q: Point| ((p.x - q.x).powi(2) + (p.y - q.y).powi(2)).sqrt();

        assert!(dist(at("A"), at("B")) < dist(at("A"), at("E")));
    }
}
