//! Co-author graph representation
//!
//! Undirected weighted graph: one node per author, one edge per pair of
//! authors sharing at least one article, weighted by the number of shared
//! articles.

use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Separator between names in an author list
pub const AUTHOR_SEPARATOR: &str = "; ";

/// Edge in the co-author graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoauthorEdge<'g> {
    /// Author with the smaller node index
    pub source: &'g str,

    /// Author with the larger node index
    pub target: &'g str,

    /// Number of shared articles
    pub weight: u32,
}

/// In-memory co-author graph
#[derive(Debug, Clone, Default)]
pub struct CoauthorGraph {
    /// Author names by node index
    names: Vec<String>,

    /// Reverse lookup: author -> node index
    index: HashMap<String, usize>,

    /// Adjacency per node index
    adjacency: Vec<BTreeSet<usize>>,

    /// (low, high) node index pair -> shared article count
    weights: BTreeMap<(usize, usize), u32>,
}

impl CoauthorGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from one optional author list per article
    pub fn from_author_lists<I, S>(lists: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let mut graph = Self::new();
        for authors in lists.into_iter().flatten() {
            graph.add_article(authors.as_ref());
        }
        graph
    }

    /// Record one article's author list
    pub fn add_article(&mut self, authors: &str) {
        let mut ids: Vec<usize> = authors
            .split(AUTHOR_SEPARATOR)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| self.add_node(name))
            .collect();

        // an author listed twice still co-authors the article once
        ids.sort_unstable();
        ids.dedup();

        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                self.add_edge(a, b);
            }
        }
    }

    fn add_node(&mut self, name: &str) -> usize {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), id);
        self.adjacency.push(BTreeSet::new());
        id
    }

    fn add_edge(&mut self, a: usize, b: usize) {
        let key = if a < b { (a, b) } else { (b, a) };
        *self.weights.entry(key).or_insert(0) += 1;
        self.adjacency[a].insert(b);
        self.adjacency[b].insert(a);
    }

    /// Get node count
    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    /// Get edge count
    pub fn edge_count(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether `author` appears in the graph
    pub fn contains(&self, author: &str) -> bool {
        self.index.contains_key(author)
    }

    /// Author names in node-index order
    pub fn authors(&self) -> &[String] {
        &self.names
    }

    /// Node index of `author`
    pub fn node_id(&self, author: &str) -> Option<usize> {
        self.index.get(author).copied()
    }

    /// Number of articles shared by `a` and `b` (0 when never co-authored)
    pub fn weight(&self, a: &str, b: &str) -> u32 {
        match (self.node_id(a), self.node_id(b)) {
            (Some(x), Some(y)) if x != y => {
                let key = if x < y { (x, y) } else { (y, x) };
                self.weights.get(&key).copied().unwrap_or(0)
            }
            _ => 0,
        }
    }

    /// Co-authors of `author`
    pub fn neighbors(&self, author: &str) -> Vec<&str> {
        self.node_id(author)
            .map(|id| {
                self.adjacency[id]
                    .iter()
                    .map(|&n| self.names[n].as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of distinct co-authors of `author`
    pub fn degree(&self, author: &str) -> usize {
        self.node_id(author)
            .map(|id| self.adjacency[id].len())
            .unwrap_or(0)
    }

    /// Degree by node index
    pub fn degree_of(&self, id: usize) -> usize {
        self.adjacency.get(id).map(BTreeSet::len).unwrap_or(0)
    }

    /// All edges ordered by node index pair
    pub fn edges(&self) -> impl Iterator<Item = CoauthorEdge<'_>> {
        self.weights.iter().map(|(&(a, b), &weight)| CoauthorEdge {
            source: &self.names[a],
            target: &self.names[b],
            weight,
        })
    }

    /// Edges as node index pairs with weights
    pub fn indexed_edges(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        self.weights.iter().map(|(&(a, b), &w)| (a, b, w))
    }

    /// Heaviest `n` collaborations, ties broken by author names
    pub fn strongest_edges(&self, n: usize) -> Vec<CoauthorEdge<'_>> {
        let mut edges: Vec<_> = self.edges().collect();
        edges.sort_by(|x, y| {
            y.weight
                .cmp(&x.weight)
                .then_with(|| x.source.cmp(y.source))
                .then_with(|| x.target.cmp(y.target))
        });
        edges.truncate(n);
        edges
    }

    /// Ego network of `author`: the author, every co-author, and all edges
    /// among them. `None` when the author is not in the graph.
    pub fn ego(&self, author: &str) -> Option<Self> {
        let center = self.node_id(author)?;
        let mut keep: BTreeSet<usize> = self.adjacency[center].clone();
        keep.insert(center);
        Some(self.induced(&keep))
    }

    /// Induced subgraph of the `n` highest-degree authors. Authors in
    /// `pinned` are always kept.
    pub fn top_by_degree(&self, n: usize, pinned: &[&str]) -> Self {
        if self.node_count() <= n {
            return self.clone();
        }

        let mut keep: BTreeSet<usize> = pinned
            .iter()
            .filter_map(|name| self.node_id(name))
            .collect();

        let mut ranked: Vec<usize> = (0..self.node_count()).collect();
        ranked.sort_by(|&x, &y| {
            self.degree_of(y)
                .cmp(&self.degree_of(x))
                .then_with(|| self.names[x].cmp(&self.names[y]))
        });

        for id in ranked {
            if keep.len() >= n.max(pinned.len()) {
                break;
            }
            keep.insert(id);
        }

        self.induced(&keep)
    }

    /// Subgraph on `keep`, keeping node order
    fn induced(&self, keep: &BTreeSet<usize>) -> Self {
        let mut sub = Self::new();
        for &id in keep {
            sub.add_node(&self.names[id]);
        }
        for (&(a, b), &w) in &self.weights {
            if keep.contains(&a) && keep.contains(&b) {
                let x = sub.index[&self.names[a]];
                let y = sub.index[&self.names[b]];
                let key = if x < y { (x, y) } else { (y, x) };
                sub.weights.insert(key, w);
                sub.adjacency[x].insert(y);
                sub.adjacency[y].insert(x);
            }
        }
        sub
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_construction() {
        let graph = CoauthorGraph::from_author_lists(vec![Some("A; B; C")]);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.weight("A", "B"), 1);
        assert_eq!(graph.weight("A", "C"), 1);
        assert_eq!(graph.weight("B", "C"), 1);

        let edges: Vec<_> = graph.edges().map(|e| (e.source, e.target, e.weight)).collect();
        assert_eq!(edges, vec![("A", "B", 1), ("A", "C", 1), ("B", "C", 1)]);
    }

    #[test]
    fn test_shared_articles_accumulate() {
        let graph = CoauthorGraph::from_author_lists(vec![Some("A; B"), Some("A; B")]);
        assert_eq!(graph.weight("A", "B"), 2);
        assert_eq!(graph.weight("B", "A"), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_missing_lists_and_self_loops() {
        let graph = CoauthorGraph::from_author_lists(vec![None, Some("A; A; B"), Some("Solo"), None]);

        assert_eq!(graph.node_count(), 3);
        assert!(graph.contains("Solo"));
        assert_eq!(graph.degree("Solo"), 0);
        assert_eq!(graph.weight("A", "A"), 0);
        assert_eq!(graph.weight("A", "B"), 1);
    }

    #[test]
    fn test_weight_equals_shared_article_count() {
        let lists = vec![
            Some("Ann Lee; Bo Chen; Cy Diaz"),
            Some("Bo Chen; Cy Diaz"),
            Some("Ann Lee; Cy Diaz"),
            Some("Cy Diaz; Bo Chen; Dee Fox"),
            None,
        ];
        let graph = CoauthorGraph::from_author_lists(lists.clone());

        for a in graph.authors() {
            for b in graph.authors() {
                if a == b {
                    continue;
                }
                let expected = lists
                    .iter()
                    .flatten()
                    .filter(|list| {
                        let names: Vec<&str> = list.split(AUTHOR_SEPARATOR).collect();
                        names.contains(&a.as_str()) && names.contains(&b.as_str())
                    })
                    .count() as u32;
                assert_eq!(graph.weight(a, b), expected, "{} / {}", a, b);
            }
        }
    }

    #[test]
    fn test_ego_network() {
        let graph = CoauthorGraph::from_author_lists(vec![
            Some("A; B"),
            Some("B; C"),
            Some("A; C"),
            Some("C; D"),
        ]);

        let ego = graph.ego("A").unwrap();
        assert_eq!(ego.node_count(), 3);
        assert!(!ego.contains("D"));
        // edges among neighbors are kept
        assert_eq!(ego.weight("B", "C"), 1);
        assert_eq!(ego.edge_count(), 3);

        assert!(graph.ego("Nobody").is_none());
    }

    #[test]
    fn test_top_by_degree_keeps_pinned() {
        let graph = CoauthorGraph::from_author_lists(vec![
            Some("Hub; A"),
            Some("Hub; B"),
            Some("Hub; C"),
            Some("X; Y"),
        ]);

        let top = graph.top_by_degree(2, &[]);
        assert_eq!(top.node_count(), 2);
        assert!(top.contains("Hub"));

        let pinned = graph.top_by_degree(2, &["Y"]);
        assert!(pinned.contains("Y"));
        assert_eq!(pinned.node_count(), 2);
    }

    #[test]
    fn test_strongest_edges() {
        let graph = CoauthorGraph::from_author_lists(vec![
            Some("A; B"),
            Some("A; B"),
            Some("C; D"),
            Some("A; C"),
        ]);
        let strongest = graph.strongest_edges(2);
        assert_eq!(strongest[0].weight, 2);
        assert_eq!((strongest[0].source, strongest[0].target), ("A", "B"));
        assert_eq!(strongest.len(), 2);
    }
}
