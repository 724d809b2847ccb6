//! Undirected graph of articles and the links between them.

use petgraph::algo::dijkstra;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use wikigraph_scanner::PageResult;

/// Article titles joined by undirected, unweighted link edges.
///
/// Titles are unique: adding a title twice returns the existing node, and
/// linking two articles twice keeps a single edge.
#[derive(Debug, Clone, Default)]
pub struct ArticleGraph {
    graph: UnGraph<String, ()>,
    index: HashMap<String, NodeIndex>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub max_degree: usize,
    /// Longest shortest path between two connected articles.
    pub max_path: usize,
}

/// Flat node/link export, the shape force-directed graph viewers consume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub degree: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
}

impl ArticleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from crawl results: every fetched page is joined to each
    /// article it links to. Failed pages add nothing.
    pub fn from_results(results: &[PageResult]) -> Self {
        let mut graph = Self::new();
        graph.extend_from_results(results);
        graph
    }

    pub fn extend_from_results(&mut self, results: &[PageResult]) {
        for page in results.iter().filter(|r| r.is_ok()) {
            self.add_article(&page.title);
            for link in &page.links {
                self.add_link(&page.title, &link.title);
            }
        }
    }

    pub fn add_article(&mut self, title: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(title) {
            return idx;
        }
        let idx = self.graph.add_node(title.to_string());
        self.index.insert(title.to_string(), idx);
        idx
    }

    /// Join two articles. Self-links only register the article.
    pub fn add_link(&mut self, from: &str, to: &str) {
        let a = self.add_article(from);
        let b = self.add_article(to);
        if a != b {
            self.graph.update_edge(a, b, ());
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, title: &str) -> bool {
        self.index.contains_key(title)
    }

    pub fn node_index(&self, title: &str) -> Option<NodeIndex> {
        self.index.get(title).copied()
    }

    pub fn title(&self, idx: NodeIndex) -> &str {
        &self.graph[idx]
    }

    /// Titles in insertion order.
    pub fn titles(&self) -> Vec<&str> {
        self.graph.node_weights().map(|t| t.as_str()).collect()
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn edge_endpoints(&self) -> Vec<(NodeIndex, NodeIndex)> {
        self.graph
            .edge_references()
            .map(|e| (e.source(), e.target()))
            .collect()
    }

    pub fn edges(&self) -> Vec<(&str, &str)> {
        self.graph
            .edge_references()
            .map(|e| (self.graph[e.source()].as_str(), self.graph[e.target()].as_str()))
            .collect()
    }

    pub fn has_link(&self, a: &str, b: &str) -> bool {
        match (self.node_index(a), self.node_index(b)) {
            (Some(a), Some(b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    pub fn degree(&self, title: &str) -> usize {
        self.node_index(title)
            .map(|idx| self.graph.neighbors(idx).count())
            .unwrap_or(0)
    }

    pub fn max_degree(&self) -> usize {
        self.graph
            .node_indices()
            .map(|idx| self.graph.neighbors(idx).count())
            .max()
            .unwrap_or(0)
    }

    /// Longest shortest path between any two connected articles, in hops.
    /// Components are measured separately and the widest one wins.
    pub fn max_path(&self) -> usize {
        self.graph
            .node_indices()
            .filter_map(|start| {
                dijkstra(&self.graph, start, None, |_| 1usize)
                    .values()
                    .copied()
                    .max()
            })
            .max()
            .unwrap_or(0)
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            nodes: self.node_count(),
            edges: self.edge_count(),
            max_degree: self.max_degree(),
            max_path: self.max_path(),
        }
    }

    pub fn to_graph_data(&self) -> GraphData {
        let nodes = self
            .graph
            .node_indices()
            .map(|idx| GraphNode {
                id: self.graph[idx].clone(),
                degree: self.graph.neighbors(idx).count(),
            })
            .collect();
        let links = self
            .edges()
            .into_iter()
            .map(|(source, target)| GraphLink {
                source: source.to_string(),
                target: target.to_string(),
            })
            .collect();
        GraphData { nodes, links }
    }
}
