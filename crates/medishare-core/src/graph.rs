//! Undirected relationship graph over medicine names.
//!
//! Nothing populates the graph yet; it is filled only through explicit
//! [`MedicineGraph::add_edge`] calls. An instance is owned by its caller and
//! carries no internal synchronization.

use std::collections::{HashMap, HashSet, VecDeque};

/// Adjacency list keyed by medicine name.
#[derive(Debug, Clone, Default)]
pub struct MedicineGraph {
    adjacency: HashMap<String, Vec<String>>,
}

impl MedicineGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Relates two medicines in both directions.
    ///
    /// Repeating an edge appends a duplicate neighbour entry; traversal
    /// tolerates duplicates.
    pub fn add_edge(&mut self, a: &str, b: &str) {
        self.adjacency
            .entry(a.to_string())
            .or_default()
            .push(b.to_string());
        self.adjacency
            .entry(b.to_string())
            .or_default()
            .push(a.to_string());
    }

    /// Direct neighbours of `name`, empty if the name is unknown.
    pub fn related(&self, name: &str) -> &[String] {
        self.adjacency
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.adjacency.contains_key(name)
    }

    /// Breadth-first search from `start`, at most `depth` hops out.
    ///
    /// Returns every reached name except `start`, each once, in discovery
    /// order. The visited set guarantees termination on cyclic graphs.
    ///
    /// `depth = 1` yields direct neighbours; `depth = 2` adds their
    /// neighbours. Ports of traversals that stop one hop short must add one.
    pub fn find_related(&self, start: &str, depth: usize) -> Vec<String> {
        let mut result = Vec::new();
        if depth == 0 || !self.contains(start) {
            return result;
        }

        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<(&str, usize)> = VecDeque::new();
        visited.insert(start);
        queue.push_back((start, 0));

        while let Some((current, hops)) = queue.pop_front() {
            if hops == depth {
                continue;
            }

            for neighbour in self.related(current) {
                if visited.insert(neighbour.as_str()) {
                    result.push(neighbour.clone());
                    queue.push_back((neighbour.as_str(), hops + 1));
                }
            }
        }

        result
    }
}
