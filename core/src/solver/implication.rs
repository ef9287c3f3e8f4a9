use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};

use crate::*;

/// A hidden cell taken at one polarity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Node {
    pub coords: Coord2,
    pub polarity: Polarity,
}

impl Node {
    pub const fn new(coords: Coord2, polarity: Polarity) -> Self {
        Self { coords, polarity }
    }

    pub const fn mine(coords: Coord2) -> Self {
        Self::new(coords, Polarity::Mine)
    }

    pub const fn safe(coords: Coord2) -> Self {
        Self::new(coords, Polarity::Safe)
    }

    pub const fn negated(self) -> Self {
        Self::new(self.coords, self.polarity.opposite())
    }
}

/// Directed graph where `a -> b` reads "if `a` holds then `b` holds".
#[derive(Clone, Debug, Default)]
pub struct ImplicationGraph {
    edges: HashMap<Node, HashSet<Node>>,
    reach_cache: HashMap<Node, HashSet<Node>>,
}

impl ImplicationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `lhs` and `rhs` cannot hold together.
    ///
    /// Both directions are stored: `lhs` forces the negation of `rhs` and `rhs` forces the negation of
    /// `lhs`.
    pub fn add_contradiction(&mut self, lhs: Node, rhs: Node) {
        self.add_edge(lhs, rhs.negated());
        self.add_edge(rhs, lhs.negated());
    }

    fn add_edge(&mut self, from: Node, to: Node) {
        self.reach_cache.clear();
        self.edges.entry(from).or_default().insert(to);
    }

    pub fn implies(&self, from: Node, to: Node) -> bool {
        self.edges.get(&from).is_some_and(|targets| targets.contains(&to))
    }

    pub fn has_node(&self, node: Node) -> bool {
        self.edges.contains_key(&node)
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(HashSet::len).sum()
    }

    /// Every node reachable from `start`, including `start` itself.
    pub fn reachable(&mut self, start: Node) -> &HashSet<Node> {
        if !self.reach_cache.contains_key(&start) {
            let visited = self.traverse(start);
            self.reach_cache.insert(start, visited);
        }
        &self.reach_cache[&start]
    }

    fn traverse(&self, start: Node) -> HashSet<Node> {
        let mut visited = HashSet::new();
        let mut stack = Vec::from([start]);

        while let Some(node) = stack.pop() {
            if !visited.insert(node) {
                continue;
            }
            if let Some(targets) = self.edges.get(&node) {
                stack.extend(targets.iter().copied().filter(|next| !visited.contains(next)));
            }
        }

        visited
    }

    /// Whether assuming `node` eventually forces its own negation.
    pub fn refutes_itself(&mut self, node: Node) -> bool {
        if !self.has_node(node) {
            return false;
        }
        let negated = node.negated();
        self.reachable(node).contains(&negated)
    }
}
