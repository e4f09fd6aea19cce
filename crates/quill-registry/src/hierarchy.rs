//! Inheritance graph over host types.
//!
//! Edges point from a type to each of its direct supertypes (base class and
//! implemented or extended interfaces).

use petgraph::algo::has_path_connecting;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use rustc_hash::FxHashMap;

use quill_core::TypeHash;

#[derive(Debug, Default, Clone)]
pub struct TypeHierarchy {
    graph: DiGraph<TypeHash, ()>,
    nodes: FxHashMap<TypeHash, NodeIndex>,
}

impl TypeHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type node, returning the existing node if already present.
    pub fn add_type(&mut self, hash: TypeHash) -> NodeIndex {
        if let Some(&node) = self.nodes.get(&hash) {
            return node;
        }
        let node = self.graph.add_node(hash);
        self.nodes.insert(hash, node);
        node
    }

    /// Record that `sub` directly derives from or implements `sup`.
    pub fn add_supertype(&mut self, sub: TypeHash, sup: TypeHash) {
        let a = self.add_type(sub);
        let b = self.add_type(sup);
        self.graph.update_edge(a, b, ());
    }

    /// Whether `sub` is `sup` or transitively derives from it.
    pub fn is_subtype(&self, sub: TypeHash, sup: TypeHash) -> bool {
        if sub == sup {
            return true;
        }
        match (self.nodes.get(&sub), self.nodes.get(&sup)) {
            (Some(&a), Some(&b)) => has_path_connecting(&self.graph, a, b, None),
            _ => false,
        }
    }

    /// All transitive supertypes of `hash`, nearest first along each path.
    pub fn supertypes(&self, hash: TypeHash) -> Vec<TypeHash> {
        let Some(&start) = self.nodes.get(&hash) else {
            return Vec::new();
        };
        let mut dfs = Dfs::new(&self.graph, start);
        let mut out = Vec::new();
        while let Some(node) = dfs.next(&self.graph) {
            if node != start {
                out.push(self.graph[node]);
            }
        }
        out
    }
}
