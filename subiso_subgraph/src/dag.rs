//! Rooted DAG over the query graph.
//!
//! A breadth-first sweep from the root orients every query edge from the
//! endpoint processed first to the endpoint processed later. The matcher
//! binds parents before children and checks each child against all of its
//! parents.

use contracts::*;
use subiso_common::{Graph, VertexId};
use tracing::debug;

/// Parent and child relations of one query vertex.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DagNode {
    parents: Vec<VertexId>,
    children: Vec<VertexId>,
}

impl DagNode {
    /// Query vertices that must be bound before this one.
    #[must_use]
    pub fn parents(&self) -> &[VertexId] {
        &self.parents
    }

    /// Query vertices constrained by this one.
    #[must_use]
    pub fn children(&self) -> &[VertexId] {
        &self.children
    }

    /// True if nothing must be bound first.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// True if the sweep has not given this vertex any role yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty() && self.children.is_empty()
    }
}

/// The query graph oriented into parent/child relations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryDag {
    root: VertexId,
    nodes: Vec<DagNode>,
    reached: Vec<bool>,
}

impl QueryDag {
    /// Orients `query` from `root`.
    ///
    /// Vertices outside the root's component keep empty nodes and are
    /// reported by [`QueryDag::unreached`].
    #[debug_requires(root.as_usize() < query.vertex_count())]
    #[debug_ensures(ret.nodes.len() == query.vertex_count())]
    pub fn build<Q: Graph>(query: &Q, root: VertexId) -> Self {
        let n = query.vertex_count();
        let mut nodes = vec![DagNode::default(); n];
        let mut frontier: Vec<VertexId> = vec![root];
        let mut pointer = 0;

        while pointer < frontier.len() {
            let current = frontier[pointer];
            for neighbor in query.neighbors(current) {
                if nodes[neighbor.as_usize()].is_empty() {
                    nodes[current.as_usize()].children.push(neighbor);
                    // Query graphs are tens of vertices; a scan is enough.
                    if !frontier.contains(&neighbor) {
                        frontier.push(neighbor);
                    }
                } else {
                    nodes[current.as_usize()].parents.push(neighbor);
                }
            }
            pointer += 1;
        }

        let mut reached = vec![false; n];
        for v in &frontier {
            reached[v.as_usize()] = true;
        }

        let dag = Self {
            root,
            nodes,
            reached,
        };
        debug!(
            "Built query DAG rooted at {}: {} vertices, {} edges",
            root,
            n,
            dag.edge_count()
        );
        dag
    }

    /// Vertex the sweep started from.
    #[must_use]
    pub const fn root(&self) -> VertexId {
        self.root
    }

    /// Number of query vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True for an empty query.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node of `v`.
    #[must_use]
    pub fn node(&self, v: VertexId) -> &DagNode {
        &self.nodes[v.as_usize()]
    }

    /// Parents of `v`.
    #[must_use]
    pub fn parents(&self, v: VertexId) -> &[VertexId] {
        &self.nodes[v.as_usize()].parents
    }

    /// Children of `v`.
    #[must_use]
    pub fn children(&self, v: VertexId) -> &[VertexId] {
        &self.nodes[v.as_usize()].children
    }

    /// Number of oriented edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.parents.len()).sum()
    }

    /// Every oriented edge as `(parent, child)`.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.nodes.iter().enumerate().flat_map(|(child, node)| {
            node.parents
                .iter()
                .map(move |&parent| (parent, VertexId::from(child)))
        })
    }

    /// Vertices the sweep never reached.
    #[must_use]
    pub fn unreached(&self) -> Vec<VertexId> {
        self.reached
            .iter()
            .enumerate()
            .filter(|(_, reached)| !**reached)
            .map(|(v, _)| VertexId::from(v))
            .collect()
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use quickcheck::quickcheck;
    use std::collections::HashSet;
    use subiso_common::CsrGraph;

    use crate::test_support::ConnectedGraph;

    quickcheck! {
        fn prop_only_the_root_has_no_parents(g: ConnectedGraph, root: u32) -> bool {
            let q = CsrGraph::unlabeled(g.n as usize, &g.edges);
            let root = VertexId::new(root % g.n);
            let dag = QueryDag::build(&q, root);
            (0..g.n).map(VertexId::new).all(|v| dag.node(v).is_root() == (v == root))
        }

        fn prop_oriented_edges_cover_query_once(g: ConnectedGraph, root: u32) -> bool {
            let q = CsrGraph::unlabeled(g.n as usize, &g.edges);
            let dag = QueryDag::build(&q, VertexId::new(root % g.n));

            let undirected: HashSet<(VertexId, VertexId)> = q.edges().collect();
            let oriented: Vec<(VertexId, VertexId)> = dag
                .edges()
                .map(|(p, c)| if p < c { (p, c) } else { (c, p) })
                .collect();
            let unique: HashSet<(VertexId, VertexId)> = oriented.iter().copied().collect();

            oriented.len() == unique.len() && unique == undirected
        }

        fn prop_children_mirror_parents(g: ConnectedGraph) -> bool {
            let q = CsrGraph::unlabeled(g.n as usize, &g.edges);
            let dag = QueryDag::build(&q, VertexId::new(0));
            let mirrored = dag.edges().all(|(p, c)| dag.children(p).contains(&c));
            mirrored
        }
    }
}
