//! Read-only graph interface and the CSR graph used by the loaders.

use std::ops::Range;

use tracing::warn;

use crate::{Label, VertexId};

/// Read-only view of an undirected, vertex-labeled graph.
///
/// Neighbors are stored in one flattened list; `neighbor_range` yields the
/// offsets belonging to a vertex and `neighbor_at` resolves an offset.
pub trait Graph {
    /// Number of vertices; ids are `0..vertex_count()`.
    fn vertex_count(&self) -> usize;

    /// Offsets of `v`'s neighbors in the flattened neighbor list.
    fn neighbor_range(&self, v: VertexId) -> Range<usize>;

    /// Neighbor stored at flattened offset `i`.
    fn neighbor_at(&self, i: usize) -> VertexId;

    /// Whether `u` and `v` share an edge.
    fn is_neighbor(&self, u: VertexId, v: VertexId) -> bool;

    /// Label of `v`.
    fn label(&self, _v: VertexId) -> Label {
        Label::default()
    }

    /// Iterates the neighbors of `v`.
    fn neighbors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.neighbor_range(v).map(|i| self.neighbor_at(i))
    }

    /// Number of neighbors of `v`.
    fn degree(&self, v: VertexId) -> usize {
        self.neighbor_range(v).len()
    }
}

/// Undirected graph in compressed sparse row form.
///
/// Each adjacency slice is sorted, so adjacency tests are a binary search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CsrGraph {
    /// `offsets[v]..offsets[v + 1]` indexes `neighbors` for vertex `v`.
    offsets: Vec<usize>,
    /// Flattened, per-vertex sorted neighbor lists.
    neighbors: Vec<VertexId>,
    /// Label per vertex.
    labels: Vec<Label>,
}

impl CsrGraph {
    /// Builds a graph from vertex labels and an undirected edge list.
    ///
    /// Duplicate edges collapse into one, self-loops are dropped.
    ///
    /// # Panics
    ///
    /// Panics if an edge endpoint is not a vertex of the graph.
    pub fn from_edges(labels: Vec<Label>, edges: &[(VertexId, VertexId)]) -> Self {
        let n = labels.len();
        let mut adjacency: Vec<Vec<VertexId>> = vec![Vec::new(); n];

        for &(u, v) in edges {
            assert!(
                u.as_usize() < n && v.as_usize() < n,
                "edge ({u}, {v}) references a vertex outside 0..{n}"
            );
            if u == v {
                warn!("Dropping self-loop on vertex {}", u);
                continue;
            }
            adjacency[u.as_usize()].push(v);
            adjacency[v.as_usize()].push(u);
        }

        let mut offsets = Vec::with_capacity(n + 1);
        let mut neighbors = Vec::new();
        offsets.push(0);
        for mut list in adjacency {
            list.sort_unstable();
            list.dedup();
            neighbors.extend(list);
            offsets.push(neighbors.len());
        }

        Self {
            offsets,
            neighbors,
            labels,
        }
    }

    /// Builds an unlabeled graph with `n` vertices.
    pub fn unlabeled(n: usize, edges: &[(u32, u32)]) -> Self {
        let edges: Vec<(VertexId, VertexId)> = edges
            .iter()
            .map(|&(u, v)| (VertexId::new(u), VertexId::new(v)))
            .collect();
        Self::from_edges(vec![Label::default(); n], &edges)
    }

    /// Number of undirected edges.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.neighbors.len() / 2
    }

    /// Sorted neighbor slice of `v`.
    #[must_use]
    pub fn neighbor_slice(&self, v: VertexId) -> &[VertexId] {
        &self.neighbors[self.neighbor_range(v)]
    }

    /// Iterates every edge once as `(u, v)` with `u < v`.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        (0..self.vertex_count()).flat_map(move |u| {
            let u = VertexId::from(u);
            self.neighbor_slice(u)
                .iter()
                .copied()
                .filter(move |&v| u < v)
                .map(move |v| (u, v))
        })
    }
}

impl Graph for CsrGraph {
    fn vertex_count(&self) -> usize {
        self.labels.len()
    }

    fn neighbor_range(&self, v: VertexId) -> Range<usize> {
        self.offsets[v.as_usize()]..self.offsets[v.as_usize() + 1]
    }

    fn neighbor_at(&self, i: usize) -> VertexId {
        self.neighbors[i]
    }

    fn is_neighbor(&self, u: VertexId, v: VertexId) -> bool {
        let (probe, target) = if self.degree(u) <= self.degree(v) {
            (u, v)
        } else {
            (v, u)
        };
        self.neighbor_slice(probe).binary_search(&target).is_ok()
    }

    fn label(&self, v: VertexId) -> Label {
        self.labels[v.as_usize()]
    }

    fn degree(&self, v: VertexId) -> usize {
        self.offsets[v.as_usize() + 1] - self.offsets[v.as_usize()]
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use quickcheck::quickcheck;

    fn build(n: u8, raw: &[(u8, u8)]) -> CsrGraph {
        let n = u32::from(n % 16) + 1;
        let edges: Vec<(u32, u32)> = raw
            .iter()
            .map(|&(a, b)| (u32::from(a) % n, u32::from(b) % n))
            .collect();
        CsrGraph::unlabeled(n as usize, &edges)
    }

    quickcheck! {
        fn prop_adjacency_is_symmetric(n: u8, raw: Vec<(u8, u8)>) -> bool {
            let g = build(n, &raw);
            (0..g.vertex_count()).all(|u| {
                g.neighbors(VertexId::from(u))
                    .all(|w| g.is_neighbor(w, VertexId::from(u)))
            })
        }

        fn prop_is_neighbor_matches_edge_list(n: u8, raw: Vec<(u8, u8)>) -> bool {
            let g = build(n, &raw);
            let n = u32::from(n % 16) + 1;
            (0..n).all(|a| {
                (0..n).all(|b| {
                    let listed = raw.iter().any(|&(x, y)| {
                        let (x, y) = (u32::from(x) % n, u32::from(y) % n);
                        x != y && ((x, y) == (a, b) || (y, x) == (a, b))
                    });
                    g.is_neighbor(VertexId::new(a), VertexId::new(b)) == listed
                })
            })
        }
    }
}
