//! Independent checks of an emitted embedding.

use std::collections::HashSet;

use subiso_common::{CandidateSet, Graph, VecCandidateSet, VertexId};
use thiserror::Error;

use crate::embedding::Embedding;

/// Why an embedding is not a valid subgraph isomorphism.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Violation {
    /// Two query vertices share a data vertex.
    #[error("data vertex {0} is assigned twice")]
    DuplicateVertex(VertexId),

    /// A data vertex is not among its query vertex's candidates.
    #[error("data vertex {data} is not a candidate of query vertex {query}")]
    NotACandidate {
        /// Query vertex.
        query: VertexId,
        /// Assigned data vertex.
        data: VertexId,
    },

    /// A query edge maps onto a non-edge.
    #[error("query edge ({query_u}, {query_v}) maps to non-edge ({data_u}, {data_v})")]
    MissingEdge {
        /// First query endpoint.
        query_u: VertexId,
        /// Second query endpoint.
        query_v: VertexId,
        /// Image of `query_u`.
        data_u: VertexId,
        /// Image of `query_v`.
        data_v: VertexId,
    },

    /// The embedding does not cover the query.
    #[error("embedding maps {found} vertices, query has {expected}")]
    WrongLength {
        /// Number of query vertices.
        expected: usize,
        /// Length of the embedding.
        found: usize,
    },
}

/// Checks injectivity, candidate membership and edge preservation of
/// `embedding` against the uncompacted `candidates`.
///
/// # Errors
///
/// Returns the first [`Violation`] found.
pub fn verify_embedding<D: Graph, Q: Graph>(
    data: &D,
    query: &Q,
    candidates: &VecCandidateSet,
    embedding: &Embedding,
) -> Result<(), Violation> {
    check(data, query.vertex_count(), query_edges(query), candidates, embedding)
}

/// Every query edge once as `(u, v)` with `u < v`, read from the query graph.
pub(crate) fn query_edges<Q: Graph>(query: &Q) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
    (0..query.vertex_count())
        .map(VertexId::from)
        .flat_map(move |u| query.neighbors(u).filter(move |&v| u < v).map(move |v| (u, v)))
}

pub(crate) fn check<D: Graph>(
    data: &D,
    query_vertex_count: usize,
    edges: impl IntoIterator<Item = (VertexId, VertexId)>,
    candidates: &VecCandidateSet,
    embedding: &Embedding,
) -> Result<(), Violation> {
    if embedding.len() != query_vertex_count {
        return Err(Violation::WrongLength {
            expected: query_vertex_count,
            found: embedding.len(),
        });
    }

    let mut seen = HashSet::with_capacity(embedding.len());
    for (_, d) in embedding.iter() {
        if !seen.insert(d) {
            return Err(Violation::DuplicateVertex(d));
        }
    }

    for (q, d) in embedding.iter() {
        let listed = (0..candidates.size(q)).any(|pos| candidates.get(q, pos) == d);
        if !listed {
            return Err(Violation::NotACandidate { query: q, data: d });
        }
    }

    for (u, v) in edges {
        let (data_u, data_v) = (embedding.get(u), embedding.get(v));
        if !data.is_neighbor(data_u, data_v) {
            return Err(Violation::MissingEdge {
                query_u: u,
                query_v: v,
                data_u,
                data_v,
            });
        }
    }

    Ok(())
}

/// Snapshot of the uncompacted input used to check embeddings during a run.
#[derive(Clone, Debug)]
pub(crate) struct Verifier {
    candidates: VecCandidateSet,
    edges: Vec<(VertexId, VertexId)>,
}

impl Verifier {
    /// Copies the candidate lists; must run before compaction.
    pub(crate) fn snapshot<C: CandidateSet>(
        candidates: &C,
        edges: Vec<(VertexId, VertexId)>,
    ) -> Self {
        let lists = (0..candidates.query_vertex_count())
            .map(VertexId::from)
            .map(|q| (0..candidates.size(q)).map(|pos| candidates.get(q, pos)).collect())
            .collect();
        Self {
            candidates: VecCandidateSet::new(lists),
            edges,
        }
    }

    pub(crate) fn check<D: Graph>(&self, data: &D, embedding: &Embedding) -> Result<(), Violation> {
        check(
            data,
            self.candidates.query_vertex_count(),
            self.edges.iter().copied(),
            &self.candidates,
            embedding,
        )
    }
}
