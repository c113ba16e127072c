//! Error types for matcher preparation.
//!
//! Every check runs while the search context is prepared; the search loop
//! itself never fails except through verification.

use subiso_common::VertexId;
use thiserror::Error;

use crate::verify::Violation;

/// Errors raised while preparing or running a search.
#[derive(Debug, Error)]
pub enum MatchError {
    /// The query graph has no vertices.
    #[error("Query graph has no vertices")]
    EmptyQuery,

    /// The configured root is not a query vertex.
    #[error("Root {root} is not a query vertex (query has {vertex_count})")]
    RootOutOfRange {
        /// Configured root.
        root: VertexId,
        /// Number of query vertices.
        vertex_count: usize,
    },

    /// The candidate set covers a different number of query vertices.
    #[error("Candidate set covers {candidates} query vertices, query has {query}")]
    CandidateCountMismatch {
        /// Number of query vertices.
        query: usize,
        /// Number of candidate lists.
        candidates: usize,
    },

    /// A candidate is not a data vertex.
    #[error("Candidate {vertex} of query vertex {query_vertex} is not a data vertex")]
    CandidateOutOfRange {
        /// Query vertex owning the list.
        query_vertex: VertexId,
        /// Offending entry.
        vertex: VertexId,
    },

    /// A candidate list names the same data vertex twice.
    #[error("Candidate {vertex} appears more than once for query vertex {query_vertex}")]
    DuplicateCandidate {
        /// Query vertex owning the list.
        query_vertex: VertexId,
        /// Repeated entry.
        vertex: VertexId,
    },

    /// Some query vertices cannot be reached from the root.
    #[error("Query graph is disconnected: {} vertices unreachable from the root", unreached.len())]
    DisconnectedQuery {
        /// Vertices outside the root's component.
        unreached: Vec<VertexId>,
    },

    /// The adjacency cache for `side` compacted candidates cannot be allocated.
    #[error("Adjacency cache for {side} distinct candidates cannot be allocated")]
    CacheTooLarge {
        /// Number of distinct candidates.
        side: usize,
    },

    /// An emitted embedding failed verification.
    #[error("Embedding failed verification: {0}")]
    Verification(#[from] Violation),
}
