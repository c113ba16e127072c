//! Exhaustive subgraph matching over a query DAG.
//!
//! The query graph is oriented into a rooted DAG, an extension order is
//! planned over it, the candidate sets are compacted into a dense index
//! space, and an iterative backtracking search enumerates every injective,
//! edge-preserving mapping up to a configurable cap.
//!
//! ```
//! use subiso_common::{Config, CsrGraph, VecCandidateSet};
//!
//! let data = CsrGraph::unlabeled(2, &[(0, 1)]);
//! let query = CsrGraph::unlabeled(2, &[(0, 1)]);
//! let mut candidates = VecCandidateSet::from_raw(&[&[0, 1], &[0, 1]]);
//!
//! let found = subiso_subgraph::find_embeddings(&data, &query, &mut candidates, &Config::default())?;
//! assert_eq!(found.len(), 2);
//! # Ok::<(), subiso_subgraph::MatchError>(())
//! ```

pub mod cache;
pub mod compact;
mod context;
pub mod dag;
mod embedding;
mod error;
pub mod order;
mod search;
mod sink;
#[cfg(test)]
pub(crate) mod test_support;
pub mod verify;

pub use cache::{AdjacencyCache, CacheStats};
pub use compact::{CandidateIndex, CompactIdx};
pub use context::SearchContext;
pub use dag::{DagNode, QueryDag};
pub use embedding::{Embedding, EmbeddingSet};
pub use error::MatchError;
pub use order::{ExtensionOrder, OrderStep};
pub use search::{SearchOutcome, StopReason};
pub use sink::{Cancellable, Collect, EmbeddingSink};
pub use verify::{Violation, verify_embedding};

use subiso_common::{CandidateSet, Config, Graph};

/// Collects every embedding of `query` in `data`, up to the configured cap.
///
/// `candidates` is compacted in place and cannot be reused for another search.
///
/// # Errors
///
/// Returns a [`MatchError`] if the inputs fail validation.
pub fn find_embeddings<G, Q, C>(
    data: &G,
    query: &Q,
    candidates: &mut C,
    config: &Config,
) -> Result<EmbeddingSet, MatchError>
where
    G: Graph,
    Q: Graph,
    C: CandidateSet,
{
    let mut sink = Collect::default();
    let outcome = for_each_embedding(data, query, candidates, config, &mut sink)?;
    Ok(EmbeddingSet {
        items: sink.items,
        outcome,
    })
}

/// Streams every embedding of `query` in `data` into `sink`.
///
/// `candidates` is compacted in place and cannot be reused for another search.
///
/// # Errors
///
/// Returns a [`MatchError`] if the inputs fail validation.
pub fn for_each_embedding<G, Q, C, S>(
    data: &G,
    query: &Q,
    candidates: &mut C,
    config: &Config,
    sink: &mut S,
) -> Result<SearchOutcome, MatchError>
where
    G: Graph,
    Q: Graph,
    C: CandidateSet,
    S: EmbeddingSink + ?Sized,
{
    SearchContext::prepare(data, query, candidates, config)?.run(sink)
}

/// Counts embeddings without storing them.
///
/// # Errors
///
/// Returns a [`MatchError`] if the inputs fail validation.
pub fn count_embeddings<G, Q, C>(
    data: &G,
    query: &Q,
    candidates: &mut C,
    config: &Config,
) -> Result<SearchOutcome, MatchError>
where
    G: Graph,
    Q: Graph,
    C: CandidateSet,
{
    for_each_embedding(data, query, candidates, config, &mut |_: &Embedding| {
        std::ops::ControlFlow::Continue(())
    })
}
