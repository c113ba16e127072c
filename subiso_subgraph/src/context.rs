//! Everything one search run owns.

use itertools::Itertools;
use subiso_common::{CandidateSet, Config, Graph, VertexId};
use tracing::debug;

use crate::cache::AdjacencyCache;
use crate::compact::CandidateIndex;
use crate::dag::QueryDag;
use crate::error::MatchError;
use crate::order::ExtensionOrder;
use crate::search::{SearchInputs, SearchOutcome, SearchState, backtrack};
use crate::sink::EmbeddingSink;
use crate::verify::{Verifier, query_edges};

/// DAG, order, candidate index, adjacency cache and search state of one run.
///
/// Built by [`SearchContext::prepare`], consumed by [`SearchContext::run`].
/// Preparation compacts the candidate set in place, so a candidate set can
/// back only one context.
pub struct SearchContext<'d, 'c, G, C> {
    data: &'d G,
    candidates: &'c C,
    config: Config,
    dag: QueryDag,
    order: ExtensionOrder,
    index: CandidateIndex,
    cache: AdjacencyCache,
    state: SearchState,
    verifier: Option<Verifier>,
}

impl<'d, 'c, G: Graph, C: CandidateSet> SearchContext<'d, 'c, G, C> {
    /// Validates the inputs, plans the search and compacts `candidates`.
    ///
    /// # Errors
    ///
    /// Returns a [`MatchError`] if the query is empty or disconnected from
    /// the root, the root is out of range, or the candidate lists do not fit
    /// the query and data graphs.
    pub fn prepare<Q: Graph>(
        data: &'d G,
        query: &Q,
        candidates: &'c mut C,
        config: &Config,
    ) -> Result<Self, MatchError> {
        validate(data, query, &*candidates, config)?;

        let dag = QueryDag::build(query, config.root);
        let unreached = dag.unreached();
        if !unreached.is_empty() {
            return Err(MatchError::DisconnectedQuery { unreached });
        }
        let order = ExtensionOrder::plan(&dag, config.root);

        let verifier = config
            .verify
            .then(|| Verifier::snapshot(&*candidates, query_edges(query).collect()));

        let index = CandidateIndex::compact(candidates);
        let cache = AdjacencyCache::new(index.len())?;
        let state = SearchState::new(query.vertex_count(), index.len());
        let candidates: &'c C = candidates;

        debug!(
            "Prepared search: {} query vertices, {} distinct candidates, limit {}",
            dag.len(),
            index.len(),
            config.match_limit
        );

        Ok(Self {
            data,
            candidates,
            config: config.clone(),
            dag,
            order,
            index,
            cache,
            state,
            verifier,
        })
    }

    /// Query DAG.
    #[must_use]
    pub const fn dag(&self) -> &QueryDag {
        &self.dag
    }

    /// Extension order.
    #[must_use]
    pub const fn order(&self) -> &ExtensionOrder {
        &self.order
    }

    /// Compacted candidate index.
    #[must_use]
    pub const fn index(&self) -> &CandidateIndex {
        &self.index
    }

    /// Adjacency cache.
    #[must_use]
    pub const fn cache(&self) -> &AdjacencyCache {
        &self.cache
    }

    /// Runs the search, handing every embedding to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Verification`] if verification is enabled and an
    /// embedding fails it.
    pub fn run<S: EmbeddingSink + ?Sized>(mut self, sink: &mut S) -> Result<SearchOutcome, MatchError> {
        let inputs = SearchInputs {
            data: self.data,
            candidates: self.candidates,
            dag: &self.dag,
            order: &self.order,
            index: &self.index,
            verifier: self.verifier.as_ref(),
            match_limit: self.config.match_limit,
        };
        backtrack(&inputs, &mut self.cache, &mut self.state, sink)
    }
}

/// Precondition checks that would otherwise corrupt the search.
fn validate<G: Graph, Q: Graph, C: CandidateSet>(
    data: &G,
    query: &Q,
    candidates: &C,
    config: &Config,
) -> Result<(), MatchError> {
    let n = query.vertex_count();
    if n == 0 {
        return Err(MatchError::EmptyQuery);
    }
    if config.root.as_usize() >= n {
        return Err(MatchError::RootOutOfRange {
            root: config.root,
            vertex_count: n,
        });
    }
    if candidates.query_vertex_count() != n {
        return Err(MatchError::CandidateCountMismatch {
            query: n,
            candidates: candidates.query_vertex_count(),
        });
    }

    for q in (0..n).map(VertexId::from) {
        let list = (0..candidates.size(q)).map(|pos| candidates.get(q, pos));
        if let Some(vertex) = list.clone().find(|d| d.as_usize() >= data.vertex_count()) {
            return Err(MatchError::CandidateOutOfRange {
                query_vertex: q,
                vertex,
            });
        }
        if let Some(vertex) = list.duplicates().next() {
            return Err(MatchError::DuplicateCandidate {
                query_vertex: q,
                vertex,
            });
        }
        if candidates.size(q) == 0 {
            debug!("Query vertex {} has no candidates", q);
        }
    }

    Ok(())
}
