//! Iterative backtracking over the extension order.
//!
//! Depth `d` binds `order[d]`. `progress[d]` is the next untried position in
//! that vertex's compacted candidate list, so returning to a depth resumes
//! right after the candidate chosen last time. At the terminal step the full
//! assignment is emitted and the deepest binding is released.

use std::ops::ControlFlow;

use subiso_common::{CandidateSet, Graph, VertexId};
use tracing::{debug, warn};

use crate::cache::{AdjacencyCache, CacheStats};
use crate::compact::{CandidateIndex, CompactIdx};
use crate::dag::QueryDag;
use crate::embedding::Embedding;
use crate::error::MatchError;
use crate::order::{ExtensionOrder, OrderStep};
use crate::sink::EmbeddingSink;
use crate::verify::Verifier;

/// Why a search ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// Every branch was explored.
    Exhausted,
    /// The embedding cap was reached; more embeddings may exist.
    LimitReached,
    /// The sink returned `Break` from `emit`.
    SinkStopped,
    /// The sink asked to stop between candidate tests.
    Cancelled,
}

/// Result of one search run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Number of embeddings emitted.
    pub count: usize,
    /// Why the search ended.
    pub stop: StopReason,
    /// Adjacency cache counters.
    pub cache: CacheStats,
}

impl SearchOutcome {
    /// True if the search stopped at the embedding cap.
    #[must_use]
    pub const fn hit_limit(&self) -> bool {
        matches!(self.stop, StopReason::LimitReached)
    }

    /// True if the whole search space was explored.
    #[must_use]
    pub const fn is_exhaustive(&self) -> bool {
        matches!(self.stop, StopReason::Exhausted)
    }
}

/// Partial assignment, used bitmap and per-depth progress of one run.
#[derive(Clone, Debug)]
pub(crate) struct SearchState {
    assignment: Vec<Option<CompactIdx>>,
    used: Vec<bool>,
    progress: Vec<usize>,
    scratch: Embedding,
}

impl SearchState {
    pub(crate) fn new(query_vertex_count: usize, side: usize) -> Self {
        Self {
            assignment: vec![None; query_vertex_count],
            used: vec![false; side],
            progress: vec![0; query_vertex_count + 1],
            scratch: Embedding::new(Vec::with_capacity(query_vertex_count)),
        }
    }

    fn bind(&mut self, q: VertexId, c: CompactIdx) {
        debug_assert!(self.assignment[q.as_usize()].is_none());
        debug_assert!(!self.used[c.as_usize()]);
        self.assignment[q.as_usize()] = Some(c);
        self.used[c.as_usize()] = true;
    }

    fn unbind(&mut self, q: VertexId) {
        if let Some(c) = self.assignment[q.as_usize()].take() {
            self.used[c.as_usize()] = false;
        }
    }

    /// Maps the complete assignment back to data vertices.
    fn fill(&mut self, index: &CandidateIndex) -> &Embedding {
        let mapping = self.scratch.mapping_mut();
        mapping.clear();
        mapping.extend(
            self.assignment
                .iter()
                .flatten()
                .map(|&c| index.reverse(c)),
        );
        &self.scratch
    }
}

/// Read-only inputs of the search loop.
pub(crate) struct SearchInputs<'a, G, C> {
    pub data: &'a G,
    pub candidates: &'a C,
    pub dag: &'a QueryDag,
    pub order: &'a ExtensionOrder,
    pub index: &'a CandidateIndex,
    pub verifier: Option<&'a Verifier>,
    pub match_limit: usize,
}

/// Runs the depth-first search until it is exhausted, capped or stopped by the sink.
pub(crate) fn backtrack<G, C, S>(
    inputs: &SearchInputs<'_, G, C>,
    cache: &mut AdjacencyCache,
    st: &mut SearchState,
    sink: &mut S,
) -> Result<SearchOutcome, MatchError>
where
    G: Graph,
    C: CandidateSet,
    S: EmbeddingSink + ?Sized,
{
    let SearchInputs {
        data,
        candidates,
        dag,
        order,
        index,
        verifier,
        match_limit,
    } = *inputs;

    let mut count = 0usize;
    let finish = |count: usize, stop: StopReason, cache: &AdjacencyCache| {
        let outcome = SearchOutcome {
            count,
            stop,
            cache: cache.stats(),
        };
        debug!(
            "Search finished: {} embeddings, {:?}, cache hits {} misses {}",
            outcome.count, outcome.stop, outcome.cache.hits, outcome.cache.misses
        );
        if outcome.hit_limit() {
            warn!("Embedding limit of {} reached; search is incomplete", match_limit);
        }
        Ok(outcome)
    };

    let mut depth = 0usize;
    loop {
        let id = match order.get(depth) {
            OrderStep::Bind(id) => id,
            OrderStep::Done => {
                // One embedding past the cap proves the output is incomplete.
                if count >= match_limit {
                    return finish(count, StopReason::LimitReached, cache);
                }
                let embedding = st.fill(index);
                if let Some(verifier) = verifier {
                    verifier.check(data, embedding)?;
                }
                count += 1;
                if let ControlFlow::Break(()) = sink.emit(embedding) {
                    return finish(count, StopReason::SinkStopped, cache);
                }

                // Release the deepest binding and keep scanning its siblings.
                depth -= 1;
                let Some(id) = order.vertex_at(depth) else {
                    unreachable!("depth below the terminal step binds a vertex");
                };
                st.unbind(id);
                id
            }
        };

        let size = candidates.size(id);
        let mut descended = false;

        while st.progress[depth] < size {
            if sink.should_stop() {
                return finish(count, StopReason::Cancelled, cache);
            }

            let c = CompactIdx::decode(candidates.get(id, st.progress[depth]));
            st.progress[depth] += 1;
            if st.used[c.as_usize()] {
                continue;
            }

            let assignment = &st.assignment;
            let consistent = dag.parents(id).iter().all(|p| {
                assignment[p.as_usize()].is_some_and(|pc| cache.test(data, index, c, pc))
            });

            if consistent {
                st.bind(id, c);
                depth += 1;
                st.progress[depth] = 0;
                descended = true;
                break;
            }
        }

        if !descended {
            if depth == 0 {
                return finish(count, StopReason::Exhausted, cache);
            }
            depth -= 1;
            if let Some(prev) = order.vertex_at(depth) {
                st.unbind(prev);
            }
        }
    }
}
