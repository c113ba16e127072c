#![allow(dead_code)]

use std::sync::OnceLock;

use subiso_common::{CandidateSet, Graph, VecCandidateSet, VertexId};

pub fn setup_test_logging() {
    static INIT: OnceLock<()> = OnceLock::new();
    let _ = INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Counts embeddings by trying every injective assignment in query-vertex order.
pub fn brute_force_count<D: Graph, Q: Graph>(data: &D, query: &Q, candidates: &VecCandidateSet) -> usize {
    let mut mapping: Vec<Option<VertexId>> = vec![None; query.vertex_count()];
    extend(data, query, candidates, &mut mapping, 0)
}

fn extend<D: Graph, Q: Graph>(
    data: &D,
    query: &Q,
    candidates: &VecCandidateSet,
    mapping: &mut Vec<Option<VertexId>>,
    next: usize,
) -> usize {
    if next == mapping.len() {
        return 1;
    }
    let q = VertexId::from(next);
    let mut total = 0;
    for pos in 0..candidates.size(q) {
        let d = candidates.get(q, pos);
        if mapping.contains(&Some(d)) {
            continue;
        }
        let fits = query
            .neighbors(q)
            .filter_map(|p| mapping[p.as_usize()])
            .all(|pd| data.is_neighbor(d, pd));
        if fits {
            mapping[next] = Some(d);
            total += extend(data, query, candidates, mapping, next + 1);
            mapping[next] = None;
        }
    }
    total
}
