use crate::{CsrGraph, Label, VecCandidateSet, VertexId};

/// A query/data pair with a known embedding count.
#[derive(Clone, Debug)]
pub struct MatchCase {
    /// Case name used in test reports.
    pub name: &'static str,
    /// Pattern graph.
    pub query: CsrGraph,
    /// Graph searched for the pattern.
    pub data: CsrGraph,
    /// Candidate lists, in data-vertex ids.
    pub candidates: VecCandidateSet,
    /// Number of embeddings an exhaustive search finds.
    pub expected_matches: usize,
}

impl MatchCase {
    fn unlabeled(
        name: &'static str,
        query: CsrGraph,
        data: CsrGraph,
        expected_matches: usize,
    ) -> Self {
        let candidates = VecCandidateSet::by_label(&query, &data);
        Self {
            name,
            query,
            data,
            candidates,
            expected_matches,
        }
    }
}

fn complete(n: u32) -> CsrGraph {
    let edges: Vec<(u32, u32)> = (0..n)
        .flat_map(|u| (u + 1..n).map(move |v| (u, v)))
        .collect();
    CsrGraph::unlabeled(n as usize, &edges)
}

fn labeled(labels: &[u32], edges: &[(u32, u32)]) -> CsrGraph {
    let edges: Vec<(VertexId, VertexId)> = edges
        .iter()
        .map(|&(u, v)| (VertexId::new(u), VertexId::new(v)))
        .collect();
    CsrGraph::from_edges(labels.iter().copied().map(Label).collect(), &edges)
}

// #####################
// GRAPHS
// #####################
lazy_static::lazy_static! {
    static ref TRIANGLE: CsrGraph = CsrGraph::unlabeled(3, &[(0, 1), (1, 2), (0, 2)]);
    static ref EDGE: CsrGraph = CsrGraph::unlabeled(2, &[(0, 1)]);
    static ref PATH3: CsrGraph = CsrGraph::unlabeled(3, &[(0, 1), (1, 2)]);
    static ref STAR3: CsrGraph = CsrGraph::unlabeled(4, &[(0, 1), (0, 2), (0, 3)]);
    static ref SQUARE: CsrGraph = CsrGraph::unlabeled(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
    static ref K4: CsrGraph = complete(4);
    static ref TRIANGLE_PLUS_ISOLATED: CsrGraph =
        CsrGraph::unlabeled(4, &[(0, 1), (1, 2), (0, 2)]);
}

// #####################
// TEST CASES
// #####################
lazy_static::lazy_static! {
    /// Small unlabeled and labeled cases with hand-counted embeddings.
    pub static ref BASIC_TEST_CASES: Vec<MatchCase> = vec![
        MatchCase::unlabeled("triangle_in_triangle_plus_isolated", TRIANGLE.clone(), TRIANGLE_PLUS_ISOLATED.clone(), 6),
        MatchCase::unlabeled("edge_in_single_edge", EDGE.clone(), EDGE.clone(), 2),
        MatchCase::unlabeled("edge_in_k4", EDGE.clone(), K4.clone(), 12),
        MatchCase::unlabeled("path3_in_square", PATH3.clone(), SQUARE.clone(), 8),
        MatchCase::unlabeled("triangle_in_k4", TRIANGLE.clone(), K4.clone(), 24),
        MatchCase::unlabeled("star3_in_k4", STAR3.clone(), K4.clone(), 24),
        MatchCase::unlabeled("square_in_k4", SQUARE.clone(), K4.clone(), 24),
        MatchCase::unlabeled("triangle_in_square", TRIANGLE.clone(), SQUARE.clone(), 0),
        MatchCase::unlabeled("square_in_square", SQUARE.clone(), SQUARE.clone(), 8),
        {
            let query = labeled(&[1, 2], &[(0, 1)]);
            let data = labeled(&[1, 2, 1], &[(0, 1), (1, 2)]);
            let candidates = VecCandidateSet::by_label_and_degree(&query, &data);
            MatchCase { name: "labeled_edge_in_labeled_path", query, data, candidates, expected_matches: 2 }
        },
        MatchCase {
            name: "triangle_in_k4_pinned_root",
            query: TRIANGLE.clone(),
            data: K4.clone(),
            candidates: VecCandidateSet::from_raw(&[&[0], &[0, 1, 2, 3], &[0, 1, 2, 3]]),
            expected_matches: 6,
        },
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CandidateSet;

    #[test]
    fn test_cases_have_matching_candidate_counts() {
        for case in BASIC_TEST_CASES.iter() {
            assert_eq!(
                case.candidates.query_vertex_count(),
                crate::Graph::vertex_count(&case.query),
                "case '{}' has a candidate list per query vertex",
                case.name
            );
        }
    }
}
