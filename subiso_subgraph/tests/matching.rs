//! End-to-end runs of the matcher against known counts and an exhaustive oracle.

mod common;

use std::collections::HashSet;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};

use rstest::rstest;
use subiso_common::{BASIC_TEST_CASES, Config, CsrGraph, MatchCase, VecCandidateSet, VertexId};
use subiso_subgraph::{
    Cancellable, Collect, Embedding, MatchError, StopReason, count_embeddings, find_embeddings,
    for_each_embedding, verify_embedding,
};

use common::{brute_force_count, setup_test_logging};

fn case(name: &str) -> &'static MatchCase {
    BASIC_TEST_CASES
        .iter()
        .find(|tc| tc.name == name)
        .unwrap_or_else(|| panic!("no test case named {name}"))
}

fn ids(raw: &[u32]) -> Vec<VertexId> {
    raw.iter().copied().map(VertexId::new).collect()
}

#[test]
fn all_basic_cases_match_expected_counts() {
    setup_test_logging();

    let failures: Vec<String> = BASIC_TEST_CASES
        .iter()
        .filter_map(|tc| {
            let mut cs = tc.candidates.clone();
            match find_embeddings(&tc.data, &tc.query, &mut cs, &Config::default()) {
                Ok(found) if found.len() == tc.expected_matches => None,
                Ok(found) => Some(format!(
                    "{}: expected {}, got {}",
                    tc.name,
                    tc.expected_matches,
                    found.len()
                )),
                Err(e) => Some(format!("{}: {e}", tc.name)),
            }
        })
        .collect();

    assert!(failures.is_empty(), "failing cases:\n{}", failures.join("\n"));
}

#[rstest]
#[case::triangle_in_triangle_plus_isolated("triangle_in_triangle_plus_isolated")]
#[case::edge_in_k4("edge_in_k4")]
#[case::path3_in_square("path3_in_square")]
#[case::star3_in_k4("star3_in_k4")]
#[case::square_in_k4("square_in_k4")]
#[case::square_in_square("square_in_square")]
#[case::labeled_edge_in_labeled_path("labeled_edge_in_labeled_path")]
#[case::triangle_in_k4_pinned_root("triangle_in_k4_pinned_root")]
fn every_embedding_is_valid_and_distinct(#[case] name: &str) {
    setup_test_logging();
    let tc = case(name);

    let mut cs = tc.candidates.clone();
    let found = find_embeddings(&tc.data, &tc.query, &mut cs, &Config::default())
        .expect("case inputs are valid");

    assert!(found.outcome.is_exhaustive());
    assert_eq!(found.len(), tc.expected_matches);
    assert_eq!(found.len(), brute_force_count(&tc.data, &tc.query, &tc.candidates));

    for embedding in &found.items {
        assert_eq!(
            verify_embedding(&tc.data, &tc.query, &tc.candidates, embedding),
            Ok(()),
            "{name}: invalid embedding {embedding}"
        );
    }

    let distinct: HashSet<&Embedding> = found.items.iter().collect();
    assert_eq!(distinct.len(), found.len(), "{name}: duplicate embeddings");
}

#[test]
fn triangle_never_touches_isolated_vertex() {
    setup_test_logging();
    let tc = case("triangle_in_triangle_plus_isolated");

    let mut cs = tc.candidates.clone();
    let found = find_embeddings(&tc.data, &tc.query, &mut cs, &Config::default())
        .expect("case inputs are valid");

    assert_eq!(found.len(), 6);
    assert!(found.items.iter().all(|e| !e.as_slice().contains(&VertexId::new(3))));
    assert!(
        found
            .items
            .iter()
            .all(|e| e.signature() == ids(&[0, 1, 2]))
    );
}

#[test]
fn single_edge_embeds_both_ways() {
    setup_test_logging();
    let edge = CsrGraph::unlabeled(2, &[(0, 1)]);
    let mut cs = VecCandidateSet::from_raw(&[&[0, 1], &[0, 1]]);

    let found = find_embeddings(&edge, &edge, &mut cs, &Config::default()).expect("valid inputs");

    let mut got: Vec<Vec<VertexId>> = found.items.iter().map(|e| e.as_slice().to_vec()).collect();
    got.sort();
    assert_eq!(got, vec![ids(&[0, 1]), ids(&[1, 0])]);
}

#[test]
fn embeddings_are_reported_in_query_vertex_order() {
    setup_test_logging();
    let path = CsrGraph::unlabeled(3, &[(0, 1), (1, 2)]);
    let data = CsrGraph::unlabeled(3, &[(0, 1), (1, 2)]);
    let mut cs = VecCandidateSet::from_raw(&[&[0], &[1], &[2]]);
    let config = Config::builder().root(VertexId::new(2)).build();

    let found = find_embeddings(&data, &path, &mut cs, &config).expect("valid inputs");

    assert_eq!(found.len(), 1);
    assert_eq!(found.items[0].as_slice(), ids(&[0, 1, 2]).as_slice());
}

#[rstest]
#[case::below_count(5, 5, true)]
#[case::one(1, 1, true)]
#[case::at_count(24, 24, false)]
#[case::above_count(25, 24, false)]
#[case::unlimited(usize::MAX, 24, false)]
fn match_limit_caps_output(#[case] limit: usize, #[case] expected: usize, #[case] capped: bool) {
    setup_test_logging();
    let tc = case("triangle_in_k4");

    let mut cs = tc.candidates.clone();
    let config = Config::builder().match_limit(limit).build();
    let found = find_embeddings(&tc.data, &tc.query, &mut cs, &config).expect("valid inputs");

    assert_eq!(found.len(), expected);
    assert_eq!(found.outcome.count, expected);
    assert_eq!(found.hit_limit(), capped);
}

#[test]
fn zero_limit_emits_nothing() {
    setup_test_logging();
    let tc = case("edge_in_k4");

    let mut cs = tc.candidates.clone();
    let config = Config::builder().match_limit(0).build();
    let outcome = count_embeddings(&tc.data, &tc.query, &mut cs, &config).expect("valid inputs");

    assert_eq!(outcome.count, 0);
    assert_eq!(outcome.stop, StopReason::LimitReached);
}

#[test]
fn sink_break_stops_after_first_embedding() {
    setup_test_logging();
    let tc = case("square_in_k4");

    let mut cs = tc.candidates.clone();
    let mut first = None;
    let outcome = for_each_embedding(
        &tc.data,
        &tc.query,
        &mut cs,
        &Config::default(),
        &mut |e: &Embedding| {
            first = Some(e.clone());
            ControlFlow::Break(())
        },
    )
    .expect("valid inputs");

    assert_eq!(outcome.count, 1);
    assert_eq!(outcome.stop, StopReason::SinkStopped);
    let first = first.expect("one embedding was emitted");
    assert_eq!(verify_embedding(&tc.data, &tc.query, &tc.candidates, &first), Ok(()));
}

#[test]
fn raised_flag_cancels_before_any_embedding() {
    setup_test_logging();
    let tc = case("edge_in_k4");

    let flag = AtomicBool::new(true);
    let mut sink = Cancellable::new(Collect::default(), &flag);
    let mut cs = tc.candidates.clone();
    let outcome = for_each_embedding(&tc.data, &tc.query, &mut cs, &Config::default(), &mut sink)
        .expect("valid inputs");

    assert_eq!(outcome.count, 0);
    assert_eq!(outcome.stop, StopReason::Cancelled);
    assert!(sink.into_inner().items.is_empty());
}

#[test]
fn flag_raised_from_sink_cancels_remaining_search() {
    setup_test_logging();
    let tc = case("edge_in_k4");

    let flag = AtomicBool::new(false);
    let mut seen = 0usize;
    let raise = |_: &Embedding| {
        seen += 1;
        if seen == 3 {
            flag.store(true, Ordering::Relaxed);
        }
        ControlFlow::Continue(())
    };
    let mut sink = Cancellable::new(raise, &flag);
    let mut cs = tc.candidates.clone();
    let outcome = for_each_embedding(&tc.data, &tc.query, &mut cs, &Config::default(), &mut sink)
        .expect("valid inputs");

    assert_eq!(outcome.stop, StopReason::Cancelled);
    assert_eq!(outcome.count, 3);
}

#[test]
fn verify_mode_accepts_correct_search() {
    setup_test_logging();
    let config = Config::builder().verify(true).build();

    for tc in BASIC_TEST_CASES.iter() {
        let mut cs = tc.candidates.clone();
        let outcome = count_embeddings(&tc.data, &tc.query, &mut cs, &config)
            .unwrap_or_else(|e| panic!("{}: {e}", tc.name));
        assert_eq!(outcome.count, tc.expected_matches, "{}", tc.name);
    }
}

#[test]
fn empty_candidate_list_yields_no_embeddings() {
    setup_test_logging();
    let data = CsrGraph::unlabeled(3, &[(0, 1), (1, 2)]);
    let query = CsrGraph::unlabeled(2, &[(0, 1)]);
    let mut cs = VecCandidateSet::from_raw(&[&[0, 1, 2], &[]]);

    let outcome = count_embeddings(&data, &query, &mut cs, &Config::default()).expect("valid inputs");

    assert_eq!(outcome.count, 0);
    assert!(outcome.is_exhaustive());
}

#[test]
fn disconnected_query_is_rejected() {
    setup_test_logging();
    let data = CsrGraph::unlabeled(4, &[(0, 1), (2, 3)]);
    let query = CsrGraph::unlabeled(4, &[(0, 1), (2, 3)]);
    let mut cs = VecCandidateSet::by_label(&query, &data);

    let err = find_embeddings(&data, &query, &mut cs, &Config::default())
        .expect_err("query has two components");
    assert!(matches!(err, MatchError::DisconnectedQuery { ref unreached } if unreached == &ids(&[2, 3])));
}
