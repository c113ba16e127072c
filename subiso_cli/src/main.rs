//! Subiso CLI
//!
//! Loads a data graph and a query graph, enumerates every embedding of the
//! query and prints one `a` line per embedding in query-vertex order.

#[global_allocator]
/// Global allocator using jemalloc.
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

mod args;

use std::io::{BufWriter, Write};
use std::ops::ControlFlow;

use clap::Parser;
use subiso_common::io::{load_candidates, load_graph};
use subiso_common::{Graph, VecCandidateSet};
use subiso_subgraph::{Embedding, StopReason};
use tracing::info;

use args::Args;

/// Runs one search and streams its embeddings to stdout.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.to_config();

    info!("Loading data graph: {:?}", args.data);
    let data = load_graph(&args.data)?;
    info!("Loading query graph: {:?}", args.query);
    let query = load_graph(&args.query)?;

    let mut candidates = match &args.candidates {
        Some(path) => {
            info!("Loading candidates: {:?}", path);
            load_candidates(path)?
        }
        None => VecCandidateSet::by_label_and_degree(&query, &data),
    };
    info!(
        "Searching: {} query vertices, {} data vertices, {} candidates",
        query.vertex_count(),
        data.vertex_count(),
        candidates.total_len()
    );

    let mut out = BufWriter::new(std::io::stdout().lock());
    writeln!(out, "t {}", query.vertex_count())?;

    let mut write_error = None;
    let count_only = args.count_only;
    let outcome = subiso_subgraph::for_each_embedding(
        &data,
        &query,
        &mut candidates,
        &config,
        &mut |embedding: &Embedding| {
            if count_only {
                return ControlFlow::Continue(());
            }
            match writeln!(out, "a {embedding}") {
                Ok(()) => ControlFlow::Continue(()),
                Err(e) => {
                    write_error = Some(e);
                    ControlFlow::Break(())
                }
            }
        },
    )?;
    if let Some(e) = write_error {
        return Err(e.into());
    }

    if count_only {
        writeln!(out, "{}", outcome.count)?;
    }
    out.flush()?;

    match outcome.stop {
        StopReason::LimitReached => info!(
            "Found {} embeddings; limit {} reached, more may exist",
            outcome.count, config.match_limit
        ),
        stop => info!("Found {} embeddings ({:?})", outcome.count, stop),
    }
    info!(
        "Adjacency cache: {} hits, {} misses",
        outcome.cache.hits, outcome.cache.misses
    );

    Ok(())
}
