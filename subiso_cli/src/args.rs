use std::path::PathBuf;

use clap::Parser;
use subiso_common::{Config, VertexId};

/// Subiso - Enumerate embeddings of a query graph in a data graph
#[derive(Parser, Debug)]
#[command(name = "subiso")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the data graph file
    #[arg(short = 'd', long)]
    pub data: PathBuf,

    /// Path to the query graph file
    #[arg(short = 'q', long)]
    pub query: PathBuf,

    /// Path to a candidate-set file; derived from labels and degrees if absent
    #[arg(short = 'c', long)]
    pub candidates: Option<PathBuf>,

    /// Stop after this many embeddings
    #[arg(short = 'l', long, default_value_t = Config::DEFAULT_MATCH_LIMIT)]
    pub limit: usize,
    /// Enumerate without a cap
    #[arg(long, default_value_t = false, conflicts_with = "limit")]
    pub unlimited: bool,

    /// Query vertex the search starts from
    #[arg(short = 'r', long, default_value_t = 0)]
    pub root: u32,

    /// Check every embedding before it is printed
    #[arg(long, default_value_t = false)]
    pub verify: bool,
    /// Print only the number of embeddings
    #[arg(long, default_value_t = false)]
    pub count_only: bool,
}

impl Args {
    /// Convert command-line arguments into internal configuration
    pub fn to_config(&self) -> Config {
        let builder = Config::builder()
            .match_limit(self.limit)
            .root(VertexId::new(self.root))
            .verify(self.verify);

        if self.unlimited {
            builder.unlimited().build()
        } else {
            builder.build()
        }
    }
}
