//! Loaders for the graph and candidate-set text formats.
//!
//! Graph files:
//!
//! ```text
//! t <vertex count> <edge count>
//! v <id> <label> <degree>
//! e <u> <v> <edge label>
//! ```
//!
//! Candidate files:
//!
//! ```text
//! t <query vertex count>
//! c <query vertex> <size> <v_1> ... <v_size>
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::{CsrGraph, Graph, Label, VecCandidateSet, VertexId};

/// Errors raised while reading graph or candidate files.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Reading the file failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A line could not be parsed.
    #[error("Line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        message: String,
    },

    /// The `t` header line is missing or not first.
    #[error("Missing 't' header line")]
    MissingHeader,

    /// A vertex id lies outside the declared vertex range.
    #[error("Line {line}: vertex {vertex} is out of range (count {count})")]
    VertexOutOfRange {
        /// 1-based line number.
        line: usize,
        /// Offending id.
        vertex: u32,
        /// Declared vertex count.
        count: usize,
    },

    /// The number of records differs from the header.
    #[error("Expected {expected} {what} records, found {found}")]
    CountMismatch {
        /// Record kind.
        what: &'static str,
        /// Count declared by the header.
        expected: usize,
        /// Count actually present.
        found: usize,
    },
}

impl LoadError {
    fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Loads a graph file.
///
/// # Errors
///
/// Returns an error when the file cannot be read or is malformed.
pub fn load_graph(path: impl AsRef<Path>) -> Result<CsrGraph, LoadError> {
    let path = path.as_ref();
    let text = read(path)?;
    let graph = parse_graph(&text)?;
    debug!(
        "Loaded graph {}: {} vertices, {} edges",
        path.display(),
        graph.vertex_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Loads a candidate-set file.
///
/// # Errors
///
/// Returns an error when the file cannot be read or is malformed.
pub fn load_candidates(path: impl AsRef<Path>) -> Result<VecCandidateSet, LoadError> {
    let path = path.as_ref();
    let text = read(path)?;
    let cs = parse_candidates(&text)?;
    debug!(
        "Loaded candidates {}: {} query vertices, {} entries",
        path.display(),
        cs.lists().len(),
        cs.total_len()
    );
    Ok(cs)
}

fn read(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Splits into `(1-based line number, tokens)` skipping blank lines.
fn records(text: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    text.lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.split_whitespace().collect::<Vec<_>>()))
        .filter(|(_, tokens)| !tokens.is_empty())
}

fn field<T: std::str::FromStr>(tokens: &[&str], idx: usize, line: usize) -> Result<T, LoadError> {
    let raw = tokens
        .get(idx)
        .ok_or_else(|| LoadError::parse(line, format!("missing field {idx}")))?;
    raw.parse()
        .map_err(|_| LoadError::parse(line, format!("invalid number '{raw}'")))
}

fn vertex(tokens: &[&str], idx: usize, line: usize, count: usize) -> Result<VertexId, LoadError> {
    let raw: u32 = field(tokens, idx, line)?;
    if raw as usize >= count {
        return Err(LoadError::VertexOutOfRange {
            line,
            vertex: raw,
            count,
        });
    }
    Ok(VertexId::new(raw))
}

/// Parses the graph text format.
///
/// # Errors
///
/// Returns an error on a missing header, bad numbers, out-of-range ids, or
/// record counts that disagree with the header.
pub fn parse_graph(text: &str) -> Result<CsrGraph, LoadError> {
    let mut lines = records(text);
    let (line, header) = lines.next().ok_or(LoadError::MissingHeader)?;
    if header[0] != "t" {
        return Err(LoadError::MissingHeader);
    }
    let vertex_count: usize = field(&header, 1, line)?;
    let edge_count: usize = field(&header, 2, line)?;

    let mut labels: Vec<Option<Label>> = vec![None; vertex_count];
    let mut declared_degree: Vec<Option<usize>> = vec![None; vertex_count];
    let mut edges = Vec::with_capacity(edge_count);

    for (line, tokens) in lines {
        match tokens[0] {
            "v" => {
                let id = vertex(&tokens, 1, line, vertex_count)?;
                let label: u32 = field(&tokens, 2, line)?;
                if labels[id.as_usize()].replace(Label(label)).is_some() {
                    return Err(LoadError::parse(line, format!("duplicate vertex {id}")));
                }
                if tokens.len() > 3 {
                    declared_degree[id.as_usize()] = Some(field(&tokens, 3, line)?);
                }
            }
            "e" => {
                let u = vertex(&tokens, 1, line, vertex_count)?;
                let v = vertex(&tokens, 2, line, vertex_count)?;
                edges.push((u, v));
            }
            other => {
                return Err(LoadError::parse(line, format!("unknown record '{other}'")));
            }
        }
    }

    let found = labels.iter().filter(|l| l.is_some()).count();
    if found != vertex_count {
        return Err(LoadError::CountMismatch {
            what: "vertex",
            expected: vertex_count,
            found,
        });
    }
    if edges.len() != edge_count {
        return Err(LoadError::CountMismatch {
            what: "edge",
            expected: edge_count,
            found: edges.len(),
        });
    }

    let labels = labels.into_iter().flatten().collect();
    let graph = CsrGraph::from_edges(labels, &edges);

    for (v, declared) in declared_degree.into_iter().enumerate() {
        let actual = graph.degree(VertexId::from(v));
        if declared.is_some_and(|d| d != actual) {
            warn!(
                "Vertex {} declares degree {:?} but has {} neighbors",
                v, declared, actual
            );
        }
    }

    Ok(graph)
}

/// Parses the candidate-set text format.
///
/// # Errors
///
/// Returns an error on a missing header, bad numbers, a list whose length
/// disagrees with its declared size, or missing query vertices.
pub fn parse_candidates(text: &str) -> Result<VecCandidateSet, LoadError> {
    let mut lines = records(text);
    let (line, header) = lines.next().ok_or(LoadError::MissingHeader)?;
    if header[0] != "t" {
        return Err(LoadError::MissingHeader);
    }
    let query_count: usize = field(&header, 1, line)?;
    let mut lists: Vec<Option<Vec<VertexId>>> = vec![None; query_count];

    for (line, tokens) in lines {
        if tokens[0] != "c" {
            return Err(LoadError::parse(
                line,
                format!("unknown record '{}'", tokens[0]),
            ));
        }
        let q = vertex(&tokens, 1, line, query_count)?;
        let size: usize = field(&tokens, 2, line)?;
        let list = tokens[3..]
            .iter()
            .map(|raw| {
                raw.parse::<u32>()
                    .map(VertexId::new)
                    .map_err(|_| LoadError::parse(line, format!("invalid number '{raw}'")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if list.len() != size {
            return Err(LoadError::CountMismatch {
                what: "candidate",
                expected: size,
                found: list.len(),
            });
        }
        if lists[q.as_usize()].replace(list).is_some() {
            return Err(LoadError::parse(line, format!("duplicate query vertex {q}")));
        }
    }

    let found = lists.iter().filter(|l| l.is_some()).count();
    if found != query_count {
        return Err(LoadError::CountMismatch {
            what: "query vertex",
            expected: query_count,
            found,
        });
    }

    Ok(VecCandidateSet::new(lists.into_iter().flatten().collect()))
}
