//! Common types shared across the subiso workspace.
//!
//! This crate provides the vertex identifiers, the read-only graph and
//! candidate-set interfaces consumed by the matcher, concrete in-memory
//! implementations of both, text loaders, configuration handling and the
//! shared test cases used across the project.

mod candidates;
mod config;
mod graph;
pub mod io;
mod test_cases;
mod vertex;

pub use crate::candidates::*;
pub use crate::config::*;
pub use crate::graph::*;
pub use crate::test_cases::*;
pub use crate::vertex::*;
