use contracts::*;
use std::fmt;
use std::hash::Hash;

/// Identifier of a vertex in a query or data graph.
///
/// Query and data vertices share the representation; which graph an id
/// belongs to is determined by where it is used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId {
    /// The underlying raw integer index.
    inner: u32,
}

impl VertexId {
    /// Creates a vertex id from a raw integer.
    #[ensures(ret.inner == id)]
    pub const fn new(id: u32) -> Self {
        Self { inner: id }
    }

    /// Returns the id as a usize for array access.
    #[ensures(ret == self.inner as usize)]
    pub const fn as_usize(self) -> usize {
        self.inner as usize
    }

    /// Returns the raw integer.
    pub const fn as_u32(self) -> u32 {
        self.inner
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<usize> for VertexId {
    #[inline]
    fn from(id: usize) -> Self {
        debug_assert!(u32::try_from(id).is_ok(), "vertex id {id} exceeds u32");
        Self { inner: id as u32 }
    }
}

impl From<u32> for VertexId {
    #[inline]
    fn from(id: u32) -> Self {
        Self { inner: id }
    }
}

impl From<VertexId> for usize {
    #[inline]
    fn from(id: VertexId) -> Self {
        id.inner as Self
    }
}

impl From<VertexId> for u32 {
    #[inline]
    fn from(id: VertexId) -> Self {
        id.inner
    }
}

/// Vertex label used by candidate filtering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(pub u32);

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
