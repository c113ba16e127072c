//! Consumers of emitted embeddings.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::embedding::Embedding;

/// Receives embeddings in discovery order.
pub trait EmbeddingSink {
    /// Handles one embedding; `Break` ends the search.
    fn emit(&mut self, embedding: &Embedding) -> ControlFlow<()>;

    /// Polled before every candidate test; `true` ends the search.
    fn should_stop(&self) -> bool {
        false
    }
}

impl<F> EmbeddingSink for F
where
    F: FnMut(&Embedding) -> ControlFlow<()>,
{
    fn emit(&mut self, embedding: &Embedding) -> ControlFlow<()> {
        self(embedding)
    }
}

/// Collects every embedding into a vector.
#[derive(Clone, Debug, Default)]
pub struct Collect {
    /// Embeddings received so far.
    pub items: Vec<Embedding>,
}

impl EmbeddingSink for Collect {
    fn emit(&mut self, embedding: &Embedding) -> ControlFlow<()> {
        self.items.push(embedding.clone());
        ControlFlow::Continue(())
    }
}

/// Wraps a sink with an externally settable stop flag.
#[derive(Debug)]
pub struct Cancellable<'f, S> {
    inner: S,
    flag: &'f AtomicBool,
}

impl<'f, S: EmbeddingSink> Cancellable<'f, S> {
    /// Stops the search once `flag` is set.
    pub const fn new(inner: S, flag: &'f AtomicBool) -> Self {
        Self { inner, flag }
    }

    /// Returns the wrapped sink.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: EmbeddingSink> EmbeddingSink for Cancellable<'_, S> {
    fn emit(&mut self, embedding: &Embedding) -> ControlFlow<()> {
        self.inner.emit(embedding)
    }

    fn should_stop(&self) -> bool {
        self.flag.load(Ordering::Relaxed) || self.inner.should_stop()
    }
}
