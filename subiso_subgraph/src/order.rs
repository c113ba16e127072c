//! Extension order planning.
//!
//! Vertices are appended one at a time from the set of extendable vertices
//! (all parents already placed). Among those, the planner prefers the vertex
//! whose earliest-placed parent sits latest in the order, so every new vertex
//! is checked against recently bound parents.

use contracts::*;
use itertools::Itertools;
use subiso_common::VertexId;
use tracing::{debug, trace};

use crate::dag::QueryDag;

/// One step of the extension order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrderStep {
    /// Bind this query vertex next.
    Bind(VertexId),
    /// Every query vertex is bound.
    Done,
}

/// Sequence in which query vertices are bound, terminated by [`OrderStep::Done`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtensionOrder {
    steps: Vec<OrderStep>,
    position: Vec<Option<usize>>,
}

impl ExtensionOrder {
    /// Plans the order over `dag`, starting from `root`.
    #[debug_requires(root.as_usize() < dag.len())]
    #[debug_ensures(ret.steps.last() == Some(&OrderStep::Done))]
    pub fn plan(dag: &QueryDag, root: VertexId) -> Self {
        let n = dag.len();
        let mut order = Self {
            steps: Vec::with_capacity(n + 1),
            position: vec![None; n],
        };
        let mut path_cost = 0usize;

        let mut next = Some(root);
        while let Some(v) = next {
            order.position[v.as_usize()] = Some(order.steps.len());
            order.steps.push(OrderStep::Bind(v));

            next = order.select_next(dag).map(|(selected, min_step)| {
                path_cost += order.steps.len().saturating_sub(min_step);
                selected
            });
        }
        order.steps.push(OrderStep::Done);

        debug!(
            "Extension order: [{}]",
            order.iter().map(|v| v.to_string()).join(" ")
        );
        trace!("Extension order path cost: {}", path_cost);
        order
    }

    /// Picks the next extendable vertex and the position of its earliest parent.
    fn select_next(&self, dag: &QueryDag) -> Option<(VertexId, usize)> {
        let mut selected: Option<(VertexId, usize)> = None;

        for e in (0..dag.len()).map(VertexId::from) {
            if self.position[e.as_usize()].is_some() {
                continue;
            }
            let parents = dag.parents(e);
            if !parents.iter().all(|p| self.position[p.as_usize()].is_some()) {
                continue;
            }

            let min_step = parents
                .iter()
                .filter_map(|p| self.position[p.as_usize()])
                .min()
                .unwrap_or(usize::MAX);

            trace!("Extendable {} with earliest parent at {}", e, min_step);
            match selected {
                Some((_, best)) if min_step <= best => {}
                _ => selected = Some((e, min_step)),
            }
        }

        selected
    }

    /// All steps including the terminal [`OrderStep::Done`].
    #[must_use]
    pub fn steps(&self) -> &[OrderStep] {
        &self.steps
    }

    /// Step at `depth`; [`OrderStep::Done`] past the last bound vertex.
    #[must_use]
    pub fn get(&self, depth: usize) -> OrderStep {
        self.steps.get(depth).copied().unwrap_or(OrderStep::Done)
    }

    /// Vertex bound at `depth`, if any.
    #[must_use]
    pub fn vertex_at(&self, depth: usize) -> Option<VertexId> {
        match self.get(depth) {
            OrderStep::Bind(v) => Some(v),
            OrderStep::Done => None,
        }
    }

    /// Number of bound vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len() - 1
    }

    /// True if no vertex is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Depth at which `v` is bound.
    #[must_use]
    pub fn position(&self, v: VertexId) -> Option<usize> {
        self.position.get(v.as_usize()).copied().flatten()
    }

    /// Bound vertices in order.
    pub fn iter(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.steps.iter().filter_map(|s| match s {
            OrderStep::Bind(v) => Some(*v),
            OrderStep::Done => None,
        })
    }
}
