//! Generators shared by the property tests.

use quickcheck::{Arbitrary, Gen};

/// A connected graph: a random spanning tree plus random extra edges.
#[derive(Clone, Debug)]
pub(crate) struct ConnectedGraph {
    pub(crate) n: u32,
    pub(crate) edges: Vec<(u32, u32)>,
}

impl Arbitrary for ConnectedGraph {
    fn arbitrary(g: &mut Gen) -> Self {
        let n = u32::arbitrary(g) % 10 + 1;
        let mut edges = Vec::new();
        for v in 1..n {
            edges.push((u32::arbitrary(g) % v, v));
        }
        for _ in 0..(u32::arbitrary(g) % 10) {
            let a = u32::arbitrary(g) % n;
            let b = u32::arbitrary(g) % n;
            if a != b {
                edges.push((a, b));
            }
        }
        Self { n, edges }
    }
}
