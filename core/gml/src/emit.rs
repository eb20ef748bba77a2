use tracing::trace;

use crate::identity::{BitLabel, NodeId};
use crate::index::ConnectivityIndex;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
}

/// Turns the bits of one wire into driver-to-consumer edges.
pub struct EdgeEmitter<'a> {
    index: &'a ConnectivityIndex,
}

impl<'a> EdgeEmitter<'a> {
    pub fn new(index: &'a ConnectivityIndex) -> Self {
        Self { index }
    }

    /// Edges for a wire whose bits carry `labels`, LSB first. A pair equal to
    /// the one emitted just before it is dropped; the comparison carries over
    /// from one bit to the next but starts fresh for every wire.
    pub fn wire_edges<I>(&self, labels: I) -> Vec<Edge>
    where
        I: IntoIterator<Item = BitLabel>,
    {
        let mut edges = Vec::new();
        let mut previous: Option<Edge> = None;

        for label in labels {
            let sources = self.index.sources(label);
            let targets = self.index.targets(label);
            for &source in sources {
                for &target in targets {
                    let edge = Edge { source, target };
                    if previous == Some(edge) {
                        trace!(%source, %target, %label, "suppressed repeated edge");
                        continue;
                    }
                    edges.push(edge);
                    previous = Some(edge);
                }
            }
        }

        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::NodeAllocator;
    use crate::index::Role;
    use n2g_netlist::State;

    fn pairs(edges: &[Edge]) -> Vec<(u32, u32)> {
        edges
            .iter()
            .map(|edge| (edge.source.get(), edge.target.get()))
            .collect()
    }

    fn ids(count: usize) -> Vec<NodeId> {
        let mut nodes = NodeAllocator::new();
        (0..count).map(|_| nodes.allocate()).collect()
    }

    #[test]
    fn single_driver_single_consumer() {
        let n = ids(2);
        let mut index = ConnectivityIndex::new();
        index.register(BitLabel::Net(2), n[0], Role::Source);
        index.register(BitLabel::Net(2), n[1], Role::Target);

        let edges = EdgeEmitter::new(&index).wire_edges([BitLabel::Net(2)]);
        assert_eq!(pairs(&edges), vec![(2, 3)]);
    }

    #[test]
    fn cross_product_in_source_major_order() {
        let n = ids(5);
        let label = BitLabel::Net(2);
        let mut index = ConnectivityIndex::new();
        for &source in &n[..2] {
            index.register(label, source, Role::Source);
        }
        for &target in &n[2..] {
            index.register(label, target, Role::Target);
        }

        let edges = EdgeEmitter::new(&index).wire_edges([label]);
        assert_eq!(
            pairs(&edges),
            vec![(2, 4), (2, 5), (2, 6), (3, 4), (3, 5), (3, 6)]
        );
    }

    #[test]
    fn adjacent_repeats_collapse_within_a_bit() {
        let n = ids(2);
        let label = BitLabel::Net(2);
        let mut index = ConnectivityIndex::new();
        index.register(label, n[0], Role::Source);
        for _ in 0..3 {
            index.register(label, n[1], Role::Target);
        }

        let edges = EdgeEmitter::new(&index).wire_edges([label]);
        assert_eq!(pairs(&edges), vec![(2, 3)]);
    }

    #[test]
    fn adjacent_repeats_collapse_across_bits() {
        let n = ids(2);
        let mut index = ConnectivityIndex::new();
        for label in [BitLabel::Net(2), BitLabel::Net(3), BitLabel::Net(4)] {
            index.register(label, n[0], Role::Source);
            index.register(label, n[1], Role::Target);
        }

        let emitter = EdgeEmitter::new(&index);
        let edges = emitter.wire_edges([BitLabel::Net(2), BitLabel::Net(3), BitLabel::Net(4)]);
        assert_eq!(pairs(&edges), vec![(2, 3)]);

        // each wire starts without a previous edge
        let first = emitter.wire_edges([BitLabel::Net(2)]);
        let second = emitter.wire_edges([BitLabel::Net(3)]);
        assert_eq!(pairs(&first), vec![(2, 3)]);
        assert_eq!(pairs(&second), vec![(2, 3)]);
    }

    #[test]
    fn separated_repeats_are_kept() {
        let n = ids(3);
        let mut index = ConnectivityIndex::new();
        index.register(BitLabel::Net(2), n[0], Role::Source);
        index.register(BitLabel::Net(2), n[1], Role::Target);
        index.register(BitLabel::Net(3), n[0], Role::Source);
        index.register(BitLabel::Net(3), n[2], Role::Target);

        let edges = EdgeEmitter::new(&index).wire_edges([
            BitLabel::Net(2),
            BitLabel::Net(3),
            BitLabel::Net(2),
        ]);
        assert_eq!(pairs(&edges), vec![(2, 3), (2, 4), (2, 3)]);
    }

    #[test]
    fn bits_without_sources_emit_nothing() {
        let n = ids(1);
        let one = BitLabel::Const(State::S1);
        let mut index = ConnectivityIndex::new();
        index.register(one, n[0], Role::Target);

        let edges = EdgeEmitter::new(&index).wire_edges([one, BitLabel::Net(9)]);
        assert!(edges.is_empty());
    }
}
