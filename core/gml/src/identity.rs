use std::collections::HashMap;
use std::fmt;

use n2g_netlist::{SigBit, State};

/// First value handed out by both the bit-label and node-id counters. 0 and
/// 1 stay unused so numeric labels never read like the `"0"`/`"1"` constants.
pub const RESERVED_BASE: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BitLabel {
    Const(State),
    Net(u32),
}

impl fmt::Display for BitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitLabel::Const(state) => write!(f, "\"{state}\""),
            BitLabel::Net(id) => write!(f, "{id}"),
        }
    }
}

/// Labels canonical bits in first-touch order. Lives for one module pass.
#[derive(Debug)]
pub struct SignalIdentityTable {
    labels: HashMap<SigBit, BitLabel>,
    next: u32,
}

impl SignalIdentityTable {
    pub fn new() -> Self {
        Self {
            labels: HashMap::new(),
            next: RESERVED_BASE,
        }
    }

    pub fn label_of(&mut self, bit: SigBit) -> BitLabel {
        if let SigBit::Const(state) = bit {
            return BitLabel::Const(state);
        }
        let next = &mut self.next;
        *self.labels.entry(bit).or_insert_with(|| {
            let label = BitLabel::Net(*next);
            *next += 1;
            label
        })
    }

    /// Label of an already seen bit, without allocating one.
    pub fn lookup(&self, bit: SigBit) -> Option<BitLabel> {
        match bit {
            SigBit::Const(state) => Some(BitLabel::Const(state)),
            SigBit::Wire { .. } => self.labels.get(&bit).copied(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for SignalIdentityTable {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug)]
pub struct NodeAllocator {
    next: u32,
}

impl NodeAllocator {
    pub fn new() -> Self {
        Self {
            next: RESERVED_BASE,
        }
    }

    pub fn allocate(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    pub fn allocated(&self) -> usize {
        (self.next - RESERVED_BASE) as usize
    }
}

impl Default for NodeAllocator {
    fn default() -> Self {
        Self::new()
    }
}
