use std::collections::HashMap;

use crate::bits::SigBit;
use crate::module::Module;

/// Resolves any bit to the representative of its alias class.
pub trait BitCanonicalizer {
    fn canonicalize(&self, bit: SigBit) -> SigBit;
}

/// Union-find over signal bits. Constants always represent their class.
#[derive(Debug, Default, Clone)]
pub struct SigMap {
    parent: HashMap<SigBit, SigBit>,
}

impl SigMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_module(module: &Module) -> Self {
        let mut sigmap = Self::new();
        for (lhs, rhs) in module.connections() {
            sigmap.add_all(lhs, rhs);
        }
        sigmap
    }

    pub fn add_all(&mut self, lhs: &[SigBit], rhs: &[SigBit]) {
        for (a, b) in lhs.iter().zip(rhs) {
            self.add(*a, *b);
        }
    }

    pub fn add(&mut self, a: SigBit, b: SigBit) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return;
        }

        match (root_a.is_const(), root_b.is_const()) {
            // two different constants: the first one wins, the other class stays apart
            (true, true) => {}
            (true, false) => {
                self.parent.insert(root_b, root_a);
            }
            _ => {
                self.parent.insert(root_a, root_b);
            }
        }
        self.compress(a);
        self.compress(b);
    }

    fn find(&self, bit: SigBit) -> SigBit {
        let mut current = bit;
        while let Some(&next) = self.parent.get(&current) {
            current = next;
        }
        current
    }

    fn compress(&mut self, bit: SigBit) {
        let root = self.find(bit);
        let mut current = bit;
        while let Some(next) = self.parent.get(&current).copied() {
            if next != root {
                self.parent.insert(current, root);
            }
            current = next;
        }
    }
}

impl BitCanonicalizer for SigMap {
    fn canonicalize(&self, bit: SigBit) -> SigBit {
        self.find(bit)
    }
}
