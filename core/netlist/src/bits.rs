use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum State {
    S0,
    S1,
    Sx,
    Sz,
}

impl State {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            '0' => Some(State::S0),
            '1' => Some(State::S1),
            'x' => Some(State::Sx),
            'z' => Some(State::Sz),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            State::S0 => '0',
            State::S1 => '1',
            State::Sx => 'x',
            State::Sz => 'z',
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WireId(pub(crate) usize);

impl WireId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single signal bit: either a constant or one bit of a wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SigBit {
    Const(State),
    Wire { wire: WireId, offset: u32 },
}

impl SigBit {
    pub fn wire(wire: WireId, offset: u32) -> Self {
        SigBit::Wire { wire, offset }
    }

    pub fn is_const(&self) -> bool {
        matches!(self, SigBit::Const(_))
    }
}

impl From<State> for SigBit {
    fn from(state: State) -> Self {
        SigBit::Const(state)
    }
}
