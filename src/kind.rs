use std::fmt::{Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

/// The kind of a netlist node.
///
/// AND/OR/NOT/XOR are gates; INPUT and OUTPUT are terminals.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GateKind {
    And,
    Or,
    Not,
    Xor,
    Input,
    Output,
}

/// Number of inputs a node kind accepts.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
    /// Declared inputs are ignored.
    Any,
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("unknown gate type '{0}'")]
pub struct ParseKindError(pub String);

impl GateKind {
    pub const ALL: [GateKind; 6] = [
        GateKind::And,
        GateKind::Or,
        GateKind::Not,
        GateKind::Xor,
        GateKind::Input,
        GateKind::Output,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GateKind::And => "AND",
            GateKind::Or => "OR",
            GateKind::Not => "NOT",
            GateKind::Xor => "XOR",
            GateKind::Input => "INPUT",
            GateKind::Output => "OUTPUT",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            GateKind::And | GateKind::Or | GateKind::Xor => Arity::AtLeast(2),
            GateKind::Not | GateKind::Output => Arity::Exactly(1),
            GateKind::Input => Arity::Any,
        }
    }

    pub fn is_gate(self) -> bool {
        !matches!(self, GateKind::Input | GateKind::Output)
    }

    /// Combines the input bits of a gate, left to right.
    ///
    /// Returns `None` when the number of bits does not fit the arity of the
    /// kind, or when the kind is a terminal.
    pub fn fold(self, bits: &[bool]) -> Option<bool> {
        if !self.is_gate() || !self.arity().accepts(bits.len()) {
            return None;
        }
        let (&first, rest) = bits.split_first()?;
        let res = match self {
            GateKind::And => rest.iter().fold(first, |acc, &b| acc & b),
            GateKind::Or => rest.iter().fold(first, |acc, &b| acc | b),
            GateKind::Xor => rest.iter().fold(first, |acc, &b| acc ^ b),
            GateKind::Not => !first,
            GateKind::Input | GateKind::Output => unreachable!(),
        };
        Some(res)
    }
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
            Arity::Any => true,
        }
    }
}

impl Display for GateKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Display for Arity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "exactly {}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
            Arity::Any => write!(f, "any number of"),
        }
    }
}

impl FromStr for GateKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GateKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}
