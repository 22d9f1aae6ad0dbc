//! Type-safe wrapper for netlist node identifiers.
//!
//! Every node of a netlist carries a `UniqueID`. Wrapping it in a newtype keeps
//! ids from being confused with slot indices, input counts or bit values in the
//! evaluation code.
use std::fmt;
use std::str::FromStr;

/// A node identifier, as written in the `UniqueID=` property of a stanza.
///
/// # Invariants
///
/// - Ids are unique within a [`NodeGraph`][crate::graph::NodeGraph]
/// - The numeric order of ids is the column order of the truth table
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates a node id from its numeric value.
    pub const fn new(id: u32) -> Self {
        NodeId(id)
    }

    /// Returns the raw id as a `u32`.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        NodeId(id)
    }
}

impl From<NodeId> for u32 {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

impl FromStr for NodeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u32>().map(NodeId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_order() {
        let a = NodeId::new(2);
        let b = NodeId::new(10);
        assert!(a < b);
        assert_eq!(a.get(), 2);
        assert_eq!(u32::from(b), 10);
    }

    #[test]
    fn test_node_id_parse() {
        assert_eq!(" 42 ".parse::<NodeId>(), Ok(NodeId::new(42)));
        assert!("-1".parse::<NodeId>().is_err());
        assert!("x1".parse::<NodeId>().is_err());
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId::new(7).to_string(), "7");
    }
}
