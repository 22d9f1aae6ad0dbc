//! Error types shared by the loader, the graph and the evaluation engine.

use std::path::PathBuf;

use thiserror::Error;

use crate::kind::{Arity, GateKind};
use crate::types::NodeId;

/// Result type for netlist operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or evaluating a netlist.
///
/// No variant is recovered from inside the crate: the first error aborts the
/// current operation and is handed to the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed netlist text.
    #[error("line {line}: {message}")]
    Format { line: usize, message: String },

    /// An input id does not resolve to any node.
    #[error("{}", reference_message(.node, .missing))]
    Reference { node: Option<NodeId>, missing: NodeId },

    /// A node has the wrong number of inputs for its kind.
    #[error("{kind} node {node} requires {expected} input(s), found {found}")]
    Arity {
        node: NodeId,
        kind: GateKind,
        expected: Arity,
        found: usize,
    },

    /// The dependency chain of a node leads back to the node itself.
    #[error("dependency cycle through node {node}")]
    Cycle { node: NodeId },

    /// Two nodes share the same id.
    #[error("duplicate UniqueID {id}")]
    DuplicateId { id: NodeId },

    /// The truth table has more rows than can be enumerated.
    #[error("{count} INPUT nodes exceed the limit of {limit}")]
    TooManyInputs { count: usize, limit: u32 },

    /// A buffer sized by the graph could not be allocated: node storage, the
    /// id index, a row's memo and output bits, or the evaluation stack.
    #[error("allocation failed for {what}")]
    Allocation { what: &'static str },

    /// The netlist file could not be read.
    #[error("cannot read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rendered output could not be written.
    #[error("write failed: {0}")]
    Write(#[from] std::io::Error),
}

fn reference_message(node: &Option<NodeId>, missing: &NodeId) -> String {
    match node {
        Some(node) => format!("node {} references missing node {}", node, missing),
        None => format!("node with UniqueID={} not found", missing),
    }
}

impl Error {
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        Error::Format {
            line,
            message: message.into(),
        }
    }

    /// The node the error is about, if any.
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Error::Reference { node, missing } => node.or(Some(*missing)),
            Error::Arity { node, .. } | Error::Cycle { node } => Some(*node),
            Error::DuplicateId { id } => Some(*id),
            _ => None,
        }
    }
}
