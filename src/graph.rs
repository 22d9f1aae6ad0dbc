//! The node graph of a netlist.
//!
//! [`NodeGraph`] owns every parsed [`Node`] and indexes them by id once, at
//! construction. Nodes are stored in ascending id order, so a node's *slot*
//! (its position in that order) doubles as a dense index for per-row tables
//! such as [`Memo`][crate::memo::Memo].
//!
//! # Examples
//!
//! ```
//! use netlist_rs::graph::NodeGraph;
//! use netlist_rs::kind::GateKind;
//! use netlist_rs::node::Node;
//! use netlist_rs::types::NodeId;
//!
//! let graph = NodeGraph::new(vec![
//!     Node::output(4, 3),
//!     Node::gate(3, GateKind::And, [1, 2]),
//!     Node::input(2),
//!     Node::input(1),
//! ])
//! .unwrap();
//!
//! assert_eq!(graph.input_nodes(), &[NodeId::new(1), NodeId::new(2)]);
//! assert_eq!(graph.output_nodes(), &[NodeId::new(4)]);
//! assert!(graph.validate().is_ok());
//! ```

use std::collections::HashMap;

use log::debug;

use crate::error::{Error, Result};
use crate::kind::GateKind;
use crate::node::Node;
use crate::types::NodeId;

#[derive(Debug, Clone)]
pub struct NodeGraph {
    /// All nodes, ascending by id.
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
    inputs: Vec<NodeId>,
    outputs: Vec<NodeId>,
}

impl NodeGraph {
    /// Builds the graph and its id index.
    ///
    /// Fails with [`Error::DuplicateId`] if two nodes share an id. Dangling
    /// references, arity and cycles are not checked here; see
    /// [`validate`][NodeGraph::validate].
    pub fn new(nodes: impl IntoIterator<Item = Node>) -> Result<Self> {
        let mut sorted: Vec<Node> = Vec::new();
        for node in nodes {
            sorted
                .try_reserve(1)
                .map_err(|_| Error::Allocation { what: "node storage" })?;
            sorted.push(node);
        }
        sorted.sort_by_key(|node| node.id);

        let mut index = HashMap::new();
        index
            .try_reserve(sorted.len())
            .map_err(|_| Error::Allocation { what: "node index" })?;
        for (slot, node) in sorted.iter().enumerate() {
            if index.insert(node.id, slot).is_some() {
                return Err(Error::DuplicateId { id: node.id });
            }
        }

        let ids_of = |kind: GateKind| -> Vec<NodeId> {
            sorted
                .iter()
                .filter(|node| node.kind == kind)
                .map(|node| node.id)
                .collect()
        };
        let inputs = ids_of(GateKind::Input);
        let outputs = ids_of(GateKind::Output);

        debug!(
            "NodeGraph: {} nodes, {} inputs, {} outputs",
            sorted.len(),
            inputs.len(),
            outputs.len()
        );

        Ok(Self {
            nodes: sorted,
            index,
            inputs,
            outputs,
        })
    }
}

// Getters
impl NodeGraph {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slot(id).map(|slot| &self.nodes[slot])
    }

    /// Returns the node with the given id, or [`Error::Reference`].
    pub fn lookup(&self, id: NodeId) -> Result<&Node> {
        self.get(id).ok_or(Error::Reference {
            node: None,
            missing: id,
        })
    }

    /// Dense index of a node, in `0..self.len()`.
    pub fn slot(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn node_at(&self, slot: usize) -> &Node {
        &self.nodes[slot]
    }

    /// Ids of the INPUT nodes, ascending.
    ///
    /// This is the column order of the truth table: the `i`-th id receives
    /// bit `i` of each combination.
    pub fn input_nodes(&self) -> &[NodeId] {
        &self.inputs
    }

    /// Ids of the OUTPUT nodes, ascending.
    pub fn output_nodes(&self) -> &[NodeId] {
        &self.outputs
    }

    /// Nodes that read from `id`, ascending.
    ///
    /// Derived from the fan-in lists; the `Output=` property is not consulted.
    pub fn fan_out(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|node| node.inputs.contains(&id))
            .map(|node| node.id)
            .collect()
    }
}

#[derive(Copy, Clone, Eq, PartialEq)]
enum Color {
    White,
    Gray,
    Black,
}

// Validation
impl NodeGraph {
    /// Checks the whole graph before any evaluation.
    ///
    /// Nodes are checked in ascending id order: first that every declared
    /// input exists, then that the input count fits the node kind. Finally
    /// the graph is searched for dependency cycles. The first violation is
    /// returned.
    pub fn validate(&self) -> Result<()> {
        for node in self.nodes.iter() {
            for &input in node.inputs.iter() {
                if !self.index.contains_key(&input) {
                    return Err(Error::Reference {
                        node: Some(node.id),
                        missing: input,
                    });
                }
            }
            let arity = node.kind.arity();
            if !arity.accepts(node.inputs.len()) {
                return Err(Error::Arity {
                    node: node.id,
                    kind: node.kind,
                    expected: arity,
                    found: node.inputs.len(),
                });
            }
        }
        self.check_acyclic()
    }

    /// Evaluation never follows the declared inputs of an INPUT node.
    fn dependencies(&self, slot: usize) -> &[NodeId] {
        self.nodes[slot].dependencies()
    }

    fn check_acyclic(&self) -> Result<()> {
        let mut color = vec![Color::White; self.nodes.len()];
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for root in 0..self.nodes.len() {
            if color[root] != Color::White {
                continue;
            }
            color[root] = Color::Gray;
            stack.push((root, 0));

            while let Some(&(slot, next)) = stack.last() {
                let deps = self.dependencies(slot);
                if next == deps.len() {
                    color[slot] = Color::Black;
                    stack.pop();
                    continue;
                }
                let dep = deps[next];
                let top = stack.len() - 1;
                stack[top].1 += 1;

                let dep_slot = self.slot(dep).ok_or(Error::Reference {
                    node: Some(self.nodes[slot].id),
                    missing: dep,
                })?;
                match color[dep_slot] {
                    Color::White => {
                        color[dep_slot] = Color::Gray;
                        stack.push((dep_slot, 0));
                    }
                    Color::Gray => return Err(Error::Cycle { node: dep }),
                    Color::Black => {}
                }
            }
        }

        debug!("NodeGraph: no cycles among {} nodes", self.nodes.len());
        Ok(())
    }
}
