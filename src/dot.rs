//! Netlist to DOT (Graphviz) conversion.
//!
//! The generated DOT output follows these conventions:
//! - **INPUT nodes** are rendered at the top (source rank)
//! - **OUTPUT nodes** are rendered at the bottom (sink rank)
//! - **Gates** are labeled with their kind and id
//! - **Edges** run from every fan-in entry to the node reading it; an id
//!   listed twice in a fan-in gets two edges
//! - **Declared outputs** (the `Output=` property) can optionally be drawn as
//!   extra dashed edges
//!
//! # Examples
//!
//! ```
//! use netlist_rs::graph::NodeGraph;
//! use netlist_rs::kind::GateKind;
//! use netlist_rs::node::Node;
//!
//! let graph = NodeGraph::new(vec![
//!     Node::input(1),
//!     Node::input(2),
//!     Node::gate(3, GateKind::Or, [1, 2]),
//!     Node::output(4, 3),
//! ])
//! .unwrap();
//!
//! let dot = graph.to_dot().unwrap();
//! assert!(dot.contains("1 -> 3;"));
//! // Render with: dot -Tpng netlist.dot -o netlist.png
//! ```

use std::fmt::Write as _;

use crate::graph::NodeGraph;
use crate::kind::GateKind;

/// Configuration options for DOT output generation.
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Layout direction (default: "TB")
    pub rankdir: &'static str,
    /// Shape for INPUT nodes (default: "circle")
    pub input_shape: &'static str,
    /// Shape for OUTPUT nodes (default: "doublecircle")
    pub output_shape: &'static str,
    /// Shape for gates (default: "box")
    pub gate_shape: &'static str,
    /// Whether to draw the declared `Output=` lists as dashed edges (default: false)
    pub show_declared_outputs: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            rankdir: "TB",
            input_shape: "circle",
            output_shape: "doublecircle",
            gate_shape: "box",
            show_declared_outputs: false,
        }
    }
}

impl NodeGraph {
    /// Converts the netlist to DOT format.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    /// Converts the netlist to DOT format with custom configuration.
    ///
    /// Edges to ids missing from the graph are still emitted; Graphviz draws
    /// them as bare nodes.
    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "digraph netlist {{")?;
        writeln!(dot, "rankdir={};", config.rankdir)?;

        writeln!(dot, "{{ rank=source")?;
        for &id in self.input_nodes() {
            writeln!(dot, "{} [shape={}, label=\"{}\"];", id, config.input_shape, id)?;
        }
        writeln!(dot, "}}")?;

        writeln!(dot, "{{ rank=sink")?;
        for &id in self.output_nodes() {
            writeln!(dot, "{} [shape={}, label=\"{}\"];", id, config.output_shape, id)?;
        }
        writeln!(dot, "}}")?;

        for node in self.iter().filter(|node| node.kind.is_gate()) {
            writeln!(
                dot,
                "{} [shape={}, label=\"{}\\n{}\"];",
                node.id, config.gate_shape, node.kind, node.id
            )?;
        }

        for node in self.iter() {
            if node.kind == GateKind::Input {
                continue;
            }
            for &input in node.inputs.iter() {
                writeln!(dot, "{} -> {};", input, node.id)?;
            }
        }

        if config.show_declared_outputs {
            for node in self.iter() {
                for &output in node.outputs.iter() {
                    writeln!(dot, "{} -> {} [style=dashed, constraint=false];", node.id, output)?;
                }
            }
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::node::Node;

    fn half_adder() -> NodeGraph {
        NodeGraph::new(vec![
            Node::input(1).with_outputs([3, 4]),
            Node::input(2).with_outputs([3, 4]),
            Node::gate(3, GateKind::Xor, [1, 2]),
            Node::gate(4, GateKind::And, [1, 2]),
            Node::output(5, 3),
            Node::output(6, 4),
        ])
        .unwrap()
    }

    #[test]
    fn test_to_dot() {
        let dot = half_adder().to_dot().unwrap();
        assert!(dot.starts_with("digraph netlist {\n"));
        assert!(dot.ends_with("}\n"));
        assert!(dot.contains("1 [shape=circle, label=\"1\"];"));
        assert!(dot.contains("5 [shape=doublecircle, label=\"5\"];"));
        assert!(dot.contains("3 [shape=box, label=\"XOR\\n3\"];"));
        assert_eq!(dot.matches(" -> ").count(), 6);
        assert!(!dot.contains("dashed"));
    }

    #[test]
    fn test_to_dot_declared_outputs() {
        let config = DotConfig {
            show_declared_outputs: true,
            ..DotConfig::default()
        };
        let dot = half_adder().to_dot_with_config(&config).unwrap();
        assert_eq!(dot.matches("[style=dashed, constraint=false]").count(), 4);
        assert_eq!(dot.matches(" -> ").count(), 10);
    }
}
