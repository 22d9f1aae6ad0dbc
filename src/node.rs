use crate::kind::GateKind;
use crate::types::NodeId;

/// One gate or terminal of a netlist.
///
/// `inputs` is the fan-in in declaration order, which is also the fold order.
/// `outputs` is the `Output=` list as written; evaluation never reads it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub kind: GateKind,
    pub inputs: Vec<NodeId>,
    pub outputs: Vec<NodeId>,
}

// Constructors
impl Node {
    pub fn new(id: u32, kind: GateKind) -> Self {
        Self {
            id: NodeId::new(id),
            kind,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn input(id: u32) -> Self {
        Self::new(id, GateKind::Input)
    }

    pub fn output(id: u32, source: u32) -> Self {
        Self::new(id, GateKind::Output).with_inputs([source])
    }

    pub fn gate(id: u32, kind: GateKind, inputs: impl IntoIterator<Item = u32>) -> Self {
        Self::new(id, kind).with_inputs(inputs)
    }

    pub fn with_inputs(mut self, inputs: impl IntoIterator<Item = u32>) -> Self {
        self.inputs = inputs.into_iter().map(NodeId::new).collect();
        self
    }

    pub fn with_outputs(mut self, outputs: impl IntoIterator<Item = u32>) -> Self {
        self.outputs = outputs.into_iter().map(NodeId::new).collect();
        self
    }
}

impl Node {
    /// The fan-in that evaluation follows: empty for INPUT nodes, whose
    /// value comes from the assignment.
    pub fn dependencies(&self) -> &[NodeId] {
        match self.kind {
            GateKind::Input => &[],
            _ => &self.inputs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_constructors() {
        let a = Node::input(1);
        assert_eq!(a.kind, GateKind::Input);
        assert!(a.inputs.is_empty());

        let g = Node::gate(3, GateKind::And, [1, 2]).with_outputs([4]);
        assert_eq!(g.inputs, vec![NodeId::new(1), NodeId::new(2)]);
        assert_eq!(g.outputs, vec![NodeId::new(4)]);

        let o = Node::output(4, 3);
        assert_eq!(o.kind, GateKind::Output);
        assert_eq!(o.inputs, vec![NodeId::new(3)]);
    }

    #[test]
    fn test_dependencies() {
        let a = Node::input(1).with_inputs([7]);
        assert!(a.dependencies().is_empty());
        let g = Node::gate(3, GateKind::Xor, [1, 2]);
        assert_eq!(g.dependencies(), &[NodeId::new(1), NodeId::new(2)]);
    }
}
