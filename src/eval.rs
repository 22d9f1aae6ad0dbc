//! Depth-first evaluation of netlist nodes.
//!
//! The value of a node is computed by evaluating its fan-in, in declaration
//! order, and folding the resulting bits. Completed values are cached in a
//! row-scoped [`Memo`], so a node shared by several consumers is evaluated
//! once per row.
//!
//! The walk keeps its own stack of pending nodes instead of recursing, so
//! the depth of a circuit is bounded by memory, not by the thread's stack.
//!
//! # Examples
//!
//! ```
//! use netlist_rs::assignment::Assignment;
//! use netlist_rs::eval::Evaluator;
//! use netlist_rs::graph::NodeGraph;
//! use netlist_rs::kind::GateKind;
//! use netlist_rs::memo::Memo;
//! use netlist_rs::node::Node;
//! use netlist_rs::types::NodeId;
//!
//! let graph = NodeGraph::new(vec![
//!     Node::input(1),
//!     Node::input(2),
//!     Node::gate(3, GateKind::Xor, [1, 2]),
//!     Node::output(4, 3),
//! ])
//! .unwrap();
//!
//! let mut assignment = Assignment::new();
//! assignment.set(NodeId::new(1), true);
//! assignment.set(NodeId::new(2), false);
//!
//! let evaluator = Evaluator::new(&graph, &assignment);
//! let mut memo = Memo::for_graph(&graph);
//! assert_eq!(evaluator.evaluate(&mut memo, NodeId::new(4)).unwrap(), true);
//! ```

use log::trace;

use crate::assignment::Assignment;
use crate::error::{Error, Result};
use crate::graph::NodeGraph;
use crate::kind::GateKind;
use crate::memo::Memo;
use crate::node::Node;
use crate::types::NodeId;

/// Evaluates nodes of a graph under one input assignment.
#[derive(Debug, Copy, Clone)]
pub struct Evaluator<'a> {
    graph: &'a NodeGraph,
    assignment: &'a Assignment,
}

/// A node whose fan-in is being evaluated.
///
/// `bits` holds the values of its first `bits.len()` dependencies.
struct Frame<'a> {
    node: &'a Node,
    slot: usize,
    bits: Vec<bool>,
}

impl<'a> Evaluator<'a> {
    pub fn new(graph: &'a NodeGraph, assignment: &'a Assignment) -> Self {
        Self { graph, assignment }
    }

    pub fn graph(&self) -> &'a NodeGraph {
        self.graph
    }

    /// Computes the bit value of node `id`.
    ///
    /// `memo` must have been created for this graph and must not hold values
    /// computed under a different assignment.
    ///
    /// # Errors
    ///
    /// - [`Error::Reference`] if `id`, or any id in the fan-in reached from it,
    ///   does not exist.
    /// - [`Error::Arity`] if a reached node has the wrong number of inputs.
    /// - [`Error::Cycle`] if a reached node depends on itself.
    /// - [`Error::Allocation`] if the evaluation stack cannot grow.
    pub fn evaluate(&self, memo: &mut Memo, id: NodeId) -> Result<bool> {
        let slot = self.graph.slot(id).ok_or(Error::Reference {
            node: None,
            missing: id,
        })?;
        self.eval_slot(memo, slot)
    }

    fn eval_slot(&self, memo: &mut Memo, root: usize) -> Result<bool> {
        if let Some(value) = memo.get(root) {
            return Ok(value);
        }

        let mut stack: Vec<Frame<'a>> = Vec::new();
        push_frame(&mut stack, self.enter(memo, root)?)?;

        // The root is popped last, so `value` ends up holding its bit.
        let mut value = false;
        while let Some(frame) = stack.last_mut() {
            let node = frame.node;
            if let Some(&input) = node.dependencies().get(frame.bits.len()) {
                let slot = self.graph.slot(input).ok_or(Error::Reference {
                    node: Some(node.id),
                    missing: input,
                })?;
                match memo.get(slot) {
                    Some(bit) => frame.bits.push(bit),
                    None => {
                        let child = self.enter(memo, slot)?;
                        push_frame(&mut stack, child)?;
                    }
                }
                continue;
            }

            value = self.fold(frame)?;
            trace!("eval({} {}) = {}", node.kind, node.id, u8::from(value));
            memo.insert(frame.slot, value);
            stack.pop();
            if let Some(parent) = stack.last_mut() {
                parent.bits.push(value);
            }
        }
        Ok(value)
    }

    /// Marks `slot` in progress and opens its frame.
    ///
    /// Arity is checked here, before any input is evaluated.
    fn enter(&self, memo: &mut Memo, slot: usize) -> Result<Frame<'a>> {
        let node = self.graph.node_at(slot);
        if memo.is_in_progress(slot) {
            return Err(Error::Cycle { node: node.id });
        }
        check_arity(node)?;
        memo.begin(slot);

        let mut bits = Vec::new();
        bits.try_reserve_exact(node.dependencies().len())
            .map_err(|_| Error::Allocation { what: "fan-in bits" })?;
        Ok(Frame { node, slot, bits })
    }

    fn fold(&self, frame: &Frame<'a>) -> Result<bool> {
        let node = frame.node;
        match node.kind {
            // An unbound INPUT reads as 0.
            GateKind::Input => Ok(self.assignment.get(node.id).unwrap_or(false)),
            GateKind::Output => frame.bits.first().copied().ok_or_else(|| arity_error(node)),
            kind => kind.fold(&frame.bits).ok_or_else(|| arity_error(node)),
        }
    }
}

fn push_frame<'a>(stack: &mut Vec<Frame<'a>>, frame: Frame<'a>) -> Result<()> {
    stack
        .try_reserve(1)
        .map_err(|_| Error::Allocation { what: "evaluation stack" })?;
    stack.push(frame);
    Ok(())
}

fn arity_error(node: &Node) -> Error {
    Error::Arity {
        node: node.id,
        kind: node.kind,
        expected: node.kind.arity(),
        found: node.inputs.len(),
    }
}

fn check_arity(node: &Node) -> Result<()> {
    if node.kind.arity().accepts(node.inputs.len()) {
        Ok(())
    } else {
        Err(arity_error(node))
    }
}

/// Computes the bit value of node `id` under `assignment`.
///
/// Shorthand for [`Evaluator::evaluate`].
pub fn evaluate(graph: &NodeGraph, assignment: &Assignment, memo: &mut Memo, id: NodeId) -> Result<bool> {
    Evaluator::new(graph, assignment).evaluate(memo, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn id(x: u32) -> NodeId {
        NodeId::new(x)
    }

    fn assign(bits: &[(u32, bool)]) -> Assignment {
        let mut a = Assignment::new();
        for &(x, b) in bits {
            a.set(id(x), b);
        }
        a
    }

    fn eval_one(graph: &NodeGraph, assignment: &Assignment, x: u32) -> Result<bool> {
        let mut memo = Memo::for_graph(graph);
        evaluate(graph, assignment, &mut memo, id(x))
    }

    #[test]
    fn test_eval_input() {
        let graph = NodeGraph::new(vec![Node::input(1)]).unwrap();
        assert!(eval_one(&graph, &assign(&[(1, true)]), 1).unwrap());
        assert!(!eval_one(&graph, &assign(&[(1, false)]), 1).unwrap());
        assert!(!eval_one(&graph, &Assignment::new(), 1).unwrap());
    }

    #[test]
    fn test_eval_gates() {
        let graph = NodeGraph::new(vec![
            Node::input(1),
            Node::input(2),
            Node::gate(10, GateKind::And, [1, 2]),
            Node::gate(11, GateKind::Or, [1, 2]),
            Node::gate(12, GateKind::Xor, [1, 2]),
            Node::gate(13, GateKind::Not, [1]),
        ])
        .unwrap();
        for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
            let asg = assign(&[(1, a), (2, b)]);
            assert_eq!(eval_one(&graph, &asg, 10).unwrap(), a & b, "{a} AND {b}");
            assert_eq!(eval_one(&graph, &asg, 11).unwrap(), a | b, "{a} OR {b}");
            assert_eq!(eval_one(&graph, &asg, 12).unwrap(), a ^ b, "{a} XOR {b}");
            assert_eq!(eval_one(&graph, &asg, 13).unwrap(), !a, "NOT {a}");
        }
    }

    #[test]
    fn test_eval_output_passes_through() {
        let graph = NodeGraph::new(vec![
            Node::input(1),
            Node::gate(2, GateKind::Not, [1]),
            Node::output(3, 2),
        ])
        .unwrap();
        assert!(eval_one(&graph, &assign(&[(1, false)]), 3).unwrap());
        assert!(!eval_one(&graph, &assign(&[(1, true)]), 3).unwrap());
    }

    #[test]
    fn test_eval_shared_subcircuit_is_memoized() {
        // 3 = NOT 1 feeds both 4 and 5.
        let graph = NodeGraph::new(vec![
            Node::input(1),
            Node::input(2),
            Node::gate(3, GateKind::Not, [1]),
            Node::gate(4, GateKind::And, [3, 2]),
            Node::gate(5, GateKind::Or, [3, 4]),
            Node::output(6, 5),
        ])
        .unwrap();
        let asg = assign(&[(1, false), (2, true)]);
        let mut memo = Memo::for_graph(&graph);
        assert!(evaluate(&graph, &asg, &mut memo, id(6)).unwrap());
        assert_eq!(memo.len(), 6);
        assert!(memo.hits() >= 1);

        // A second evaluation in the same row is answered from the memo.
        let hits = memo.hits();
        assert!(evaluate(&graph, &asg, &mut memo, id(6)).unwrap());
        assert_eq!(memo.hits(), hits + 1);
    }

    #[test]
    fn test_eval_nary_fold() {
        let graph = NodeGraph::new(vec![
            Node::input(1),
            Node::input(2),
            Node::input(3),
            Node::gate(4, GateKind::Xor, [1, 2, 3]),
            Node::gate(5, GateKind::And, [1, 2, 3]),
            Node::gate(6, GateKind::Or, [1, 2, 3]),
        ])
        .unwrap();
        let asg = assign(&[(1, true), (2, true), (3, true)]);
        assert!(eval_one(&graph, &asg, 4).unwrap());
        assert!(eval_one(&graph, &asg, 5).unwrap());
        let asg = assign(&[(1, false), (2, false), (3, true)]);
        assert!(eval_one(&graph, &asg, 4).unwrap());
        assert!(!eval_one(&graph, &asg, 5).unwrap());
        assert!(eval_one(&graph, &asg, 6).unwrap());
    }

    #[test]
    fn test_eval_arity_errors() {
        let graph = NodeGraph::new(vec![
            Node::input(1),
            Node::input(2),
            Node::gate(3, GateKind::And, [1]),
            Node::gate(4, GateKind::Not, [1, 2]),
            Node::new(5, GateKind::Output),
            Node::new(6, GateKind::Output).with_inputs([1, 2]),
            Node::new(7, GateKind::Xor),
        ])
        .unwrap();
        let asg = Assignment::new();
        for (x, kind, found) in [
            (3, GateKind::And, 1),
            (4, GateKind::Not, 2),
            (5, GateKind::Output, 0),
            (6, GateKind::Output, 2),
            (7, GateKind::Xor, 0),
        ] {
            match eval_one(&graph, &asg, x) {
                Err(Error::Arity { node, kind: k, found: f, .. }) => {
                    assert_eq!(node, id(x));
                    assert_eq!(k, kind);
                    assert_eq!(f, found);
                }
                other => panic!("expected arity error for node {x}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_eval_missing_reference() {
        let graph = NodeGraph::new(vec![Node::input(1), Node::gate(2, GateKind::Or, [1, 9])]).unwrap();
        let res = eval_one(&graph, &assign(&[(1, false)]), 2);
        assert!(matches!(
            res,
            Err(Error::Reference { node: Some(n), missing: m }) if n == id(2) && m == id(9)
        ));

        let res = eval_one(&graph, &Assignment::new(), 42);
        assert!(matches!(res, Err(Error::Reference { node: None, .. })));
    }

    #[test]
    fn test_eval_cycle_is_detected() {
        let graph = NodeGraph::new(vec![
            Node::input(1),
            Node::gate(2, GateKind::And, [1, 3]),
            Node::gate(3, GateKind::Not, [2]),
            Node::output(4, 3),
        ])
        .unwrap();
        let res = eval_one(&graph, &assign(&[(1, true)]), 4);
        assert!(matches!(res, Err(Error::Cycle { node }) if node == id(3)));
    }

    #[test]
    fn test_eval_self_loop() {
        let graph = NodeGraph::new(vec![Node::gate(1, GateKind::Not, [1])]).unwrap();
        assert!(matches!(
            eval_one(&graph, &Assignment::new(), 1),
            Err(Error::Cycle { node }) if node == id(1)
        ));
    }

    #[test]
    fn test_eval_deep_chain() {
        // Far deeper than a native call per level would survive.
        const DEPTH: u32 = 200_000;
        let mut nodes = vec![Node::input(0)];
        nodes.extend((1..=DEPTH).map(|i| Node::gate(i, GateKind::Not, [i - 1])));
        nodes.push(Node::output(DEPTH + 1, DEPTH));
        let graph = NodeGraph::new(nodes).unwrap();

        // An even number of inversions.
        assert!(eval_one(&graph, &assign(&[(0, true)]), DEPTH + 1).unwrap());
        assert!(!eval_one(&graph, &assign(&[(0, false)]), DEPTH + 1).unwrap());
    }

    #[test]
    fn test_eval_repeated_input() {
        let graph = NodeGraph::new(vec![
            Node::input(1),
            Node::gate(2, GateKind::Xor, [1, 1]),
            Node::gate(3, GateKind::And, [1, 1, 1]),
        ])
        .unwrap();
        let asg = assign(&[(1, true)]);
        assert!(!eval_one(&graph, &asg, 2).unwrap());
        assert!(eval_one(&graph, &asg, 3).unwrap());
    }
}
