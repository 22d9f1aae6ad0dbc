//! Truth-table generation.
//!
//! A [`TruthTable`] enumerates every assignment of bits to the INPUT nodes of
//! a graph and evaluates every OUTPUT node under it. Columns follow ascending
//! node id: bit `i` of combination `c` is bound to the `i`-th lowest INPUT id,
//! so the first input column is the least significant bit.
//!
//! Rows are produced lazily, in ascending combination order, by [`Rows`]. Each
//! row is evaluated with its own [`Assignment`] and a fresh [`Memo`], which
//! also makes rows independent of each other; [`TruthTable::par_rows`] uses
//! that to evaluate them on the rayon thread pool.
//!
//! # Examples
//!
//! ```
//! use netlist_rs::graph::NodeGraph;
//! use netlist_rs::kind::GateKind;
//! use netlist_rs::node::Node;
//! use netlist_rs::table::generate;
//!
//! let graph = NodeGraph::new(vec![
//!     Node::input(1),
//!     Node::input(2),
//!     Node::gate(3, GateKind::And, [1, 2]),
//!     Node::output(4, 3),
//! ])
//! .unwrap();
//!
//! let rows = generate(&graph).unwrap().collect::<Result<Vec<_>, _>>().unwrap();
//! assert_eq!(rows.len(), 4);
//! assert_eq!(rows[3].inputs, vec![true, true]);
//! assert_eq!(rows[3].outputs, vec![true]);
//! ```

use log::debug;
use rayon::prelude::*;

use crate::assignment::Assignment;
use crate::config::{TableConfig, MAX_INPUTS};
use crate::error::{Error, Result};
use crate::eval::Evaluator;
use crate::graph::NodeGraph;
use crate::memo::Memo;
use crate::types::NodeId;

/// One line of a truth table.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Row {
    pub combination: u64,
    /// Bits of the INPUT nodes, ascending by id.
    pub inputs: Vec<bool>,
    /// Bits of the OUTPUT nodes, ascending by id.
    pub outputs: Vec<bool>,
}

#[derive(Debug, Clone)]
pub struct TruthTable<'g> {
    graph: &'g NodeGraph,
    inputs: Vec<NodeId>,
    outputs: Vec<NodeId>,
}

impl<'g> TruthTable<'g> {
    /// Prepares the truth table of `graph` with the default [`TableConfig`].
    pub fn new(graph: &'g NodeGraph) -> Result<Self> {
        Self::with_config(graph, TableConfig::default())
    }

    /// Prepares the truth table of `graph`.
    ///
    /// # Errors
    ///
    /// - [`Error::TooManyInputs`] if the graph has more INPUT nodes than
    ///   `config.max_inputs` (or [`MAX_INPUTS`]).
    /// - Any error of [`NodeGraph::validate`] when `config.validate` is set.
    pub fn with_config(graph: &'g NodeGraph, config: TableConfig) -> Result<Self> {
        let limit = config.max_inputs.min(MAX_INPUTS);
        let count = graph.input_nodes().len();
        if count > limit as usize {
            return Err(Error::TooManyInputs { count, limit });
        }
        if config.validate {
            graph.validate()?;
        }

        let table = Self {
            graph,
            inputs: graph.input_nodes().to_vec(),
            outputs: graph.output_nodes().to_vec(),
        };
        debug!(
            "TruthTable: {} inputs, {} outputs, {} rows",
            table.inputs.len(),
            table.outputs.len(),
            table.num_rows()
        );
        Ok(table)
    }

    pub fn graph(&self) -> &'g NodeGraph {
        self.graph
    }

    /// Input column ids, ascending.
    pub fn input_ids(&self) -> &[NodeId] {
        &self.inputs
    }

    /// Output column ids, ascending.
    pub fn output_ids(&self) -> &[NodeId] {
        &self.outputs
    }

    /// `2^m` for `m` INPUT nodes.
    pub fn num_rows(&self) -> u64 {
        1u64 << self.inputs.len()
    }

    /// Evaluates the row of a single combination.
    ///
    /// # Errors
    ///
    /// Any error of [`Evaluator::evaluate`], or [`Error::Allocation`] if the
    /// row's memo or output buffer cannot be allocated.
    ///
    /// # Panics
    ///
    /// Panics if `combination` is not below [`num_rows`][TruthTable::num_rows].
    pub fn row(&self, combination: u64) -> Result<Row> {
        assert!(
            combination < self.num_rows(),
            "combination {} out of range for {} inputs",
            combination,
            self.inputs.len()
        );

        let assignment = Assignment::from_combination(&self.inputs, combination);
        let evaluator = Evaluator::new(self.graph, &assignment);
        let mut memo = Memo::try_for_graph(self.graph)?;

        let mut outputs = Vec::new();
        outputs
            .try_reserve_exact(self.outputs.len())
            .map_err(|_| Error::Allocation { what: "output row" })?;
        for &id in self.outputs.iter() {
            outputs.push(evaluator.evaluate(&mut memo, id)?);
        }

        Ok(Row {
            combination,
            inputs: assignment.bits().to_vec(),
            outputs,
        })
    }

    /// Lazy iterator over all rows, in ascending combination order.
    pub fn rows(&self) -> Rows<'g> {
        Rows {
            end: self.num_rows(),
            table: self.clone(),
            next: 0,
            failed: false,
        }
    }

    /// Evaluates every row, or returns the first error.
    pub fn collect(&self) -> Result<Vec<Row>> {
        self.rows().collect()
    }

    /// Evaluates every row on the rayon thread pool.
    ///
    /// The rows are returned in ascending combination order, exactly as
    /// [`collect`][TruthTable::collect] would return them. If several rows
    /// fail, which of their errors is returned is unspecified.
    pub fn par_rows(&self) -> Result<Vec<Row>> {
        let n = usize::try_from(self.num_rows()).map_err(|_| Error::Allocation { what: "row buffer" })?;
        debug!("TruthTable: evaluating {} rows in parallel", n);
        (0..n).into_par_iter().map(|c| self.row(c as u64)).collect()
    }
}

impl<'g> IntoIterator for TruthTable<'g> {
    type Item = Result<Row>;
    type IntoIter = Rows<'g>;

    fn into_iter(self) -> Self::IntoIter {
        Rows {
            end: self.num_rows(),
            table: self,
            next: 0,
            failed: false,
        }
    }
}

/// Rows of a [`TruthTable`], in ascending combination order.
///
/// After yielding an error the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct Rows<'g> {
    table: TruthTable<'g>,
    next: u64,
    end: u64,
    failed: bool,
}

impl<'g> Rows<'g> {
    pub fn table(&self) -> &TruthTable<'g> {
        &self.table
    }
}

impl Iterator for Rows<'_> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.next >= self.end {
            return None;
        }
        let res = self.table.row(self.next);
        self.next += 1;
        if res.is_err() {
            self.failed = true;
        }
        Some(res)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        match usize::try_from(self.end - self.next) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl std::iter::FusedIterator for Rows<'_> {}

/// Prepares the truth table of `graph` with the default configuration and
/// returns its rows.
pub fn generate(graph: &NodeGraph) -> Result<Rows<'_>> {
    TruthTable::new(graph).map(IntoIterator::into_iter)
}
