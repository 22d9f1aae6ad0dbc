//! # netlist-rs: truth tables for gate-level netlists
//!
//! **`netlist-rs`** reads a combinational circuit described as a *netlist* of
//! AND/OR/NOT/XOR gates, INPUT terminals and OUTPUT terminals, and produces
//! its complete truth table by evaluating the circuit for every assignment of
//! bits to its inputs.
//!
//! ## How evaluation works
//!
//! The circuit is held in a [`NodeGraph`][crate::graph::NodeGraph], indexed by
//! node id. For each row, the [`TruthTable`][crate::table::TruthTable] binds
//! the bits of the row to the INPUT nodes (lowest id = least significant bit)
//! and asks the [`Evaluator`][crate::eval::Evaluator] for every OUTPUT node.
//! The evaluator walks the fan-in depth-first, folding input bits left to
//! right, and caches each node's value in a [`Memo`][crate::memo::Memo] that
//! lives for exactly one row. Self-dependent circuits are reported as
//! [`Error::Cycle`] instead of recursing forever.
//!
//! ## Basic Usage
//!
//! ```rust
//! use netlist_rs::graph::NodeGraph;
//! use netlist_rs::parser::parse_netlist;
//! use netlist_rs::render::to_table_string;
//! use netlist_rs::table::TruthTable;
//!
//! let text = "
//! {
//!     { Type=INPUT
//!       UniqueID=1 }
//! }";
//! // Braces must stand on their own lines:
//! assert!(parse_netlist(text).is_err());
//!
//! let text = "
//! {
//!     {
//!         Type=INPUT
//!         UniqueID=1
//!     }
//!     {
//!         Type=NOT
//!         UniqueID=2
//!         Input=1
//!     }
//!     {
//!         Type=OUTPUT
//!         UniqueID=3
//!         Input=2
//!     }
//! }";
//! let graph = NodeGraph::new(parse_netlist(text).unwrap()).unwrap();
//! let table = TruthTable::new(&graph).unwrap();
//! assert_eq!(to_table_string(&table).unwrap(), "1 | 3\n0 | 1\n1 | 0\n");
//! ```
//!
//! ## Core Components
//!
//! - **[`graph`]**: the node graph, id index, and whole-graph validation.
//! - **[`eval`]**: the memoized depth-first evaluator.
//! - **[`table`]**: enumeration of all input combinations, sequential or parallel.
//! - **[`parser`]** and **[`render`]**: the netlist text format and the table text format.

pub mod assignment;
pub mod config;
pub mod dot;
pub mod error;
pub mod eval;
pub mod graph;
pub mod kind;
pub mod memo;
pub mod node;
pub mod parser;
pub mod render;
pub mod table;
pub mod types;

pub use error::{Error, Result};
