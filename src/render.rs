//! Plain-text rendering of truth tables.
//!
//! Every line lists the input columns, each followed by a space, then `"| "`,
//! then the output columns separated by spaces:
//!
//! ```text
//! 1 2 | 4
//! 0 0 | 0
//! 1 0 | 0
//! 0 1 | 0
//! 1 1 | 1
//! ```

use std::fmt::{self, Display, Formatter};
use std::io::Write;

use crate::error::Result;
use crate::table::{Row, TruthTable};
use crate::types::NodeId;

/// One line of the table: input cells, each followed by a space, then `"| "`,
/// then the output cells separated by spaces.
struct Columns<'a, T> {
    inputs: &'a [T],
    outputs: &'a [T],
}

impl<T: Display> Display for Columns<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for x in self.inputs {
            write!(f, "{} ", x)?;
        }
        f.write_str("| ")?;
        for (i, x) in self.outputs.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", x)?;
        }
        Ok(())
    }
}

fn digits(bits: &[bool]) -> Vec<u8> {
    bits.iter().map(|&b| u8::from(b)).collect()
}

/// The header line: input ids, then output ids.
pub fn header_line(inputs: &[NodeId], outputs: &[NodeId]) -> String {
    Columns { inputs, outputs }.to_string()
}

/// A row line: input bits, then output bits.
pub fn row_line(row: &Row) -> String {
    row.to_string()
}

impl Display for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let columns = Columns {
            inputs: &digits(&self.inputs),
            outputs: &digits(&self.outputs),
        };
        columns.fmt(f)
    }
}

/// Writes the header of `table` followed by `rows`, one line each. Every
/// line, the last one included, ends with `\n`.
///
/// Stops at the first failing row and returns its error; lines already written
/// stay written.
pub fn write_rows<W, I>(out: &mut W, table: &TruthTable<'_>, rows: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = Result<Row>>,
{
    writeln!(out, "{}", header_line(table.input_ids(), table.output_ids()))?;
    for row in rows {
        writeln!(out, "{}", row?)?;
    }
    out.flush()?;
    Ok(())
}

/// Evaluates and writes the whole table.
pub fn write_table<W: Write>(out: &mut W, table: &TruthTable<'_>) -> Result<()> {
    write_rows(out, table, table.rows())
}

/// Renders the whole table into a string.
pub fn to_table_string(table: &TruthTable<'_>) -> Result<String> {
    let mut buf = Vec::new();
    write_table(&mut buf, table)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
