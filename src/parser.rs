//! Reading and writing netlist files.
//!
//! # Netlist Format
//!
//! ```text
//! {
//!     # a comment
//!     {
//!         Type=INPUT
//!         UniqueID=1
//!         Output=3
//!     }
//!     {
//!         Type=AND
//!         UniqueID=3
//!         Input=1,2
//!     }
//! }
//! ```
//!
//! The file is one outer block holding zero or more node stanzas. Inside a
//! stanza each line is a `key=value` property:
//!
//! - `Type=<AND|OR|NOT|XOR|INPUT|OUTPUT>` (required)
//! - `UniqueID=<non-negative integer>` (required)
//! - `Input=<comma-separated ids>`
//! - `Output=<comma-separated ids>` (kept, but never evaluated)
//!
//! Lines are trimmed before use. Blank lines and lines starting with `#` are
//! ignored everywhere.

use std::fmt;
use std::fs;
use std::path::Path;

use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::kind::GateKind;
use crate::node::Node;
use crate::types::NodeId;

/// Properties collected for the stanza being read.
#[derive(Debug)]
struct Stanza {
    opened_at: usize,
    kind: Option<GateKind>,
    id: Option<NodeId>,
    inputs: Vec<NodeId>,
    outputs: Vec<NodeId>,
}

impl Stanza {
    fn new(opened_at: usize) -> Self {
        Self {
            opened_at,
            kind: None,
            id: None,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    fn property(&mut self, line_no: usize, line: &str) -> Result<()> {
        let Some((key, value)) = line.split_once('=') else {
            return Err(Error::format(line_no, format!("unrecognized line within stanza: {}", line)));
        };
        match key.trim() {
            "Type" => {
                let kind = value
                    .trim()
                    .parse::<GateKind>()
                    .map_err(|e| Error::format(line_no, e.to_string()))?;
                self.kind = Some(kind);
            }
            "UniqueID" => {
                let id = value
                    .parse::<NodeId>()
                    .map_err(|_| Error::format(line_no, format!("invalid UniqueID: {}", line)))?;
                self.id = Some(id);
            }
            "Input" => self.inputs.extend(parse_connections(line_no, value)?),
            "Output" => self.outputs.extend(parse_connections(line_no, value)?),
            _ => {
                return Err(Error::format(line_no, format!("unrecognized line within stanza: {}", line)));
            }
        }
        Ok(())
    }

    fn finish(self, line_no: usize) -> Result<Node> {
        let id = self.id.ok_or_else(|| {
            Error::format(
                line_no,
                format!("stanza opened on line {} has no UniqueID", self.opened_at),
            )
        })?;
        let kind = self.kind.ok_or_else(|| {
            Error::format(
                line_no,
                format!("stanza opened on line {} has no Type", self.opened_at),
            )
        })?;
        Ok(Node {
            id,
            kind,
            inputs: self.inputs,
            outputs: self.outputs,
        })
    }
}

fn parse_connections(line_no: usize, list: &str) -> Result<Vec<NodeId>> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse::<NodeId>()
                .map_err(|_| Error::format(line_no, format!("invalid node id '{}'", item)))
        })
        .collect()
}

/// Parses netlist text into nodes, in file order.
pub fn parse_netlist(content: &str) -> Result<Vec<Node>> {
    let mut nodes = Vec::new();
    let mut in_block = false;
    let mut stanza: Option<Stanza> = None;
    let mut last_line = 0;

    for (i, raw) in content.lines().enumerate() {
        let line_no = i + 1;
        last_line = line_no;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match (line, in_block, stanza.is_some()) {
            ("{", false, _) => in_block = true,
            ("{", true, false) => stanza = Some(Stanza::new(line_no)),
            ("{", true, true) => warn!("line {}: ignoring '{{' inside a stanza", line_no),
            ("}", _, true) => {
                if let Some(s) = stanza.take() {
                    nodes.push(s.finish(line_no)?);
                }
            }
            ("}", true, false) => in_block = false,
            ("}", false, false) => warn!("line {}: ignoring '}}' outside of any block", line_no),
            (_, _, true) => {
                if let Some(s) = stanza.as_mut() {
                    s.property(line_no, line)?;
                }
            }
            (_, _, false) => {
                return Err(Error::format(
                    line_no,
                    format!("unexpected content outside of a stanza: {}", line),
                ));
            }
        }
    }

    if in_block || stanza.is_some() {
        return Err(Error::format(last_line, "unclosed block or stanza"));
    }

    debug!("parsed {} nodes", nodes.len());
    Ok(nodes)
}

/// Reads and parses a netlist file.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Node>> {
    let path = path.as_ref();
    info!("Loading netlist from {}", path.display());
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_netlist(&content)
}

/// Nodes displayed in the netlist format.
struct Netlist<'a>(&'a [Node]);

impl fmt::Display for Netlist<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_ids(f: &mut fmt::Formatter<'_>, key: &str, ids: &[NodeId]) -> fmt::Result {
            if ids.is_empty() {
                return Ok(());
            }
            write!(f, "        {}=", key)?;
            for (i, id) in ids.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{}", id)?;
            }
            writeln!(f)
        }

        writeln!(f, "{{")?;
        for node in self.0 {
            writeln!(f, "    {{")?;
            writeln!(f, "        Type={}", node.kind)?;
            writeln!(f, "        UniqueID={}", node.id)?;
            write_ids(f, "Input", &node.inputs)?;
            write_ids(f, "Output", &node.outputs)?;
            writeln!(f, "    }}")?;
        }
        writeln!(f, "}}")
    }
}

/// Writes nodes in the netlist format.
///
/// Empty `Input=`/`Output=` lists are omitted.
pub fn to_netlist_string(nodes: &[Node]) -> String {
    Netlist(nodes).to_string()
}

/// Writes nodes to a file in the netlist format.
pub fn save<P: AsRef<Path>>(path: P, nodes: &[Node]) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, to_netlist_string(nodes)).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
