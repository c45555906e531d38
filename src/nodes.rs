//! Reader for `.nodes` files.
//!
//! ```text
//! UCLA nodes 1.0
//! NumNodes : 3
//! NumTerminals : 1
//!   o0   8  12
//!   o1   4  12
//!   p0   1   1  terminal
//! ```
use std::io::BufRead;
use std::path::Path;

use log::{debug, info};
use scan_fmt::scan_fmt;

use crate::bookshelf::{NamedTable, Node};
use crate::error::Result;
use crate::policy::{FieldKind, ParseOptions};
use crate::reader::{is_format_marker, LineReader};

#[derive(Clone, Debug, Default)]
pub struct NodeTable {
    pub nodes: NamedTable<Node>,
    /// `NumNodes` from the header, if present.
    pub declared_nodes: Option<usize>,
    /// `NumTerminals` from the header, if present.
    pub declared_terminals: Option<usize>,
}

impl NodeTable {
    pub fn read(filepath: &Path, opts: &ParseOptions) -> Result<NodeTable> {
        let mut reader = LineReader::open(filepath)?;
        NodeTable::parse(&mut reader, opts)
    }

    pub fn parse<R: BufRead>(reader: &mut LineReader<R>, opts: &ParseOptions) -> Result<NodeTable> {
        let mut table = NodeTable::default();

        while let Some(line) = reader.getline()? {
            if is_format_marker(&line) {
                continue;
            }
            if line.starts_with("NumNodes") {
                table.declared_nodes = scan_fmt!(&line, "NumNodes : {d}", usize).ok();
                continue;
            }
            if line.starts_with("NumTerminals") {
                table.declared_terminals = scan_fmt!(&line, "NumTerminals : {d}", usize).ok();
                continue;
            }

            let toks: Vec<&str> = line.split_whitespace().collect();
            if toks.len() < 3 {
                debug!("{}:{}: short node line ignored", reader.path().display(), reader.line_number());
                continue;
            }

            let size = |tok: &str| {
                opts.policy
                    .parse::<u32>(FieldKind::NodeSize, tok, reader.path(), reader.line_number())
            };
            let (width, height) = match (size(toks[1])?, size(toks[2])?) {
                (Some(w), Some(h)) => (w, h),
                _ => continue,
            };
            let is_terminal = toks
                .get(3)
                .map_or(false, |t| t.to_lowercase().contains("terminal"));

            table.insert(Node {
                name: toks[0].to_string(),
                width,
                height,
                is_terminal,
            });
        }

        info!(
            "Nodes file has {} nodes, {} terminals",
            table.len(),
            table.num_terminals()
        );
        Ok(table)
    }

    pub fn insert(&mut self, node: Node) -> Option<Node> {
        self.nodes.insert(node)
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.nodes.index_of(name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    pub fn num_terminals(&self) -> usize {
        self.iter().filter(|n| n.is_terminal).count()
    }
}
