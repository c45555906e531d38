//! The Bookshelf module holds the in-memory model of a GSRC/ISPD
//! bookshelf placement design, and the code that assembles one from
//! its files.
//!
//! A design is described by five files sharing a base name: `.nodes`
//! (cell and terminal sizes), `.pl` (positions), `.nets`
//! (connectivity), `.scl` (standard cell rows) and, optionally,
//! `.wts` (weights).  Each file is read by its own module into its
//! own table; the `Design` struct simply owns the five tables.
//!
//! Nodes and placements are kept in `NamedTable`s -- a vector plus a
//! hash map from name to index, so entries can be looked up by name
//! and still be walked in file order.  Nets refer to nodes by name
//! only; a pin may name a node that does not exist, and the
//! consistency pass counts those.
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::auxfile;
use crate::error::Result;
use crate::marklist::MarkList;
use crate::nets::NetList;
use crate::nodes::NodeTable;
use crate::pl::PlacementTable;
use crate::policy::ParseOptions;
use crate::scl::RowTable;
use crate::wts::WeightTable;

/// A cell or terminal from the `.nodes` file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub is_terminal: bool,
}

impl Node {
    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }
}

/// A position record from the `.pl` file.  Only the first character of
/// the orientation (N, S, E, W, F) is kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub name: String,
    pub x: i64,
    pub y: i64,
    pub orientation: char,
    pub is_fixed: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
    Bidirectional,
    Unknown,
}

impl Direction {
    /// Classify by the first character of the token, ignoring case.
    pub fn from_token(tok: &str) -> Direction {
        match tok.chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('I') => Direction::Input,
            Some('O') => Direction::Output,
            Some('B') => Direction::Bidirectional,
            _ => Direction::Unknown,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let c = match self {
            Direction::Input => 'I',
            Direction::Output => 'O',
            Direction::Bidirectional => 'B',
            Direction::Unknown => 'U',
        };
        write!(f, "{}", c)
    }
}

/// One connection of a net.  Offsets are relative to the node's
/// placement origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Pin {
    pub node_name: String,
    pub direction: Direction,
    pub x_offset: f64,
    pub y_offset: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Net {
    pub name: String,
    pub pins: Vec<Pin>,
}

impl Net {
    pub fn degree(&self) -> usize {
        self.pins.len()
    }
}

/// One `CoreRow` block of the `.scl` file.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RowAttr {
    pub coordinate: i32,
    pub height: i32,
    pub site_width: i32,
    pub site_spacing: i32,
    pub site_orientation: i32,
    pub site_symmetry: i32,
    pub subrow_origin: i64,
    pub num_sites: i64,
}

pub trait Named {
    fn name(&self) -> &str;
}

impl Named for Node {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Placement {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Entries in first-seen order, with a name index.  Inserting a name
/// that is already present replaces the earlier entry in place: the
/// last occurrence in a file wins.
#[derive(Clone, Debug)]
pub struct NamedTable<T> {
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for NamedTable<T> {
    fn default() -> NamedTable<T> {
        NamedTable {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Named> NamedTable<T> {
    pub fn new() -> NamedTable<T> {
        NamedTable::default()
    }

    /// Returns the entry that was replaced, if any.
    pub fn insert(&mut self, item: T) -> Option<T> {
        match self.index.get(item.name()) {
            Some(&idx) => Some(std::mem::replace(&mut self.items[idx], item)),
            None => {
                self.index.insert(item.name().to_string(), self.items.len());
                self.items.push(item);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.index.get(name).map(|&idx| &self.items[idx])
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

/// Paths of the files making up one design.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DesignFiles {
    pub aux: Option<PathBuf>,
    pub nodes: PathBuf,
    pub nets: PathBuf,
    pub wts: PathBuf,
    pub pl: PathBuf,
    pub scl: PathBuf,
}

impl DesignFiles {
    /// `dir/basename.nodes`, `dir/basename.pl`, and so on.
    pub fn canonical(dir: &Path, basename: &str) -> DesignFiles {
        let file = |ext: &str| dir.join(format!("{}.{}", basename, ext));
        DesignFiles {
            aux: None,
            nodes: file("nodes"),
            nets: file("nets"),
            wts: file("wts"),
            pl: file("pl"),
            scl: file("scl"),
        }
    }

    /// The file names as listed in an aux file, in aux order.
    pub fn names(&self) -> [String; 5] {
        let name = |p: &Path| {
            p.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        };
        [
            name(&self.nodes),
            name(&self.nets),
            name(&self.wts),
            name(&self.pl),
            name(&self.scl),
        ]
    }
}

/// Diagnostics from cross-checking the tables.  Never fatal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Consistency {
    /// Nodes with no record in the placement table.
    pub nodes_without_placement: usize,
    /// Pins naming a node that is not in the node table.
    pub pins_on_unknown_nodes: usize,
    /// Nodes that no net connects to.
    pub unconnected_nodes: usize,
}

/// A complete design.  Read-only once constructed.
#[derive(Clone, Debug)]
pub struct Design {
    pub name: String,
    pub files: DesignFiles,
    pub nodes: NodeTable,
    pub placements: PlacementTable,
    pub nets: NetList,
    pub scl: RowTable,
    pub wts: WeightTable,
}

impl Design {
    /// Read `dir/basename.{nodes,pl,nets,scl,wts}`.
    pub fn read(dir: &Path, basename: &str, opts: &ParseOptions) -> Result<Design> {
        Design::read_files(basename, DesignFiles::canonical(dir, basename), opts)
    }

    /// Read the files named by an aux file.
    pub fn read_aux(aux_path: &Path, opts: &ParseOptions) -> Result<Design> {
        let files = auxfile::read_aux(aux_path)?;
        let name = aux_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Design::read_files(&name, files, opts)
    }

    pub fn read_files(name: &str, files: DesignFiles, opts: &ParseOptions) -> Result<Design> {
        let nodes = NodeTable::read(&files.nodes, opts)?;
        let placements = PlacementTable::read(&files.pl, opts)?;
        let nets = NetList::read(&files.nets, opts)?;
        let scl = RowTable::read(&files.scl, opts)?;
        let wts = WeightTable::read(&files.wts, opts)?;

        let design = Design {
            name: name.to_string(),
            files,
            nodes,
            placements,
            nets,
            scl,
            wts,
        };
        design.check_declared_counts();
        info!(
            "Design {} read: {} nodes, {} placements, {} nets, {} rows, {} weights",
            design.name,
            design.nodes.len(),
            design.placements.len(),
            design.nets.len(),
            design.scl.rows.len(),
            design.wts.len()
        );

        Ok(design)
    }

    /// Warn about header counts that do not match what was parsed.
    /// The two are never reconciled.
    pub fn check_declared_counts(&self) {
        let check = |what: &str, declared: Option<usize>, actual: usize| {
            if let Some(d) = declared {
                if d != actual {
                    warn!("{}: {} declared {}, found {}", self.name, what, d, actual);
                }
            }
        };
        check("NumNodes", self.nodes.declared_nodes, self.nodes.len());
        check("NumTerminals", self.nodes.declared_terminals, self.nodes.num_terminals());
        check("NumNets", self.nets.declared_nets, self.nets.len());
        check("NumPins", self.nets.declared_pins, self.nets.num_pins());
        check("NumRows", self.scl.declared_rows, self.scl.rows.len());
    }

    pub fn consistency(&self) -> Consistency {
        let nodes_without_placement = self
            .nodes
            .iter()
            .filter(|n| !self.placements.contains(&n.name))
            .count();

        let mut connected = MarkList::new(self.nodes.len());
        let mut pins_on_unknown_nodes = 0;
        for net in self.nets.iter() {
            for pin in &net.pins {
                match self.nodes.index_of(&pin.node_name) {
                    Some(idx) => {
                        connected.mark(idx);
                    }
                    None => pins_on_unknown_nodes += 1,
                }
            }
        }

        Consistency {
            nodes_without_placement,
            pins_on_unknown_nodes,
            unconnected_nodes: self.nodes.len() - connected.num_marked(),
        }
    }
}
