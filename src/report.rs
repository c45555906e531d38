//! Text reports.  The summary reproduces the layout of the legacy
//! placement tool line for line, so that reports can be diffed against
//! its output.
use std::fmt;

use crate::bookshelf::Design;
use crate::stats::{BinGrid, DesignStats};

/// Scientific notation as `printf("%E")` writes it: six decimals and a
/// signed exponent of at least two digits (`1.000000E+02`).
pub fn sci(v: f64) -> String {
    let s = format!("{:.6E}", v);
    match s.split_once('E') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            format!("{}E{}{:0>2}", mantissa, sign, digits)
        }
        None => s,
    }
}

/// The legacy database summary for a design.
pub struct SummaryReport<'a> {
    pub design: &'a Design,
    pub stats: &'a DesignStats,
}

impl<'a> SummaryReport<'a> {
    pub fn new(design: &'a Design, stats: &'a DesignStats) -> SummaryReport<'a> {
        SummaryReport { design, stats }
    }
}

impl fmt::Display for SummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let d = self.design;
        let s = self.stats;
        let base = &d.name;
        let names = d.files.names();

        writeln!(f, "Use BOOKSHELF placement format")?;
        match &d.files.aux {
            Some(aux) => write!(f, "Reading AUX file: {}", aux.display())?,
            None => write!(f, "Reading AUX file: {}/{}.aux", base, base)?,
        }
        for name in &names {
            write!(f, " {}", name)?;
        }
        writeln!(f)?;
        writeln!(f, "Set core region from site info: {}", s.core)?;
        writeln!(f, "NumModules: {}", s.num_modules)?;
        writeln!(f, "NumNodes: {} (= {}k)", s.num_nodes, s.num_nodes / 1000)?;
        writeln!(f, "Terminals: {}", s.num_terminals)?;
        writeln!(f, "Nets: {}", s.degrees.num_nets)?;
        writeln!(f, "Pins: {}", s.degrees.pin_count)?;
        writeln!(f, "Max net degree= {}", s.degrees.max_degree)?;
        writeln!(f, "Initialize module position with file: {}", names[3])?;

        writeln!(f, "<<<< DATABASE SUMMARIES >>>>")?;
        writeln!(f, "Core region: {}", s.core)?;
        writeln!(
            f,
            "Row Height/Number: {} / {} (site step {}.000000)",
            s.row_height, s.num_rows, s.site_step
        )?;
        let areas = [
            ("Core Area", s.areas.core_area),
            ("Cell Area", s.areas.cell_area()),
            ("Movable Area", s.areas.movable_area),
            ("Fixed Area", s.areas.fixed_area),
            ("Fixed Area in Core", s.areas.fixed_in_core),
        ];
        for (label, area) in areas {
            writeln!(f, "{}: {} ({})", label, area, sci(area as f64))?;
        }
        writeln!(f, "Placement Util.: {:.2}% (=move/freeSites)", s.placement_utilization())?;
        writeln!(f, "Core Density: {:.2}% (=usedArea/core)", s.core_density())?;
        writeln!(f, "Cell #: {} (={}k)", s.num_nodes, s.num_nodes / 1000)?;
        // The legacy tool does not classify macros.
        writeln!(
            f,
            "Object #: {} (={}k) (fixed: {}) (macro: 0)",
            s.num_modules,
            s.num_modules / 1000,
            s.num_terminals
        )?;
        writeln!(f, "Net #: {} (={}k)", s.degrees.num_nets, s.degrees.num_nets / 1000)?;
        writeln!(f, "Max net degree=: {}", s.degrees.max_degree)?;
        writeln!(
            f,
            "Pin 2 ({}) 3-10 ({}) 11-100 ({}) 100- ({})",
            s.degrees.two, s.degrees.three_to_ten, s.degrees.eleven_to_hundred, s.degrees.over_hundred
        )?;
        writeln!(f, "Pin #: {}", s.degrees.pin_count)
    }
}

pub fn summary_report(design: &Design, stats: &DesignStats) -> String {
    SummaryReport::new(design, stats).to_string()
}

/// Bin grid settings, printed after the summary.
pub struct BinReport<'a>(pub &'a BinGrid);

impl fmt::Display for BinReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let b = self.0;
        writeln!(f)?;
        writeln!(f, "Bin Setting:")?;
        writeln!(f, "Bin dimension: [{},{}]", b.dim_x, b.dim_y)?;
        writeln!(f, "coreRegion width: {}", b.region_width)?;
        writeln!(f, "coreRegion height: {}", b.region_height)?;
        writeln!(f, "Bin step: [{:.4},{:.4}]", b.step_x, b.step_y)
    }
}

pub fn bin_report(bins: &BinGrid) -> String {
    BinReport(bins).to_string()
}

/// Plain counts and cross-reference diagnostics, without any of the
/// area statistics.
pub struct BasicReport<'a>(pub &'a Design);

impl fmt::Display for BasicReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let d = self.0;
        let c = d.consistency();
        writeln!(f, "---- DESIGN {} ----", d.name)?;
        writeln!(
            f,
            "Design has {} nodes ({} terminals), {} nets, {} rows",
            d.nodes.len(),
            d.nodes.num_terminals(),
            d.nets.len(),
            d.scl.rows.len()
        )?;
        writeln!(f, "{} placements, {} pins, {} weights", d.placements.len(), d.nets.num_pins(), d.wts.len())?;
        writeln!(f, "Nodes without placement: {}", c.nodes_without_placement)?;
        writeln!(f, "Pins on unknown nodes: {}", c.pins_on_unknown_nodes)?;
        writeln!(f, "Unconnected nodes: {}", c.unconnected_nodes)
    }
}

pub fn basic_report(design: &Design) -> String {
    BasicReport(design).to_string()
}
