//! Summary statistics for a design: the core region inferred from the
//! rows, how node area splits between movable and fixed, the resulting
//! utilization and density, and the net degree distribution.
//!
//! All areas are integer (`i64`); percentages are computed in `f64`
//! only at the end.
use std::fmt;

use crate::bookshelf::{Design, Net, RowAttr};

/// The core region, `[min_x, max_x) x [min_y, max_y)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CoreBox {
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

impl CoreBox {
    /// Bounding box of all rows.  A row spans `num_sites` sites of
    /// `site_width` (at least 1) from its subrow origin.  With no rows
    /// the box is empty at the origin.
    pub fn from_rows(rows: &[RowAttr]) -> CoreBox {
        let mut iter = rows.iter();
        let first = match iter.next() {
            Some(r) => r,
            None => return CoreBox::default(),
        };

        let span = |r: &RowAttr| CoreBox {
            min_x: r.subrow_origin,
            min_y: r.coordinate as i64,
            max_x: r
                .subrow_origin
                .saturating_add(r.num_sites.saturating_mul(r.site_width.max(1) as i64)),
            max_y: r.coordinate as i64 + r.height as i64,
        };
        iter.fold(span(first), |acc, r| {
            let s = span(r);
            CoreBox {
                min_x: acc.min_x.min(s.min_x),
                min_y: acc.min_y.min(s.min_y),
                max_x: acc.max_x.max(s.max_x),
                max_y: acc.max_y.max(s.max_y),
            }
        })
    }

    // Absurd row sizes saturate at i64::MAX rather than wrapping.
    pub fn width(&self) -> i64 {
        self.max_x.saturating_sub(self.min_x).max(0)
    }

    pub fn height(&self) -> i64 {
        self.max_y.saturating_sub(self.min_y).max(0)
    }

    pub fn area(&self) -> i64 {
        self.width().saturating_mul(self.height())
    }

    /// Half-open containment test for a single point.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.min_x && x < self.max_x && y >= self.min_y && y < self.max_y
    }
}

impl fmt::Display for CoreBox {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "lower left: ({},{}) to upper right: ({},{})",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}

/// `100 * num / den`, or zero when `den` is not positive.
pub fn percentage(num: i64, den: i64) -> f64 {
    if den <= 0 {
        return 0.0;
    }
    100.0 * num as f64 / den as f64
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AreaSummary {
    pub core_area: i64,
    pub movable_area: i64,
    pub fixed_area: i64,
    /// Area of fixed nodes whose placement origin lies in the core.
    /// Only the origin is tested, not the node's footprint.
    pub fixed_in_core: i64,
}

impl AreaSummary {
    /// A node is fixed if it is a terminal or its placement says FIXED.
    pub fn compute(design: &Design, core: &CoreBox) -> AreaSummary {
        let mut areas = AreaSummary {
            core_area: core.area(),
            ..AreaSummary::default()
        };

        for node in design.nodes.iter() {
            let area = node.area();
            let placement = design.placements.get(&node.name);
            let fixed = node.is_terminal || placement.map_or(false, |p| p.is_fixed);
            if !fixed {
                areas.movable_area += area;
                continue;
            }
            areas.fixed_area += area;
            if let Some(p) = placement {
                if core.contains(p.x, p.y) {
                    areas.fixed_in_core += area;
                }
            }
        }

        areas
    }

    /// Cell area is reported as the movable area.
    pub fn cell_area(&self) -> i64 {
        self.movable_area
    }

    pub fn free_sites_area(&self) -> i64 {
        (self.core_area - self.fixed_in_core).max(0)
    }

    /// Movable area over the free sites, in percent.
    pub fn placement_utilization(&self) -> f64 {
        percentage(self.movable_area, self.free_sites_area())
    }

    /// Movable plus fixed-in-core area over the core, in percent.
    pub fn core_density(&self) -> f64 {
        percentage(self.movable_area + self.fixed_in_core, self.core_area)
    }
}

/// Net counts by degree.  Degrees 0 and 1 count towards the totals but
/// land in no bucket.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DegreeHistogram {
    pub two: usize,
    pub three_to_ten: usize,
    pub eleven_to_hundred: usize,
    pub over_hundred: usize,
    pub num_nets: usize,
    pub pin_count: usize,
    pub max_degree: usize,
}

impl DegreeHistogram {
    pub fn from_nets<'a>(nets: impl IntoIterator<Item = &'a Net>) -> DegreeHistogram {
        let mut h = DegreeHistogram::default();
        for net in nets {
            h.add(net.degree());
        }
        h
    }

    pub fn add(&mut self, degree: usize) {
        self.num_nets += 1;
        self.pin_count += degree;
        self.max_degree = self.max_degree.max(degree);
        match degree {
            2 => self.two += 1,
            3..=10 => self.three_to_ten += 1,
            11..=100 => self.eleven_to_hundred += 1,
            d if d > 100 => self.over_hundred += 1,
            _ => {}
        }
    }

    pub fn average_degree(&self) -> f64 {
        if self.num_nets == 0 {
            return 0.0;
        }
        self.pin_count as f64 / self.num_nets as f64
    }
}

/// A uniform bin grid laid over the core region.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BinGrid {
    pub dim_x: usize,
    pub dim_y: usize,
    /// Region extent, counting both boundary coordinates.
    pub region_width: i64,
    pub region_height: i64,
    pub step_x: f64,
    pub step_y: f64,
}

pub const DEFAULT_BIN_DIMENSION: usize = 512;

impl BinGrid {
    pub fn new(core: &CoreBox, dim_x: usize, dim_y: usize) -> BinGrid {
        let region_width = core.max_x.saturating_sub(core.min_x).saturating_add(1);
        let region_height = core.max_y.saturating_sub(core.min_y).saturating_add(1);
        BinGrid {
            dim_x,
            dim_y,
            region_width,
            region_height,
            step_x: region_width.max(1) as f64 / dim_x.max(1) as f64,
            step_y: region_height.max(1) as f64 / dim_y.max(1) as f64,
        }
    }
}

/// Everything the summary report prints.
#[derive(Clone, Debug, PartialEq)]
pub struct DesignStats {
    pub core: CoreBox,
    pub areas: AreaSummary,
    pub degrees: DegreeHistogram,
    /// All nodes, terminals included.
    pub num_modules: usize,
    pub num_terminals: usize,
    /// Non-terminal nodes.
    pub num_nodes: usize,
    /// Height of the first row, zero without rows.
    pub row_height: i32,
    /// Rows actually parsed, not the declared count.
    pub num_rows: usize,
    /// Site width of the first row (at least 1), zero without rows.
    pub site_step: i32,
}

impl DesignStats {
    pub fn compute(design: &Design) -> DesignStats {
        let rows = &design.scl.rows;
        let core = CoreBox::from_rows(rows);
        let areas = AreaSummary::compute(design, &core);
        let degrees = DegreeHistogram::from_nets(design.nets.iter());

        let num_modules = design.nodes.len();
        let num_terminals = design.nodes.num_terminals();

        DesignStats {
            core,
            areas,
            degrees,
            num_modules,
            num_terminals,
            num_nodes: num_modules - num_terminals,
            row_height: rows.first().map_or(0, |r| r.height),
            num_rows: rows.len(),
            site_step: rows.first().map_or(0, |r| r.site_width.max(1)),
        }
    }

    pub fn placement_utilization(&self) -> f64 {
        self.areas.placement_utilization()
    }

    pub fn core_density(&self) -> f64 {
        self.areas.core_density()
    }

    pub fn bins(&self) -> BinGrid {
        BinGrid::new(&self.core, DEFAULT_BIN_DIMENSION, DEFAULT_BIN_DIMENSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookshelf::tests::small_design;
    use crate::bookshelf::{Node, Placement};

    fn row(coordinate: i32, height: i32, site_width: i32, origin: i64, sites: i64) -> RowAttr {
        RowAttr {
            coordinate,
            height,
            site_width,
            subrow_origin: origin,
            num_sites: sites,
            ..RowAttr::default()
        }
    }

    #[test]
    fn core_box_without_rows() {
        let core = CoreBox::from_rows(&[]);
        assert_eq!(core, CoreBox::default());
        assert_eq!(core.area(), 0);
    }

    #[test]
    fn core_box_single_row() {
        let core = CoreBox::from_rows(&[row(0, 20, 1, 0, 10)]);
        assert_eq!(
            core,
            CoreBox {
                min_x: 0,
                min_y: 0,
                max_x: 10,
                max_y: 20
            }
        );
        assert_eq!(core.area(), 200);
        assert_eq!(core.to_string(), "lower left: (0,0) to upper right: (10,20)");
    }

    #[test]
    fn core_box_spans_rows() {
        // Site width 0 counts as 1; the widest row sets max_x.
        let rows = [row(459, 12, 0, 459, 100), row(471, 12, 2, 300, 100)];
        let core = CoreBox::from_rows(&rows);
        assert_eq!((core.min_x, core.min_y, core.max_x, core.max_y), (300, 459, 559, 483));
    }

    #[test]
    fn core_box_large_coordinates() {
        let core = CoreBox::from_rows(&[row(0, 1, 4, 0, 3_000_000_000)]);
        assert_eq!(core.max_x, 12_000_000_000);
        assert_eq!(core.area(), 12_000_000_000);
    }

    #[test]
    fn huge_rows_saturate() {
        let core = CoreBox::from_rows(&[row(0, 10, 4, 0, 4_611_686_018_427_387_904)]);
        assert_eq!(core.max_x, i64::MAX);
        assert_eq!(core.width(), i64::MAX);
        assert_eq!(core.area(), i64::MAX);
        let bins = BinGrid::new(&core, 512, 512);
        assert_eq!(bins.region_width, i64::MAX);
    }

    #[test]
    fn containment_is_half_open() {
        let core = CoreBox::from_rows(&[row(0, 10, 1, 0, 10)]);
        assert!(core.contains(0, 0));
        assert!(core.contains(9, 9));
        assert!(!core.contains(10, 5));
        assert!(!core.contains(5, 10));
        assert!(!core.contains(-1, 0));
    }

    #[test]
    fn percentages_guard_division() {
        assert_eq!(percentage(5, 0), 0.0);
        assert_eq!(percentage(5, -3), 0.0);
        assert_eq!(percentage(1, 4), 25.0);
        let empty = AreaSummary::default();
        assert_eq!(empty.placement_utilization(), 0.0);
        assert_eq!(empty.core_density(), 0.0);
    }

    #[test]
    fn histogram_buckets() {
        let mut h = DegreeHistogram::default();
        for d in [0, 1, 2, 2, 3, 10, 11, 100, 101, 500] {
            h.add(d);
        }
        assert_eq!(h.two, 2);
        assert_eq!(h.three_to_ten, 2);
        assert_eq!(h.eleven_to_hundred, 2);
        assert_eq!(h.over_hundred, 2);
        assert_eq!(h.num_nets, 10);
        assert_eq!(h.pin_count, 730);
        assert_eq!(h.max_degree, 500);
        assert_eq!(h.average_degree(), 73.0);
        assert_eq!(DegreeHistogram::default().average_degree(), 0.0);
    }

    #[test]
    fn small_design_statistics() {
        let stats = DesignStats::compute(&small_design());
        assert_eq!(stats.core.area(), 100);
        assert_eq!(stats.areas.core_area, 100);
        assert_eq!(stats.areas.fixed_area, 100);
        assert_eq!(stats.areas.fixed_in_core, 100);
        assert_eq!(stats.areas.movable_area, 25);
        assert_eq!(stats.areas.cell_area(), 25);
        assert_eq!(stats.areas.free_sites_area(), 0);
        assert_eq!(stats.placement_utilization(), 0.0);
        // (movable + fixed in core) / core, with no clamping.
        assert_eq!(stats.core_density(), 125.0);
        assert_eq!(stats.degrees.two, 1);
        assert_eq!(stats.degrees.pin_count, 2);
        assert_eq!((stats.num_modules, stats.num_terminals, stats.num_nodes), (2, 1, 1));
        assert_eq!((stats.row_height, stats.num_rows, stats.site_step), (10, 1, 1));
    }

    #[test]
    fn fixed_by_placement_and_outside_core() {
        let mut d = small_design();
        d.nodes.insert(Node {
            name: "m".to_string(),
            width: 4,
            height: 4,
            is_terminal: false,
        });
        d.placements.placements.insert(Placement {
            name: "m".to_string(),
            x: 50,
            y: 0,
            orientation: 'N',
            is_fixed: true,
        });
        // A terminal without any placement is fixed but never in core.
        d.nodes.insert(Node {
            name: "pad".to_string(),
            width: 1,
            height: 1,
            is_terminal: true,
        });
        let a = AreaSummary::compute(&d, &CoreBox::from_rows(&d.scl.rows));
        assert_eq!(a.fixed_area, 117);
        assert_eq!(a.fixed_in_core, 100);
        assert_eq!(a.movable_area, 25);
    }

    #[test]
    fn bin_grid() {
        let core = CoreBox::from_rows(&[row(0, 1023, 1, 0, 511)]);
        let bins = BinGrid::new(&core, 512, 512);
        assert_eq!((bins.region_width, bins.region_height), (512, 1024));
        assert_eq!((bins.step_x, bins.step_y), (1.0, 2.0));
    }
}
