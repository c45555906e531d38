//! # Bookshelf_stats
//!
//! `bookshelf_stats` reads GSRC/ISPD *bookshelf* placement
//! benchmarks and summarizes them.  A design is a family of files
//! sharing a base name: `.nodes`, `.pl`, `.nets`, `.scl` and an
//! optional `.wts`, usually listed by an *aux* file.
//!
//! Designs are loaded into a *Design* structure with public tables, so
//! that nodes, placements, nets and rows can be examined directly.
//! The *stats* module derives the core region, area split, density and
//! net degree histogram from a design, and *report* renders them in the
//! layout used by the legacy placement tools.
//!
//! How a malformed number is handled is chosen per field by a
//! *RecoveryPolicy*: the default reproduces the legacy tools, while
//! `RecoveryPolicy::lenient()` skips bad lines everywhere.
//!
//! There is also a small *marklist* helper, used to count each node
//! once when walking the pins of every net.
pub mod auxfile;
pub mod bookshelf;
pub mod error;
pub mod marklist;
pub mod nets;
pub mod nodes;
pub mod pl;
pub mod policy;
pub mod reader;
pub mod report;
pub mod scl;
pub mod stats;
pub mod wts;

pub use bookshelf::{Design, DesignFiles};
pub use error::{ParseError, Result};
pub use policy::{FieldKind, ParseOptions, Recovery, RecoveryPolicy};
pub use stats::DesignStats;
