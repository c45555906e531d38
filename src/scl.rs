//! Reader for `.scl` row files.
//!
//! ```text
//! UCLA scl 1.0
//! NumRows : 2
//! CoreRow Horizontal
//!   Coordinate    :   459
//!   Height        :   12
//!   Sitewidth     :    1
//!   Sitespacing   :    1
//!   Siteorient    :    1
//!   Sitesymmetry  :    1
//!   SubrowOrigin  :   459  NumSites  :  10692
//! End
//! ```
use std::io::BufRead;
use std::path::Path;

use log::{info, warn};
use scan_fmt::scan_fmt;

use crate::bookshelf::RowAttr;
use crate::error::Result;
use crate::policy::{FieldKind, ParseOptions};
use crate::reader::{is_format_marker, tokens, LineReader};

enum RowState {
    Outside,
    /// Inside a `CoreRow` block, with the attributes seen so far.
    Inside(RowAttr),
}

#[derive(Clone, Debug, Default)]
pub struct RowTable {
    /// `NumRows` from the header.  Not checked against `rows`.
    pub declared_rows: Option<usize>,
    /// Rows in file order; the first one is taken as representative.
    pub rows: Vec<RowAttr>,
}

impl RowTable {
    pub fn read(filepath: &Path, opts: &ParseOptions) -> Result<RowTable> {
        let mut reader = LineReader::open(filepath)?;
        RowTable::parse(&mut reader, opts)
    }

    pub fn parse<R: BufRead>(reader: &mut LineReader<R>, opts: &ParseOptions) -> Result<RowTable> {
        let mut table = RowTable::default();
        let mut state = RowState::Outside;

        while let Some(line) = reader.getline()? {
            if is_format_marker(&line) {
                continue;
            }
            if line.starts_with("NumRows") {
                table.declared_rows = scan_fmt!(&line, "NumRows : {d}", usize).ok();
                continue;
            }
            if line.starts_with("CoreRow") {
                if let RowState::Inside(_) = state {
                    warn!(
                        "{}:{}: CoreRow inside an unterminated row, previous row dropped",
                        reader.path().display(),
                        reader.line_number()
                    );
                }
                state = RowState::Inside(RowAttr::default());
                continue;
            }
            if line.starts_with("End") {
                if let RowState::Inside(row) = state {
                    table.rows.push(row);
                }
                state = RowState::Outside;
                continue;
            }

            if let RowState::Inside(row) = &mut state {
                let toks = tokens(&line);
                if toks.len() >= 2 {
                    set_attribute(row, &toks, reader, opts)?;
                }
            }
        }

        if let RowState::Inside(_) = state {
            warn!("{}: last row has no End, dropped", reader.path().display());
        }

        info!(
            "SCL has {} rows (declared {})",
            table.rows.len(),
            table.num_rows()
        );
        Ok(table)
    }

    /// The declared row count, zero when there was no `NumRows` line.
    pub fn num_rows(&self) -> usize {
        self.declared_rows.unwrap_or(0)
    }
}

/// Apply one `Key : value` line to the row being built.  Unknown keys
/// are ignored; a value that fails to parse leaves the attribute alone
/// unless the policy makes it fatal.
fn set_attribute<R: BufRead>(
    row: &mut RowAttr,
    toks: &[&str],
    reader: &LineReader<R>,
    opts: &ParseOptions,
) -> Result<()> {
    let value = |tok: &str| {
        opts.policy
            .parse::<i64>(FieldKind::RowAttribute, tok, reader.path(), reader.line_number())
    };
    let small = |tok: &str| {
        opts.policy
            .parse::<i32>(FieldKind::RowAttribute, tok, reader.path(), reader.line_number())
    };

    let target = match toks[0] {
        "Coordinate" => &mut row.coordinate,
        "Height" => &mut row.height,
        "Sitewidth" => &mut row.site_width,
        "Sitespacing" => &mut row.site_spacing,
        "Siteorient" => &mut row.site_orientation,
        "Sitesymmetry" => &mut row.site_symmetry,
        "SubrowOrigin" => {
            if let Some(origin) = value(toks[1])? {
                row.subrow_origin = origin;
            }
            let mut rest = toks[2..].iter();
            while let Some(key) = rest.next() {
                if key.eq_ignore_ascii_case("NumSites") {
                    if let Some(tok) = rest.next() {
                        if let Some(n) = value(*tok)? {
                            row.num_sites = n;
                        }
                    }
                    break;
                }
            }
            return Ok(());
        }
        _ => return Ok(()),
    };
    if let Some(v) = small(toks[1])? {
        *target = v;
    }
    Ok(())
}
