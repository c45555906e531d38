//! Reader for `.pl` placement files.
//!
//! ```text
//! UCLA pl 1.0
//! o0   459   459 : N
//! p0     0  1000 : N /FIXED
//! ```
use std::io::BufRead;
use std::path::Path;

use log::info;

use crate::bookshelf::{NamedTable, Placement};
use crate::error::Result;
use crate::policy::{FieldKind, ParseOptions};
use crate::reader::{is_format_marker, tokens, LineReader};

#[derive(Clone, Debug, Default)]
pub struct PlacementTable {
    pub placements: NamedTable<Placement>,
}

impl PlacementTable {
    pub fn read(filepath: &Path, opts: &ParseOptions) -> Result<PlacementTable> {
        let mut reader = LineReader::open(filepath)?;
        PlacementTable::parse(&mut reader, opts)
    }

    pub fn parse<R: BufRead>(reader: &mut LineReader<R>, opts: &ParseOptions) -> Result<PlacementTable> {
        let mut table = PlacementTable::default();
        let mut num_fixed = 0;

        while let Some(line) = reader.getline()? {
            if is_format_marker(&line) {
                continue;
            }
            let toks = tokens(&line);
            if toks.len() < 4 {
                continue;
            }

            let coord = |tok: &str| {
                opts.policy
                    .parse::<i64>(FieldKind::PlacementCoord, tok, reader.path(), reader.line_number())
            };
            let (x, y) = match (coord(toks[1])?, coord(toks[2])?) {
                (Some(x), Some(y)) => (x, y),
                _ => continue,
            };

            let orientation = toks[3]
                .chars()
                .next()
                .map_or('N', |c| c.to_ascii_uppercase());
            // PLACED / UNPLACED carry no information for us; only FIXED does.
            let is_fixed = toks[4..]
                .iter()
                .any(|t| t.to_uppercase().contains("FIXED"));
            if is_fixed {
                num_fixed += 1;
            }

            table.placements.insert(Placement {
                name: toks[0].to_string(),
                x,
                y,
                orientation,
                is_fixed,
            });
        }

        info!("Placement file has {} records, {} fixed", table.len(), num_fixed);
        Ok(table)
    }

    pub fn get(&self, name: &str) -> Option<&Placement> {
        self.placements.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.placements.contains(name)
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Placement> {
        self.placements.iter()
    }
}
