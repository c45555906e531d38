//! Reader for the optional `.wts` weight file.
use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use log::info;

use crate::error::{ParseError, Result};
use crate::policy::{FieldKind, ParseOptions};
use crate::reader::{is_format_marker, tokens, LineReader};

/// Sparse name to weight map.  Names not listed have no weight.
#[derive(Clone, Debug, Default)]
pub struct WeightTable {
    pub weights: HashMap<String, f64>,
}

impl WeightTable {
    /// A weight file that cannot be opened is simply empty.
    pub fn read(filepath: &Path, opts: &ParseOptions) -> Result<WeightTable> {
        let mut reader = match LineReader::open(filepath) {
            Ok(reader) => reader,
            Err(ParseError::FileNotFound { .. }) => {
                info!("No weight file {}, using no weights", filepath.display());
                return Ok(WeightTable::default());
            }
            Err(e) => return Err(e),
        };
        WeightTable::parse(&mut reader, opts)
    }

    pub fn parse<R: BufRead>(reader: &mut LineReader<R>, opts: &ParseOptions) -> Result<WeightTable> {
        let mut table = WeightTable::default();

        while let Some(line) = reader.getline()? {
            if is_format_marker(&line) || is_count_header(&line) {
                continue;
            }
            let toks = tokens(&line);
            if toks.len() < 2 {
                continue;
            }
            let weight = opts.policy.parse::<f64>(
                FieldKind::Weight,
                toks[1],
                reader.path(),
                reader.line_number(),
            )?;
            if let Some(w) = weight {
                table.weights.insert(toks[0].to_string(), w);
            }
        }

        info!("Weight file has {} entries", table.len());
        Ok(table)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.weights.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// `NumNets : 3` and the like.  Weight entries have no colon, so one
/// whose name merely starts with `Num` is not a header.
fn is_count_header(line: &str) -> bool {
    line.starts_with("Num") && line.contains(':')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_weights() {
        let text = "UCLA wts 1.0\n# weights\nNumNets : 3\n n0 2.5\n n1 heavy\n n2 1\n n0 4\n lonely\n";
        let mut r = LineReader::new(Cursor::new(text.to_string()), "t.wts");
        let t = WeightTable::parse(&mut r, &ParseOptions::default()).unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.get("n0"), Some(4.0));
        assert_eq!(t.get("n2"), Some(1.0));
        assert_eq!(t.get("n1"), None);
        assert_eq!(t.get("NumNets"), None);
    }

    #[test]
    fn names_starting_with_num_are_weights() {
        let text = "NumNodes : 2\nNumNets:1\nNumGen 2.0\nNumber 3\n";
        let mut r = LineReader::new(Cursor::new(text.to_string()), "t.wts");
        let t = WeightTable::parse(&mut r, &ParseOptions::default()).unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.get("NumGen"), Some(2.0));
        assert_eq!(t.get("Number"), Some(3.0));
        assert_eq!(t.get("NumNodes"), None);
        assert_eq!(t.get("NumNets"), None);
    }

    #[test]
    fn missing_file_is_empty() {
        let t = WeightTable::read(Path::new("/nonexistent/design.wts"), &ParseOptions::default()).unwrap();
        assert!(t.is_empty());
    }
}
