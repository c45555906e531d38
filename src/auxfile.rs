//! Reader for `.aux` files, which name the other files of a design:
//!
//! ```text
//! RowBasedPlacement :  adaptec1.nodes  adaptec1.nets  adaptec1.wts  adaptec1.pl  adaptec1.scl
//! ```
use std::io::BufRead;
use std::path::Path;

use log::info;
use scan_fmt::scan_fmt;

use crate::bookshelf::DesignFiles;
use crate::error::{ParseError, Result};
use crate::reader::LineReader;

/// Read an aux file.  The files it names are taken relative to the
/// aux file's own directory.
pub fn read_aux(filepath: &Path) -> Result<DesignFiles> {
    let mut reader = LineReader::open(filepath)?;
    let mut files = parse_aux(&mut reader)?;
    files.aux = Some(filepath.to_path_buf());
    Ok(files)
}

pub fn parse_aux<R: BufRead>(reader: &mut LineReader<R>) -> Result<DesignFiles> {
    let aux_path = reader.path().to_path_buf();
    let malformed = || ParseError::MalformedAux {
        path: aux_path.clone(),
    };

    while let Some(line) = reader.getline()? {
        if !line.starts_with("RowBasedPlacement") {
            continue;
        }
        let (a, b, c, d, e) = scan_fmt!(
            &line,
            "RowBasedPlacement : {} {} {} {} {}",
            String,
            String,
            String,
            String,
            String
        )
        .map_err(|_| malformed())?;

        let dir = aux_path.parent().unwrap_or_else(|| Path::new(""));
        let mut nodes = None;
        let mut nets = None;
        let mut wts = None;
        let mut pl = None;
        let mut scl = None;
        for name in [a, b, c, d, e] {
            let slot = match Path::new(&name).extension().and_then(|x| x.to_str()) {
                Some("nodes") => &mut nodes,
                Some("nets") => &mut nets,
                Some("wts") => &mut wts,
                Some("pl") => &mut pl,
                Some("scl") => &mut scl,
                _ => return Err(malformed()),
            };
            *slot = Some(dir.join(&name));
        }

        return match (nodes, nets, wts, pl, scl) {
            (Some(nodes), Some(nets), Some(wts), Some(pl), Some(scl)) => {
                info!("Node file {}", nodes.display());
                Ok(DesignFiles {
                    aux: None,
                    nodes,
                    nets,
                    wts,
                    pl,
                    scl,
                })
            }
            _ => Err(malformed()),
        };
    }

    Err(malformed())
}
