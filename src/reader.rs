//! Line-level reading shared by all of the Bookshelf formats.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::info;

use crate::error::{ParseError, Result};

/// Reads significant lines from a Bookshelf file: blank lines and
/// `#` comments are dropped, and what comes back is trimmed.  The
/// reader remembers where it is, so errors can point at a line.
pub struct LineReader<R> {
    reader: R,
    path: PathBuf,
    line_no: usize,
}

impl LineReader<BufReader<File>> {
    pub fn open(path: &Path) -> Result<LineReader<BufReader<File>>> {
        info!("Opening {}", path.display());
        let f = File::open(path).map_err(|source| ParseError::FileNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(LineReader::new(BufReader::with_capacity(32000, f), path))
    }
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R, path: impl Into<PathBuf>) -> LineReader<R> {
        LineReader {
            reader,
            path: path.into(),
            line_no: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 1-based number of the line most recently returned.
    pub fn line_number(&self) -> usize {
        self.line_no
    }

    /// Next significant line, or `None` at end of file.
    pub fn getline(&mut self) -> Result<Option<String>> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let len = self.reader.read_until(b'\n', &mut buf).map_err(|source| ParseError::Io {
                path: self.path.clone(),
                source,
            })?;
            if len == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            // Benchmarks are ASCII, but comments sometimes carry Latin-1.
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            return Ok(Some(line.to_string()));
        }
    }
}

/// Split a line into fields.  Colons are separators, so
/// `name x y : N` and `name x y :N` both come out as four tokens.
pub fn tokens(line: &str) -> Vec<&str> {
    line.split(|c: char| c == ':' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect()
}

/// The `UCLA <kind> 1.0` line that opens most Bookshelf files.
pub fn is_format_marker(line: &str) -> bool {
    line.starts_with("UCLA")
}
