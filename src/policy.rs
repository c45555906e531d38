//! What to do when a numeric field fails to parse.
//!
//! The legacy report tool reacts differently depending on which file and
//! which field the bad token is in: a bad node size or row attribute
//! stops everything, a bad placement coordinate drops the line, a bad
//! pin offset becomes zero.  Here each field class gets an entry in a
//! `RecoveryPolicy` table, and every parser asks the table instead of
//! deciding for itself.
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use log::warn;

use crate::error::{ParseError, Result};

/// The classes of numeric fields found in Bookshelf files.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Width and height in a `.nodes` line.
    NodeSize,
    /// X and Y in a `.pl` line.
    PlacementCoord,
    /// The two offsets of a pin line in `.nets`.
    PinOffset,
    /// The degree in a `NetDegree` line.
    NetDegree,
    /// Any value inside a `CoreRow` block of `.scl`.
    RowAttribute,
    /// The weight in a `.wts` line.
    Weight,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            FieldKind::NodeSize => "node size",
            FieldKind::PlacementCoord => "placement coordinate",
            FieldKind::PinOffset => "pin offset",
            FieldKind::NetDegree => "net degree",
            FieldKind::RowAttribute => "row attribute",
            FieldKind::Weight => "weight",
        };
        write!(f, "{}", s)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Recovery {
    /// Drop the offending line and continue with the next one.
    SkipLine,
    /// Use zero (or "unknown" for a degree) in place of the value.
    DefaultZero,
    /// Abort the parse with `ParseError::MalformedNumericField`.
    Fatal,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RecoveryPolicy {
    pub node_size: Recovery,
    pub placement_coord: Recovery,
    pub pin_offset: Recovery,
    pub net_degree: Recovery,
    pub row_attribute: Recovery,
    pub weight: Recovery,
}

impl RecoveryPolicy {
    /// Matches the legacy report tool, including its fatal cases.
    pub fn legacy() -> RecoveryPolicy {
        RecoveryPolicy {
            node_size: Recovery::Fatal,
            placement_coord: Recovery::SkipLine,
            pin_offset: Recovery::DefaultZero,
            net_degree: Recovery::DefaultZero,
            row_attribute: Recovery::Fatal,
            weight: Recovery::SkipLine,
        }
    }

    /// Skip-and-continue everywhere.  Pin offsets and net degrees still
    /// default, since dropping a pin or a net header would throw off the
    /// degree counts.
    pub fn lenient() -> RecoveryPolicy {
        RecoveryPolicy {
            node_size: Recovery::SkipLine,
            placement_coord: Recovery::SkipLine,
            pin_offset: Recovery::DefaultZero,
            net_degree: Recovery::DefaultZero,
            row_attribute: Recovery::SkipLine,
            weight: Recovery::SkipLine,
        }
    }

    pub fn recovery(&self, kind: FieldKind) -> Recovery {
        match kind {
            FieldKind::NodeSize => self.node_size,
            FieldKind::PlacementCoord => self.placement_coord,
            FieldKind::PinOffset => self.pin_offset,
            FieldKind::NetDegree => self.net_degree,
            FieldKind::RowAttribute => self.row_attribute,
            FieldKind::Weight => self.weight,
        }
    }

    /// Parse `token` as a field of class `kind`.
    ///
    /// `Ok(Some(v))` is a usable value (parsed, or zero under
    /// `DefaultZero`), `Ok(None)` means the caller should drop the line.
    pub fn parse<T>(&self, kind: FieldKind, token: &str, path: &Path, line: usize) -> Result<Option<T>>
    where
        T: FromStr + Default,
    {
        if let Ok(v) = token.parse::<T>() {
            return Ok(Some(v));
        }
        match self.recovery(kind) {
            Recovery::SkipLine => {
                warn!("{}:{}: skipping line with malformed {} '{}'", path.display(), line, kind, token);
                Ok(None)
            }
            Recovery::DefaultZero => {
                warn!("{}:{}: malformed {} '{}', using zero", path.display(), line, kind, token);
                Ok(Some(T::default()))
            }
            Recovery::Fatal => Err(ParseError::MalformedNumericField {
                path: path.to_path_buf(),
                line,
                field: kind,
                token: token.to_string(),
            }),
        }
    }
}

impl Default for RecoveryPolicy {
    fn default() -> RecoveryPolicy {
        RecoveryPolicy::legacy()
    }
}

/// Options shared by all of the file readers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub policy: RecoveryPolicy,
}

impl ParseOptions {
    pub fn lenient() -> ParseOptions {
        ParseOptions {
            policy: RecoveryPolicy::lenient(),
        }
    }
}
