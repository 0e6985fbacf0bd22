//! Errors raised while reading or building a palette table.

use std::io;
use thiserror::Error;

/// Errors of this crate.  Every variant is fatal: reading stops at
/// the first one and no table is produced.
#[derive(Error, Debug)]
pub enum Error {
    /// The line matches none of the statement forms.
    #[error("syntax error in CPT source at line {line}")]
    Syntax { line: usize },

    /// A `COLOR_MODEL` directive names something other than RGB, HSV
    /// or CMYK.
    #[error("unknown color model “{model}” at line {line}")]
    UnknownColorModel { line: usize, model: String },

    /// A named color is not in the dictionary.
    #[error("no such named color “{name}” at line {line}")]
    UnresolvedName { line: usize, name: String },

    /// Interval bounds in the wrong order (or not comparable).
    #[error("lower bound {lower} must not exceed upper bound {upper}")]
    Domain { lower: f64, upper: f64 },

    /// Value queried outside of an interval.
    #[error("value {value} not in range {lower} to {upper}")]
    OutOfRange { value: f64, lower: f64, upper: f64 },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
