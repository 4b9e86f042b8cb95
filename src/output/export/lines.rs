//! Plain-text export, one value per line
//!
//! The format has no header and no separator: line `i` holds sample `i` of
//! the solution, terminated by `\n`. Values use Rust's shortest round-trip
//! formatting unless a fixed precision is configured. `NaN` samples are
//! written as `NaN`.
//!
//! ```text
//! 1
//! 0.9375
//! 0.876953125
//! NaN
//! ```

use std::io::{self, Write};

use super::Exporter;

/// Configuration for line export
///
/// # Example
///
/// ```rust
/// use orange_drum::output::export::LineConfig;
///
/// let config = LineConfig::default().precision(6);
/// assert_eq!(config.precision, Some(6));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LineConfig {
    /// Number of decimal places; `None` writes the shortest exact form
    pub precision: Option<usize>,
}

impl LineConfig {
    /// Fixed number of decimal places
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }
}

/// Writes a solution as newline-separated decimal values
#[derive(Debug, Clone, Copy, Default)]
pub struct LineExporter {
    config: LineConfig,
}

impl LineExporter {
    /// Exporter with the given configuration
    pub fn new(config: LineConfig) -> Self {
        Self { config }
    }

    /// Current configuration
    pub fn config(&self) -> &LineConfig {
        &self.config
    }
}

impl Exporter for LineExporter {
    type Error = io::Error;

    fn export<W: Write>(&self, values: &[f64], mut sink: W) -> Result<(), Self::Error> {
        for value in values {
            match self.config.precision {
                Some(precision) => writeln!(sink, "{:.prec$}", value, prec = precision)?,
                None => writeln!(sink, "{}", value)?,
            }
        }
        sink.flush()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
