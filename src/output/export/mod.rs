//! Export of sampled solutions
//!
//! # Architecture
//!
//! This module defines the [`Exporter`] trait that abstracts the export format.
//! Each format is an independent implementation in its own sub-module.
//!
//! # Available formats
//!
//! | Format          | Module      |
//! |-----------------|-------------|
//! | One value/line  | [`lines`]   |
//!
//! # Usage example
//!
//! ```rust
//! use orange_drum::output::export::{Exporter, LineExporter};
//!
//! let mut sink = Vec::new();
//! LineExporter::default().export(&[1.0, 0.5], &mut sink)?;
//! assert_eq!(sink, b"1\n0.5\n");
//! # Ok::<(), std::io::Error>(())
//! ```

pub mod lines;

pub use lines::{LineConfig, LineExporter};

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Abstraction trait for all export formats.
///
/// # Associated type `Error`
///
/// Each format manages its own errors via the associated type, so callers
/// can convert them precisely (the integrator maps I/O errors into
/// [`SolverError::Io`](crate::SolverError::Io)).
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error + From<io::Error>;

    /// Write `values` to `sink`.
    fn export<W: Write>(&self, values: &[f64], sink: W) -> Result<(), Self::Error>;

    /// Create (or truncate) the file at `path` and write `values` to it.
    fn export_to_file<P: AsRef<Path>>(&self, values: &[f64], path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        self.export(values, BufWriter::new(file))
    }
}
