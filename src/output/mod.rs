//! Output module for sampled solutions
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! └── export/             ← Data export
//!     ├── mod.rs          ← Exporter trait
//!     └── lines.rs        ← One value per line
//! ```
//!
//! The integrator's `save_solution*` methods go through [`LineExporter`];
//! the exporter can also be used directly on any `&[f64]`.

pub mod export;

pub use export::{Exporter, LineConfig, LineExporter};
