//! Dataset sources: where the raw CSV texts come from.
//!
//! The pipeline itself only works on text. A [`DatasetSource`] hides whether
//! that text lives in files on disk or in memory, so the HTTP layer and tests
//! can share one loading path through [`load_inputs`].
//!
//! - [`FileSource`]: one directory with `geo.csv`, `kpi.csv`, `kpi_stats.csv`
//! - [`InMemorySource`]: texts set programmatically

pub mod error;
pub mod file;
pub mod memory;
pub mod source;

pub use error::{ErrorContext, SourceError, SourceResult};
pub use file::FileSource;
pub use memory::InMemorySource;
pub use source::{load_inputs, DatasetKind, DatasetSource};
