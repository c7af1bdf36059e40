//! Data files for the classifier: loads a catalog directory into a
//! [`smeltery_core::registry::Registry`], seed material sets, and a classifier
//! configuration, and writes newly classified materials back.

pub mod config;
pub mod loader;
pub mod schema;
pub mod writer;

pub use loader::{DataLoadError, Dataset, load_dataset};
pub use writer::MaterialListFile;
