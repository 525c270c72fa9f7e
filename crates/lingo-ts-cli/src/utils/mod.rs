//! Utility functions shared across CLI commands.

mod discovery;
pub mod ui;

pub use discovery::{load_config, read_catalog, resolve_catalogs};
