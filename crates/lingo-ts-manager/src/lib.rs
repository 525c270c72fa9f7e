#![doc = include_str!("../README.md")]

pub mod directory;
pub mod embedded;
pub mod fallback;
pub mod localization;
pub mod translator;

pub use directory::DirectoryLocalizer;
pub use embedded::{EmbeddedCatalogModule, EmbeddedLocalizer, EmbeddedModuleData};
pub use fallback::{fallback_chain, resolve_fallback_language};
pub use localization::{CatalogManager, CatalogModule, LocalizationError, Localizer, catalog_language};
pub use translator::{LoadOptions, Query, Translator};

#[doc(hidden)]
pub use inventory as __inventory;
