//! Error types and diagnostics shared by the commands.

mod errors;
mod types;

pub use errors::*;
pub use types::*;
