//! CLI command implementations.

mod check;
mod common;
mod format;
mod lookup;
mod stats;
mod sync;

pub use check::{CheckArgs, run_check};
pub use common::{LocaleProcessingArgs, ProjectArgs, TargetArgs};
pub use format::{FormatArgs, run_format};
pub use lookup::{LookupArgs, run_lookup};
pub use stats::{StatsArgs, run_stats};
pub use sync::{SyncArgs, run_sync};
