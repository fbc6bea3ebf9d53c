// Public modules
pub mod error;
pub mod output;
pub mod presets;
pub mod rename;
pub mod replace;
pub mod table;
pub mod vcs;
pub mod walk;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use output::{BulkResult, BulkSummary, ItemOutcome};
pub use table::{MigrationTable, Replacement};
pub use vcs::MoveStrategy;
