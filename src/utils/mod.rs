//! Generic utility primitives with zero domain knowledge.
//!
//! - `command` - Command execution with error handling
//! - `paths` - Path expansion and root directory checks

pub mod command;
pub mod paths;
