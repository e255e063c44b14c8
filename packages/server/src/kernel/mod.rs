//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod locks;
pub mod test_dependencies;
pub mod traits;

pub use deps::{DiscordAdapter, ServerDeps, SheetsAdapter};
pub use locks::KeyedLocks;
pub use test_dependencies::TestDependencies;
pub use traits::*;
