//! Roles domain - maps approved quests to guild roles and applies track downgrades
//!
//! Lookup sheets (`Role_*` by default) map quest keys to role ids; the
//! declarative [`RoleTierTable`] decides which roles a terminal tier supersedes.

pub mod actions;
pub mod models;

pub use actions::{
    grant_resolved, grant_role, lookup_role, resolve, tier_downgrade, DowngradeOutcome,
    RoleResolution,
};
pub use models::{RoleMapping, RoleTierTable};
