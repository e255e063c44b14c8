//! Roles domain actions

mod downgrade;
mod resolve;

pub use downgrade::{grant_resolved, grant_role, tier_downgrade, DowngradeOutcome};
pub use resolve::{find_role, load_lookup_sheets, lookup_role, resolve, resolve_in, RoleResolution};
