pub mod role_mapping;
pub mod track;

pub use role_mapping::{normalize_quest_key, LookupEntry, LookupSheet, MalformedRow, RoleMapping};
pub use track::{RoleTierTable, RoleTierTrack, Tier, TierPosition};
