//! Declarative role-tier tracks.
//!
//! A track is an ordered list of tiers plus the name of its terminal tier.
//! Reaching the terminal tier supersedes every other tier of the track. The
//! rules are data (`config/role_tracks.json` or `ROLE_TRACKS_PATH`), so adding
//! a track never touches code.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use super::role_mapping::RoleMapping;

const BUILTIN_TRACKS: &str = include_str!("../../../../config/role_tracks.json");

/// Selects the role mappings that belong to one tier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    pub name: String,
    /// Lookup sheet holding this tier's mappings
    pub sheet: String,
    /// When set, only keys starting with this prefix belong to the tier. The
    /// prefix must end at a word boundary: `No_1` matches `No_1` and
    /// `No_1 Intro` but not `No_10`.
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl Tier {
    pub fn matches(&self, mapping: &RoleMapping) -> bool {
        mapping.sheet == self.sheet
            && self
                .key_prefix
                .as_deref()
                .map_or(true, |prefix| has_key_prefix(&mapping.quest_key, prefix))
    }
}

fn has_key_prefix(key: &str, prefix: &str) -> bool {
    key.strip_prefix(prefix)
        .is_some_and(|rest| !rest.starts_with(|c: char| c.is_alphanumeric() || c == '_'))
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoleTierTrack {
    pub name: String,
    /// Lowest tier first
    pub tiers: Vec<Tier>,
    pub terminal_tier: String,
}

impl RoleTierTrack {
    pub fn tier_of(&self, mapping: &RoleMapping) -> Option<&Tier> {
        self.tiers.iter().find(|t| t.matches(mapping))
    }

    pub fn non_terminal_tiers(&self) -> impl Iterator<Item = &Tier> {
        self.tiers.iter().filter(move |t| t.name != self.terminal_tier)
    }

    pub fn terminal(&self) -> Option<&Tier> {
        self.tiers.iter().find(|t| t.name == self.terminal_tier)
    }

    /// True when `mapping` falls in any non-terminal tier of this track.
    pub fn is_superseded_by_terminal(&self, mapping: &RoleMapping) -> bool {
        self.non_terminal_tiers().any(|t| t.matches(mapping))
    }
}

/// Where a role mapping sits in the track table.
#[derive(Debug, Clone, Copy)]
pub struct TierPosition<'a> {
    pub track: &'a RoleTierTrack,
    pub tier: &'a Tier,
}

impl TierPosition<'_> {
    pub fn is_terminal(&self) -> bool {
        self.tier.name == self.track.terminal_tier
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleTierTable {
    pub tracks: Vec<RoleTierTrack>,
}

impl RoleTierTable {
    /// Load from `path` when given, otherwise the built-in table.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read role tracks from {}", path.display()))?;
                Self::from_json(&raw)
                    .with_context(|| format!("Invalid role tracks in {}", path.display()))
            }
            None => Self::builtin(),
        }
    }

    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_TRACKS).context("Invalid built-in role tracks")
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let table: Self = serde_json::from_str(raw)?;
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for track in &self.tracks {
            if !names.insert(track.name.as_str()) {
                bail!("duplicate track `{}`", track.name);
            }
            if track.tiers.is_empty() {
                bail!("track `{}` has no tiers", track.name);
            }

            let mut tier_names = HashSet::new();
            for tier in &track.tiers {
                if !tier_names.insert(tier.name.as_str()) {
                    bail!("track `{}` repeats tier `{}`", track.name, tier.name);
                }
            }
            if !tier_names.contains(track.terminal_tier.as_str()) {
                bail!(
                    "track `{}` names terminal tier `{}` which is not one of its tiers",
                    track.name,
                    track.terminal_tier
                );
            }
        }
        Ok(())
    }

    /// First track (in table order) with a tier matching `mapping`.
    pub fn position(&self, mapping: &RoleMapping) -> Option<TierPosition<'_>> {
        self.tracks.iter().find_map(|track| {
            track
                .tier_of(mapping)
                .map(|tier| TierPosition { track, tier })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::RoleId;

    fn mapping(sheet: &str, key: &str, role: u64) -> RoleMapping {
        RoleMapping {
            sheet: sheet.to_string(),
            quest_key: key.to_string(),
            role_id: RoleId::new(role),
        }
    }

    #[test]
    fn test_builtin_table_is_valid() {
        let table = RoleTierTable::builtin().unwrap();
        let names: Vec<_> = table.tracks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Beginner", "Labor"]);
    }

    #[test]
    fn test_beginner_terminal_is_no_5() {
        let table = RoleTierTable::builtin().unwrap();

        let pos = table.position(&mapping("Role_Beginner", "No_5", 5)).unwrap();
        assert_eq!(pos.track.name, "Beginner");
        assert!(pos.is_terminal());

        let pos = table.position(&mapping("Role_Beginner", "No_3", 3)).unwrap();
        assert!(!pos.is_terminal());
    }

    #[test]
    fn test_labor_tiers_are_selected_by_sheet() {
        let table = RoleTierTable::builtin().unwrap();

        let lv3 = table
            .position(&mapping("Role_LaborQuests_Lv3", "Smelting", 30))
            .unwrap();
        assert_eq!(lv3.tier.name, "Lv3");
        assert!(lv3.is_terminal());

        let track = lv3.track;
        assert!(track.is_superseded_by_terminal(&mapping("Role_LaborQuests_Lv1", "Any", 10)));
        assert!(track.is_superseded_by_terminal(&mapping("Role_LaborQuests_Lv2", "Any", 20)));
        assert!(!track.is_superseded_by_terminal(&mapping("Role_LaborQuests_Lv3", "Any", 30)));
    }

    #[test]
    fn test_key_prefix_stops_at_word_boundary() {
        let table = RoleTierTable::builtin().unwrap();

        let pos = table.position(&mapping("Role_Beginner", "No_1", 1)).unwrap();
        assert_eq!(pos.tier.name, "No_1");

        let pos = table.position(&mapping("Role_Beginner", "No_5 Finale", 5)).unwrap();
        assert_eq!(pos.tier.name, "No_5");

        // A later No_10 is not mistaken for No_1
        assert!(table.position(&mapping("Role_Beginner", "No_10", 10)).is_none());
    }

    #[test]
    fn test_unknown_mapping_has_no_position() {
        let table = RoleTierTable::builtin().unwrap();
        assert!(table.position(&mapping("Role_Process", "Forge", 1)).is_none());
    }

    #[test]
    fn test_validate_rejects_missing_terminal() {
        let err = RoleTierTable::from_json(
            r#"{"tracks":[{"name":"T","tiers":[{"name":"a","sheet":"Role_T"}],"terminalTier":"z"}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("terminal tier"));
    }

    #[test]
    fn test_validate_rejects_duplicate_tracks() {
        let err = RoleTierTable::from_json(
            r#"{"tracks":[
                {"name":"T","tiers":[{"name":"a","sheet":"S"}],"terminalTier":"a"},
                {"name":"T","tiers":[{"name":"a","sheet":"S"}],"terminalTier":"a"}
            ]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }
}
