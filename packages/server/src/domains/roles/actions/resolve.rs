//! Quest title → role lookup and track resolution

use tracing::{debug, warn};

use crate::common::{LookupError, RoleId};
use crate::domains::roles::models::{LookupEntry, LookupSheet, RoleMapping, RoleTierTable};
use crate::kernel::ServerDeps;

/// The role a quest grants, plus what granting it supersedes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleResolution {
    pub mapping: RoleMapping,
    /// Track the mapping belongs to, if any
    pub track: Option<String>,
    pub tier: Option<String>,
    pub terminal: bool,
    /// Roles of the track's non-terminal tiers, excluding the granted role.
    /// Empty unless `terminal`.
    pub superseded: Vec<RoleId>,
    /// Roles of the track's terminal tier. A member holding one of these has
    /// completed the track and is not granted lower tiers again.
    pub terminal_roles: Vec<RoleId>,
}

/// Load every lookup sheet, in the store's enumeration order.
///
/// Reloaded on every call; lookup sheets are edited by hand while the
/// service runs.
pub async fn load_lookup_sheets(deps: &ServerDeps) -> Result<Vec<LookupSheet>, LookupError> {
    let prefix = deps.settings.role_sheet_prefix.as_str();
    let titles = deps.sheets.worksheet_titles().await?;

    let mut sheets = Vec::new();
    for title in titles.iter().filter(|t| t.starts_with(prefix)) {
        let rows = deps.sheets.rows(title).await?;
        let sheet = LookupSheet::parse(title, &rows);
        for bad in sheet.malformed() {
            warn!(
                sheet = %bad.sheet,
                row = bad.row,
                quest_key = %bad.quest_key,
                "Skipping malformed role mapping: {}",
                bad.reason
            );
        }
        sheets.push(sheet);
    }

    debug!(count = sheets.len(), "Loaded role lookup sheets");
    Ok(sheets)
}

/// First mapping (by sheet order, then row order) whose key matches the quest.
///
/// Duplicate keys across sheets resolve to the first enumerated sheet.
pub fn find_role(sheets: &[LookupSheet], quest_title: &str) -> Result<RoleMapping, LookupError> {
    for sheet in sheets {
        match sheet.find(quest_title) {
            Some(LookupEntry::Mapped(mapping)) => return Ok(mapping.clone()),
            Some(LookupEntry::Malformed(bad)) => {
                return Err(LookupError::MalformedMapping {
                    sheet: bad.sheet.clone(),
                    row: bad.row,
                    reason: bad.reason.clone(),
                })
            }
            None => {}
        }
    }

    Err(LookupError::NoRoleMapping {
        quest: quest_title.to_string(),
    })
}

pub fn resolve_in(
    sheets: &[LookupSheet],
    tracks: &RoleTierTable,
    quest_title: &str,
) -> Result<RoleResolution, LookupError> {
    let mapping = find_role(sheets, quest_title)?;

    let Some(position) = tracks.position(&mapping) else {
        return Ok(RoleResolution {
            mapping,
            track: None,
            tier: None,
            terminal: false,
            superseded: Vec::new(),
            terminal_roles: Vec::new(),
        });
    };

    let terminal = position.is_terminal();
    let mut superseded: Vec<RoleId> = Vec::new();
    if terminal {
        let candidates = sheets
            .iter()
            .flat_map(LookupSheet::mappings)
            .filter(|m| position.track.is_superseded_by_terminal(m))
            .map(|m| m.role_id)
            .filter(|role| *role != mapping.role_id);
        for role in candidates {
            if !superseded.contains(&role) {
                superseded.push(role);
            }
        }
    }

    let mut terminal_roles: Vec<RoleId> = Vec::new();
    if let Some(terminal_tier) = position.track.terminal() {
        for role in sheets
            .iter()
            .flat_map(LookupSheet::mappings)
            .filter(|m| terminal_tier.matches(m))
            .map(|m| m.role_id)
        {
            if !terminal_roles.contains(&role) {
                terminal_roles.push(role);
            }
        }
    }

    Ok(RoleResolution {
        track: Some(position.track.name.clone()),
        tier: Some(position.tier.name.clone()),
        terminal,
        superseded,
        terminal_roles,
        mapping,
    })
}

pub async fn lookup_role(quest_title: &str, deps: &ServerDeps) -> Result<RoleMapping, LookupError> {
    let sheets = load_lookup_sheets(deps).await?;
    find_role(&sheets, quest_title)
}

/// Resolve the role for a quest together with its track position.
pub async fn resolve(quest_title: &str, deps: &ServerDeps) -> Result<RoleResolution, LookupError> {
    let sheets = load_lookup_sheets(deps).await?;
    let resolution = resolve_in(&sheets, &deps.tracks, quest_title)?;

    debug!(
        quest = %quest_title,
        role_id = %resolution.mapping.role_id,
        track = ?resolution.track,
        terminal = resolution.terminal,
        superseded = resolution.superseded.len(),
        "Resolved quest role"
    );
    Ok(resolution)
}
