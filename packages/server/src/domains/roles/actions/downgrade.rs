use tracing::{info, warn};

use crate::common::{LookupError, RoleId, UserId};
use crate::domains::roles::actions::RoleResolution;
use crate::kernel::ServerDeps;

/// Result of revoking superseded track roles from one member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DowngradeOutcome {
    pub revoked: Vec<RoleId>,
    /// Roles the member holds that could not be removed
    pub failures: Vec<(RoleId, String)>,
}

/// Grant `role` to `member`.
///
/// Returns `false` when the member already held it.
pub async fn grant_role(member: UserId, role: RoleId, deps: &ServerDeps) -> Result<bool, LookupError> {
    let held = deps
        .guild
        .member_roles(member)
        .await?
        .ok_or(LookupError::MemberNotFound(member))?;

    if held.contains(&role) {
        info!(member = %member, role_id = %role, "Member already holds role");
        return Ok(false);
    }

    deps.guild.add_role(member, role).await?;
    info!(member = %member, role_id = %role, "Granted role");
    Ok(true)
}

/// Grant the resolved role unless the member already completed its track.
///
/// A member holding a terminal-tier role of the track never gets a lower tier
/// of that track back; the grant is refused with `TrackCompleted`. Call with
/// the member lock held so a concurrent terminal grant cannot interleave.
pub async fn grant_resolved(
    resolution: &RoleResolution,
    member: UserId,
    deps: &ServerDeps,
) -> Result<bool, LookupError> {
    let role = resolution.mapping.role_id;
    if !resolution.terminal && !resolution.terminal_roles.is_empty() {
        let held = deps
            .guild
            .member_roles(member)
            .await?
            .ok_or(LookupError::MemberNotFound(member))?;

        if let Some(terminal_role) = resolution
            .terminal_roles
            .iter()
            .find(|r| held.contains(r))
        {
            info!(member = %member, role_id = %role, terminal_role = %terminal_role, "Track already completed, skipping grant");
            return Err(LookupError::TrackCompleted {
                member,
                track: resolution.track.clone().unwrap_or_default(),
                terminal_role: *terminal_role,
                role,
            });
        }
    }

    grant_role(member, role, deps).await
}

/// Revoke every role in `superseded` that `member` currently holds.
///
/// Each removal is attempted independently; failures are collected rather
/// than aborting the remaining removals.
pub async fn tier_downgrade(
    superseded: &[RoleId],
    member: UserId,
    deps: &ServerDeps,
) -> Result<DowngradeOutcome, LookupError> {
    let mut outcome = DowngradeOutcome::default();
    if superseded.is_empty() {
        return Ok(outcome);
    }

    let held = deps
        .guild
        .member_roles(member)
        .await?
        .ok_or(LookupError::MemberNotFound(member))?;

    for role in superseded.iter().filter(|r| held.contains(r)) {
        match deps.guild.remove_role(member, *role).await {
            Ok(()) => {
                info!(member = %member, role_id = %role, "Revoked superseded role");
                outcome.revoked.push(*role);
            }
            Err(e) => {
                warn!(member = %member, role_id = %role, error = %e, "Failed to revoke role");
                outcome.failures.push((*role, e.to_string()));
            }
        }
    }

    Ok(outcome)
}
