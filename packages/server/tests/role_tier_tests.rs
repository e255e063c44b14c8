//! Integration tests for role lookup and tier resolution against the sheet store.

mod common;

use crate::common::*;
use quest_core::common::{LookupError, RoleId};
use quest_core::domains::roles::{self, RoleTierTable};
use quest_core::kernel::test_dependencies::{GuildCall, MockSheetStore, TestDependencies};
use std::path::PathBuf;
use test_context::test_context;
use tokio_test::assert_ok;

fn scratch_file(contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("role_tracks_{}.json", uuid::Uuid::new_v4()));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test_context(TestHarness)]
#[tokio::test]
async fn lookup_matches_annotated_sheet_keys(ctx: &TestHarness) {
    let mapping = assert_ok!(roles::lookup_role("No_3", &ctx.deps).await);

    assert_eq!(mapping.sheet, "Role_Beginner");
    assert_eq!(mapping.quest_key, "No_3");
    assert_eq!(mapping.role_id, RoleId::new(NO_3));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn lookup_only_reads_prefixed_sheets(ctx: &TestHarness) {
    assert_ok!(roles::lookup_role("Mining", &ctx.deps).await);

    let reads = ctx.mocks.sheets.read_calls();
    assert!(!reads.is_empty());
    assert!(reads.iter().all(|title| title.starts_with("Role_")));
}

#[tokio::test]
async fn duplicate_key_resolves_to_first_sheet() {
    let ctx = TestHarness::with_dependencies(
        TestDependencies::new().mock_sheets(
            MockSheetStore::new()
                .with_role_sheet("Role_Events", &[("Harvest", "700")])
                .with_role_sheet("Role_Seasonal", &[("Harvest (autumn)", "800")]),
        ),
    );

    let mapping = assert_ok!(roles::lookup_role("Harvest", &ctx.deps).await);
    assert_eq!(mapping.role_id, RoleId::new(700));
    assert_eq!(mapping.sheet, "Role_Events");
}

#[tokio::test]
async fn malformed_role_id_is_reported_with_its_row() {
    let ctx = TestHarness::with_dependencies(
        TestDependencies::new().mock_sheets(
            MockSheetStore::new().with_role_sheet("Role_Events", &[("Harvest", "700"), ("Feast", "soon")]),
        ),
    );

    let err = roles::lookup_role("Feast", &ctx.deps).await.unwrap_err();
    assert!(matches!(
        err,
        LookupError::MalformedMapping { ref sheet, row: 3, .. } if sheet == "Role_Events"
    ));

    // Well-formed rows of the same sheet still resolve
    assert_ok!(roles::lookup_role("Harvest", &ctx.deps).await);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unmapped_quest_is_no_role_mapping(ctx: &TestHarness) {
    let err = roles::lookup_role("Brew", &ctx.deps).await.unwrap_err();
    assert!(matches!(err, LookupError::NoRoleMapping { ref quest } if quest == "Brew"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn terminal_tier_supersedes_whole_track(ctx: &TestHarness) {
    let resolution = assert_ok!(roles::resolve("No_5 (graduation)", &ctx.deps).await);

    assert_eq!(resolution.track.as_deref(), Some("Beginner"));
    assert_eq!(resolution.tier.as_deref(), Some("No_5"));
    assert!(resolution.terminal);
    assert_eq!(
        resolution.superseded,
        [NO_1, NO_2, NO_3, NO_4].map(RoleId::new).to_vec()
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn labor_terminal_spans_tier_sheets(ctx: &TestHarness) {
    let resolution = assert_ok!(roles::resolve("Masterwork", &ctx.deps).await);

    assert_eq!(resolution.tier.as_deref(), Some("Lv3"));
    assert_eq!(
        resolution.superseded,
        [MINING_LV1, LOGGING_LV1, SMITHING_LV2].map(RoleId::new).to_vec()
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn non_terminal_and_untracked_roles_supersede_nothing(ctx: &TestHarness) {
    let smithing = assert_ok!(roles::resolve("Smithing", &ctx.deps).await);
    assert_eq!(smithing.tier.as_deref(), Some("Lv2"));
    assert!(!smithing.terminal);
    assert!(smithing.superseded.is_empty());

    let forge = assert_ok!(roles::resolve("Forge", &ctx.deps).await);
    assert_eq!(forge.track, None);
    assert!(forge.superseded.is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn grant_skips_roles_already_held(ctx: &TestHarness) {
    let granted = assert_ok!(roles::grant_role(user(ALICE), RoleId::new(NO_2), &ctx.deps).await);

    assert!(!granted);
    assert!(ctx.mocks.guild.calls().is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn grant_is_refused_once_track_is_completed(ctx: &TestHarness) {
    let terminal = assert_ok!(roles::resolve("No_5", &ctx.deps).await);
    assert_ok!(roles::grant_resolved(&terminal, user(ALICE), &ctx.deps).await);

    let lower = assert_ok!(roles::resolve("No_4", &ctx.deps).await);
    let err = roles::grant_resolved(&lower, user(ALICE), &ctx.deps).await.unwrap_err();

    assert!(matches!(
        err,
        LookupError::TrackCompleted { ref track, terminal_role, role, .. }
            if track == "Beginner" && terminal_role == RoleId::new(NO_5) && role == RoleId::new(NO_4)
    ));
    assert_eq!(
        ctx.mocks.guild.calls(),
        vec![GuildCall::AddRole(user(ALICE), RoleId::new(NO_5))]
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn lower_grant_proceeds_while_track_is_open(ctx: &TestHarness) {
    let lower = assert_ok!(roles::resolve("No_4", &ctx.deps).await);

    let granted = assert_ok!(roles::grant_resolved(&lower, user(ALICE), &ctx.deps).await);

    assert!(granted);
    assert!(ctx.mocks.guild.roles_of(user(ALICE)).contains(&RoleId::new(NO_4)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn downgrade_revokes_only_held_roles(ctx: &TestHarness) {
    let superseded = [MINING_LV1, LOGGING_LV1, SMITHING_LV2].map(RoleId::new);

    let outcome = assert_ok!(roles::tier_downgrade(&superseded, user(CAROL), &ctx.deps).await);

    assert_eq!(outcome.revoked, [MINING_LV1, SMITHING_LV2].map(RoleId::new).to_vec());
    assert!(outcome.failures.is_empty());
    assert_eq!(
        ctx.mocks.guild.calls(),
        vec![
            GuildCall::RemoveRole(user(CAROL), RoleId::new(MINING_LV1)),
            GuildCall::RemoveRole(user(CAROL), RoleId::new(SMITHING_LV2)),
        ]
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn downgrade_of_departed_member_fails(ctx: &TestHarness) {
    let err = roles::tier_downgrade(&[RoleId::new(NO_1)], user(99), &ctx.deps)
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::MemberNotFound(_)));
}

// =============================================================================
// Track table loading
// =============================================================================

#[test]
fn track_table_loads_from_file() {
    let path = scratch_file(
        r#"{
            "tracks": [{
                "name": "Events",
                "tiers": [
                    { "name": "Bronze", "sheet": "Role_Events" },
                    { "name": "Gold", "sheet": "Role_EventsGold" }
                ],
                "terminalTier": "Gold"
            }]
        }"#,
    );

    let table = RoleTierTable::load(Some(&path)).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(table.tracks.len(), 1);
    assert_eq!(table.tracks[0].terminal_tier, "Gold");
}

#[test]
fn track_table_without_terminal_tier_is_rejected() {
    let path = scratch_file(
        r#"{ "tracks": [{ "name": "Events", "tiers": [{ "name": "Bronze", "sheet": "Role_Events" }], "terminalTier": "Gold" }] }"#,
    );

    let result = RoleTierTable::load(Some(&path));
    std::fs::remove_file(&path).ok();

    assert!(result.is_err());
}

#[test]
fn missing_path_falls_back_to_builtin_tracks() {
    let table = RoleTierTable::load(None).unwrap();
    let names: Vec<_> = table.tracks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Beginner", "Labor"]);
}
