//! Test fixtures: a small guild, its quest workbook and interaction payloads.

use quest_core::common::UserId;
use quest_core::kernel::test_dependencies::{
    MockGuild, MockSheetStore, TestDependencies, TEST_LEDGER_SHEET,
};
use serde_json::{json, Value};

pub const ALICE: u64 = 42;
pub const BOB: u64 = 43;
pub const CAROL: u64 = 44;
pub const REVIEWER: u64 = 7;

/// Beginner track roles (No_1..No_5)
pub const NO_1: u64 = 101;
pub const NO_2: u64 = 102;
pub const NO_3: u64 = 103;
pub const NO_4: u64 = 104;
pub const NO_5: u64 = 105;

/// Labor track roles
pub const MINING_LV1: u64 = 11;
pub const LOGGING_LV1: u64 = 12;
pub const SMITHING_LV2: u64 = 21;
pub const MASTERWORK_LV3: u64 = 31;

pub const FORGE: u64 = 51;
/// A role outside every track
pub const UNRELATED: u64 = 999;

pub fn user(id: u64) -> UserId {
    UserId::new(id)
}

/// Catalogs, role lookup sheets and an empty ledger (header only).
pub fn quest_workbook() -> MockSheetStore {
    MockSheetStore::new()
        .with_catalog("BeginnerQuests", &["No_1", "No_2", "No_3", "No_4", "No_5"])
        .with_catalog("ProcessQuests", &["Forge (craft a blade)", "Brew"])
        .with_catalog("LaborQuests_Lv1", &["Mining", "Logging"])
        .with_catalog("LaborQuests_Lv2", &["Smithing"])
        .with_catalog("LaborQuests_Lv3", &["Masterwork"])
        .with_worksheet(
            TEST_LEDGER_SHEET,
            &[&["Timestamp", "Player", "Category", "Quest", "Decision", "Submitter"]],
        )
        .with_role_sheet(
            "Role_Beginner",
            &[
                ("No_1 (intro)", "101"),
                ("No_2", "102"),
                ("No_3 (collect herbs)", "103"),
                ("No_4", "104"),
                ("No_5 (graduation)", "105"),
            ],
        )
        .with_role_sheet("Role_LaborQuests_Lv1", &[("Mining", "11"), ("Logging", "12")])
        .with_role_sheet("Role_LaborQuests_Lv2", &[("Smithing", "21")])
        .with_role_sheet("Role_LaborQuests_Lv3", &[("Masterwork", "31")])
        .with_role_sheet("Role_Process", &[("Forge", "51")])
}

/// Alice is early in the Beginner track, Bob is one step from its end,
/// Carol holds Labor Lv1 and Lv2 roles.
pub fn guild_members() -> MockGuild {
    MockGuild::new()
        .with_member(user(ALICE), &[NO_1, NO_2])
        .with_member(user(BOB), &[NO_1, NO_2, NO_3, NO_4, UNRELATED])
        .with_member(user(CAROL), &[MINING_LV1, SMITHING_LV2])
}

pub fn default_dependencies() -> TestDependencies {
    TestDependencies::new()
        .mock_sheets(quest_workbook())
        .mock_guild(guild_members())
}

fn member(user_id: u64) -> Value {
    json!({
        "user": { "id": user_id.to_string(), "username": format!("user{}", user_id) },
        "roles": []
    })
}

pub fn ping_interaction() -> Value {
    json!({
        "id": "1",
        "application_id": "555",
        "type": 1,
        "token": "ping-token"
    })
}

/// Button press or dropdown selection.
pub fn component_interaction(custom_id: &str, user_id: u64, values: &[&str]) -> Value {
    json!({
        "id": "2",
        "application_id": "555",
        "type": 3,
        "token": format!("token-{}", custom_id),
        "guild_id": "1",
        "channel_id": "200",
        "member": member(user_id),
        "data": {
            "custom_id": custom_id,
            "component_type": if values.is_empty() { 2 } else { 3 },
            "values": values,
        }
    })
}

/// Player-name modal submission.
pub fn modal_interaction(custom_id: &str, user_id: u64, player_name: &str) -> Value {
    json!({
        "id": "3",
        "application_id": "555",
        "type": 5,
        "token": "modal-token",
        "guild_id": "1",
        "channel_id": "100",
        "member": member(user_id),
        "data": {
            "custom_id": custom_id,
            "components": [{
                "type": 1,
                "components": [{ "type": 4, "custom_id": "player_name", "value": player_name }]
            }]
        }
    })
}
