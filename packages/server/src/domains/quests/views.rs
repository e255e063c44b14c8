//! Intake UI: category panel, quest dropdown, player-name modal, confirmation.

use discord::models::{
    button_style, Component, CreateMessage, Embed, InteractionResponse, SelectOption,
};

use crate::common::text::{truncate_chars, DISPLAY_LIMIT};
use crate::common::ComponentAction;
use crate::domains::quests::models::{QuestCatalog, SubmissionRequest};

/// Dropdown option cap imposed by the chat platform.
pub const MAX_SELECT_OPTIONS: usize = 25;
const BUTTONS_PER_ROW: usize = 5;
pub const PLAYER_NAME_INPUT: &str = "player_name";
const PLAYER_NAME_MAX: u16 = 100;

const COLOR_PANEL: u32 = 0x5865f2;
const COLOR_CONFIRMED: u32 = 0x3498db;

/// Button style and label per known category. Unlisted categories fall back
/// to [`category_button`]'s defaults.
const CATEGORY_BUTTONS: &[(&str, u8, &str)] = &[
    ("BeginnerQuests", button_style::PRIMARY, "🧭 Beginner"),
    ("ProcessQuests", button_style::DANGER, "⚙️ Process"),
    ("LaborQuests_Lv1", button_style::SUCCESS, "🔧 Labor Lv.1"),
    ("LaborQuests_Lv2", button_style::SUCCESS, "🔨 Labor Lv.2"),
    ("LaborQuests_Lv3", button_style::SUCCESS, "⛏️ Labor Lv.3"),
    ("MOONLOCK Lv.1", button_style::SECONDARY, "🌕 MOONLOCK Lv.1"),
];

fn category_button(name: &str) -> (u8, &str) {
    match CATEGORY_BUTTONS.iter().find(|(category, _, _)| *category == name) {
        Some((_, style, label)) => (*style, *label),
        None if name.starts_with("LaborQuests") => (button_style::SUCCESS, name),
        None => (button_style::PRIMARY, name),
    }
}

/// The persistent panel in the intake channel: one button per category.
pub fn intake_panel(categories: &[String]) -> CreateMessage {
    let rows = categories
        .chunks(BUTTONS_PER_ROW)
        .map(|chunk| {
            Component::action_row(
                chunk
                    .iter()
                    .map(|name| {
                        let (style, label) = category_button(name);
                        Component::button(
                            style,
                            truncate_chars(label, DISPLAY_LIMIT),
                            ComponentAction::Category(name.clone()).to_string(),
                        )
                    })
                    .collect(),
            )
        })
        .collect();

    CreateMessage::embed(
        Embed::new("Quest submissions")
            .description(
                "Pick the category of the quest you completed below.\n\
                 A reviewer will check your submission and you will receive \
                 the result by direct message.",
            )
            .color(COLOR_PANEL),
    )
    .with_components(rows)
}

/// Ephemeral quest dropdown for one category.
///
/// Labels are truncated for display; option values carry the row index so the
/// full title is recovered from the catalog.
pub fn quest_select(catalog: &QuestCatalog) -> CreateMessage {
    let options = catalog
        .entries
        .iter()
        .filter(|e| !e.quest_title.trim().is_empty())
        .take(MAX_SELECT_OPTIONS)
        .map(|e| SelectOption {
            label: truncate_chars(&e.quest_title, DISPLAY_LIMIT).to_string(),
            value: e.sequence_index.to_string(),
        })
        .collect();

    CreateMessage::text(format!("Choose a quest from {}", catalog.category))
        .with_components(vec![Component::action_row(vec![Component::string_select(
            ComponentAction::QuestSelect(catalog.category.clone()).to_string(),
            "Select a quest...",
            options,
        )])])
        .ephemeral()
}

/// Modal asking for the in-game player name.
pub fn intake_modal(category: &str, index: usize) -> InteractionResponse {
    InteractionResponse::modal(
        ComponentAction::Intake {
            category: category.to_string(),
            index,
        }
        .to_string(),
        "Quest submission",
        vec![Component::action_row(vec![Component::text_input(
            PLAYER_NAME_INPUT,
            "In-game player name",
            PLAYER_NAME_MAX,
        )])],
    )
}

pub fn submission_confirmation(request: &SubmissionRequest) -> CreateMessage {
    CreateMessage::embed(
        Embed::new("📋 Submission received!")
            .description(
                "Please wait for the result in your direct messages. If you get no \
                 reply or role, contact a reviewer.",
            )
            .color(COLOR_CONFIRMED)
            .field("📂 Category", truncate_chars(&request.category, DISPLAY_LIMIT))
            .field("🎯 Quest", truncate_chars(&request.quest_title, DISPLAY_LIMIT)),
    )
    .ephemeral()
}
