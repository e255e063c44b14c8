use serde::{Deserialize, Serialize};

/// Interaction types (`Interaction::kind`).
pub mod interaction_type {
    pub const PING: u8 = 1;
    pub const APPLICATION_COMMAND: u8 = 2;
    pub const MESSAGE_COMPONENT: u8 = 3;
    pub const MODAL_SUBMIT: u8 = 5;
}

/// Interaction callback types (`InteractionResponse::kind`).
pub mod callback_type {
    pub const PONG: u8 = 1;
    pub const CHANNEL_MESSAGE_WITH_SOURCE: u8 = 4;
    pub const DEFERRED_UPDATE_MESSAGE: u8 = 6;
    pub const MODAL: u8 = 9;
}

/// Component types (`Component::kind`).
pub mod component_type {
    pub const ACTION_ROW: u8 = 1;
    pub const BUTTON: u8 = 2;
    pub const STRING_SELECT: u8 = 3;
    pub const TEXT_INPUT: u8 = 4;
}

/// Button styles.
pub mod button_style {
    pub const PRIMARY: u8 = 1;
    pub const SECONDARY: u8 = 2;
    pub const SUCCESS: u8 = 3;
    pub const DANGER: u8 = 4;
}

/// Message flag that makes an interaction reply visible only to the invoker.
pub const EPHEMERAL: u64 = 1 << 6;

// ============================================================================
// Users, members, messages
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub bot: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuildMember {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub channel_id: String,
    #[serde(default)]
    pub author: Option<User>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub components: Vec<Component>,
}

impl Message {
    /// Every custom id on the message, flattened across action rows.
    pub fn custom_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        for component in &self.components {
            component.collect_custom_ids(&mut ids);
        }
        ids
    }
}

// ============================================================================
// Outgoing message payloads
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub fields: Vec<EmbedField>,
}

impl Embed {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline: false,
        });
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

/// A message component. Discord multiplexes rows, buttons, selects and text
/// inputs through one shape keyed by `type`; unused fields are omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Component {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub custom_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub style: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub options: Vec<SelectOption>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub components: Vec<Component>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub max_length: Option<u16>,
}

impl Component {
    pub fn action_row(components: Vec<Component>) -> Self {
        Self {
            kind: component_type::ACTION_ROW,
            components,
            ..Default::default()
        }
    }

    pub fn button(style: u8, label: impl Into<String>, custom_id: impl Into<String>) -> Self {
        Self {
            kind: component_type::BUTTON,
            style: Some(style),
            label: Some(label.into()),
            custom_id: Some(custom_id.into()),
            ..Default::default()
        }
    }

    pub fn string_select(
        custom_id: impl Into<String>,
        placeholder: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        Self {
            kind: component_type::STRING_SELECT,
            custom_id: Some(custom_id.into()),
            placeholder: Some(placeholder.into()),
            options,
            ..Default::default()
        }
    }

    /// Single-line text input for modals.
    pub fn text_input(custom_id: impl Into<String>, label: impl Into<String>, max_length: u16) -> Self {
        Self {
            kind: component_type::TEXT_INPUT,
            style: Some(1),
            custom_id: Some(custom_id.into()),
            label: Some(label.into()),
            required: Some(true),
            max_length: Some(max_length),
            ..Default::default()
        }
    }

    fn collect_custom_ids<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let Some(id) = self.custom_id.as_deref() {
            out.push(id);
        }
        for child in &self.components {
            child.collect_custom_ids(out);
        }
    }
}

/// Body for creating or editing a channel message, a DM, or a follow-up.
///
/// `components` is always serialized so that an edit with an empty list
/// strips the buttons from the target message.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CreateMessage {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub embeds: Vec<Embed>,
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub flags: Option<u64>,
}

impl CreateMessage {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn embed(embed: Embed) -> Self {
        Self {
            embeds: vec![embed],
            ..Default::default()
        }
    }

    pub fn with_components(mut self, components: Vec<Component>) -> Self {
        self.components = components;
        self
    }

    pub fn ephemeral(mut self) -> Self {
        self.flags = Some(EPHEMERAL);
        self
    }
}

// ============================================================================
// Interactions
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionData {
    #[serde(default)]
    pub custom_id: Option<String>,
    #[serde(default)]
    pub component_type: Option<u8>,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub components: Vec<Component>,
}

impl InteractionData {
    /// Value submitted for a modal text input with the given custom id.
    pub fn text_value(&self, custom_id: &str) -> Option<&str> {
        self.components
            .iter()
            .flat_map(|row| row.components.iter())
            .find(|c| c.custom_id.as_deref() == Some(custom_id))
            .and_then(|c| c.value.as_deref())
    }
}

/// Inbound interaction payload delivered to the interactions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    pub id: String,
    pub application_id: String,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub data: Option<InteractionData>,
    #[serde(default)]
    pub guild_id: Option<String>,
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub member: Option<GuildMember>,
    #[serde(default)]
    pub user: Option<User>,
    pub token: String,
    #[serde(default)]
    pub message: Option<Message>,
}

impl Interaction {
    /// The user who triggered the interaction (guild member or DM user).
    pub fn actor(&self) -> Option<&User> {
        self.member
            .as_ref()
            .and_then(|m| m.user.as_ref())
            .or(self.user.as_ref())
    }

    pub fn custom_id(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.custom_id.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InteractionCallbackData {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub embeds: Vec<Embed>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub components: Vec<Component>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub flags: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub custom_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub title: Option<String>,
}

/// Synchronous reply to an interaction (returned as the HTTP response body).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub data: Option<InteractionCallbackData>,
}

impl InteractionResponse {
    pub fn pong() -> Self {
        Self {
            kind: callback_type::PONG,
            data: None,
        }
    }

    pub fn message(message: CreateMessage) -> Self {
        Self {
            kind: callback_type::CHANNEL_MESSAGE_WITH_SOURCE,
            data: Some(InteractionCallbackData {
                content: message.content,
                embeds: message.embeds,
                components: message.components,
                flags: message.flags,
                ..Default::default()
            }),
        }
    }

    /// Ephemeral plain-text reply.
    pub fn private(content: impl Into<String>) -> Self {
        Self::message(CreateMessage::text(content).ephemeral())
    }

    /// Acknowledge a component interaction; the message is edited later.
    pub fn deferred_update() -> Self {
        Self {
            kind: callback_type::DEFERRED_UPDATE_MESSAGE,
            data: None,
        }
    }

    pub fn modal(
        custom_id: impl Into<String>,
        title: impl Into<String>,
        components: Vec<Component>,
    ) -> Self {
        Self {
            kind: callback_type::MODAL,
            data: Some(InteractionCallbackData {
                custom_id: Some(custom_id.into()),
                title: Some(title.into()),
                components,
                ..Default::default()
            }),
        }
    }
}
