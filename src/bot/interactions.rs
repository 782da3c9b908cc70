//! Wire types for the Discord interactions webhook.
//!
//! Inbound payloads (interactions, their options, and the resolved-entity
//! bundle) deserialize here, and outbound interaction-response envelopes
//! serialize here. Option values are a closed tagged union rather than
//! free-form JSON, and command handlers return a closed set of reply shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Inbound interaction `type` discriminants.
pub mod interaction_type {
    pub const PING: u8 = 1;
    pub const APPLICATION_COMMAND: u8 = 2;
    pub const MESSAGE_COMPONENT: u8 = 3;
}

/// Outbound interaction-response `type` discriminants.
pub mod response_type {
    pub const PONG: u8 = 1;
    pub const CHANNEL_MESSAGE_WITH_SOURCE: u8 = 4;
    pub const UPDATE_MESSAGE: u8 = 7;
}

/// Application command option value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CommandOptionType {
    SubCommand = 1,
    SubCommandGroup = 2,
    String = 3,
    Integer = 4,
    Boolean = 5,
    User = 6,
    Channel = 7,
    Role = 8,
    Mentionable = 9,
    Number = 10,
}

impl CommandOptionType {
    /// Maps a wire discriminant back to the option type, `None` for anything
    /// this application does not know about.
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::SubCommand),
            2 => Some(Self::SubCommandGroup),
            3 => Some(Self::String),
            4 => Some(Self::Integer),
            5 => Some(Self::Boolean),
            6 => Some(Self::User),
            7 => Some(Self::Channel),
            8 => Some(Self::Role),
            9 => Some(Self::Mentionable),
            10 => Some(Self::Number),
            _ => None,
        }
    }
}

impl Serialize for CommandOptionType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// An inbound interaction event.
#[derive(Debug, Deserialize)]
pub struct Interaction {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub data: Option<InteractionData>,
}

/// Type-dependent interaction payload.
#[derive(Debug, Deserialize, Default)]
pub struct InteractionData {
    /// Command name, present for application-command invocations.
    #[serde(default)]
    pub name: Option<String>,
    /// Composite custom id, present for message-component invocations.
    #[serde(default)]
    pub custom_id: Option<String>,
    #[serde(default)]
    pub options: Vec<RawOption>,
    #[serde(default)]
    pub resolved: Option<ResolvedData>,
}

/// A supplied command option before resolution.
#[derive(Debug, Deserialize)]
pub struct RawOption {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub value: Value,
}

/// Resolved-entity bundle attached to command invocations, keyed by snowflake.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ResolvedData {
    #[serde(default)]
    pub channels: HashMap<String, ResolvedChannel>,
    #[serde(default)]
    pub roles: HashMap<String, ResolvedRole>,
    #[serde(default)]
    pub members: HashMap<String, ResolvedMember>,
    #[serde(default)]
    pub users: HashMap<String, ApiUser>,
}

impl ResolvedData {
    #[must_use]
    pub fn channel(&self, id: &str) -> Option<ResolvedChannel> {
        self.channels.get(id).cloned()
    }

    #[must_use]
    pub fn role(&self, id: &str) -> Option<ResolvedRole> {
        self.roles.get(id).cloned()
    }

    /// Merges the member record over the user record. No user half means no
    /// resolution, even when a member record exists.
    #[must_use]
    pub fn user(&self, id: &str) -> Option<ResolvedUser> {
        let user = self.users.get(id)?.clone();
        let member = self.members.get(id).cloned();
        Some(ResolvedUser { user, member })
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ResolvedChannel {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: u8,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ResolvedRole {
    pub id: String,
    pub name: String,
}

/// Guild-specific half of a resolved user.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct ResolvedMember {
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ApiUser {
    pub id: String,
    pub username: String,
}

/// A user reference resolved against the interaction bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUser {
    pub user: ApiUser,
    pub member: Option<ResolvedMember>,
}

/// A command option after resolution against the interaction's bundle.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    String(String),
    Integer(i64),
    Boolean(bool),
    Channel(ResolvedChannel),
    Role(ResolvedRole),
    User(ResolvedUser),
    /// Anything the tagged variants do not cover, passed through verbatim.
    Raw(Value),
}

impl OptionValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Name → resolved value map handed to command handlers.
pub type OptionMap = HashMap<String, OptionValue>;

/// What a command handler can reply with.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandReply {
    /// Plain text message.
    Content(String),
    /// A single embed (possibly multi-field).
    Embed(Embed),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Embed {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub url: Option<String>,
    pub description: String,
    pub color: u32,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub footer: Option<EmbedFooter>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmbedFooter {
    pub text: String,
}

/// Outbound interaction-response envelope.
#[derive(Debug, Serialize, PartialEq)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

#[derive(Debug, Serialize, Default, PartialEq)]
pub struct ResponseData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<Embed>>,
}

impl From<CommandReply> for ResponseData {
    fn from(reply: CommandReply) -> Self {
        match reply {
            CommandReply::Content(content) => Self {
                content: Some(content),
                embeds: None,
            },
            CommandReply::Embed(embed) => Self {
                content: None,
                embeds: Some(vec![embed]),
            },
        }
    }
}

impl InteractionResponse {
    /// Terminal reply to a ping.
    #[must_use]
    pub fn pong() -> Self {
        Self {
            kind: response_type::PONG,
            data: None,
        }
    }

    /// Wraps a command reply as a channel message with source.
    #[must_use]
    pub fn message(reply: CommandReply) -> Self {
        Self {
            kind: response_type::CHANNEL_MESSAGE_WITH_SOURCE,
            data: Some(reply.into()),
        }
    }

    /// Wraps a component reply as a message update.
    #[must_use]
    pub fn update(reply: CommandReply) -> Self {
        Self {
            kind: response_type::UPDATE_MESSAGE,
            data: Some(reply.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pong_serializes_without_data() {
        let body = serde_json::to_value(InteractionResponse::pong()).unwrap();
        assert_eq!(body, json!({ "type": 1 }));
    }

    #[test]
    fn content_reply_serializes_as_type_four() {
        let response =
            InteractionResponse::message(CommandReply::Content("Unknown command".to_string()));
        let body = serde_json::to_value(response).unwrap();
        assert_eq!(body, json!({ "type": 4, "data": { "content": "Unknown command" } }));
    }

    #[test]
    fn embed_reply_omits_empty_fields() {
        let response = InteractionResponse::update(CommandReply::Embed(Embed {
            title: "T".to_string(),
            url: None,
            description: "d".to_string(),
            color: 16_711_680,
            fields: Vec::new(),
            footer: None,
        }));
        let body = serde_json::to_value(response).unwrap();
        assert_eq!(
            body,
            json!({
                "type": 7,
                "data": { "embeds": [{ "title": "T", "description": "d", "color": 16_711_680 }] }
            })
        );
    }

    #[test]
    fn resolved_user_requires_the_user_half() {
        let resolved: ResolvedData = serde_json::from_value(json!({
            "members": { "123": { "nick": "matty" } }
        }))
        .unwrap();
        assert!(resolved.user("123").is_none());

        let resolved: ResolvedData = serde_json::from_value(json!({
            "members": { "123": { "nick": "matty" } },
            "users": { "123": { "id": "123", "username": "mat" } }
        }))
        .unwrap();
        let user = resolved.user("123").unwrap();
        assert_eq!(user.user.username, "mat");
        assert_eq!(user.member.unwrap().nick.as_deref(), Some("matty"));
    }
}
