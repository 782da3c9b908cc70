//! Bot command trait, registry, and the built-in commands.

/// `/entry` - view an entry by name.
pub mod entry;
/// `/random` - view a random entry.
pub mod random;
/// `/source` - project source and credits.
pub mod source;

use crate::bot::BotContext;
use crate::bot::interactions::{CommandOptionType, CommandReply, OptionMap};
use crate::errors::{Error, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// Base URL for application-scoped Discord REST calls, including command
/// registration.
#[must_use]
pub fn applications_api_url(client_id: &str) -> String {
    format!("https://discord.com/api/v9/applications/{client_id}")
}

/// Declarative option schema entry for a command.
#[derive(Debug, Clone, Serialize)]
pub struct CommandOption {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "type")]
    pub kind: CommandOptionType,
    pub required: bool,
}

/// A named bot command with an option schema and up to two handlers: direct
/// invocation and message-component follow-ups addressed by
/// `<name>-<state>` custom ids.
#[async_trait]
pub trait Command: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn options(&self) -> Vec<CommandOption> {
        Vec::new()
    }

    /// Handles a direct slash-command invocation.
    async fn run(&self, ctx: &BotContext, options: &OptionMap) -> Result<CommandReply>;

    /// Handles a message-component follow-up. A command without component
    /// actions is not addressable by custom id.
    async fn component(&self, _ctx: &BotContext, _state: &[String]) -> Result<CommandReply> {
        Err(Error::CommandNotFound(self.name().to_string()))
    }
}

/// The set of registered commands, looked up by exact name.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
}

impl CommandRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All built-in commands.
    #[must_use]
    pub fn with_default_commands() -> Self {
        Self::new()
            .register(entry::EntryCommand)
            .register(random::RandomCommand)
            .register(source::SourceCommand)
    }

    #[must_use]
    pub fn register(mut self, command: impl Command + 'static) -> Self {
        self.commands.push(Box::new(command));
        self
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&dyn Command> {
        self.commands
            .iter()
            .find(|command| command.name() == name)
            .map(|command| &**command)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The bulk-overwrite payload Discord expects at
    /// `PUT {applications_api_url}/commands`.
    #[must_use]
    pub fn registration_json(&self) -> Value {
        Value::Array(
            self.commands
                .iter()
                .map(|command| {
                    serde_json::json!({
                        "name": command.name(),
                        "description": command.description(),
                        "options": command.options(),
                    })
                })
                .collect(),
        )
    }
}
