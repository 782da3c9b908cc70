//! Discord bot layer - signature verification, interaction dispatch, and
//! slash commands served over the interactions webhook.

/// Command trait, registry, and the built-in commands.
pub mod commands;
/// Interaction dispatch state machine.
pub mod dispatch;
/// Wire types for interaction payloads and responses.
pub mod interactions;
/// Ed25519 interaction signature verification.
pub mod verify;

use mongodb::Database;

/// Shared data available to all bot commands.
pub struct BotContext {
    /// Database handle for repository calls.
    pub database: Database,
    /// Public site base URL, used to build entry links.
    pub base_url: String,
}

impl BotContext {
    /// Creates the shared context handed to every command handler.
    #[must_use]
    pub const fn new(database: Database, base_url: String) -> Self {
        Self { database, base_url }
    }
}
