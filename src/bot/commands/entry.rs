//! `/entry` - look up a wiki entry by name.

use crate::bot::BotContext;
use crate::bot::commands::{Command, CommandOption};
use crate::bot::interactions::{CommandOptionType, CommandReply, Embed, OptionMap, OptionValue};
use crate::db::codec::create_slug;
use crate::db::entries;
use crate::errors::Result;
use crate::models::Entry;
use async_trait::async_trait;

/// Embed accent color used for entry embeds.
pub const ENTRY_COLOR: u32 = 16_711_680;

/// Longest description an entry embed carries before truncation.
const DESCRIPTION_LIMIT: usize = 985;

/// Builds the standard entry embed with a link back to the site.
pub fn entry_embed(title: &str, entry: &Entry, base_url: &str, truncate: bool) -> Embed {
    let description = if truncate && entry.content.chars().count() > DESCRIPTION_LIMIT {
        let truncated: String = entry.content.chars().take(DESCRIPTION_LIMIT).collect();
        format!("{truncated}...")
    } else {
        entry.content.clone()
    };
    Embed {
        title: title.to_string(),
        url: Some(format!("{base_url}/entry/{}", entry.slug)),
        description,
        color: ENTRY_COLOR,
        fields: Vec::new(),
        footer: None,
    }
}

pub struct EntryCommand;

#[async_trait]
impl Command for EntryCommand {
    fn name(&self) -> &'static str {
        "entry"
    }

    fn description(&self) -> &'static str {
        "View a Repldex entry"
    }

    fn options(&self) -> Vec<CommandOption> {
        vec![CommandOption {
            name: "name",
            description: "The name of the entry",
            kind: CommandOptionType::String,
            required: true,
        }]
    }

    async fn run(&self, ctx: &BotContext, options: &OptionMap) -> Result<CommandReply> {
        let Some(name) = options.get("name").and_then(OptionValue::as_str) else {
            return Ok(CommandReply::Content("An entry name is required".to_string()));
        };

        let entry = entries::fetch_entry(&ctx.database, &create_slug(name)).await?;
        Ok(match entry {
            Some(entry) => {
                CommandReply::Embed(entry_embed(name, &entry, &ctx.base_url, true))
            }
            None => CommandReply::Content(format!(
                "Requested entry \"{name}\" does not exist, or is unavailable"
            )),
        })
    }
}
