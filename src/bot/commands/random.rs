//! `/random` - view a random wiki entry.

use crate::bot::BotContext;
use crate::bot::commands::Command;
use crate::bot::commands::entry::entry_embed;
use crate::bot::interactions::{CommandReply, OptionMap};
use crate::db::entries::{self, FetchOptions};
use crate::errors::Result;
use async_trait::async_trait;
use rand::Rng;

pub struct RandomCommand;

#[async_trait]
impl Command for RandomCommand {
    fn name(&self) -> &'static str {
        "random"
    }

    fn description(&self) -> &'static str {
        "View a random Repldex entry"
    }

    async fn run(&self, ctx: &BotContext, _options: &OptionMap) -> Result<CommandReply> {
        let total = entries::count_entries(&ctx.database).await?;
        if total == 0 {
            return Ok(CommandReply::Content(
                "There are no entries to pick from".to_string(),
            ));
        }

        // random skip into the listed set, then take one
        let skip = rand::thread_rng().gen_range(0..total);
        let found = entries::fetch_entries(&ctx.database, FetchOptions { limit: 1, skip }).await?;
        Ok(match found.into_iter().next() {
            Some(entry) => {
                let title = entry.title.clone();
                CommandReply::Embed(entry_embed(&title, &entry, &ctx.base_url, false))
            }
            None => CommandReply::Content(
                "There are no entries to pick from".to_string(),
            ),
        })
    }
}
