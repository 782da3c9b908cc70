//! `/source` - project source link and credits.

use crate::bot::BotContext;
use crate::bot::commands::Command;
use crate::bot::interactions::{CommandReply, Embed, EmbedField, EmbedFooter, OptionMap};
use crate::errors::Result;
use async_trait::async_trait;

const SOURCE_COLOR: u32 = 6_621_897;

fn credit(name: &str, value: &str) -> EmbedField {
    EmbedField {
        name: name.to_string(),
        value: value.to_string(),
        inline: true,
    }
}

pub struct SourceCommand;

#[async_trait]
impl Command for SourceCommand {
    fn name(&self) -> &'static str {
        "source"
    }

    fn description(&self) -> &'static str {
        "Get a link to the source code of Repldex"
    }

    async fn run(&self, _ctx: &BotContext, _options: &OptionMap) -> Result<CommandReply> {
        Ok(CommandReply::Embed(Embed {
            title: "Source".to_string(),
            url: None,
            description: "My source code is on [Github](https://github.com/mat-1/ReplDex)"
                .to_string(),
            color: SOURCE_COLOR,
            fields: vec![
                credit("Mat1", "Project Head"),
                credit("Coderman51", "Core Contributor"),
                credit("Prussia", "Discord Bot Developer"),
                credit("Nayoar", "Site Administrator"),
                credit("Kognise", "Owns the domain"),
                credit("Selectthemat", "Major contributor"),
            ],
            footer: Some(EmbedFooter {
                text: "Also big thanks to all the editors and other contributors".to_string(),
            }),
        }))
    }
}
