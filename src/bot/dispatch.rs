//! Interaction dispatch - the state machine over the interaction `type`
//! discriminant.
//!
//! Pings short-circuit to a pong, application commands are resolved against
//! the registry and their options against the resolved-entity bundle, and
//! message components are routed back to the originating command via the
//! composite custom id. Protocol violations (unknown type, missing custom id,
//! unregistered component target) surface as errors; an unknown *command*
//! name is a normal user-facing reply, not an error.

use crate::bot::BotContext;
use crate::bot::commands::CommandRegistry;
use crate::bot::interactions::{
    CommandOptionType, CommandReply, Interaction, InteractionData, InteractionResponse, OptionMap,
    OptionValue, interaction_type,
};
use crate::errors::{Error, Result};
use serde_json::Value;
use tracing::{debug, warn};

/// Converts a verified interaction into a response envelope.
pub async fn handle_interaction(
    ctx: &BotContext,
    registry: &CommandRegistry,
    interaction: Interaction,
) -> Result<InteractionResponse> {
    match interaction.kind {
        interaction_type::PING => Ok(InteractionResponse::pong()),

        interaction_type::APPLICATION_COMMAND => {
            let data = interaction.data.unwrap_or_default();
            let name = data.name.as_deref().unwrap_or_default();
            let Some(command) = registry.find(name) else {
                debug!(command = name, "Ignoring unknown command");
                return Ok(InteractionResponse::message(CommandReply::Content(
                    "Unknown command".to_string(),
                )));
            };
            let options = resolve_options(&data);
            let reply = command.run(ctx, &options).await?;
            Ok(InteractionResponse::message(reply))
        }

        interaction_type::MESSAGE_COMPONENT => {
            let custom_id = interaction
                .data
                .and_then(|data| data.custom_id)
                .filter(|id| !id.is_empty())
                .ok_or(Error::MissingCustomId)?;
            let mut segments = custom_id.split('-');
            let name = segments.next().unwrap_or_default();
            let state: Vec<String> = segments.map(str::to_string).collect();
            let command = registry
                .find(name)
                .ok_or_else(|| Error::CommandNotFound(name.to_string()))?;
            let reply = command.component(ctx, &state).await?;
            Ok(InteractionResponse::update(reply))
        }

        other => Err(Error::UnknownInteractionType(other)),
    }
}

/// Builds the option map for a command invocation, resolving entity
/// references (channels, roles, users, mentionables) against the
/// interaction's resolved bundle. Unresolvable references are dropped with a
/// warning; everything else passes through as its tagged value.
pub(crate) fn resolve_options(data: &InteractionData) -> OptionMap {
    let resolved = data.resolved.clone().unwrap_or_default();
    let mut options = OptionMap::new();

    for option in &data.options {
        let snowflake = option.value.as_str().unwrap_or_default();
        let value = match CommandOptionType::from_u8(option.kind) {
            Some(CommandOptionType::Channel) => {
                resolved.channel(snowflake).map(OptionValue::Channel)
            }
            Some(CommandOptionType::Role) => resolved.role(snowflake).map(OptionValue::Role),
            Some(CommandOptionType::User) => resolved.user(snowflake).map(OptionValue::User),
            // roles take precedence over channels for mentionables
            Some(CommandOptionType::Mentionable) => resolved
                .role(snowflake)
                .map(OptionValue::Role)
                .or_else(|| resolved.channel(snowflake).map(OptionValue::Channel)),
            _ => Some(plain_value(&option.value)),
        };
        match value {
            Some(value) => {
                options.insert(option.name.clone(), value);
            }
            None => warn!(
                option = %option.name,
                "Option reference missing from resolved bundle"
            ),
        }
    }
    options
}

fn plain_value(value: &Value) -> OptionValue {
    match value {
        Value::String(s) => OptionValue::String(s.clone()),
        Value::Bool(b) => OptionValue::Boolean(*b),
        Value::Number(n) if n.is_i64() => OptionValue::Integer(n.as_i64().unwrap_or_default()),
        other => OptionValue::Raw(other.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::commands::{Command, CommandOption};
    use crate::bot::interactions::response_type;
    use async_trait::async_trait;
    use serde_json::json;

    struct EchoCommand;

    #[async_trait]
    impl Command for EchoCommand {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn description(&self) -> &'static str {
            "Echoes its name option"
        }

        fn options(&self) -> Vec<CommandOption> {
            vec![CommandOption {
                name: "name",
                description: "Text to echo",
                kind: CommandOptionType::String,
                required: true,
            }]
        }

        async fn run(&self, _ctx: &BotContext, options: &OptionMap) -> Result<CommandReply> {
            let name = options
                .get("name")
                .and_then(OptionValue::as_str)
                .unwrap_or("nothing");
            Ok(CommandReply::Content(format!("echo: {name}")))
        }

        async fn component(&self, _ctx: &BotContext, state: &[String]) -> Result<CommandReply> {
            Ok(CommandReply::Content(format!("state: {}", state.join(","))))
        }
    }

    async fn test_ctx() -> BotContext {
        // Handle construction is lazy; nothing here touches a live server.
        let client = mongodb::Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap();
        BotContext::new(client.database("repldex_test"), "https://example.com".to_string())
    }

    fn registry() -> CommandRegistry {
        CommandRegistry::new().register(EchoCommand)
    }

    fn interaction(body: serde_json::Value) -> Interaction {
        serde_json::from_value(body).unwrap()
    }

    #[tokio::test]
    async fn ping_returns_pong_without_touching_commands() {
        let ctx = test_ctx().await;
        let response = handle_interaction(&ctx, &registry(), interaction(json!({ "type": 1 })))
            .await
            .unwrap();
        assert_eq!(response, InteractionResponse::pong());
    }

    #[tokio::test]
    async fn unknown_command_is_a_reply_not_an_error() {
        let ctx = test_ctx().await;
        let response = handle_interaction(
            &ctx,
            &registry(),
            interaction(json!({ "type": 2, "data": { "name": "missing" } })),
        )
        .await
        .unwrap();
        assert_eq!(response.kind, response_type::CHANNEL_MESSAGE_WITH_SOURCE);
        assert_eq!(
            response.data.unwrap().content.as_deref(),
            Some("Unknown command")
        );
    }

    #[tokio::test]
    async fn command_receives_resolved_options() {
        let ctx = test_ctx().await;
        let response = handle_interaction(
            &ctx,
            &registry(),
            interaction(json!({
                "type": 2,
                "data": {
                    "name": "echo",
                    "options": [{ "name": "name", "type": 3, "value": "hi" }]
                }
            })),
        )
        .await
        .unwrap();
        assert_eq!(response.data.unwrap().content.as_deref(), Some("echo: hi"));
    }

    #[tokio::test]
    async fn component_custom_id_recovers_command_and_state() {
        let ctx = test_ctx().await;
        let response = handle_interaction(
            &ctx,
            &registry(),
            interaction(json!({ "type": 3, "data": { "custom_id": "echo-bar-baz" } })),
        )
        .await
        .unwrap();
        assert_eq!(response.kind, response_type::UPDATE_MESSAGE);
        assert_eq!(
            response.data.unwrap().content.as_deref(),
            Some("state: bar,baz")
        );
    }

    #[tokio::test]
    async fn component_without_custom_id_fails() {
        let ctx = test_ctx().await;
        let err = handle_interaction(&ctx, &registry(), interaction(json!({ "type": 3 })))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingCustomId));
    }

    #[tokio::test]
    async fn component_for_unregistered_command_fails() {
        let ctx = test_ctx().await;
        let err = handle_interaction(
            &ctx,
            &registry(),
            interaction(json!({ "type": 3, "data": { "custom_id": "foo-bar" } })),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::CommandNotFound(name) if name == "foo"));
    }

    #[tokio::test]
    async fn unknown_interaction_type_is_fatal() {
        let ctx = test_ctx().await;
        let err = handle_interaction(&ctx, &registry(), interaction(json!({ "type": 9 })))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnknownInteractionType(9)));
    }

    #[test]
    fn mentionables_resolve_roles_before_channels() {
        let data: InteractionData = serde_json::from_value(json!({
            "options": [
                { "name": "target", "type": 9, "value": "42" },
                { "name": "chan", "type": 7, "value": "77" },
                { "name": "who", "type": 6, "value": "123" },
                { "name": "ghost", "type": 6, "value": "999" }
            ],
            "resolved": {
                "channels": { "42": { "id": "42", "name": "general", "type": 0 },
                               "77": { "id": "77", "name": "log", "type": 0 } },
                "roles": { "42": { "id": "42", "name": "admins" } },
                "users": { "123": { "id": "123", "username": "mat" } }
            }
        }))
        .unwrap();

        let options = resolve_options(&data);
        assert!(matches!(
            options.get("target"),
            Some(OptionValue::Role(role)) if role.name == "admins"
        ));
        assert!(matches!(
            options.get("chan"),
            Some(OptionValue::Channel(channel)) if channel.id == "77"
        ));
        assert!(matches!(
            options.get("who"),
            Some(OptionValue::User(user)) if user.user.username == "mat"
        ));
        // 999 is in no bundle: dropped from the map
        assert!(!options.contains_key("ghost"));
    }
}
