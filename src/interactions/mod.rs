//! Slash command registry and dispatch: one command per emoji-table entry,
//! registered in bulk at startup and answered with exactly one reply.

use serenity::builder::{
    CreateCommand, CreateInteractionResponse, CreateInteractionResponseMessage,
};
use serenity::model::application::CommandInteraction;
use serenity::model::id::RoleId;
use serenity::prelude::Context;

use crate::constants::{EmojiEntry, GuildConstants};

/// Reply for unknown names and unauthorized premium entries alike; the two
/// cases must be indistinguishable to the invoker.
pub const NOT_FOUND: &str = "I don't have a response by that name.";

/// Discord caps command descriptions at 100 characters.
const DESCRIPTION_LIMIT: usize = 100;

/// Resolve an interaction name to its reply content. Premium entries require
/// the configured emoji role; without it (or without the role configured at
/// all) they resolve as if absent.
pub fn resolve(
    name: &str,
    invoker_roles: &[RoleId],
    constants: &GuildConstants,
) -> Option<String> {
    let entry = constants.emoji.get(name)?;
    if entry.premium {
        let role = constants.emoji_role?;
        if !invoker_roles.contains(&role) {
            return None;
        }
    }
    Some(entry.content.clone())
}

/// Description shown in the command picker. Premium entries are tagged, and
/// the platform length cap applies.
fn describe(entry: &EmojiEntry) -> String {
    let text = if entry.premium {
        format!("[PREMIUM] {}", entry.content)
    } else {
        entry.content.clone()
    };
    text.chars().take(DESCRIPTION_LIMIT).collect()
}

/// Build the full slash-command set from the emoji table. Registered in bulk,
/// which overwrites whatever set was live before — re-registering is
/// idempotent and stale names disappear on their own.
pub fn command_catalog(constants: &GuildConstants) -> Vec<CreateCommand> {
    constants
        .emoji
        .iter()
        .map(|(name, entry)| CreateCommand::new(name.to_lowercase()).description(describe(entry)))
        .collect()
}

/// Answer one command interaction. The reply below is the handler's only
/// exit, so zero replies or a second reply cannot happen.
pub async fn handle(ctx: &Context, interaction: &CommandInteraction, constants: &GuildConstants) {
    let roles: &[RoleId] = interaction
        .member
        .as_ref()
        .map(|member| member.roles.as_slice())
        .unwrap_or(&[]);
    let content = resolve(&interaction.data.name, roles, constants)
        .unwrap_or_else(|| NOT_FOUND.to_string());
    let response =
        CreateInteractionResponse::Message(CreateInteractionResponseMessage::new().content(content));
    if let Err(e) = interaction.create_response(&ctx.http, response).await {
        tracing::warn!(target: "interactions", name = %interaction.data.name, error = ?e, "failed to answer interaction");
    }
}
