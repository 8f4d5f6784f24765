//! Gateway event dispatch: decides, per inbound event, which component runs
//! and under what preconditions. Work that can fail or stall runs on its own
//! task so one event can never block or kill the dispatch loop.

use std::sync::atomic::{AtomicBool, Ordering};

use serenity::async_trait;
use serenity::gateway::ActivityData;
use serenity::model::application::Interaction;
use serenity::model::channel::{Message, Reaction};
use serenity::model::gateway::Ready;
use serenity::model::id::GuildId;
use serenity::prelude::{Context, EventHandler};

use crate::model::AppState;
use crate::reactions::{self, ReactionDirection};
use crate::{commands, interactions, scheduler, verify};

pub struct Handler {
    pub guild_id: GuildId,
    /// `ready` fires again on reconnect; jobs must start only once.
    jobs_started: AtomicBool,
}

impl Handler {
    pub fn new(guild_id: GuildId) -> Self {
        Self {
            guild_id,
            jobs_started: AtomicBool::new(false),
        }
    }

    async fn on_reaction(&self, ctx: Context, reaction: Reaction, direction: ReactionDirection) {
        if reaction.guild_id != Some(self.guild_id) {
            return;
        }
        let Some(state) = AppState::from_ctx(&ctx).await else {
            return;
        };
        let Some(constants) = state.current_constants().await else {
            return;
        };
        let Some(reactor) = reaction.user_id else {
            return;
        };
        // The payload may be partial; resolve the full message before judging
        // eligibility. A message that is gone by now is not an error.
        let message = match reactions::resolve_message(&ctx, &reaction).await {
            Ok(message) => message,
            Err(e) => {
                tracing::debug!(target: "reactions", message_id = %reaction.message_id, error = %e, "dropping reaction, message context unavailable");
                return;
            }
        };
        if !reactions::is_eligible(message.author.id, reactor, !message.embeds.is_empty(), &constants)
        {
            return;
        }
        let emoji = reaction.emoji.to_string();
        let transition = state.reactions.record(message.id, &emoji, reactor, direction).await;
        reactions::apply_transition(&ctx, &message, transition).await;
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!(target: "handler", user = %ready.user.name, "connected and ready");
        let Some(state) = AppState::from_ctx(&ctx).await else {
            return;
        };
        let Some(constants) = state.current_constants().await else {
            return;
        };
        ctx.set_activity(Some(ActivityData::listening(format!(
            "{p}help | {p}info",
            p = state.prefix
        ))));
        let catalog = interactions::command_catalog(&constants);
        let count = catalog.len();
        match self.guild_id.set_commands(&ctx.http, catalog).await {
            Ok(_) => tracing::info!(target: "handler", count, "registered guild slash commands"),
            Err(e) => {
                tracing::error!(target: "handler", error = ?e, "failed to register guild slash commands");
            }
        }
        if !self.jobs_started.swap(true, Ordering::SeqCst) {
            scheduler::start_jobs(ctx, state);
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.guild_id != Some(self.guild_id) || msg.author.bot {
            return;
        }
        let Some(state) = AppState::from_ctx(&ctx).await else {
            return;
        };
        let Some(constants) = state.current_constants().await else {
            return;
        };

        // Every authored message earns a coin, command or not.
        state.ledger.increment(msg.author.id, 1).await;

        let member_roles = msg.member.as_deref().map(|member| member.roles.as_slice());
        if verify::should_verify(member_roles, msg.channel_id, &constants) {
            // Gated authors go to verification instead of command routing.
            tokio::spawn(async move {
                verify::begin_verification(&ctx, &msg, &constants).await;
            });
            return;
        }

        if let Some(parsed) = commands::parse(&msg.content, state.prefix) {
            tokio::spawn(async move {
                commands::execute(&ctx, &msg, parsed, state).await;
            });
        }
    }

    async fn reaction_add(&self, ctx: Context, reaction: Reaction) {
        self.on_reaction(ctx, reaction, ReactionDirection::Added).await;
    }

    async fn reaction_remove(&self, ctx: Context, reaction: Reaction) {
        self.on_reaction(ctx, reaction, ReactionDirection::Removed).await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = &interaction else {
            return;
        };
        let Some(state) = AppState::from_ctx(&ctx).await else {
            return;
        };
        let Some(constants) = state.current_constants().await else {
            return;
        };
        interactions::handle(&ctx, command, &constants).await;
    }
}
