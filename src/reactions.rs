//! Reaction-driven content toggling.
//!
//! Each logical key is a `(message, emoji)` pair holding the set of eligible
//! users currently reacting with that emoji. The first eligible add engages
//! the key (the "on" effect runs once, however often the gateway redelivers
//! the add); the last eligible remove releases it. The effect pair pins and
//! unpins the curator message.

use std::collections::HashSet;
use std::time::Duration;

use ahash::AHashMap;
use serenity::model::channel::{Message, Reaction};
use serenity::model::id::{MessageId, UserId};
use serenity::prelude::Context;
use tokio::sync::Mutex;

use crate::constants::GuildConstants;
use crate::error::FetchError;

/// Bound on resolving a partial reaction payload into its full message.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionDirection {
    Added,
    Removed,
}

/// Outcome of recording one reaction event against the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// First eligible reactor arrived; the "on" effect fires.
    Engaged,
    /// Last eligible reactor left; the "off" effect fires.
    Released,
    /// Redelivery, replay, or a non-final add/remove. No effect.
    Unchanged,
}

/// A reaction is acted on only when a curator authored the message, the
/// reactor is not a curator, and the message carries at least one embed.
/// Everything else is ignored outright.
pub fn is_eligible(
    message_author: UserId,
    reactor: UserId,
    has_embed: bool,
    constants: &GuildConstants,
) -> bool {
    constants.is_curator(message_author) && !constants.is_curator(reactor) && has_embed
}

/// Per-(message, emoji) toggle state.
#[derive(Debug, Default)]
pub struct ReactionBoard {
    keys: Mutex<AHashMap<(MessageId, String), HashSet<UserId>>>,
}

impl ReactionBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one eligible reaction event and return the state transition.
    /// The decision runs entirely under the board lock with no awaits, so
    /// transitions for a key are serialized; callers apply the effect after
    /// this returns.
    pub async fn record(
        &self,
        message: MessageId,
        emoji: &str,
        reactor: UserId,
        direction: ReactionDirection,
    ) -> Transition {
        let key = (message, emoji.to_owned());
        let mut keys = self.keys.lock().await;
        match direction {
            ReactionDirection::Added => {
                let reactors = keys.entry(key).or_default();
                if reactors.insert(reactor) && reactors.len() == 1 {
                    Transition::Engaged
                } else {
                    Transition::Unchanged
                }
            }
            ReactionDirection::Removed => {
                let Some(reactors) = keys.get_mut(&key) else {
                    return Transition::Unchanged;
                };
                if !reactors.remove(&reactor) {
                    return Transition::Unchanged;
                }
                if reactors.is_empty() {
                    keys.remove(&key);
                    Transition::Released
                } else {
                    Transition::Unchanged
                }
            }
        }
    }
}

/// Resolve the full message behind a (possibly partial) reaction payload,
/// bounded by [`FETCH_TIMEOUT`]. Cache hits return without a network round
/// trip.
pub async fn resolve_message(ctx: &Context, reaction: &Reaction) -> Result<Message, FetchError> {
    tokio::time::timeout(FETCH_TIMEOUT, reaction.message(ctx))
        .await
        .map_err(|_| FetchError::TimedOut)?
        .map_err(FetchError::Api)
}

/// Apply the toggle effect for a transition: engaging pins the curator
/// message, releasing unpins it. Platform failures are logged, not retried.
pub async fn apply_transition(ctx: &Context, msg: &Message, transition: Transition) {
    let outcome = match transition {
        Transition::Engaged => msg.pin(&ctx.http).await,
        Transition::Released => msg.unpin(&ctx.http).await,
        Transition::Unchanged => return,
    };
    if let Err(e) = outcome {
        tracing::warn!(target: "reactions", message_id = %msg.id, ?transition, error = ?e, "toggle effect failed");
    }
}
