//! Shared application state, stored in serenity's global `TypeMap` so every
//! event handler can reach it through the context.

use std::path::PathBuf;
use std::sync::Arc;

use serenity::prelude::{Context, TypeMapKey};

use crate::constants::{ConstantsStore, GuildConstants};
use crate::ledger::Ledger;
use crate::reactions::ReactionBoard;

pub struct AppState {
    /// Guild configuration snapshot (single writer, atomic replace).
    pub constants: ConstantsStore,
    /// Per-user coin balances.
    pub ledger: Ledger,
    /// Per-(message, emoji) reaction toggle state.
    pub reactions: ReactionBoard,
    /// Prefix character for text commands.
    pub prefix: char,
    /// Where the ledger snapshot lives on disk.
    pub ledger_path: PathBuf,
}

impl AppState {
    pub async fn from_ctx(ctx: &Context) -> Option<Arc<Self>> {
        ctx.data.read().await.get::<AppState>().cloned()
    }

    /// Current constants snapshot; logs and returns `None` if somehow read
    /// before the startup load.
    pub async fn current_constants(&self) -> Option<Arc<GuildConstants>> {
        match self.constants.get().await {
            Ok(constants) => Some(constants),
            Err(e) => {
                tracing::error!(target: "config", error = %e, "guild constants unavailable");
                None
            }
        }
    }
}

impl TypeMapKey for AppState {
    type Value = Arc<AppState>;
}
