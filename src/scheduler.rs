//! Periodic jobs. The scheduler is a collaborator only: it calls into the
//! other components on a timer and owns no state of its own.

use std::sync::Arc;
use std::time::Duration;

use serenity::gateway::ActivityData;
use serenity::prelude::Context;

use crate::model::AppState;

const AUTOSAVE_INTERVAL: Duration = Duration::from_secs(5 * 60);
const PRESENCE_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Spawn the periodic jobs. Called once, from `ready`.
pub fn start_jobs(ctx: Context, state: Arc<AppState>) {
    tracing::info!(target: "scheduler", "starting periodic jobs");

    {
        let state = state.clone();
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(AUTOSAVE_INTERVAL);
            // The first tick completes immediately; nothing to save yet.
            tick.tick().await;
            loop {
                tick.tick().await;
                if state.ledger.accounts().await == 0 {
                    continue;
                }
                if let Err(e) = state.ledger.save_to(&state.ledger_path).await {
                    tracing::warn!(target: "scheduler", error = %e, "ledger autosave failed");
                }
            }
        });
    }

    tokio::spawn(async move {
        let mut tick = tokio::time::interval(PRESENCE_INTERVAL);
        tick.tick().await;
        loop {
            tick.tick().await;
            ctx.set_activity(Some(ActivityData::listening(format!(
                "{p}help | {p}info",
                p = state.prefix
            ))));
            let accounts = state.ledger.accounts().await;
            tracing::info!(target: "scheduler", accounts, "ledger stats");
        }
    });
}
