//! Curator-only manual ledger flush.

use std::sync::Arc;

use super::Invocation;
use crate::error::HandlerError;
use crate::model::AppState;

pub async fn run(invocation: &Invocation, state: &Arc<AppState>) -> Result<String, HandlerError> {
    let constants = state.constants.get().await?;
    if !constants.is_curator(invocation.author) {
        return Ok("Only curators can do that.".to_string());
    }
    state.ledger.save_to(&state.ledger_path).await?;
    let accounts = state.ledger.accounts().await;
    Ok(format!("Ledger saved ({accounts} accounts)."))
}
