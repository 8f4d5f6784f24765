//! Top coin balances.

use std::fmt::Write;
use std::sync::Arc;

use crate::model::AppState;

const TOP_N: usize = 10;

pub async fn run(state: &Arc<AppState>) -> String {
    let rows = state.ledger.top(TOP_N).await;
    if rows.is_empty() {
        return "Nobody has earned any coins yet.".to_string();
    }
    let mut out = String::from("**Coin leaderboard**\n");
    for (rank, (user, balance)) in rows.iter().enumerate() {
        let _ = writeln!(out, "{}. <@{}> — {} coins", rank + 1, user, balance);
    }
    out
}
