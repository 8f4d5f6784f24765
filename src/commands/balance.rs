//! Coin balance lookup, for the author or a mentioned user.

use std::sync::Arc;

use serenity::model::id::UserId;

use super::Invocation;
use crate::model::AppState;

/// Parse a `<@123>` / `<@!123>` mention or a raw id into a user id.
fn parse_user_arg(arg: &str) -> Option<UserId> {
    let trimmed = arg
        .strip_prefix("<@")
        .and_then(|s| s.strip_suffix('>'))
        .map(|s| s.strip_prefix('!').unwrap_or(s))
        .unwrap_or(arg);
    trimmed.parse::<u64>().ok().filter(|id| *id != 0).map(UserId::new)
}

pub async fn run(invocation: &Invocation, state: &Arc<AppState>) -> String {
    let target = match invocation.args.first() {
        Some(arg) => match parse_user_arg(arg) {
            Some(user) => user,
            None => {
                return "I couldn't read that as a user. Mention them or pass their id.".to_string();
            }
        },
        None => invocation.author,
    };
    let balance = state.ledger.read(target).await;
    if target == invocation.author {
        format!("You have **{balance}** coins.")
    } else {
        format!("<@{target}> has **{balance}** coins.")
    }
}
