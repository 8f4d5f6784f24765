//! Command list reply, also the fallback for unknown names.

/// Names of every prefix command; the help reply and its test both read this.
pub fn all_command_names() -> Vec<&'static str> {
    vec!["help", "info", "balance", "leaderboard", "save"]
}

pub fn render(prefix: char) -> String {
    format!(
        "**Commands**\n\
         `{p}help` — this list\n\
         `{p}info` — what this bot does\n\
         `{p}balance [user]` — coin balance (yours, or a mentioned user's)\n\
         `{p}leaderboard` — top coin balances\n\
         `{p}save` — flush the coin ledger to disk (curators only)",
        p = prefix
    )
}

/// Pointer shown for an unrecognized command name.
pub fn unknown(prefix: char) -> String {
    format!("I don't know that one. Try `{prefix}help` or `{prefix}info`.")
}
