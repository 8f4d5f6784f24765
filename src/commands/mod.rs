//! Prefix command routing.
//!
//! A message is a command when its first character equals the configured
//! prefix. The remainder splits on ASCII whitespace into a name and args;
//! there is no quoting or escaping, so an argument can never contain
//! whitespace. Handler failures are caught here and collapsed to one generic
//! failure reply so a misbehaving command can never take dispatch down.

pub mod balance;
pub mod help;
pub mod info;
pub mod leaderboard;
pub mod save;

use std::str::FromStr;
use std::sync::Arc;

use serenity::model::channel::Message;
use serenity::model::id::UserId;
use serenity::prelude::Context;

use crate::error::HandlerError;
use crate::model::AppState;

/// Reply for a handler that failed internally. Deliberately vague; details go
/// to the log, not the channel.
pub const GENERIC_FAILURE: &str =
    "Something went wrong on my end. Please try that again in a moment.";

/// A parsed prefix invocation: command name plus whitespace-delimited args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
}

/// Split message content into a command invocation, or `None` when the
/// message is not a command (wrong first character, or a bare prefix).
pub fn parse(content: &str, prefix: char) -> Option<ParsedCommand> {
    let rest = content.strip_prefix(prefix)?;
    let mut tokens = rest.split_whitespace();
    let name = tokens.next()?.to_string();
    let args = tokens.map(str::to_string).collect();
    Some(ParsedCommand { name, args })
}

enum Command {
    Help,
    Info,
    Balance,
    Leaderboard,
    Save,
    Unknown,
}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "help" | "h" => Ok(Command::Help),
            "info" => Ok(Command::Info),
            "balance" | "bal" => Ok(Command::Balance),
            "leaderboard" | "lb" => Ok(Command::Leaderboard),
            "save" => Ok(Command::Save),
            _ => Ok(Command::Unknown),
        }
    }
}

/// Invocation context handed to handlers.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub author: UserId,
    pub args: Vec<String>,
}

/// Run a parsed invocation to its reply text. Total: unknown names get the
/// help pointer, and a failing handler is logged and answered with
/// [`GENERIC_FAILURE`].
pub async fn respond(parsed: &ParsedCommand, author: UserId, state: &Arc<AppState>) -> String {
    let command = Command::from_str(&parsed.name).unwrap_or(Command::Unknown);
    let invocation = Invocation {
        author,
        args: parsed.args.clone(),
    };
    match run(command, &invocation, state).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!(target: "commands", command = %parsed.name, error = %e, "command handler failed");
            GENERIC_FAILURE.to_string()
        }
    }
}

async fn run(
    command: Command,
    invocation: &Invocation,
    state: &Arc<AppState>,
) -> Result<String, HandlerError> {
    match command {
        Command::Help => Ok(help::render(state.prefix)),
        Command::Info => Ok(info::render(state.prefix)),
        Command::Balance => Ok(balance::run(invocation, state).await),
        Command::Leaderboard => Ok(leaderboard::run(state).await),
        Command::Save => save::run(invocation, state).await,
        Command::Unknown => Ok(help::unknown(state.prefix)),
    }
}

/// Serenity-side entry: resolve the reply and send it. Delivery failures are
/// logged and swallowed.
pub async fn execute(ctx: &Context, msg: &Message, parsed: ParsedCommand, state: Arc<AppState>) {
    let reply = respond(&parsed, msg.author.id, &state).await;
    if let Err(e) = msg.reply(&ctx.http, reply).await {
        tracing::warn!(target: "commands", command = %parsed.name, error = ?e, "failed to deliver command reply");
    }
}
