use std::path::PathBuf;
use std::sync::Arc;

use majordomo_bot::commands::{self, GENERIC_FAILURE};
use majordomo_bot::constants::ConstantsStore;
use majordomo_bot::ledger::Ledger;
use majordomo_bot::model::AppState;
use majordomo_bot::reactions::ReactionBoard;
use serenity::model::id::UserId;

const CURATOR: u64 = 42;

fn write_config(name: &str) -> PathBuf {
    let path =
        std::env::temp_dir().join(format!("majordomo-cfg-{}-{}.json", std::process::id(), name));
    let json = format!(
        r#"{{
            "guild": 999,
            "role": {{"verified": 111, "emoji": 333}},
            "channel": {{"introductions": 222}},
            "emoji": {{}},
            "curators": [{CURATOR}]
        }}"#
    );
    std::fs::write(&path, json).expect("write config");
    path
}

async fn state(name: &str, ledger_path: PathBuf) -> Arc<AppState> {
    let constants = ConstantsStore::new(write_config(name));
    constants.load().await.expect("config should load");
    Arc::new(AppState {
        constants,
        ledger: Ledger::new(),
        reactions: ReactionBoard::new(),
        prefix: '$',
        ledger_path,
    })
}

fn scratch_ledger_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("majordomo-led-{}-{}.json", std::process::id(), name))
}

#[test]
fn help_lists_every_command() {
    let help = majordomo_bot::commands::help::render('$');
    for name in majordomo_bot::commands::help::all_command_names() {
        assert!(
            help.contains(&format!("${name}")),
            "help is missing `{name}`"
        );
    }
}

#[test]
fn parse_requires_the_prefix_char() {
    assert!(commands::parse("balance", '$').is_none());
    assert!(commands::parse("!help", '$').is_none());
    assert!(commands::parse("$", '$').is_none());
    assert!(commands::parse("", '$').is_none());
    assert!(commands::parse("$help", '$').is_some());
}

#[test]
fn parse_tokenizes_on_whitespace() {
    let parsed = commands::parse("$balance  <@55>   extra", '$').expect("parses");
    assert_eq!(parsed.name, "balance");
    assert_eq!(parsed.args, vec!["<@55>", "extra"]);
    // No quoting: a quoted phrase is still two args.
    let parsed = commands::parse("$balance \"a b\"", '$').expect("parses");
    assert_eq!(parsed.args, vec!["\"a", "b\""]);
}

#[tokio::test]
async fn unknown_command_falls_back_to_the_help_pointer() {
    let s = state("unknown", scratch_ledger_path("unknown")).await;
    let parsed = commands::parse("$frobnicate", '$').expect("parses");
    let reply = commands::respond(&parsed, UserId::new(1), &s).await;
    assert!(reply.contains("$help"));
    assert_ne!(reply, GENERIC_FAILURE);
}

#[tokio::test]
async fn balance_defaults_to_the_author_and_accepts_mentions() {
    let s = state("balance", scratch_ledger_path("balance")).await;
    s.ledger.increment(UserId::new(1), 3).await;
    let own =
        commands::respond(&commands::parse("$balance", '$').unwrap(), UserId::new(1), &s).await;
    assert!(own.contains("**3**"));
    let other =
        commands::respond(&commands::parse("$bal <@1>", '$').unwrap(), UserId::new(9), &s).await;
    assert!(other.contains("<@1>"));
    assert!(other.contains("**3**"));
    // Unknown users read as zero.
    let zero =
        commands::respond(&commands::parse("$bal 77", '$').unwrap(), UserId::new(9), &s).await;
    assert!(zero.contains("**0**"));
}

#[tokio::test]
async fn leaderboard_orders_and_handles_empty() {
    let s = state("lb", scratch_ledger_path("lb")).await;
    let empty =
        commands::respond(&commands::parse("$leaderboard", '$').unwrap(), UserId::new(1), &s).await;
    assert!(empty.contains("Nobody"));

    s.ledger.increment(UserId::new(1), 9).await;
    s.ledger.increment(UserId::new(2), 5).await;
    let board =
        commands::respond(&commands::parse("$lb", '$').unwrap(), UserId::new(1), &s).await;
    let first = board.find("<@1>").expect("leader listed");
    let second = board.find("<@2>").expect("runner-up listed");
    assert!(first < second);
}

#[tokio::test]
async fn save_is_curator_only() {
    let s = state("save-gate", scratch_ledger_path("save-gate")).await;
    let parsed = commands::parse("$save", '$').unwrap();
    let denied = commands::respond(&parsed, UserId::new(1), &s).await;
    assert!(denied.contains("curators"));
    assert!(!s.ledger_path.exists());
}

#[tokio::test]
async fn save_by_a_curator_writes_the_snapshot() {
    let path = scratch_ledger_path("save-ok");
    let _ = std::fs::remove_file(&path);
    let s = state("save-ok", path.clone()).await;
    s.ledger.increment(UserId::new(5), 2).await;
    let reply =
        commands::respond(&commands::parse("$save", '$').unwrap(), UserId::new(CURATOR), &s).await;
    assert!(reply.contains("saved"));
    assert!(path.exists());
    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn failing_handler_reports_generic_failure_and_dispatch_survives() {
    // An impossible snapshot path faults the save handler for real.
    let s = state("liveness", PathBuf::from("/nonexistent-majordomo-dir/deep/ledger.json")).await;
    s.ledger.increment(UserId::new(5), 2).await;
    let save = commands::parse("$save", '$').unwrap();
    let reply = commands::respond(&save, UserId::new(CURATOR), &s).await;
    assert_eq!(reply, GENERIC_FAILURE);
    // The fault stays contained: the next unrelated invocation still answers.
    let bal = commands::parse("$balance", '$').unwrap();
    let reply = commands::respond(&bal, UserId::new(5), &s).await;
    assert!(reply.contains("**2**"));
}
