use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use serenity::model::gateway::GatewayIntents;
use serenity::prelude::*;
use tracing_subscriber::EnvFilter;

use majordomo_bot::constants::ConstantsStore;
use majordomo_bot::handler::Handler;
use majordomo_bot::ledger::Ledger;
use majordomo_bot::model::AppState;
use majordomo_bot::reactions::ReactionBoard;

#[tokio::main]
async fn main() {
    let _ = dotenv::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let token = env::var("DISCORD_TOKEN").expect("Expected DISCORD_TOKEN in the environment.");
    let config_path = env::var("GUILD_CONFIG_PATH").unwrap_or_else(|_| "guild.json".to_string());
    let ledger_path =
        PathBuf::from(env::var("LEDGER_PATH").unwrap_or_else(|_| "ledger.json".to_string()));
    // The prefix is a single character; only the first one of the value counts.
    let prefix = env::var("COMMAND_PREFIX")
        .ok()
        .and_then(|value| value.chars().next())
        .unwrap_or('$');

    let constants = ConstantsStore::new(config_path);
    let snapshot = constants.load().await.expect("Failed to load the guild config.");
    let guild_id = snapshot.guild;

    let ledger = Ledger::load_from(&ledger_path).expect("Failed to read the ledger snapshot.");

    let app_state = Arc::new(AppState {
        constants,
        ledger,
        reactions: ReactionBoard::new(),
        prefix,
        ledger_path,
    });

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MESSAGE_REACTIONS;

    let mut client = Client::builder(&token, intents)
        .event_handler(Handler::new(guild_id))
        .await
        .expect("Error creating the Discord client.");

    {
        let mut data = client.data.write().await;
        data.insert::<AppState>(app_state);
    }

    if let Err(why) = client.start().await {
        tracing::error!(target: "main", error = ?why, "client error");
    }
}
