
extern crate alloc;

use serenity::prelude::{Client, GatewayIntents};
use anyhow::Context;

use utility::traits::Singleton;
use utility::logger::Logger;
use commands::command_manager::CommandManager;
use handler::Handler;
use databases::*;

mod handler;
mod utility;
mod databases;
mod admission;
mod commands;


#[tokio::main]
async fn main() -> anyhow::Result<()> {

    // setup
    let token = setup_token().await?;
    let command_manager = CommandManager::new().await;
    let handler = Handler::new(command_manager);

    // start client
    let intents = GatewayIntents::GUILDS                    |
                  GatewayIntents::GUILD_MEMBERS             |
                  GatewayIntents::GUILD_MESSAGES            |
                  GatewayIntents::MESSAGE_CONTENT           |
                  GatewayIntents::DIRECT_MESSAGES           |
                  GatewayIntents::GUILD_MESSAGE_REACTIONS;
    let mut client = Client::builder(token, intents)
        .event_handler(handler)
        .await
        .context("Error creating client")?;

    Logger::info("Starting client");
    client.start().await.context("Client error")?;
    Ok(())
}

// the environment wins over the stored token so deployments can rotate it
async fn setup_token() -> anyhow::Result<String> {
    let config = ConfigDB::get_instance().lock().await;
    match std::env::var("DISCORD_TOKEN") {
        Ok(token) => {
            config.set("token", token.as_str()).await;
            Ok(token)
        },
        Err(_) => config.get("token").await
            .map(|entry| entry.to_string())
            .map_err(anyhow::Error::msg)
            .context("No token in environment or config database"),
    }
}
