
use serenity::async_trait;
use serenity::model::channel::{Message, Reaction};
use serenity::model::guild::Member;
use serenity::model::gateway::Ready;
use serenity::all::GuildId;
use serenity::prelude::*;
use rand::seq::IndexedRandom;

use std::str::FromStr;
use std::sync::Arc;

use crate::commands::command_manager::CommandManager;
use crate::utility::*;
use crate::databases::*;
use crate::admission::AdmissionStatus;


const WELCOME_MESSAGES: [&str; 5] = [
    "Welcome! Make yourself at home.",
    "Glad you made it through the gate!",
    "A new face! Say hi everyone.",
    "Welcome aboard, enjoy your stay!",
    "The gate opens once more. Welcome!",
];

pub struct Handler {
    command_manager: CommandManager,
}

impl Handler {

    pub fn new(command_manager: CommandManager) -> Handler {
        Handler {
            command_manager,
        }
    }

}

#[async_trait]
impl EventHandler for Handler {

    async fn ready(&self, ctx: Context, _ready: Ready) {

        #[cfg(feature = "debug")]
        Logger::info("Bot is ready!");

        let main_guild = ConfigDB::get_instance().lock().await
            .get("guild_main").await;
        let guild_id = main_guild.ok()
            .and_then(|entry| GuildId::from_str(&entry.value).ok());
        let resolver = Resolver::new(ctx, guild_id);

        AllowlistHandler::get_instance().lock().await
            .init(&resolver).await;

        spawn(periodic_checks(resolver.clone())).await;
    }

    async fn message(&self, ctx: Context, msg: Message) {

        if msg.author.bot {
            return;
        }

        let resolver = Resolver::new(ctx, msg.guild_id);
        let message = Arc::new(MessageManager::new(resolver, msg).await);

        #[cfg(feature = "commands")]
        if message.is_command() {
            self.command_manager.execute(&message).await;
        }
    }

    // an approved member rejoining gets their access back right away
    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {

        if new_member.user.bot {
            return;
        }

        let resolver = Resolver::new(ctx, Some(new_member.guild_id));
        let workflow = AllowlistHandler::get_instance().lock().await
            .workflow();
        let workflow = match workflow {
            Some(workflow) => workflow,
            None => return,
        };

        let applicant_id = new_member.user.id.to_string();
        let approved = matches!(
            workflow.status(&applicant_id).await,
            Ok(Some(record)) if record.status == AdmissionStatus::Approved);
        if !approved {
            return;
        }

        let role = ConfigDB::get_instance().lock().await
            .get("role_allowlisted").await;
        if let Ok(role) = role {
            if let Ok(role) = role.value.parse::<u64>() {
                let role = serenity::all::RoleId::from(role);
                if let Err(err) = new_member.add_role(resolver.http(), role).await {
                    Logger::warn_long("Failed to restore allowlist role", &err.to_string());
                }
            }
        }

        // greet in the welcome channel
        let channel_welcome = ConfigDB::get_instance().lock().await
            .get("channel_welcome").await;
        if let Ok(channel) = channel_welcome {
            let flavor = WELCOME_MESSAGES.choose(&mut rand::rng()).unwrap();
            let channel: serenity::all::ChannelId = channel.into();
            let _ = channel.send_message(&resolver,
                format!("<@{}> is back on the allowlist!\n{}", applicant_id, flavor)
                    .to_message()).await;
        }

        let embed = MessageManager::create_embed(|embed| {
            embed
                .title("Welcome back!")
                .description("Your allowlist status is still active, you have full access.")
        }).await;
        let _ = new_member.user.dm(&resolver, embed.to_message()).await;
    }

    // only the two voting emojis count on suggestions, except for staff
    #[cfg(feature = "suggestions")]
    async fn reaction_add(&self, ctx: Context, reaction: Reaction) {

        let channel_suggestions = ConfigDB::get_instance().lock().await
            .get("channel_suggestions").await;
        let is_suggestion_channel = channel_suggestions
            .map(|entry| entry.value == reaction.channel_id.to_string())
            .unwrap_or(false);
        if !is_suggestion_channel {
            return;
        }

        let recorded = SuggestionsDB::get_instance().lock().await
            .get(&reaction.message_id.to_string()).await;
        if recorded.is_err() {
            return;
        }

        let emoji = reaction.emoji.to_string();
        if emoji == "👍" || emoji == "👎" {
            return;
        }

        let resolver = Resolver::new(ctx, reaction.guild_id);
        let user = match reaction.user_id {
            Some(user_id) => resolver.resolve_user(user_id).await,
            None => None,
        };
        if let Some(user) = user {
            if user.bot || resolver.is_mod(&user).await {
                return;
            }
            let _ = reaction.delete(resolver.http()).await;
        }
    }

}
