
use serenity::all::ChannelId;
use serenity::model::id::UserId;
use nonempty::nonempty;

use std::str::FromStr;

use crate::commands::command::{Command, CommandParams};
use crate::utility::*;
use crate::databases::*;


pub struct UnbanCommand;

impl Command for UnbanCommand {

    fn permission<'a>(&'a self, message: &'a MessageManager) -> BoxedFuture<'a, bool> {
        Box::pin(async move {
            message.is_mod().await
        })
    }

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Moderation,
            nonempty!["unban".to_string()]
        )
            .add_required("user id")
            .add_optional("reason")
            .example("unban 1234567890123456789 time served")
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {

                let message = &params.message;
                let payload = message.payload(None, None);
                let mut words = payload.split_whitespace();

                let user_id = words.next()
                    .and_then(|word| UserId::from_str(word).ok());
                let user_id = match user_id {
                    Some(user_id) => user_id,
                    None => {
                        self.invalid_usage(params).await;
                        return;
                    },
                };
                let mut reason = words.collect::<Vec<&str>>().join(" ");
                if reason.is_empty() {
                    reason = "No reason provided.".to_string();
                }

                let resolver = message.get_resolver();
                let guild_id = match message.get_guild() {
                    Some(guild_id) => guild_id,
                    None => return,
                };

                // "not banned" surfaces to the requester, everything else
                // is reconciled regardless
                if let Err(_) = guild_id.unban(resolver.http(), user_id).await {
                    message.reply_failure(&format!("<@{}> does not seem to be banned.", user_id)).await;
                    return;
                }

                BansDB::get_instance().lock().await
                    .delete(&user_id.to_string()).await;

                let embed = MessageManager::create_embed(|embed| {
                    embed
                        .title("User Unbanned")
                        .description(format!("<@{}> has been unbanned by <@{}>.",
                            user_id, message.get_author().id))
                }).await;
                let _ = message.reply(embed).await;

                // log to mod logs
                let log_message = message.get_log_builder()
                    .title("[UNBAN]")
                    .description(&format!("<@{}> has been unbanned", user_id))
                    .staff()
                    .arbitrary("Reason", &reason)
                    .timestamp()
                    .build().await;
                let modlogs = ConfigDB::get_instance().lock().await
                    .get("channel_modlogs").await;
                if let Ok(modlogs) = modlogs {
                    let channel: ChannelId = modlogs.into();
                    let _ = channel.send_message(resolver, log_message.to_message()).await;
                }
            }
        )
    }

}
