
use serenity::all::ChannelId;
use nonempty::nonempty;

use crate::commands::command::{Command, CommandParams};
use crate::utility::*;
use crate::databases::*;


pub struct KickCommand;

impl Command for KickCommand {

    fn permission<'a>(&'a self, message: &'a MessageManager) -> BoxedFuture<'a, bool> {
        Box::pin(async move {
            message.is_mod().await
        })
    }

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Moderation,
            nonempty!["kick".to_string()]
        )
            .add_required("user")
            .add_optional("reason")
            .example("kick @Tourist overstayed their welcome")
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {

                let message = &params.message;
                let target = &params.target.unwrap();

                let resolver = message.get_resolver();
                if resolver.is_mod(target).await {
                    message.reply_failure("You can't kick a staff member.").await;
                    return;
                }

                let mut reason = message.payload_without_mentions(None, None);
                if reason.is_empty() {
                    reason = "No reason provided.".to_string();
                }

                let member = resolver.resolve_member(target).await;
                if let Some(member) = member {

                    // the DM has to go out before the member is gone
                    let guild_name = resolver.resolve_guild(None).await
                        .map(|guild| guild.name)
                        .unwrap_or("the server".to_string());
                    let notify_message = message.get_log_builder()
                        .title("You've been kicked!")
                        .description(&format!("You have been kicked from {} for \"{}\".",
                            guild_name, reason))
                        .target(target)
                        .no_thumbnail()
                        .build().await;
                    let _ = target.dm(resolver, notify_message.to_message()).await;

                    if let Err(why) = member.kick_with_reason(resolver, &reason).await {
                        message.reply_failure(&format!("Failed to kick the user (`{:?}`).", why)).await;
                        return;
                    }

                    message.reply_success().await;

                    // log to mod logs
                    let log_message = message.get_log_builder()
                        .title("[KICK]")
                        .description(&format!("<@{}> has been kicked", target.id))
                        .color(0xff8200)
                        .staff()
                        .user(target)
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
            }
        )
    }

}
