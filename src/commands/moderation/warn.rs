
use serenity::all::ChannelId;
use nonempty::nonempty;

use crate::commands::command::{Command, CommandParams};
use crate::utility::*;
use crate::databases::*;


pub struct WarnCommand;

impl Command for WarnCommand {

    fn permission<'a>(&'a self, message: &'a MessageManager) -> BoxedFuture<'a, bool> {
        Box::pin(async move {
            message.is_mod().await
        })
    }

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Moderation,
            nonempty!["warn".to_string()]
        )
            .add_required("user")
            .add_optional("reason")
            .example("warn @BadBoy being bad")
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {

                let message = &params.message;
                let target = &params.target.unwrap();

                let resolver = message.get_resolver();
                if resolver.is_mod(target).await {
                    message.reply_failure("You can't warn a staff member.").await;
                    return;
                }

                let mut reason = message.payload_without_mentions(None, None);
                if reason.is_empty() {
                    reason = "No reason provided.".to_string();
                }

                // log to database
                let log = ModLog::new(
                    message.get_author().id.to_string(),
                    reason.clone(),
                );
                WarningsDB::get_instance().lock().await
                    .append(&target.id.to_string(), &log.into()).await;
                let warning_count = WarningsDB::get_instance().lock().await
                    .get_all(&target.id.to_string()).await
                    .map(|warnings| warnings.len())
                    .unwrap_or(1);

                let embed = MessageManager::create_embed(|embed| {
                    embed
                        .title("Warning")
                        .description(format!("You have been warned for `>` {}", reason))
                        .color(0xff0000)
                }).await;
                let _ = message.reply(format!("<@{}>", target.id)).await;
                let _ = message.reply(embed.clone()).await;

                // a closed inbox is fine, the warning already counts
                let _ = target.dm(resolver, embed.to_message()).await;

                // log to mod logs
                let log_message = message.get_log_builder()
                    .title("[WARNING]")
                    .description(&format!("<@{}> has been warned", target.id))
                    .color(0xff8200)
                    .staff()
                    .user(target)
                    .arbitrary("Reason", &reason)
                    .arbitrary("Warning Count", warning_count.to_string())
                    .timestamp()
                    .build().await;
                let modlogs = ConfigDB::get_instance().lock().await
                    .get("channel_modlogs").await;
                if let Ok(modlogs) = modlogs {
                    let channel: ChannelId = modlogs.into();
                    let _ = channel.send_message(message, log_message.to_message()).await;
                }
            }
        )
    }

}
