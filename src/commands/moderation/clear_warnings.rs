
use serenity::all::ChannelId;
use nonempty::nonempty;

use crate::commands::command::{Command, CommandParams};
use crate::utility::*;
use crate::databases::*;


pub struct ClearWarningsCommand;

impl Command for ClearWarningsCommand {

    fn permission<'a>(&'a self, message: &'a MessageManager) -> BoxedFuture<'a, bool> {
        Box::pin(async move {
            message.is_mod().await
        })
    }

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Moderation,
            nonempty!["clearwarnings".to_string(), "clearwarns".to_string()]
        )
            .add_required("user")
            .example("clearwarnings @ReformedBoy")
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {

                let message = &params.message;
                let target = &params.target.unwrap();

                let warnings = WarningsDB::get_instance().lock().await
                    .get_all(&target.id.to_string()).await
                    .unwrap_or_default();

                if warnings.is_empty() {
                    message.reply_failure(&format!("<@{}> has no warnings to clear.", target.id)).await;
                    return;
                }

                WarningsDB::get_instance().lock().await
                    .delete(&target.id.to_string()).await;

                let embed = MessageManager::create_embed(|embed| {
                    embed
                        .title("Warnings Cleared")
                        .description(format!("Cleared {} warning(s) for <@{}>.",
                            warnings.len(), target.id))
                }).await;
                let _ = message.reply(embed).await;

                // log to mod logs
                let log_message = message.get_log_builder()
                    .title("[WARNINGS CLEARED]")
                    .description(&format!("{} warning(s) for <@{}> have been cleared",
                        warnings.len(), target.id))
                    .staff()
                    .user(target)
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
