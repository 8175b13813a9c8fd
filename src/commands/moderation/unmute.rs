
use serenity::all::ChannelId;
use serenity::builder::EditMember;
use nonempty::nonempty;

use crate::commands::command::{Command, CommandParams};
use crate::utility::*;
use crate::databases::*;


pub struct UnmuteCommand;

impl Command for UnmuteCommand {

    fn permission<'a>(&'a self, message: &'a MessageManager) -> BoxedFuture<'a, bool> {
        Box::pin(async move {
            message.is_mod().await
        })
    }

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Moderation,
            nonempty!["unmute".to_string()]
        )
            .add_required("user")
            .example("unmute @ReformedBoy")
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {

                let message = &params.message;
                let target = &params.target.unwrap();

                let resolver = message.get_resolver();
                let member = resolver.resolve_member(target).await;
                if let Some(mut member) = member {

                    let muted = member.communication_disabled_until
                        .map(|until| until.unix_timestamp() > chrono::Utc::now().timestamp())
                        .unwrap_or(false);
                    if !muted {
                        message.reply_failure(&format!("<@{}> is not muted.", target.id)).await;
                        return;
                    }

                    let edit = EditMember::new().enable_communication();
                    if let Err(why) = member.edit(resolver, edit).await {
                        message.reply_failure(&format!("Failed to unmute the user (`{:?}`).", why)).await;
                        return;
                    }

                    message.reply_success().await;

                    // log to mod logs
                    let log_message = message.get_log_builder()
                        .title("[UNMUTE]")
                        .description(&format!("<@{}> has been unmuted", target.id))
                        .staff()
                        .user(target)
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
