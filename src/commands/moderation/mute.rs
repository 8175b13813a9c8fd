
use serenity::all::ChannelId;
use serenity::builder::EditMember;
use serenity::model::timestamp::Timestamp;
use nonempty::nonempty;

use crate::commands::command::{Command, CommandParams};
use crate::utility::*;
use crate::databases::*;


// discord caps timeouts at 28 days
const MAX_TIMEOUT_DAYS: i64 = 28;

pub struct MuteCommand;

impl Command for MuteCommand {

    fn permission<'a>(&'a self, message: &'a MessageManager) -> BoxedFuture<'a, bool> {
        Box::pin(async move {
            message.is_mod().await
        })
    }

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Moderation,
            nonempty!["mute".to_string(), "timeout".to_string()]
        )
            .add_required("user")
            .add_optional(vec!["duration", "reason"])
            .example("mute @BadBoy 1h continuously being bad")
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {

                let message = &params.message;
                let target = &params.target.unwrap();

                let resolver = message.get_resolver();
                if resolver.is_mod(target).await {
                    message.reply_failure("You can't mute a staff member.").await;
                    return;
                }

                // a missing or unparsable duration falls back to ten minutes
                let payload = message.payload_without_mentions(None, None);
                let mut words = payload.split_whitespace();
                let mut duration = chrono::Duration::minutes(10);
                let mut reason = match words.next() {
                    Some(first) => match parse_duration(first) {
                        Some(parsed) => {
                            duration = parsed;
                            words.collect::<Vec<&str>>().join(" ")
                        },
                        None => payload.clone(),
                    },
                    None => String::new(),
                };
                if reason.is_empty() {
                    reason = "No reason provided.".to_string();
                }
                if duration > chrono::Duration::days(MAX_TIMEOUT_DAYS) {
                    duration = chrono::Duration::days(MAX_TIMEOUT_DAYS);
                }

                let until = chrono::Utc::now().timestamp() + duration.num_seconds();
                let until = match Timestamp::from_unix_timestamp(until) {
                    Ok(until) => until,
                    Err(_) => return,
                };

                let member = resolver.resolve_member(target).await;
                if let Some(mut member) = member {

                    let edit = EditMember::new()
                        .disable_communication_until_datetime(until);
                    if let Err(why) = member.edit(resolver, edit).await {
                        message.reply_failure(&format!("Failed to mute the user (`{:?}`).", why)).await;
                        return;
                    }

                    message.reply_success().await;

                    let embed = MessageManager::create_embed(|embed| {
                        embed
                            .title("Timed Out")
                            .description(format!(
                                "You have been timed out until <t:{}> for `>` {}",
                                until.unix_timestamp(), reason))
                            .color(0xff0000)
                    }).await;
                    let _ = target.dm(resolver, embed.to_message()).await;

                    // log to mod logs
                    let log_message = message.get_log_builder()
                        .title("[MUTE]")
                        .description(&format!("<@{}> has been muted", target.id))
                        .color(0xff8200)
                        .staff()
                        .user(target)
                        .arbitrary("Reason", &reason)
                        .labeled_timestamp("Until", until.unix_timestamp())
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
