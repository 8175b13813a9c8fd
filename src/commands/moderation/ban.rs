
use serenity::all::ChannelId;
use nonempty::nonempty;

use crate::commands::command::{Command, CommandParams};
use crate::utility::*;
use crate::databases::*;


pub struct BanCommand;

impl Command for BanCommand {

    fn permission<'a>(&'a self, message: &'a MessageManager) -> BoxedFuture<'a, bool> {
        Box::pin(async move {
            message.is_mod().await
        })
    }

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Moderation,
            nonempty!["ban".to_string()]
        )
            .add_required("user")
            .add_optional(vec!["duration", "reason"])
            .example("ban @JuicyJuggler 7d we could not handle you anymore")
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {

                let message = &params.message;
                let target = &params.target.unwrap();

                let resolver = message.get_resolver();
                if resolver.is_mod(target).await {
                    message.reply_failure("You can't ban a staff member.").await;
                    return;
                }

                // a leading duration token makes the ban temporary
                let payload = message.payload_without_mentions(None, None);
                let mut words = payload.split_whitespace();
                let mut expiration_date = 0;
                let mut reason = match words.next() {
                    Some(first) => match parse_duration(first) {
                        Some(duration) => {
                            expiration_date = chrono::Utc::now().timestamp() + duration.num_seconds();
                            words.collect::<Vec<&str>>().join(" ")
                        },
                        None => payload.clone(),
                    },
                    None => String::new(),
                };
                if reason.is_empty() {
                    reason = "No reason provided.".to_string();
                }

                let member = resolver.resolve_member(target).await;
                if let Some(member) = member {

                    // the record is durable before the platform ban is attempted
                    let log = BanLog::new(
                        message.get_author().id.to_string(),
                        reason.clone(),
                        expiration_date,
                    );
                    BansDB::get_instance().lock().await
                        .append(&target.id.to_string(), &log.into()).await;

                    if let Err(why) = member.ban_with_reason(resolver, 0, &reason).await {
                        let warning = MessageManager::create_embed(|embed| {
                            embed
                                .title("Failed to ban user")
                                .description(format!(
                                    "The user could not be banned (`{:?}`). Please consult an \
                                    Administrator so that they can perform a manual ban or resolve \
                                    the problem otherwise.",
                                    why))
                        }).await;
                        let _ = message.reply(warning).await;
                        return;
                    }

                    // log ban to mod logs
                    let duration = match expiration_date {
                        0 => "Permanent".to_string(),
                        _ => format!("until <t:{}>", expiration_date),
                    };
                    let log_message = message.get_log_builder()
                        .title("[BAN]")
                        .target(target)
                        .color(0xff8200)
                        .staff()
                        .user(target)
                        .arbitrary("Reason", &reason)
                        .arbitrary("Duration", &duration)
                        .timestamp()
                        .build().await;
                    let modlogs = ConfigDB::get_instance().lock().await
                        .get("channel_modlogs").await;
                    if let Ok(modlogs) = modlogs {
                        let channel: ChannelId = modlogs.into();
                        let _ = channel.send_message(resolver, log_message.to_message()).await;
                    }

                    // inform the member of the ban and how to appeal
                    let guild_name = resolver.resolve_guild(None).await
                        .map(|guild| guild.name)
                        .unwrap_or("the server".to_string());
                    let notify_message = message.get_log_builder()
                        .title("You've been banned!")
                        .description(&format!(
                            "You have been banned from {} for \"{}\"\nYou can appeal your ban by \
                            contacting the staff if you believe that we made a mistake!",
                            guild_name, reason))
                        .target(target)
                        .no_thumbnail()
                        .color(0xff0000)
                        .build().await;
                    let sent = target.dm(resolver, notify_message.to_message()).await;

                    match sent {
                        Ok(_)  => message.reply_success().await,
                        Err(_) => {
                            let embed = MessageManager::create_embed(|embed| {
                                embed
                                    .title("Notice")
                                    .description("I could not send a DM to the user.")
                            }).await;
                            let _ = message.reply(embed).await;
                        },
                    };
                }
            }
        )
    }

}
