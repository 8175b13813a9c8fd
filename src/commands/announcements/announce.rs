
use serenity::all::ChannelId;
use serenity::model::application::ButtonStyle;
use serenity::builder::{CreateButton, CreateEmbedFooter};
use nonempty::nonempty;

use std::time::Duration;

use crate::commands::command::{Command, CommandParams};
use crate::utility::*;
use crate::databases::*;


pub struct AnnounceCommand;

impl Command for AnnounceCommand {

    fn permission<'a>(&'a self, message: &'a MessageManager) -> BoxedFuture<'a, bool> {
        Box::pin(async move {
            message.is_admin().await
        })
    }

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Announcements,
            nonempty!["announce".to_string()]
        )
            .add_required("message")
            .example("announce The server restarts at noon.")
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {

                let message = &params.message;
                let content = message.payload(None, None);

                if content.is_empty() {
                    self.invalid_usage(params).await;
                    return;
                }

                let channel = ConfigDB::get_instance().lock().await
                    .get("channel_announcements").await;
                let channel: ChannelId = match channel {
                    Ok(channel) => channel.into(),
                    Err(_) => {
                        message.reply_failure("No announcement channel is configured.").await;
                        return;
                    },
                };

                // nothing goes out without an explicit confirmation
                let preview = MessageManager::create_embed(|embed| {
                    embed
                        .title("📢 Announcement")
                        .description(&content)
                        .footer(CreateEmbedFooter::new(
                            format!("Announced by {}", message.resolve_name())
                        ))
                }).await;
                let pressed = message.get_interaction_helper().create_buttons(
                    message.get_author().id,
                    preview.clone(),
                    vec![CreateButton::new("publish")
                        .label("Publish")
                        .style(ButtonStyle::Primary)],
                    Duration::from_secs(60),
                ).await;

                match pressed.as_deref() {
                    Some("publish") => {
                        match channel.send_message(&message, preview.to_message()).await {
                            Ok(_) => message.reply_success().await,
                            Err(_) => message.reply_failure("I could not post in the announcement channel.").await,
                        }
                    },
                    _ => {
                        message.reply_failure("Announcement discarded.").await;
                    },
                }
            }
        )
    }

}
