
use serenity::model::application::ButtonStyle;
use serenity::builder::CreateButton;
use nonempty::nonempty;

use std::time::Duration;

use crate::commands::command::{Command, CommandParams};
use crate::utility::*;


const PROMPT_TIMEOUT: Duration = Duration::from_secs(120);

pub struct EmbedCommand;

impl EmbedCommand {

    // asks one question in-channel and returns the trimmed reply
    async fn prompt(message: &MessageManager, question: &str) -> Option<String> {
        let embed = MessageManager::create_embed(|embed| {
            embed
                .title("Embed Builder")
                .description(question)
        }).await;
        let sent = message.reply(embed).await.ok()?;
        let reply = message.get_interaction_helper()
            .await_reply(message.get_author().id, PROMPT_TIMEOUT).await;
        let _ = sent.delete(message).await;
        reply.map(|reply| reply.content.trim().to_string())
    }

}

impl Command for EmbedCommand {

    fn permission<'a>(&'a self, message: &'a MessageManager) -> BoxedFuture<'a, bool> {
        Box::pin(async move {
            message.is_admin().await
        })
    }

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Announcements,
            nonempty!["embed".to_string()]
        )
            .example("embed")
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {

                let message = &params.message;

                let title = match EmbedCommand::prompt(message,
                        "What should the title be?").await {
                    Some(title) => title,
                    None => {
                        message.reply_failure("Embed builder timed out.").await;
                        return;
                    },
                };
                let description = match EmbedCommand::prompt(message,
                        "What should the description be?").await {
                    Some(description) => description,
                    None => {
                        message.reply_failure("Embed builder timed out.").await;
                        return;
                    },
                };
                let color = EmbedCommand::prompt(message,
                    "Which hex color should the embed use? Reply with `skip` for the default.").await
                    .filter(|reply| reply != "skip")
                    .and_then(|reply| u64::from_str_radix(reply.trim_start_matches("#"), 16).ok());
                let image = EmbedCommand::prompt(message,
                    "Which image url should be attached? Reply with `skip` for none.").await
                    .filter(|reply| reply != "skip" && reply.starts_with("http"));

                // assemble and preview
                let mut embed = MessageManager::create_embed(|embed| {
                    embed
                        .title(title)
                        .description(description)
                }).await;
                if let Some(color) = color {
                    embed = embed.color(color);
                }
                if let Some(image) = image {
                    embed = embed.image(image);
                }

                let pressed = message.get_interaction_helper().create_buttons(
                    message.get_author().id,
                    embed.clone(),
                    vec![CreateButton::new("publish")
                        .label("Publish")
                        .style(ButtonStyle::Primary)],
                    Duration::from_secs(60),
                ).await;

                match pressed.as_deref() {
                    Some("publish") => {
                        let _ = message.reply(embed).await;
                    },
                    _ => {
                        message.reply_failure("Embed discarded.").await;
                    },
                }
            }
        )
    }

}
