
use serenity::all::{ChannelId, ReactionType};
use serenity::builder::CreateEmbedFooter;
use nonempty::nonempty;

use crate::commands::command::{Command, CommandParams};
use crate::utility::*;
use crate::databases::*;


pub struct SuggestCommand;

impl Command for SuggestCommand {

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Suggestions,
            nonempty!["suggest".to_string()]
        )
            .add_required("message")
            .example("suggest Add unicorns to planet earth!")
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
                    .get("channel_suggestions").await;
                let channel: ChannelId = match channel {
                    Ok(channel) => channel.into(),
                    Err(_) => {
                        message.reply_failure("No suggestion channel is configured.").await;
                        return;
                    },
                };

                // create embed
                let embed = MessageManager::create_embed(|embed| {
                    embed
                        .title("Pending Suggestion")
                        .description(&content)
                        .footer(CreateEmbedFooter::new(
                            format!("Suggested by {}", message.resolve_name())
                        ))
                }).await;
                let reactions = vec![ReactionType::Unicode("👍".to_string()),
                                     ReactionType::Unicode("👎".to_string())];
                let suggestion = embed.to_message().reactions(reactions);

                // send to suggestions channel
                let posted = channel.send_message(&message, suggestion).await;
                let posted = match posted {
                    Ok(posted) => posted,
                    Err(_) => {
                        message.reply_failure("I could not post in the suggestion channel.").await;
                        return;
                    },
                };

                // the posted message id doubles as the suggestion id
                let log = SuggestionLog::new(
                    message.get_author().id.to_string(),
                    channel.to_string(),
                    content,
                    "pending".to_string(),
                );
                SuggestionsDB::get_instance().lock().await
                    .set(&posted.id.to_string(), &log.into()).await;

                message.reply_success().await;
            }
        )
    }

}
