
use serenity::all::{ChannelId, MessageId, UserId};
use serenity::builder::{CreateEmbedFooter, EditMessage};
use nonempty::nonempty;

use std::str::FromStr;

use crate::commands::command::{Command, CommandParams};
use crate::utility::*;
use crate::databases::*;


#[derive(Debug, Clone, Copy, PartialEq)]
enum SuggestionAction {
    Approve,
    Reject,
    Consider,
    Implement,
}

impl SuggestionAction {

    fn trigger(&self) -> &'static str {
        match self {
            SuggestionAction::Approve => "approve",
            SuggestionAction::Reject => "reject",
            SuggestionAction::Consider => "consider",
            SuggestionAction::Implement => "implement",
        }
    }

    fn status(&self) -> &'static str {
        match self {
            SuggestionAction::Approve => "approved",
            SuggestionAction::Reject => "rejected",
            SuggestionAction::Consider => "considering",
            SuggestionAction::Implement => "implemented",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            SuggestionAction::Approve => "Suggestion Approved",
            SuggestionAction::Reject => "Suggestion Rejected",
            SuggestionAction::Consider => "Suggestion Under Consideration",
            SuggestionAction::Implement => "Suggestion Implemented",
        }
    }

    fn color(&self) -> u64 {
        match self {
            SuggestionAction::Approve => 0x2ecc71,
            SuggestionAction::Reject => 0xe74c3c,
            SuggestionAction::Consider => 0xf1c40f,
            SuggestionAction::Implement => 0x3498db,
        }
    }

}

// approve/reject/consider/implement share everything but their labels
pub struct ResolveSuggestionCommand {
    action: SuggestionAction,
}

impl ResolveSuggestionCommand {

    pub fn approve() -> Self {
        ResolveSuggestionCommand { action: SuggestionAction::Approve }
    }

    pub fn reject() -> Self {
        ResolveSuggestionCommand { action: SuggestionAction::Reject }
    }

    pub fn consider() -> Self {
        ResolveSuggestionCommand { action: SuggestionAction::Consider }
    }

    pub fn implement() -> Self {
        ResolveSuggestionCommand { action: SuggestionAction::Implement }
    }

}

impl Command for ResolveSuggestionCommand {

    fn permission<'a>(&'a self, message: &'a MessageManager) -> BoxedFuture<'a, bool> {
        Box::pin(async move {
            message.is_mod().await
        })
    }

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Suggestions,
            nonempty![self.action.trigger().to_string()]
        )
            .add_required("suggestion id")
            .add_optional("comment")
            .example(&format!("{} 1234567890123456789 sounds great", self.action.trigger()))
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {

                let message = &params.message;
                let payload = message.payload(None, None);
                let mut words = payload.split_whitespace();

                let suggestion_id = words.next()
                    .and_then(|word| MessageId::from_str(word).ok());
                let suggestion_id = match suggestion_id {
                    Some(suggestion_id) => suggestion_id,
                    None => {
                        self.invalid_usage(params).await;
                        return;
                    },
                };
                let comment = words.collect::<Vec<&str>>().join(" ");

                let mut log = match SuggestionsDB::get_instance().lock().await
                        .get(&suggestion_id.to_string()).await {
                    Ok(log) => log,
                    Err(_) => {
                        message.reply_failure(&format!("No suggestion with id {}.", suggestion_id)).await;
                        return;
                    },
                };

                // rewrite the posted embed to reflect the verdict
                let resolver = message.get_resolver();
                let channel = ChannelId::from_str(&log.channel_id).unwrap_or(message.get_channel());
                let mut embed = MessageManager::create_embed(|embed| {
                    embed
                        .title(self.action.title())
                        .description(&log.content)
                        .color(self.action.color())
                        .footer(CreateEmbedFooter::new(
                            format!("Decided by {}", message.resolve_name())
                        ))
                }).await;
                if !comment.is_empty() {
                    embed = embed.field("Comment", comment.clone(), false);
                }
                match channel.message(resolver, suggestion_id).await {
                    Ok(mut posted) => {
                        let _ = posted.edit(resolver, EditMessage::new().embed(embed)).await;
                    },
                    Err(_) => {
                        message.reply_failure("The suggestion message no longer exists.").await;
                        return;
                    },
                }

                // record the verdict
                log.status = self.action.status().to_string();
                let author_id = log.author_id.clone();
                SuggestionsDB::get_instance().lock().await
                    .set(&suggestion_id.to_string(), &log.into()).await;

                // tell the suggester, a closed inbox is fine
                if let Ok(author_id) = UserId::from_str(&author_id) {
                    if let Some(author) = resolver.resolve_user(author_id).await {
                        let mut notice = format!("Your suggestion has been **{}**.", self.action.status());
                        if !comment.is_empty() {
                            notice.push_str(&format!("\nComment: {}", comment));
                        }
                        let embed = MessageManager::create_embed(|embed| {
                            embed
                                .title(self.action.title())
                                .description(notice)
                                .color(self.action.color())
                        }).await;
                        let _ = author.dm(resolver, embed.to_message()).await;
                    }
                }

                message.reply_success().await;
            }
        )
    }

}
