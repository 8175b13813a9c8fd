
use serenity::builder::CreateEmbedFooter;
use serenity::model::user::User;
use nonempty::NonEmpty;

use std::collections::HashSet;
use std::time::Duration;

use crate::utility::*;


pub struct CommandParams {
    pub message: MessageManager,
    pub target: Option<User>,
}

impl CommandParams {
    pub fn new(message: MessageManager, target: Option<User>) -> Self {
        Self { message, target }
    }
    pub fn set_target(&self, target: Option<User>) -> Self {
        Self { message: self.message.clone(), target }
    }
}

pub enum MatchType {
    Exact,
    Fuzzy(String),
    None,
}

pub trait Command: Send + Sync {

    fn is_triggered_by(&self, message: &MessageManager) -> MatchType {
        match message.get_command() {
            Some(word) => {
                let compare = word.to_lowercase();
                let triggers = &self.get_triggers();
                if triggers.contains(&compare) {
                    return MatchType::Exact;
                }
                for trigger in triggers.into_iter() {
                    let threshold = trigger.len() / 3;
                    if string_distance(&trigger, &compare) <= threshold
                        || trigger.contains(&compare) {
                        return MatchType::Fuzzy(trigger.to_string());
                    }
                }
                MatchType::None
            },
            None => MatchType::None,
        }
    }

    fn permission<'a>(&'a self, _message: &'a MessageManager) -> BoxedFuture<'a, bool> {
        Box::pin(async move { true })
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()>;

    fn define_usage(&self) -> UsageBuilder;

    fn display_usage(&self, params: CommandParams, title: String) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {
                let message = &params.message;
                let usage = self.define_usage().build(&message.get_prefix().unwrap_or_default());
                let embed = MessageManager::create_embed(|embed| {
                    embed
                        .title(title)
                        .description(&usage)
                        .footer(CreateEmbedFooter::new(
                            "Syntax Legend: <> = required, [] = optional".to_string(),
                        ))
                }).await;
                let _ = message.reply(embed).await;
            }
        )
    }

    fn invalid_usage(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move { self.display_usage(params, "Invalid Usage!".to_string()).await }
        )
    }

    fn get_triggers(&self) -> NonEmpty<String> {
        self.define_usage().triggers
    }

}

// resolves the command target from a mention, falling back to a dropdown
// of recently active users
pub struct UserDecorator {
    pub command: Box<dyn Command>,
}

impl UserDecorator {

    async fn get_target(&self, message: &MessageManager) -> Option<User> {
        let mentions = message.get_mentions().await;
        match mentions.len() {

            0 => {
                let embed = MessageManager::create_embed(|embed| {
                    embed
                        .title("Select a user!")
                        .description("Here are some suggestions ...")
                }).await;

                let last_messages = message.last_messages(20).await;
                let mut seen = HashSet::new();
                let mut users: Vec<&User> = last_messages.iter()
                    .filter(|message| seen.insert(message.author.id))
                    .map(|message| &message.author)
                    .collect();
                if seen.insert(message.get_author().id) {
                    users.push(message.get_author());
                }

                message.get_interaction_helper().create_user_dropdown(
                    message.get_author().id,
                    embed,
                    users,
                    Duration::from_secs(60),
                ).await
            },
            _ => {
                message.get_resolver().resolve_user(mentions[0]).await
            },
        }
    }

}

impl Command for UserDecorator {

    fn permission<'a>(&'a self, message: &'a MessageManager) -> BoxedFuture<'a, bool> {
        self.command.permission(message)
    }

    fn define_usage(&self) -> UsageBuilder {
        self.command.define_usage()
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {
                let target = self.get_target(&params.message).await;
                match target {
                    Some(_) => {
                        let augmented_params = params.set_target(target);
                        self.command.run(augmented_params).await;
                    },
                    None => self.invalid_usage(params).await,
                }
            }
        )
    }

}
