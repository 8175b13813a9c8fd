
use std::sync::Arc;

use crate::utility::message_manager::MessageManager;
use crate::utility::*;
use crate::commands::*;
use crate::commands::command::MatchType;


pub struct CommandManager {
    commands: Vec<Box<dyn Command>>,
}

impl CommandManager {

    pub async fn new() -> CommandManager {

        let mut commands: Vec<Box<dyn Command>> = vec![

            // allowlist
            Box::new(ApplyCommand {}),
            Box::new(UserDecorator { command: Box::new(DirectAddCommand {}) }),
            Box::new(UserDecorator { command: Box::new(RemoveCommand {}) }),
            Box::new(UserDecorator { command: Box::new(CheckCommand {}) }),
            Box::new(ListCommand {}),
            Box::new(UserDecorator { command: Box::new(ReviewCommand {}) }),
            Box::new(ConfigureCommand {}),

            // moderation
            Box::new(UserDecorator { command: Box::new(WarnCommand {}) }),
            Box::new(UserDecorator { command: Box::new(WarningsCommand {}) }),
            Box::new(UserDecorator { command: Box::new(ClearWarningsCommand {}) }),
            Box::new(UserDecorator { command: Box::new(BanCommand {}) }),
            Box::new(UnbanCommand {}),
            Box::new(UserDecorator { command: Box::new(KickCommand {}) }),
            Box::new(UserDecorator { command: Box::new(MuteCommand {}) }),
            Box::new(UserDecorator { command: Box::new(UnmuteCommand {}) }),

            Box::new(AboutCommand {}),
        ];

        #[cfg(feature = "suggestions")]
        {
            commands.push(Box::new(SuggestCommand {}));
            commands.push(Box::new(ResolveSuggestionCommand::approve()));
            commands.push(Box::new(ResolveSuggestionCommand::reject()));
            commands.push(Box::new(ResolveSuggestionCommand::consider()));
            commands.push(Box::new(ResolveSuggestionCommand::implement()));
        }

        #[cfg(feature = "announcements")]
        {
            commands.push(Box::new(AnnounceCommand {}));
            commands.push(Box::new(EmbedCommand {}));
        }

        CommandManager { commands }
    }

    async fn run_command(&self, command: &Box<dyn Command>, message: &MessageManager) {
        if command.permission(message).await {
            command.run(CommandParams::new(message.clone(), None)).await;
        } else {
            message.reply_failure("You do not have permission to use this command.").await;
        }
    }

    // note: only execute this method when message.is_command() is true
    pub async fn execute(&self, message: &Arc<MessageManager>) {
        for command in self.commands.iter() {
            match command.is_triggered_by(message) {
                MatchType::Exact => self.run_command(command, message).await,
                MatchType::Fuzzy(closest_match) => {

                    // prepare correction message
                    let correction = format!("{}{} {}",
                        message.get_prefix().unwrap(),
                        closest_match,
                        message.payload(None, None));
                    let embed = MessageManager::create_embed(|embed| {
                        embed.title("Did you mean ...").description(&correction)
                    }).await;

                    // offer to run the corrected command instead
                    let confirmed = message.get_interaction_helper().create_buttons(
                        message.get_author().id,
                        embed,
                        vec![serenity::builder::CreateButton::new("yes")
                            .label("Yes")
                            .style(serenity::model::application::ButtonStyle::Primary)],
                        std::time::Duration::from_secs(60),
                    ).await;
                    if confirmed.is_some() {
                        self.run_command(command, message).await;
                    }
                },
                MatchType::None => continue,
            };
            return;
        }
    }

}
