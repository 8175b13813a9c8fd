
use nonempty::nonempty;

use crate::commands::command::{Command, CommandParams};
use crate::utility::*;
use crate::databases::*;


pub struct ConfigureCommand;

impl Command for ConfigureCommand {

    fn permission<'a>(&'a self, message: &'a MessageManager) -> BoxedFuture<'a, bool> {
        Box::pin(async move {
            message.is_admin().await
        })
    }

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Allowlist,
            nonempty!["configure".to_string()]
        )
            .add_optional(vec!["setting", "value"])
            .example("configure passing_score 7")
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {

                let message = &params.message;
                let payload = message.payload(None, None);
                let words = payload.split_whitespace().collect::<Vec<&str>>();

                // no arguments shows the active values; the workflow reloads
                // them on every application, so edits apply right away
                if words.is_empty() {
                    let handler = AllowlistHandler::get_instance().lock().await;
                    let settings = handler.load_settings().await;
                    let embed = MessageManager::create_embed(|embed| {
                        embed
                            .title("Allowlist Configuration")
                            .field("passing_score", settings.quiz.passing_score.to_string(), true)
                            .field("min_account_age", format!("{} day(s)", settings.min_account_age_days), true)
                            .field("auto_approve", settings.auto_approve.to_string(), true)
                            .field("question_timeout", format!("{} s", settings.quiz.question_timeout.as_secs()), true)
                            .field("questions", settings.quiz.questions.len().to_string(), true)
                            .field("cancel_keyword", settings.quiz.cancel_keyword, true)
                    }).await;
                    let _ = message.reply(embed).await;
                    return;
                }

                if words.len() != 2 {
                    self.invalid_usage(params).await;
                    return;
                }
                let (setting, value) = (words[0], words[1]);

                let valid = match setting {
                    "passing_score" => value.parse::<u32>()
                        .map(|score| (1..=50).contains(&score))
                        .unwrap_or(false),
                    "min_account_age" => value.parse::<i64>()
                        .map(|days| days >= 0)
                        .unwrap_or(false),
                    "question_timeout" => value.parse::<u64>()
                        .map(|secs| secs >= 10)
                        .unwrap_or(false),
                    "auto_approve" => value == "true" || value == "false",
                    "cancel_keyword" => !value.is_empty(),
                    _ => {
                        message.reply_failure(
                            "Unknown setting. Available: `passing_score`, `min_account_age`, \
                            `question_timeout`, `auto_approve`, `cancel_keyword`.").await;
                        return;
                    },
                };

                if !valid {
                    message.reply_failure(&format!("`{}` is not a valid value for `{}`.", value, setting)).await;
                    return;
                }

                ConfigDB::get_instance().lock().await
                    .set(&format!("allowlist_{}", setting), value).await;
                message.reply_success().await;
            }
        )
    }

}
