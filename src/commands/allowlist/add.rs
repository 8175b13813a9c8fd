
use nonempty::nonempty;

use crate::commands::command::{Command, CommandParams};
use crate::commands::allowlist::{allowlist_context, report_admission_error};
use crate::utility::*;


pub struct DirectAddCommand;

impl Command for DirectAddCommand {

    fn permission<'a>(&'a self, message: &'a MessageManager) -> BoxedFuture<'a, bool> {
        Box::pin(async move {
            message.is_mod().await
        })
    }

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Allowlist,
            nonempty!["add".to_string()]
        )
            .add_required("user")
            .add_optional("reason")
            .example("add @GoodCitizen vouched for by staff")
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {

                let message = &params.message;
                let target = &params.target.unwrap();

                let mut reason = message.payload_without_mentions(None, None);
                if reason.is_empty() {
                    reason = "No reason provided.".to_string();
                }

                let context = allowlist_context().await;
                let (workflow, _settings) = match context {
                    Some(context) => context,
                    None => {
                        message.reply_failure("The allowlist is not ready yet. Please try again in a moment.").await;
                        return;
                    },
                };

                let granted_by = message.get_author().id.to_string();
                match workflow.direct_add(&target.id.to_string(), &granted_by, &reason).await {
                    Ok(_) => {
                        let embed = MessageManager::create_embed(|embed| {
                            embed
                                .title("User Added")
                                .description(format!(
                                    "<@{}> has been added to the allowlist by <@{}>.",
                                    target.id, granted_by))
                        }).await;
                        let _ = message.reply(embed).await;
                    },
                    Err(error) => report_admission_error(message, error).await,
                }
            }
        )
    }

}
