
use nonempty::nonempty;

use crate::commands::command::{Command, CommandParams};
use crate::commands::allowlist::{allowlist_context, report_admission_error};
use crate::utility::*;


pub struct RemoveCommand;

impl Command for RemoveCommand {

    fn permission<'a>(&'a self, message: &'a MessageManager) -> BoxedFuture<'a, bool> {
        Box::pin(async move {
            message.is_mod().await
        })
    }

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Allowlist,
            nonempty!["remove".to_string()]
        )
            .add_required("user")
            .example("remove @FormerCitizen")
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {

                let message = &params.message;
                let target = &params.target.unwrap();

                let context = allowlist_context().await;
                let (workflow, _settings) = match context {
                    Some(context) => context,
                    None => {
                        message.reply_failure("The allowlist is not ready yet. Please try again in a moment.").await;
                        return;
                    },
                };

                let revoked_by = message.get_author().id.to_string();
                match workflow.revoke(&target.id.to_string(), &revoked_by).await {
                    Ok(_) => {
                        let embed = MessageManager::create_embed(|embed| {
                            embed
                                .title("User Removed")
                                .description(format!(
                                    "<@{}> has been removed from the allowlist by <@{}>.",
                                    target.id, revoked_by))
                        }).await;
                        let _ = message.reply(embed).await;
                    },
                    Err(error) => report_admission_error(message, error).await,
                }
            }
        )
    }

}
