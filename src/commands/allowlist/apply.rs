
use nonempty::nonempty;

use crate::commands::command::{Command, CommandParams};
use crate::commands::allowlist::{allowlist_context, report_admission_error};
use crate::utility::*;
use crate::admission::Applicant;


pub struct ApplyCommand;

impl Command for ApplyCommand {

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Allowlist,
            nonempty!["apply".to_string(), "allowlist".to_string()]
        )
            .example("apply")
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {

                let message = &params.message;
                let context = allowlist_context().await;
                let (workflow, settings) = match context {
                    Some(context) => context,
                    None => {
                        message.reply_failure("The allowlist is not ready yet. Please try again in a moment.").await;
                        return;
                    },
                };

                let author = message.get_author();
                let applicant = Applicant {
                    id: author.id.to_string(),
                    account_age_days: message.get_resolver().account_age_days(author),
                };

                // this call spans the whole interview, other events keep
                // flowing while it is suspended on the applicant's replies
                match workflow.apply(&applicant, &settings).await {
                    Ok(outcome) => {
                        #[cfg(feature = "debug")]
                        Logger::info_long("Application resolved", &format!("{:?}", outcome));
                        let _ = outcome;
                    },
                    Err(error) => report_admission_error(message, error).await,
                }
            }
        )
    }

}
