
use nonempty::nonempty;

use crate::commands::command::{Command, CommandParams};
use crate::commands::allowlist::{allowlist_context, report_admission_error};
use crate::utility::*;
use crate::admission::AdmissionStatus;


pub struct CheckCommand;

impl Command for CheckCommand {

    fn permission<'a>(&'a self, message: &'a MessageManager) -> BoxedFuture<'a, bool> {
        Box::pin(async move {
            message.is_mod().await
        })
    }

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Allowlist,
            nonempty!["check".to_string()]
        )
            .add_required("user")
            .example("check @Citizen")
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

                let record = match workflow.status(&target.id.to_string()).await {
                    Ok(record) => record,
                    Err(error) => {
                        report_admission_error(message, error).await;
                        return;
                    },
                };

                let embed = match record {
                    None => MessageManager::create_embed(|embed| {
                        embed
                            .title("Allowlist Check")
                            .description(format!("<@{}> is not on the allowlist.", target.id))
                    }).await,
                    Some(record) => {
                        let status = record.status.to_string();
                        let decided_by = record.decided_by
                            .map(|decider| decider.mention())
                            .unwrap_or("Unknown".to_string());
                        let decided_at = record.decided_at
                            .map(|timestamp| format!("<t:{}>", timestamp))
                            .unwrap_or("Unknown".to_string());
                        let summary = match record.status {
                            AdmissionStatus::Approved => format!("<@{}> is on the allowlist.", target.id),
                            AdmissionStatus::Pending  => format!("<@{}> has a pending application.", target.id),
                            AdmissionStatus::Rejected => format!("<@{}> has been rejected.", target.id),
                        };
                        MessageManager::create_embed(|embed| {
                            embed
                                .title("Allowlist Check")
                                .description(summary)
                                .field("Status", status, true)
                                .field("Decided By", decided_by, true)
                                .field("Decided At", decided_at, true)
                        }).await
                    },
                };
                let _ = message.reply(embed).await;
            }
        )
    }

}
