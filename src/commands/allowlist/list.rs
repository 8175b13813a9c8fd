
use nonempty::nonempty;

use std::str::FromStr;

use crate::commands::command::{Command, CommandParams};
use crate::commands::allowlist::{allowlist_context, report_admission_error};
use crate::utility::*;
use crate::admission::AdmissionStatus;


const LIST_LIMIT: usize = 20;

pub struct ListCommand;

impl Command for ListCommand {

    fn permission<'a>(&'a self, message: &'a MessageManager) -> BoxedFuture<'a, bool> {
        Box::pin(async move {
            message.is_mod().await
        })
    }

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Allowlist,
            nonempty!["list".to_string()]
        )
            .add_optional("status")
            .example("list pending")
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {

                let message = &params.message;
                let filter = match message.payload(None, None).as_str() {
                    "" => None,
                    status => match AdmissionStatus::from_str(status) {
                        Ok(status) => Some(status),
                        Err(_) => {
                            message.reply_failure("Unknown status. Use `pending`, `approved` or `rejected`.").await;
                            return;
                        },
                    },
                };

                let context = allowlist_context().await;
                let (workflow, _settings) = match context {
                    Some(context) => context,
                    None => {
                        message.reply_failure("The allowlist is not ready yet. Please try again in a moment.").await;
                        return;
                    },
                };

                let records = match workflow.list(filter).await {
                    Ok(records) => records,
                    Err(error) => {
                        report_admission_error(message, error).await;
                        return;
                    },
                };

                if records.is_empty() {
                    let embed = MessageManager::create_embed(|embed| {
                        embed
                            .title("Allowlist")
                            .description("There are no matching entries.")
                    }).await;
                    let _ = message.reply(embed).await;
                    return;
                }

                let counts = |status: AdmissionStatus| records.iter()
                    .filter(|record| record.status == status)
                    .count();
                let approved = counts(AdmissionStatus::Approved);
                let pending = counts(AdmissionStatus::Pending);
                let rejected = counts(AdmissionStatus::Rejected);

                let mut listing = String::new();
                for record in records.iter().take(LIST_LIMIT) {
                    listing.push_str(&format!("• <@{}> `>` {}\n",
                        record.applicant_id, record.status));
                }
                if records.len() > LIST_LIMIT {
                    listing.push_str(&format!("*and {} more ...*", records.len() - LIST_LIMIT));
                }

                let embed = MessageManager::create_embed(|embed| {
                    embed
                        .title("Allowlist")
                        .description(listing)
                        .field("Approved", approved.to_string(), true)
                        .field("Pending", pending.to_string(), true)
                        .field("Rejected", rejected.to_string(), true)
                }).await;
                let _ = message.reply(embed).await;
            }
        )
    }

}
