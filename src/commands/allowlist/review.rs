
use serenity::model::application::ButtonStyle;
use serenity::builder::{CreateButton, CreateSelectMenuOption};
use nonempty::nonempty;

use std::str::FromStr;
use std::time::Duration;

use crate::commands::command::{Command, CommandParams};
use crate::commands::allowlist::{allowlist_context, report_admission_error};
use crate::utility::*;
use crate::admission::{RejectReason, ReviewOutcome, ReviewSession, is_correct_answer};


const DECISION_TIMEOUT: Duration = Duration::from_secs(300);

pub struct ReviewCommand;

impl Command for ReviewCommand {

    fn permission<'a>(&'a self, message: &'a MessageManager) -> BoxedFuture<'a, bool> {
        Box::pin(async move {
            message.is_mod().await
        })
    }

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Allowlist,
            nonempty!["review".to_string()]
        )
            .add_required("user")
            .example("review @Applicant")
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {

                let message = &params.message;
                let target = &params.target.unwrap();

                let context = allowlist_context().await;
                let (workflow, settings) = match context {
                    Some(context) => context,
                    None => {
                        message.reply_failure("The allowlist is not ready yet. Please try again in a moment.").await;
                        return;
                    },
                };

                let mut session = match ReviewSession::open(&workflow, &target.id.to_string()).await {
                    Ok(session) => session,
                    Err(error) => {
                        report_admission_error(message, error).await;
                        return;
                    },
                };

                // transcript overview, correctness recomputed for display
                let record = session.record().clone();
                let mut embed = MessageManager::create_embed(|embed| {
                    embed
                        .title(format!("Application Review - {}",
                            message.get_resolver().resolve_name(target)))
                        .description("Read the answers below, then approve or reject the application.")
                        .thumbnail(target.face())
                }).await;
                for (index, entry) in record.transcript.iter().enumerate() {
                    let verdict = match &entry.expected {
                        Some(expected) => match is_correct_answer(expected, &entry.answer) {
                            true  => "✅ ",
                            false => "❌ ",
                        },
                        None => "",
                    };
                    embed = embed.field(
                        format!("{}. {}", index + 1, entry.question),
                        format!("{}{}", verdict, entry.answer),
                        false);
                }

                // one decision per session, the store settles racing reviewers
                let helper = message.get_interaction_helper();
                let pressed = helper.create_buttons(
                    message.get_author().id,
                    embed,
                    vec![
                        CreateButton::new("approve")
                            .label("Approve")
                            .style(ButtonStyle::Success),
                        CreateButton::new("reject")
                            .label("Reject")
                            .style(ButtonStyle::Danger),
                    ],
                    DECISION_TIMEOUT,
                ).await;

                let (outcome, reason) = match pressed.as_deref() {
                    Some("approve") => (ReviewOutcome::Approve, None),
                    Some("reject") => {
                        let options = RejectReason::all().iter()
                            .map(|reason| CreateSelectMenuOption::new(
                                reason.describe(), reason.to_string()))
                            .collect();
                        let picked = helper.create_dropdown(
                            message.get_author().id,
                            "Select a reason for the rejection.",
                            options,
                            DECISION_TIMEOUT,
                        ).await;
                        match picked.and_then(|value| RejectReason::from_str(&value).ok()) {
                            Some(reason) => (ReviewOutcome::Reject, Some(reason)),
                            None => {
                                message.reply_failure("Review closed without a decision.").await;
                                return;
                            },
                        }
                    },
                    _ => {
                        message.reply_failure("Review closed without a decision.").await;
                        return;
                    },
                };

                let decided_by = message.get_author().id.to_string();
                let decision = session.decide(&workflow, &settings, &decided_by, outcome, reason).await;
                match decision {
                    Ok(record) => {
                        let embed = MessageManager::create_embed(|embed| {
                            embed
                                .title("Application Decided")
                                .description(format!("<@{}> has been **{}** by <@{}>.",
                                    record.applicant_id, record.status, decided_by))
                        }).await;
                        let _ = message.reply(embed).await;
                    },
                    Err(error) => report_admission_error(message, error).await,
                }
            }
        )
    }

}
