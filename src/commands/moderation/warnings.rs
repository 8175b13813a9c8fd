
use nonempty::nonempty;

use crate::commands::command::{Command, CommandParams};
use crate::utility::*;
use crate::databases::*;


const DISPLAY_LIMIT: u8 = 10;

pub struct WarningsCommand;

impl Command for WarningsCommand {

    fn permission<'a>(&'a self, message: &'a MessageManager) -> BoxedFuture<'a, bool> {
        Box::pin(async move {
            message.is_mod().await
        })
    }

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Moderation,
            nonempty!["warnings".to_string(), "warns".to_string()]
        )
            .add_required("user")
            .example("warnings @BadBoy")
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {

                let message = &params.message;
                let target = &params.target.unwrap();

                let total = WarningsDB::get_instance().lock().await
                    .get_all(&target.id.to_string()).await
                    .map(|warnings| warnings.len())
                    .unwrap_or(0);

                // most recent warnings first
                let warnings = WarningsDB::get_instance().lock().await
                    .get_last(&target.id.to_string(), DISPLAY_LIMIT).await
                    .unwrap_or_default();

                if warnings.is_empty() {
                    let embed = MessageManager::create_embed(|embed| {
                        embed
                            .title("Warnings")
                            .description(format!("<@{}> has no warnings.", target.id))
                    }).await;
                    let _ = message.reply(embed).await;
                    return;
                }

                let mut embed = MessageManager::create_embed(|embed| {
                    embed
                        .title("Warnings")
                        .description(format!("<@{}> has {} warning(s).", target.id, total))
                }).await;
                for (index, warning) in warnings.iter().enumerate() {
                    embed = embed.field(
                        format!("Warning #{}", index + 1),
                        format!("**Reason:** {}\n**By:** <@{}>\n**Date:** <t:{}>",
                            warning.reason, warning.staff_id, warning.timestamp),
                        false);
                }
                if total > warnings.len() {
                    embed = embed.field(
                        "Note",
                        format!("Showing {}/{} warnings.", warnings.len(), total),
                        false);
                }

                let _ = message.reply(embed).await;
            }
        )
    }

}
