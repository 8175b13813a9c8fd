
use nonempty::nonempty;

use crate::commands::command::{Command, CommandParams};
use crate::utility::*;


pub struct AboutCommand;

impl Command for AboutCommand {

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Casual,
            nonempty!["about".to_string(), "help".to_string()]
        )
            .example("about")
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {

                let message = &params.message;
                let prefix = message.get_prefix().unwrap_or_default();

                let embed = MessageManager::create_embed(|embed| {
                    embed
                        .title("Gatekeeper")
                        .description(
                            "I guard the gates of this server. Apply for the allowlist, \
                            suggest improvements and keep the peace.")
                        .field("Allowlist", format!(
                            "`{p}apply` `{p}add` `{p}remove` `{p}check` `{p}list` `{p}review` `{p}configure`",
                            p = prefix), false)
                        .field("Moderation", format!(
                            "`{p}warn` `{p}warnings` `{p}clearwarnings` `{p}ban` `{p}unban` `{p}kick` `{p}mute` `{p}unmute`",
                            p = prefix), false)
                        .field("Community", format!(
                            "`{p}suggest` `{p}approve` `{p}reject` `{p}consider` `{p}implement` `{p}announce` `{p}embed`",
                            p = prefix), false)
                }).await;
                let _ = message.reply(embed).await;
            }
        )
    }

}
