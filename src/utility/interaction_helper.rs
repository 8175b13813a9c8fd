
use serenity::model::prelude::*;
use serenity::all::ComponentInteractionDataKind::StringSelect;
use serenity::model::application::ButtonStyle;
use serenity::builder::{
    CreateButton,
    CreateActionRow,
    CreateInteractionResponse,
    CreateSelectMenu,
    CreateSelectMenuKind,
    CreateSelectMenuOption,
};

use std::time::Duration;

use crate::utility::*;


pub struct InteractionHelper {
    channel: ChannelId,
    resolver: Resolver,
}

impl InteractionHelper {

    pub fn new(channel: ChannelId, resolver: Resolver) -> InteractionHelper {
        InteractionHelper { channel, resolver }
    }

    // presents buttons and resolves to the id of the pressed one
    pub async fn create_buttons(&self,
                            target: UserId,
                            message: impl ToMessage,
                            mut buttons: Vec<CreateButton>,
                            timeout: Duration) -> Option<String> {

        // discord supports up to 25 buttons, one is reserved for cancel
        if buttons.len() > 24 {
            Logger::warn(&format!("Dropping {} buttons over the interaction limit", buttons.len() - 24));
            buttons = buttons[..24].to_vec();
        }

        let cancel_button = CreateButton::new("cancel")
            .label("Cancel")
            .style(ButtonStyle::Danger);
        buttons.push(cancel_button);

        let action_rows = buttons.chunks(5)
            .map(|chunk| CreateActionRow::Buttons(chunk.to_vec()))
            .collect();
        let message = message.to_message().components(action_rows);

        let sent_message = self.channel
            .send_message(&self.resolver, message).await.ok()?;

        let interaction = sent_message
            .await_component_interaction(&self.resolver.ctx().shard)
            .author_id(target)
            .timeout(timeout).await;

        let _ = sent_message.delete(&self.resolver).await;

        if let Some(interaction) = interaction {
            let _ = interaction.create_response(&self.resolver,
                CreateInteractionResponse::Acknowledge
            ).await;
            let id = interaction.data.custom_id.to_string();
            match id.as_str() {
                "cancel" => return None,
                _ => return Some(id),
            }
        }
        None
    }

    // presents a dropdown and resolves to the selected value
    pub async fn create_dropdown(&self,
                            target: UserId,
                            message: impl ToMessage,
                            options: Vec<CreateSelectMenuOption>,
                            timeout: Duration) -> Option<String> {

        let message = message.to_message().select_menu(
            CreateSelectMenu::new("select_menu", CreateSelectMenuKind::String {
                options: options
            })
            .placeholder("Select an option")
        );

        let sent_message = self.channel
            .send_message(&self.resolver, message).await.ok()?;

        let interaction = sent_message
            .await_component_interaction(&self.resolver.ctx().shard)
            .author_id(target)
            .timeout(timeout).await;

        let _ = sent_message.delete(&self.resolver).await;

        if let Some(interaction) = interaction {
            let _ = interaction.create_response(&self.resolver,
                CreateInteractionResponse::Acknowledge
            ).await;
            if let StringSelect { values } = &interaction.data.kind {
                return values.first().cloned();
            }
        }
        None
    }

    pub async fn create_user_dropdown(&self,
                            target: UserId,
                            message: impl ToMessage,
                            users: Vec<&User>,
                            timeout: Duration) -> Option<User> {

        let options = users.iter().map(|user| {
            CreateSelectMenuOption::new(self.resolver.resolve_name(user), user.id.to_string())
                .description(&user.id.to_string())
        }).collect();

        let selected = self.create_dropdown(target, message, options, timeout).await?;
        let id = selected.parse::<u64>().ok()?;
        self.resolver.resolve_user(UserId::from(id)).await
    }

    // awaits the next message of `user` in this channel
    pub async fn await_reply(&self, user: UserId, timeout: Duration) -> Option<Message> {
        self.channel
            .await_reply(&self.resolver.ctx().shard)
            .author_id(user)
            .channel_id(self.channel)
            .timeout(timeout).await
    }

}
