
use serenity::builder::{CreateEmbed, CreateEmbedAuthor};
use serenity::model::user::User;

use crate::utility::message_manager::MessageManager;


#[derive(Clone)]
pub struct LogBuilder {
    message: MessageManager,
    title: String,
    description: Option<String>,
    color: Option<u64>,
    thumbnail: Option<String>,
    fields: Vec<(String, String, bool)>,
}

impl LogBuilder {

    pub fn new(message: &MessageManager) -> LogBuilder {
        LogBuilder {
            message: message.clone(),
            title: "No title provided".to_string(),
            description: None,
            color: None,
            thumbnail: Some(message.get_author().face()),
            fields: Vec::new(),
        }
    }

    pub async fn build(&self) -> CreateEmbed {
        MessageManager::create_embed(|embed| {
            let mut embed = embed
                .author(CreateEmbedAuthor::new(self.title.clone())
                    .icon_url(self.message.get_author().face()))
                .fields(self.fields.clone());
            if let Some(thumbnail) = &self.thumbnail {
                embed = embed.thumbnail(thumbnail);
            }
            if let Some(color) = self.color {
                embed = embed.color(color);
            }
            if let Some(description) = &self.description {
                embed = embed.description(description);
            }
            embed
        }).await
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn color(mut self, color: u64) -> Self {
        self.color = Some(color);
        self
    }

    pub fn target(mut self, user: &User) -> Self {
        self.thumbnail = Some(user.face());
        self
    }

    pub fn no_thumbnail(mut self) -> Self {
        self.thumbnail = None;
        self
    }

    fn format_user(&self, user: &User) -> String {
        format!("<@{}>", user.id)
    }

    pub fn user(mut self, user: &User) -> Self {
        self.fields.push(("User".to_string(), self.format_user(user), true));
        self
    }

    pub fn staff(mut self) -> Self {
        let staff = self.message.get_author().clone();
        self.fields.push(("Staff".to_string(), self.format_user(&staff), true));
        self
    }

    pub fn timestamp(mut self) -> Self {
        let timestamp = self.message.get_timestamp();
        self.fields.push(("Timestamp".to_string(),
            format!("<t:{}> *<t:{}:R>*", timestamp, timestamp),
            true));
        self
    }

    pub fn labeled_timestamp(mut self, label: &str, timestamp: i64) -> Self {
        self.fields.push((label.to_string(),
            format!("<t:{}> *<t:{}:R>*", timestamp, timestamp),
            true));
        self
    }

    pub fn arbitrary(mut self, label: &str, content: impl Into<String>) -> Self {
        self.fields.push((label.to_string(), content.into(), false));
        self
    }

}
