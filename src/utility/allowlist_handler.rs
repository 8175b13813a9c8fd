
use serenity::async_trait;
use serenity::model::permissions::Permissions;
use serenity::model::prelude::*;
use serenity::builder::CreateChannel;
use futures::stream::StreamExt;
use uuid::Uuid;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::utility::*;
use crate::databases::*;
use crate::admission::*;


const INTERVIEW_ACCESS: Permissions = Permissions::SEND_MESSAGES.union(Permissions::VIEW_CHANNEL);

// serenity-backed interview host; spaces are private channels below the
// configured interview category
pub struct DiscordInterviewHost {
    resolver: Resolver,
}

impl DiscordInterviewHost {

    pub fn new(resolver: Resolver) -> Self {
        DiscordInterviewHost { resolver }
    }

    async fn notice_embed(notice: &Notice) -> serenity::builder::CreateEmbed {
        let title = notice.title.clone();
        let body = notice.body.clone();
        MessageManager::create_embed(|embed| {
            embed
                .title(title)
                .description(body)
        }).await
    }

    async fn direct_channel(&self, applicant_id: &str) -> Result<ChannelId> {
        let user_id = UserId::from_str(applicant_id)
            .map_err(|_| format!("Invalid applicant id '{}'", applicant_id))?;
        let user = self.resolver.resolve_user(user_id).await
            .ok_or(format!("Unknown applicant '{}'", applicant_id))?;
        let channel = user.create_dm_channel(&self.resolver).await
            .map_err(|err| format!("Failed to open DM channel: {}", err))?;
        Ok(channel.id)
    }

}

#[async_trait]
impl InterviewHost for DiscordInterviewHost {

    async fn open_space(&self, applicant_id: &str) -> Result<Destination> {

        let guild = self.resolver.resolve_guild(None).await
            .ok_or("Cannot create an interview channel outside a guild".to_string())?;
        let user_id = UserId::from_str(applicant_id)
            .map_err(|_| format!("Invalid applicant id '{}'", applicant_id))?;
        let user = self.resolver.resolve_user(user_id).await
            .ok_or(format!("Unknown applicant '{}'", applicant_id))?;

        let category = ConfigDB::get_instance().lock().await
            .get("category_interviews").await
            .map_err(|_| "No interview category configured".to_string())?
            .to_string();
        let category = category.parse::<u64>()
            .map_err(|_| "Invalid interview category configured".to_string())?;

        // the applicant must not see other interviews, everyone else is shut out
        let everyone = RoleId::from(guild.id.get());
        let builder = CreateChannel::new(format!("interview-{}", user.name))
            .category(ChannelId::from(category))
            .topic(format!("interview:{}:{}", applicant_id, Uuid::new_v4()))
            .permissions(vec![PermissionOverwrite {
                allow: Permissions::empty(),
                deny: INTERVIEW_ACCESS,
                kind: PermissionOverwriteType::Role(everyone),
            }]);
        let channel = guild.create_channel(&self.resolver, builder).await
            .map_err(|err| format!("Failed to create interview channel: {}", err))?;

        let handler = PermissionHandler::new(&self.resolver, &channel);
        handler.allow_member(&INTERVIEW_ACCESS, &user.id).await;
        let staff_roles = ConfigDB::get_instance().lock().await
            .get_multiple(vec!["role_admin", "role_mod"]).await
            .map(|entries| entries.into_iter()
                .map(|entry| entry.value)
                .collect::<Vec<String>>())
            .unwrap_or_default();
        handler.allow_role(&INTERVIEW_ACCESS, staff_roles).await;

        #[cfg(feature = "debug")]
        Logger::info_long("Opened interview space", &channel.name);

        Ok(Destination::Channel(channel.id.get()))
    }

    async fn close_space(&self, destination: &Destination) -> Result<()> {
        if let Destination::Channel(id) = destination {
            ChannelId::from(*id).delete(&self.resolver).await
                .map_err(|err| format!("Failed to close interview channel: {}", err))?;
        }
        Ok(())
    }

    async fn send(&self, destination: &Destination, notice: &Notice) -> Result<()> {
        let embed = DiscordInterviewHost::notice_embed(notice).await;
        let channel = match destination {
            Destination::Channel(id) => ChannelId::from(*id),
            Destination::Direct(applicant_id) => self.direct_channel(applicant_id).await?,
        };
        channel.send_message(&self.resolver, embed.to_message()).await
            .map_err(|err| format!("Failed to send notice: {}", err))?;
        Ok(())
    }

    async fn await_reply(&self,
            applicant_id: &str,
            destination: &Destination,
            timeout: Duration) -> Option<String> {

        let user_id = UserId::from_str(applicant_id).ok()?;
        let channel = match destination {
            Destination::Channel(id) => ChannelId::from(*id),
            Destination::Direct(applicant_id) => self.direct_channel(applicant_id).await.ok()?,
        };
        channel
            .await_reply(&self.resolver.ctx().shard)
            .author_id(user_id)
            .channel_id(channel)
            .timeout(timeout).await
            .map(|message| message.content)
    }

}

// grants or strips the allowlisted role on every guild the bot shares with
// the applicant; a guild that cannot be updated is skipped
pub struct DiscordAccessGateway {
    resolver: Resolver,
}

impl DiscordAccessGateway {

    pub fn new(resolver: Resolver) -> Self {
        DiscordAccessGateway { resolver }
    }

    async fn update_roles(&self, applicant_id: &str, grant: bool) {

        let user_id = match UserId::from_str(applicant_id) {
            Ok(user_id) => user_id,
            Err(_) => return,
        };
        let role = ConfigDB::get_instance().lock().await
            .get("role_allowlisted").await;
        let role = match role {
            Ok(entry) => match entry.value.parse::<u64>() {
                Ok(role) => RoleId::from(role),
                Err(_) => return,
            },
            Err(_) => return,
        };

        let resolver = &self.resolver;
        futures::stream::iter(resolver.known_guilds())
            .for_each_concurrent(None, |guild_id| {
                async move {
                    let member = resolver.resolve_member_of(guild_id, user_id).await;
                    if let Some(member) = member {
                        let result = match grant {
                            true  => member.add_role(resolver.http(), role).await,
                            false => member.remove_role(resolver.http(), role).await,
                        };
                        if let Err(err) = result {
                            Logger::warn_long(
                                &format!("Failed to update roles on guild {}", guild_id),
                                &err.to_string());
                        }
                    }
                }
            }).await;
    }

}

#[async_trait]
impl AccessGateway for DiscordAccessGateway {

    async fn grant_access(&self, applicant_id: &str) {
        self.update_roles(applicant_id, true).await;
    }

    async fn revoke_access(&self, applicant_id: &str) {
        self.update_roles(applicant_id, false).await;
    }

}

// long-lived owner of the admission workflow, wired up once the gateway
// session is ready
pub struct AllowlistHandler {
    workflow: Option<Arc<AdmissionWorkflow>>,
}

impl AllowlistHandler {

    pub fn new() -> Self {
        AllowlistHandler { workflow: None }
    }

    pub async fn init(&mut self, resolver: &Resolver) {
        let workflow = AdmissionWorkflow::new(
            Arc::new(SqliteAdmissionStore::new()),
            Arc::new(DiscordInterviewHost::new(resolver.clone())),
            Arc::new(DiscordAccessGateway::new(resolver.clone())),
        );
        self.workflow = Some(Arc::new(workflow));

        #[cfg(feature = "debug")]
        Logger::info("Initialized allowlist handler");
    }

    pub fn workflow(&self) -> Option<Arc<AdmissionWorkflow>> {
        self.workflow.clone()
    }

    // settings are re-read from the config database on every use, edits
    // take effect without a restart
    pub async fn load_settings(&self) -> AdmissionSettings {

        let config = ConfigDB::get_instance().lock().await;

        let questions = match config.get("allowlist_questions").await {
            Ok(entry) => serde_json::from_str(&entry.value).unwrap_or_default(),
            Err(_) => Vec::new(),
        };
        let expected_answers = match config.get("allowlist_answers").await {
            Ok(entry) => serde_json::from_str(&entry.value).unwrap_or_default(),
            Err(_) => Vec::new(),
        };

        let number = |entry: Result<DBEntry>, fallback: i64| entry
            .ok()
            .and_then(|entry| entry.value.parse::<i64>().ok())
            .unwrap_or(fallback);

        let passing_score = number(config.get("allowlist_passing_score").await, 7).max(0) as u32;
        let min_account_age_days = number(config.get("allowlist_min_account_age").await, 0);
        let question_timeout = number(config.get("allowlist_question_timeout").await, 60).max(1) as u64;
        let grace_delay = number(config.get("allowlist_grace_delay").await, 30).max(0) as u64;

        let auto_approve = config.get("allowlist_auto_approve").await
            .map(|entry| entry.value == "true")
            .unwrap_or(false);
        let cancel_keyword = config.get("allowlist_cancel_keyword").await
            .map(|entry| entry.value)
            .unwrap_or("cancel".to_string());

        let broadcast = config.get("channel_allowlist_results").await
            .ok()
            .and_then(|entry| entry.value.parse::<u64>().ok())
            .map(|channel| vec![Destination::Channel(channel)])
            .unwrap_or_default();

        AdmissionSettings {
            quiz: QuizSettings {
                questions,
                expected_answers,
                passing_score,
                question_timeout: Duration::from_secs(question_timeout),
                cancel_keyword,
            },
            min_account_age_days,
            auto_approve,
            grace_delay: Duration::from_secs(grace_delay),
            broadcast,
        }
    }

}

crate::impl_singleton!(AllowlistHandler);
