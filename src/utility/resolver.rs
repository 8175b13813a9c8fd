
use serenity::all::{Cache, CacheHttp, Http};
use serenity::model::prelude::*;
use serenity::prelude::*;

use std::sync::Arc;

use crate::utility::*;
use crate::databases::*;


// wraps the event context so lookups do not have to thread `ctx` around
#[derive(Clone)]
pub struct Resolver {
    ctx: Context,
    guild_id: Option<GuildId>,
}

impl CacheHttp for Resolver {
    fn http(&self) -> &Http {
        &self.ctx.http
    }
    fn cache(&self) -> Option<&Arc<Cache>> {
        Some(&self.ctx.cache)
    }
}

impl AsRef<Http> for Resolver {
    fn as_ref(&self) -> &Http {
        &self.ctx.http
    }
}

impl Resolver {

    pub fn new(ctx: Context, guild_id: Option<GuildId>) -> Resolver {
        Resolver { ctx, guild_id }
    }

    pub fn ctx(&self) -> &Context {
        &self.ctx
    }

    pub fn http(&self) -> &Http {
        &self.ctx.http
    }

    pub fn cache(&self) -> &Arc<Cache> {
        &self.ctx.cache
    }

    pub fn known_guilds(&self) -> Vec<GuildId> {
        self.ctx.cache.guilds()
    }

    pub async fn resolve_guild(&self, guild_id: Option<GuildId>) -> Option<Guild> {
        let guild_id = guild_id.or(self.guild_id)?;
        self.ctx.cache.guild(guild_id).map(|guild| guild.clone())
    }

    pub async fn resolve_user(&self, user_id: UserId) -> Option<User> {
        self.ctx.http.get_user(user_id).await.ok()
    }

    pub async fn resolve_member(&self, user: &User) -> Option<Member> {
        let guild_id = self.guild_id?;
        guild_id.member(&self.ctx, user.id).await.ok()
    }

    pub async fn resolve_member_of(&self, guild_id: GuildId, user_id: UserId) -> Option<Member> {
        guild_id.member(&self.ctx, user_id).await.ok()
    }

    pub async fn resolve_role(&self, role_name: impl ToList<&str>) -> Option<Vec<Role>> {
        let guild = self.resolve_guild(None).await?;
        let mut roles = Vec::new();
        for name in role_name.to_list() {
            let role = guild.roles.values().find(|role| role.name == name)?;
            roles.push(role.clone());
        }
        Some(roles)
    }

    pub fn resolve_name(&self, user: &User) -> String {
        user.global_name.clone().unwrap_or(user.name.clone())
    }

    pub async fn has_role(&self, user: &User, roles: impl ToList<RoleId>) -> bool {
        if let Some(guild_id) = self.guild_id {
            for role in roles.to_list() {
                if let Ok(true) = user.has_role(&self.ctx, guild_id, role).await {
                    return true;
                }
            }
        }
        false
    }

    // age of the account itself, derived from the id snowflake
    pub fn account_age_days(&self, user: &User) -> i64 {
        let created = user.created_at().unix_timestamp();
        (chrono::Utc::now().timestamp() - created) / (24 * 60 * 60)
    }

    pub async fn is_admin(&self, user: &User) -> bool {
        let role_ids = ConfigDB::get_instance().lock().await
            .get_multiple(vec!["role_admin"]).await;
        match role_ids {
            Ok(roles) => {
                let roles: Vec<String> = roles.iter().map(|entry| entry.value.clone()).collect();
                self.has_role(user, roles).await
            },
            _ => false,
        }
    }

    pub async fn is_mod(&self, user: &User) -> bool {
        let role_ids = ConfigDB::get_instance().lock().await
            .get_multiple(vec!["role_admin", "role_mod"]).await;
        match role_ids {
            Ok(roles) => {
                let roles: Vec<String> = roles.iter().map(|entry| entry.value.clone()).collect();
                self.has_role(user, roles).await
            },
            _ => false,
        }
    }

}
