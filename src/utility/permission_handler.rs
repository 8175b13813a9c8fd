
use serenity::model::permissions::Permissions;
use serenity::model::channel::{PermissionOverwrite, PermissionOverwriteType};
use serenity::model::channel::GuildChannel;
use serenity::model::id::{RoleId, UserId};

use crate::utility::*;


pub struct PermissionHandler<'a> {
    resolver: &'a Resolver,
    channel: &'a GuildChannel,
}

impl<'a> PermissionHandler<'a> {

    pub fn new(resolver: &'a Resolver, channel: &'a GuildChannel) -> PermissionHandler<'a> {
        PermissionHandler { resolver, channel }
    }

    async fn overwrite(&self, allow: Permissions, deny: Permissions, kind: PermissionOverwriteType) {
        let overwrite = PermissionOverwrite { allow, deny, kind };
        let _ = self.channel.create_permission(self.resolver.ctx(), overwrite).await;
    }

    pub async fn allow_role(&self, permission: &Permissions, ids: impl ToList<RoleId>) {
        for id in ids.to_list() {
            self.overwrite(*permission, Permissions::empty(), PermissionOverwriteType::Role(id)).await;
        }
    }

    pub async fn deny_role(&self, permission: &Permissions, ids: impl ToList<RoleId>) {
        for id in ids.to_list() {
            self.overwrite(Permissions::empty(), *permission, PermissionOverwriteType::Role(id)).await;
        }
    }

    pub async fn allow_member(&self, permission: &Permissions, ids: impl ToList<UserId>) {
        for id in ids.to_list() {
            self.overwrite(*permission, Permissions::empty(), PermissionOverwriteType::Member(id)).await;
        }
    }

    pub async fn deny_member(&self, permission: &Permissions, ids: impl ToList<UserId>) {
        for id in ids.to_list() {
            self.overwrite(Permissions::empty(), *permission, PermissionOverwriteType::Member(id)).await;
        }
    }

}
