
use serenity::all::ChannelId;
use serenity::model::id::UserId;
use tokio::runtime::Runtime;
use futures::stream::StreamExt;

use std::str::FromStr;
use std::thread;
use std::time::Duration;

use crate::databases::*;
use crate::utility::*;


const BAN_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

pub async fn spawn(thread: BoxedFuture<'static, ()>) {
    thread::spawn(move || {
        let runtime = Runtime::new().unwrap();
        runtime.block_on(thread);
    });
}

// reconciles expired temporary bans on a fixed polling interval
pub fn periodic_checks<'a>(resolver: Resolver) -> BoxedFuture<'a, ()> {
    Box::pin(async move {
        let resolver = &resolver;
        loop {

            let banned_users = BansDB::get_instance().lock().await
                .get_keys().await;
            let now = chrono::Utc::now().timestamp();

            futures::stream::iter(banned_users)
                .for_each_concurrent(None, |user| {
                    async move {

                        let bans = BansDB::get_instance().lock().await
                            .get_all(&user).await;

                        if let Ok(bans) = bans {
                            for ban in bans.into_iter() {

                                if !ban.is_expired(now) {
                                    continue;
                                }

                                // the local record is reconciled regardless of
                                // whether the platform still knows the ban
                                BansDB::get_instance().lock().await
                                    .delete_by_id(ban.id).await;
                                lift_ban(resolver, &user).await;
                            }
                        }
                    }
                }).await;

            tokio::time::sleep(BAN_SWEEP_INTERVAL).await;
        }
    })
}

async fn lift_ban(resolver: &Resolver, user: &str) {

    let user_id = match UserId::from_str(user) {
        Ok(user_id) => user_id,
        Err(_) => return,
    };

    for guild_id in resolver.known_guilds() {
        // "not banned here" is fine, the record is already settled
        let _ = guild_id.unban(resolver.http(), user_id).await;
    }

    let embed = MessageManager::create_embed(|embed| {
        embed
            .title("Temporary Ban Expired")
            .description(format!("<@{}> has been automatically unbanned.", user))
    }).await;

    let modlogs = ConfigDB::get_instance().lock().await
        .get("channel_modlogs").await;
    if let Ok(modlogs) = modlogs {
        let channel: ChannelId = modlogs.into();
        let _ = channel.send_message(resolver, embed.to_message()).await;
    }

    #[cfg(feature = "debug")]
    Logger::info_long("Lifted expired ban", user);
}
