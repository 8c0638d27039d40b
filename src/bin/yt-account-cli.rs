use eyre::Context;
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use yt_account::{AccountManager, Actions, NotificationSetting, PrivacySetting, SessionConfig};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(std::io::stdout().is_terminal())
        .init();

    let mut session = SessionConfig::default();
    if tokio::fs::try_exists("session.json").await.unwrap() {
        let raw = tokio::fs::read_to_string("session.json").await.unwrap();
        session = serde_json::from_str(&raw).context("parse session.json")?;
    }
    if let Ok(authorization) = std::env::var("YT_AUTHORIZATION") {
        session.authorization = Some(authorization);
    }
    if let Ok(cookie) = std::env::var("YT_COOKIE") {
        session.cookie = Some(cookie);
    }
    if session.authorization.is_none() && session.cookie.is_none() {
        eyre::bail!(
            "no credentials: put authorization/cookie values in session.json, \
             or set YT_AUTHORIZATION or YT_COOKIE"
        );
    }

    let actions = Arc::new(Actions::new(reqwest::Client::new(), session));
    let account = AccountManager::new(actions);

    // for testing
    let info = account.get_info().await.context("fetch account info")?;
    eprintln!("==> {} ({})", info.name, info.channel_handle.as_deref().unwrap_or("no handle"));
    eprintln!("channel  : {}", info.channel_id.as_deref().unwrap_or("none"));
    eprintln!("selected : {}", info.is_selected);
    eprintln!("disabled : {}", info.is_disabled);

    eprintln!("==> All accounts on this session");
    for listed in account.list_accounts().await.context("list accounts")? {
        let marker = if listed.is_selected { "*" } else { " " };
        eprintln!("{marker} {} {:?}", listed.name, listed.channel_handle);
    }

    eprintln!("==> Time watched");
    for stat in account.get_time_watched().await.context("fetch time watched")? {
        eprintln!("{:<24} {}", stat.title, stat.value);
    }

    // Demo the analytics screen; accounts without a channel can't have one
    eprintln!("==> Analytics");
    match account.get_analytics().await {
        Ok(screen) => {
            eprintln!("analytics for {}:", screen.channel_id);
            let sections = screen.into_sections();
            let count = sections
                .get("contents")
                .and_then(|contents| contents.as_array())
                .map_or(0, Vec::len);
            eprintln!("  {count} section(s) on the screen");
        }
        Err(e) => {
            eprintln!("Failed to get analytics: {e}");
        }
    }

    // Optionally flip a settings switch, e.g. `yt-account-cli subscriptions off`
    let mut args = std::env::args().skip(1);
    if let Some(switch) = args.next() {
        let value = match args.next().as_deref() {
            Some("on") => true,
            Some("off") => false,
            other => eyre::bail!("expected `on` or `off` after the switch name, got {other:?}"),
        };

        match switch.as_str() {
            "subscriptions" => {
                account
                    .update_notification_setting(NotificationSetting::Subscriptions, value)
                    .await?;
            }
            "recommended-videos" => {
                account
                    .update_notification_setting(NotificationSetting::RecommendedVideos, value)
                    .await?;
            }
            "channel-activity" => {
                account
                    .update_notification_setting(NotificationSetting::ChannelActivity, value)
                    .await?;
            }
            "comment-replies" => {
                account
                    .update_notification_setting(NotificationSetting::CommentReplies, value)
                    .await?;
            }
            "mentions" => {
                account
                    .update_notification_setting(NotificationSetting::Mentions, value)
                    .await?;
            }
            "shared-content" => {
                account
                    .update_notification_setting(NotificationSetting::SharedContent, value)
                    .await?;
            }
            "playlists-private" => {
                account
                    .update_privacy_setting(PrivacySetting::SavedPlaylistsPrivate, value)
                    .await?;
            }
            "subscriptions-private" => {
                account
                    .update_privacy_setting(PrivacySetting::SubscriptionsPrivate, value)
                    .await?;
            }
            other => eyre::bail!("unknown settings switch `{other}`"),
        }
        eprintln!("==> Updated `{switch}` to {value}");
    }

    Ok(())
}
