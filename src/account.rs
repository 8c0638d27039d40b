//! Account-level operations for the signed-in user.
//!
//! Everything here goes through innertube's account surfaces: the account
//! list, the watch-time and analytics screens, and the settings pages.
//! Responses are projected down to the handful of fields that matter;
//! whatever is not projected is either ignored or handed back raw for the
//! caller to interpret.

use std::sync::Arc;

use eyre::{bail, eyre};
use serde_json::{Value, json};
use tracing::instrument;

use crate::actions::{Actions, ClientType};
use crate::nodes::{collect_nodes, require_node, text_of};
use crate::proto::encode_channel_analytics_params;
use crate::settings::{
    NotificationSetting, PrivacySetting, SettingsPage, opaque_item_id, set_setting_payload,
};
use crate::types::{AccountInfo, AnalyticsScreen, ApiResponse, Thumbnail, TimeWatchedStat};

/// Manager for the signed-in account.
///
/// Wraps a shared [`Actions`] dispatcher and exposes account reads and
/// mutations as typed async methods. All operations require the session to
/// be authenticated; an unauthenticated session gets innertube's usual
/// logged-out responses, which surface here as missing-node errors.
#[derive(Debug, Clone)]
pub struct AccountManager {
    actions: Arc<Actions>,
}

impl AccountManager {
    /// Creates a manager on top of a shared dispatcher.
    pub fn new(actions: Arc<Actions>) -> Self {
        Self { actions }
    }

    /// Gets profile information about the current account.
    ///
    /// Fetches the account list and returns the account the response marks
    /// as selected, falling back to the first listed account when none is.
    ///
    /// # Returns
    ///
    /// The projected [`AccountInfo`], or an error if the response contains
    /// no accounts at all (typically an unauthenticated session).
    #[instrument(skip(self), ret)]
    pub async fn get_info(&self) -> eyre::Result<AccountInfo> {
        let accounts = self.list_accounts().await?;
        pick_current(accounts)
    }

    /// Lists every account available to the current session.
    ///
    /// Google accounts can own several YouTube identities (the personal
    /// account plus any brand channels); this returns all of them in the
    /// order the server lists them. Items the response renders without a
    /// readable name are skipped.
    #[instrument(skip(self))]
    pub async fn list_accounts(&self) -> eyre::Result<Vec<AccountInfo>> {
        let response = self
            .actions
            .execute("account/accounts_list", ClientType::Android, json!({}))
            .await?;

        let accounts = account_items(&response.data);
        tracing::debug!(returned_items = accounts.len(), "fetched account list");
        Ok(accounts)
    }

    /// Gets the watch-time statistics screen as `{ title, value }` rows.
    ///
    /// The screen is a list of stat rows ("Today", "Daily average", and
    /// whatever else the server decides to show); rows of other renderer
    /// kinds mixed into the list are skipped.
    #[instrument(skip(self))]
    pub async fn get_time_watched(&self) -> eyre::Result<Vec<TimeWatchedStat>> {
        let response = self
            .actions
            .browse("SPtime_watched", ClientType::Android, None)
            .await?;

        let stats = stat_rows(&response.data);
        tracing::debug!(returned_items = stats.len(), "fetched time watched stats");
        Ok(stats)
    }

    /// Gets basic analytics for the current account's channel.
    ///
    /// Resolves the channel id through [`Self::get_info`] first; accounts
    /// without a channel cannot have analytics and get an error naming the
    /// account.
    #[instrument(skip(self))]
    pub async fn get_analytics(&self) -> eyre::Result<AnalyticsScreen> {
        let info = self.get_info().await?;
        let channel_id = info
            .channel_id
            .ok_or_else(|| eyre!("account `{}` has no channel to fetch analytics for", info.name))?;
        self.get_channel_analytics(&channel_id).await
    }

    /// Gets basic analytics for a specific channel by id.
    ///
    /// The analytics screen only answers when the browse request carries a
    /// params blob naming the channel, so one is encoded here. The located
    /// section list is returned unparsed for the caller to interpret.
    #[instrument(skip(self))]
    pub async fn get_channel_analytics(&self, channel_id: &str) -> eyre::Result<AnalyticsScreen> {
        let params = encode_channel_analytics_params(channel_id);
        let response = self
            .actions
            .browse("FEanalytics_screen", ClientType::Android, Some(&params))
            .await?;

        let sections = analytics_sections(&response.data)?;
        tracing::debug!(channel_id, "fetched analytics screen");

        Ok(AnalyticsScreen {
            channel_id: channel_id.to_owned(),
            sections,
        })
    }

    /// Renames the current account's channel.
    #[instrument(skip(self))]
    pub async fn edit_channel_name(&self, new_name: &str) -> eyre::Result<ApiResponse> {
        let response = self
            .actions
            .execute(
                "channel/edit_name",
                ClientType::Android,
                json!({ "givenName": new_name }),
            )
            .await?;

        tracing::debug!("updated channel name");
        Ok(response)
    }

    /// Replaces the current account's channel description.
    #[instrument(skip(self, new_description))]
    pub async fn edit_channel_description(
        &self,
        new_description: &str,
    ) -> eyre::Result<ApiResponse> {
        let response = self
            .actions
            .execute(
                "channel/edit_description",
                ClientType::Android,
                json!({ "description": new_description }),
            )
            .await?;

        tracing::debug!("updated channel description");
        Ok(response)
    }

    /// Turns a notification preference on or off.
    ///
    /// # Arguments
    ///
    /// * `setting` - Which [`NotificationSetting`] switch to flip
    /// * `enabled` - Whether the notification should be delivered
    #[instrument(skip(self))]
    pub async fn update_notification_setting(
        &self,
        setting: NotificationSetting,
        enabled: bool,
    ) -> eyre::Result<ApiResponse> {
        self.update_switch(
            SettingsPage::Notifications,
            &setting.to_string(),
            setting.item_id(),
            enabled,
        )
        .await
    }

    /// Makes part of the account's profile private or public again.
    ///
    /// The privacy page phrases its switches as "keep private" but stores
    /// them as visibility, so the wire value is the negation of `private`.
    ///
    /// # Arguments
    ///
    /// * `setting` - Which [`PrivacySetting`] switch to flip
    /// * `private` - `true` to hide, `false` to make visible
    #[instrument(skip(self))]
    pub async fn update_privacy_setting(
        &self,
        setting: PrivacySetting,
        private: bool,
    ) -> eyre::Result<ApiResponse> {
        self.update_switch(
            SettingsPage::Privacy,
            &setting.to_string(),
            setting.item_id(),
            private,
        )
        .await
    }

    /// Flips a settings switch through the two-step settings flow.
    ///
    /// Fetches the settings page to map the client-visible id onto the
    /// opaque id the mutation endpoint wants, then sends the mutation with
    /// the page's wire rendering of `value`. The page must be fetched as
    /// the web client; the android rendering of these pages does not
    /// include the mutation endpoints.
    async fn update_switch(
        &self,
        page: SettingsPage,
        label: &str,
        item_id: &str,
        value: bool,
    ) -> eyre::Result<ApiResponse> {
        let page_response = self
            .actions
            .browse(page.browse_id(), ClientType::Web, None)
            .await?;

        let options = page.switch_options(&page_response.data)?;
        let setting_item_id = opaque_item_id(options, item_id).ok_or_else(|| {
            eyre!(
                "the `{}` switch (id {}) is not present on the {} page",
                label,
                item_id,
                page.browse_id()
            )
        })?;

        let response = self
            .actions
            .execute(
                "account/set_setting",
                ClientType::Android,
                set_setting_payload(setting_item_id, page.wire_value(value)),
            )
            .await?;

        tracing::debug!(label, item_id, value, "updated settings switch");
        Ok(response)
    }
}

/// Picks the account the response marks as selected, or the first one.
fn pick_current(mut accounts: Vec<AccountInfo>) -> eyre::Result<AccountInfo> {
    if accounts.is_empty() {
        bail!("no accounts in the accounts list response; is the session signed in?");
    }
    let selected = accounts
        .iter()
        .position(|account| account.is_selected)
        .unwrap_or(0);
    Ok(accounts.swap_remove(selected))
}

/// Projects every account item out of an accounts list response.
fn account_items(data: &Value) -> Vec<AccountInfo> {
    collect_nodes(data, "contents", "accountItem", 8)
        .into_iter()
        .filter_map(|wrapper| {
            let item = wrapper.get("accountItem")?;
            let parsed = parse_account_item(item);
            if parsed.is_none() {
                tracing::debug!("skipping account item with no readable name");
            }
            parsed
        })
        .collect()
}

fn parse_account_item(item: &Value) -> Option<AccountInfo> {
    let name = item.get("accountName").and_then(text_of)?;

    // the handle lives under channelHandle on newer payloads and doubles
    // as the byline on older ones
    let channel_handle = item
        .get("channelHandle")
        .and_then(text_of)
        .or_else(|| {
            item.get("accountByline")
                .and_then(text_of)
                .filter(|byline| byline.starts_with('@'))
        });

    let photo: Vec<Thumbnail> = item
        .pointer("/accountPhoto/thumbnails")
        .and_then(|thumbnails| serde_json::from_value(thumbnails.clone()).ok())
        .unwrap_or_default();

    Some(AccountInfo {
        name,
        channel_handle,
        channel_id: channel_id_of(item),
        photo,
        is_selected: flag(item, "isSelected"),
        has_channel: flag(item, "hasChannel"),
        is_disabled: flag(item, "isDisabled"),
    })
}

fn flag(item: &Value, key: &str) -> bool {
    item.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Digs the channel id out of an account item's service endpoint.
///
/// The endpoints attached to an account item navigate to various browse
/// targets; the channel id is the one browse id with the `UC` channel
/// prefix. Accounts without a channel have no such endpoint.
fn channel_id_of(item: &Value) -> Option<String> {
    collect_nodes(item, "serviceEndpoint", "browseId", 6)
        .into_iter()
        .filter_map(|node| node.get("browseId").and_then(Value::as_str))
        .find(|id| id.len() == 24 && id.starts_with("UC"))
        .map(str::to_owned)
}

fn stat_rows(data: &Value) -> Vec<TimeWatchedStat> {
    collect_nodes(data, "contents", "statRowRenderer", 11)
        .into_iter()
        .filter_map(|wrapper| {
            let row = wrapper.get("statRowRenderer")?;
            let title = text_of(row.get("title")?)?;
            let value = text_of(row.get("contents")?)?;
            Some(TimeWatchedStat { title, value })
        })
        .collect()
}

fn analytics_sections(data: &Value) -> eyre::Result<Value> {
    let node = require_node(data, "contents", "sectionListRenderer", 10)?;
    Ok(node["sectionListRenderer"].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn accounts_list_response() -> Value {
        json!({
            "responseContext": { "visitorData": "CgtVbzEyMzQ1Njc4OQ" },
            "contents": [
                {
                    "accountSectionListRenderer": {
                        "contents": [
                            {
                                "accountItemSectionRenderer": {
                                    "contents": [
                                        {
                                            "accountItem": {
                                                "accountName": { "simpleText": "Main Account" },
                                                "accountPhoto": {
                                                    "thumbnails": [
                                                        {
                                                            "url": "https://yt3.ggpht.com/a/main=s88",
                                                            "width": 88,
                                                            "height": 88
                                                        }
                                                    ]
                                                },
                                                "isSelected": false,
                                                "isDisabled": false,
                                                "hasChannel": false,
                                                "accountByline": { "simpleText": "main@example.com" },
                                                "serviceEndpoint": {
                                                    "selectActiveIdentityEndpoint": {
                                                        "supportedTokens": [
                                                            { "offlineCacheKeyToken": { "clientCacheKey": "abc" } }
                                                        ]
                                                    }
                                                }
                                            }
                                        },
                                        {
                                            "accountItem": {
                                                "accountName": { "simpleText": "Brand Channel" },
                                                "accountPhoto": {
                                                    "thumbnails": [
                                                        { "url": "https://yt3.ggpht.com/a/brand=s88" }
                                                    ]
                                                },
                                                "isSelected": true,
                                                "hasChannel": true,
                                                "accountByline": { "simpleText": "@brandchannel" },
                                                "serviceEndpoint": {
                                                    "signInEndpoint": {
                                                        "nextEndpoint": {
                                                            "browseEndpoint": {
                                                                "browseId": "UC1234567890abcdefghijkl"
                                                            }
                                                        }
                                                    }
                                                }
                                            }
                                        }
                                    ]
                                }
                            }
                        ]
                    }
                }
            ]
        })
    }

    fn time_watched_response() -> Value {
        json!({
            "contents": {
                "singleColumnBrowseResultsRenderer": {
                    "tabs": [
                        {
                            "tabRenderer": {
                                "content": {
                                    "sectionListRenderer": {
                                        "contents": [
                                            {
                                                "itemSectionRenderer": {
                                                    "contents": [
                                                        {
                                                            "statRowRenderer": {
                                                                "title": { "runs": [ { "text": "Today" } ] },
                                                                "contents": { "simpleText": "1 hour, 20 minutes" }
                                                            }
                                                        },
                                                        { "dividerRenderer": {} },
                                                        {
                                                            "statRowRenderer": {
                                                                "title": { "simpleText": "Daily average" },
                                                                "contents": { "simpleText": "45 minutes" }
                                                            }
                                                        },
                                                        {
                                                            "statRowRenderer": {
                                                                "title": { "simpleText": "missing its value" }
                                                            }
                                                        }
                                                    ]
                                                }
                                            }
                                        ]
                                    }
                                }
                            }
                        }
                    ]
                }
            }
        })
    }

    #[test]
    fn account_items_projects_each_listed_account() {
        let response = accounts_list_response();
        let accounts = account_items(&response);
        assert_eq!(accounts.len(), 2);

        let main = &accounts[0];
        assert_eq!(main.name, "Main Account");
        // an email byline is not a handle
        assert_eq!(main.channel_handle, None);
        assert_eq!(main.channel_id, None);
        assert!(!main.has_channel);
        assert!(!main.is_selected);
        assert_eq!(main.photo.len(), 1);
        assert_eq!(main.photo[0].url, "https://yt3.ggpht.com/a/main=s88");
        assert_eq!(main.photo[0].width, Some(88));

        let brand = &accounts[1];
        assert_eq!(brand.name, "Brand Channel");
        assert_eq!(brand.channel_handle.as_deref(), Some("@brandchannel"));
        assert_eq!(
            brand.channel_id.as_deref(),
            Some("UC1234567890abcdefghijkl")
        );
        assert!(brand.is_selected);
        assert!(brand.has_channel);
        // width/height absent on this thumbnail
        assert_eq!(brand.photo[0].width, None);
    }

    #[test]
    fn nameless_account_items_are_skipped() {
        let response = json!({
            "contents": [
                { "accountItem": { "isSelected": true } },
                { "accountItem": { "accountName": { "simpleText": "Named" } } }
            ]
        });

        let accounts = account_items(&response);
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].name, "Named");
    }

    #[test]
    fn pick_current_prefers_the_selected_account() {
        let accounts = account_items(&accounts_list_response());
        let current = pick_current(accounts).unwrap();
        assert_eq!(current.name, "Brand Channel");
    }

    #[test]
    fn pick_current_falls_back_to_the_first_account() {
        let mut accounts = account_items(&accounts_list_response());
        for account in &mut accounts {
            account.is_selected = false;
        }
        let current = pick_current(accounts).unwrap();
        assert_eq!(current.name, "Main Account");
    }

    #[test]
    fn pick_current_rejects_an_empty_list() {
        let err = pick_current(Vec::new()).unwrap_err();
        assert!(err.to_string().contains("no accounts"), "{err}");
    }

    #[test]
    fn stat_rows_skip_other_renderers_and_broken_rows() {
        let response = time_watched_response();
        let stats = stat_rows(&response);

        assert_eq!(
            stats,
            vec![
                TimeWatchedStat {
                    title: "Today".to_string(),
                    value: "1 hour, 20 minutes".to_string(),
                },
                TimeWatchedStat {
                    title: "Daily average".to_string(),
                    value: "45 minutes".to_string(),
                },
            ]
        );
    }

    #[test]
    fn channel_id_requires_the_channel_prefix() {
        let item = json!({
            "serviceEndpoint": {
                "browseEndpoint": { "browseId": "FEaccount_settings" }
            }
        });
        assert_eq!(channel_id_of(&item), None);

        let item = json!({
            "serviceEndpoint": {
                "browseEndpoint": { "browseId": "UC1234567890abcdefghijkl" }
            }
        });
        assert_eq!(
            channel_id_of(&item).as_deref(),
            Some("UC1234567890abcdefghijkl")
        );
    }

    #[test]
    fn analytics_sections_are_located_and_detached() {
        let response = json!({
            "contents": {
                "singleColumnBrowseResultsRenderer": {
                    "tabs": [
                        {
                            "tabRenderer": {
                                "content": {
                                    "sectionListRenderer": {
                                        "contents": [ { "analyticsMainAppKeyMetricsRenderer": {} } ]
                                    }
                                }
                            }
                        }
                    ]
                }
            }
        });

        let sections = analytics_sections(&response).unwrap();
        assert!(sections.get("contents").is_some());
    }

    #[test]
    fn missing_analytics_sections_are_an_error() {
        let err = analytics_sections(&json!({ "contents": {} })).unwrap_err();
        assert!(err.to_string().contains("sectionListRenderer"), "{err}");
    }
}
