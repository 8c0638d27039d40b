//! Account settings switches and the ids that address them.
//!
//! Innertube settings switches are toggled in two steps: the settings page
//! is fetched and scanned for the switch whose `itemId` matches a known
//! client-visible id, then the opaque `settingItemIdForClient` found on
//! that switch is sent to the mutation endpoint. The client-visible ids
//! are scoped to their page, which is why notification and privacy
//! settings are separate enums even though their id ranges overlap.

use std::fmt;

use eyre::eyre;
use serde_json::{Value, json};

use crate::nodes::find_node;

/// A settings screen reachable through the `browse` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SettingsPage {
    Notifications,
    Privacy,
}

impl SettingsPage {
    pub(crate) fn browse_id(self) -> &'static str {
        match self {
            SettingsPage::Notifications => "SPaccount_notifications",
            SettingsPage::Privacy => "SPaccount_privacy",
        }
    }

    /// Maps a caller-facing switch value onto the wire boolean.
    ///
    /// The privacy page phrases its switches as "keep private" but stores
    /// them as visibility, so its wire value is the negation; the
    /// notifications page stores what it shows.
    pub(crate) fn wire_value(self, value: bool) -> bool {
        match self {
            SettingsPage::Notifications => value,
            SettingsPage::Privacy => !value,
        }
    }

    /// Locates the switch option list on a fetched settings page.
    ///
    /// The two pages nest their options differently: the notifications page
    /// exposes an `options` array directly on a renderer, while the privacy
    /// page keeps its options inside a `privacyTabRenderer`.
    pub(crate) fn switch_options<'a>(self, data: &'a Value) -> eyre::Result<&'a [Value]> {
        let options = match self {
            SettingsPage::Notifications => {
                find_node(data, "contents", "options", 13).and_then(|node| node.get("options"))
            }
            SettingsPage::Privacy => find_node(data, "contents", "privacyTabRenderer", 11)
                .and_then(|node| node.pointer("/privacyTabRenderer/options")),
        };

        options
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .ok_or_else(|| eyre!("settings page {} has no switch options", self.browse_id()))
    }
}

/// Notification preferences for the signed-in account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationSetting {
    /// Activity from subscribed channels.
    Subscriptions,
    /// Recommended content and activity.
    RecommendedVideos,
    /// Activity on the account's own channel.
    ChannelActivity,
    /// Replies to the account's comments.
    CommentReplies,
    /// Mentions of the account's channel.
    Mentions,
    /// Shares of the account's content on other channels.
    SharedContent,
}

impl NotificationSetting {
    /// The client-visible id the settings page uses for this switch.
    pub(crate) fn item_id(self) -> &'static str {
        match self {
            NotificationSetting::Subscriptions => "3",
            NotificationSetting::ChannelActivity => "5",
            NotificationSetting::CommentReplies => "7",
            NotificationSetting::Mentions => "8",
            NotificationSetting::SharedContent => "9",
            NotificationSetting::RecommendedVideos => "12",
        }
    }
}

impl fmt::Display for NotificationSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationSetting::Subscriptions => write!(f, "subscriptions"),
            NotificationSetting::RecommendedVideos => write!(f, "recommended videos"),
            NotificationSetting::ChannelActivity => write!(f, "channel activity"),
            NotificationSetting::CommentReplies => write!(f, "comment replies"),
            NotificationSetting::Mentions => write!(f, "mentions"),
            NotificationSetting::SharedContent => write!(f, "shared content"),
        }
    }
}

/// Privacy switches for the signed-in account.
///
/// Both switches are phrased here as "make private", matching how the
/// settings page presents them. The wire value is inverted relative to
/// that phrasing; the flip is applied when the mutation payload is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivacySetting {
    /// Hide saved playlists from the channel page.
    SavedPlaylistsPrivate,
    /// Hide subscriptions from other users.
    SubscriptionsPrivate,
}

impl PrivacySetting {
    /// The client-visible id the settings page uses for this switch.
    pub(crate) fn item_id(self) -> &'static str {
        match self {
            PrivacySetting::SavedPlaylistsPrivate => "8",
            PrivacySetting::SubscriptionsPrivate => "9",
        }
    }
}

impl fmt::Display for PrivacySetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrivacySetting::SavedPlaylistsPrivate => write!(f, "saved playlists private"),
            PrivacySetting::SubscriptionsPrivate => write!(f, "subscriptions private"),
        }
    }
}

/// Finds the opaque mutation id for the switch with the given client id.
///
/// Scans the option list for a `settingBooleanRenderer` whose `itemId`
/// matches, then reads the `settingItemIdForClient` off its mutation
/// endpoint. The returned value is passed through to the mutation verbatim
/// since its type is the server's business.
pub(crate) fn opaque_item_id<'a>(options: &'a [Value], item_id: &str) -> Option<&'a Value> {
    options.iter().find_map(|option| {
        let renderer = option.get("settingBooleanRenderer")?;
        if !item_id_matches(renderer.get("itemId")?, item_id) {
            return None;
        }
        renderer.pointer("/setSettingEndpoint/settingItemIdForClient")
    })
}

/// Compares a switch's `itemId` against a client id, tolerating the
/// payload carrying it as either a string or a number.
fn item_id_matches(value: &Value, wanted: &str) -> bool {
    match value {
        Value::String(s) => s == wanted,
        Value::Number(n) => n.to_string() == wanted,
        _ => false,
    }
}

/// Builds the `account/set_setting` payload for a resolved switch.
///
/// `setting_item_id` is echoed verbatim; `value` must already be the
/// page's wire value (see [`SettingsPage::wire_value`]).
pub(crate) fn set_setting_payload(setting_item_id: &Value, value: bool) -> Value {
    json!({
        "settingItemId": setting_item_id,
        "boolValue": value,
    })
}
