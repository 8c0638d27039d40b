//! Shared response projections for the innertube account client.
//!
//! Innertube responses are large, loosely structured renderer trees whose
//! exact shape changes between payload versions. Nothing here models a full
//! response; each type holds only the fields the client actually projects
//! out, and documents which loose fields they came from.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of a single innertube call.
///
/// The dispatcher validates the HTTP status before constructing this, so
/// `data` always holds a decoded JSON body. Mutation endpoints return this
/// raw form directly since their bodies are undocumented and uninteresting;
/// query endpoints project typed values out of `data` instead.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status of the innertube call (always a success status).
    pub status: StatusCode,
    /// The decoded response body, left untyped.
    pub data: Value,
}

/// A single image variant from an innertube `thumbnails` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    /// Pixel dimensions; some renderer variants omit them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// One signed-in account as presented by `account/accounts_list`.
///
/// Projected from an `accountItem` renderer: the display name and photo come
/// straight off the item, the channel handle from its `channelHandle` text,
/// and the channel id from the browse id of the item's select endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountInfo {
    /// The account's display name.
    pub name: String,
    /// The `@handle` of the account's channel, when it has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_handle: Option<String>,
    /// The `UC...` channel id, when the response carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    /// Avatar variants, smallest first as served.
    pub photo: Vec<Thumbnail>,
    /// Whether this is the identity the session currently acts as.
    pub is_selected: bool,
    /// Whether the account has created a channel.
    pub has_channel: bool,
    /// Set for accounts the server refuses to switch to.
    pub is_disabled: bool,
}

/// One row of the watch-time stats page (`SPtime_watched`).
///
/// The page is a list of `statRowRenderer`s, each a label/value text pair
/// such as "Daily average" / "1 hour, 12 minutes". Values are display
/// strings in the session locale; the server offers no numeric form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWatchedStat {
    /// Row label, e.g. "Today" or "Daily average".
    pub title: String,
    /// Localized, preformatted stat text.
    pub value: String,
}

/// The located-but-unparsed analytics screen for a channel.
///
/// `FEanalytics_screen` responses are handed downstream whole: the section
/// list subtree is located here, while interpreting the cards inside it is
/// the analytics parser's job, not this client's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsScreen {
    /// The channel the params blob was encoded for.
    pub channel_id: String,
    /// The screen's section list, exactly as returned.
    pub sections: Value,
}

impl AnalyticsScreen {
    /// Consumes the screen, yielding the raw section list.
    pub fn into_sections(self) -> Value {
        self.sections
    }
}
