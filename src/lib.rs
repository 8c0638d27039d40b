//! Client for YouTube's private "innertube" account endpoints.
//!
//! YouTube's own apps talk to an undocumented JSON API. This crate wraps the
//! account-management corner of it: profile info, the account list,
//! watch-time stats, basic channel analytics, and the notification and
//! privacy settings switches.
//!
//! # Working with innertube responses
//!
//! Innertube has no published schema. Responses are deeply nested renderer
//! trees whose wrapping shifts between payload versions, so this crate types
//! only what it projects out ([`AccountInfo`], [`TimeWatchedStat`], ...) and
//! locates fields by searching for the keys that carry them rather than by
//! fixed paths. The search primitives ([`find_node`] and friends) are public
//! because callers poking at unprojected corners of a response need them
//! too.
//!
//! Requests go through an [`Actions`] dispatcher holding the HTTP client and
//! session credentials. Obtaining credentials is out of scope: the session
//! is configured with ready-to-send `Authorization`/`Cookie` header values.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use yt_account::{AccountManager, Actions, SessionConfig};
//!
//! # async fn example() -> eyre::Result<()> {
//! let session = SessionConfig {
//!     cookie: Some("SAPISID=...; __Secure-3PAPISID=...".to_string()),
//!     ..SessionConfig::default()
//! };
//! let actions = Arc::new(Actions::new(reqwest::Client::new(), session));
//! let account = AccountManager::new(actions);
//!
//! let info = account.get_info().await?;
//! println!("signed in as {} ({:?})", info.name, info.channel_handle);
//!
//! for stat in account.get_time_watched().await? {
//!     println!("{}: {}", stat.title, stat.value);
//! }
//! # Ok(())
//! # }
//! ```

pub mod account;
pub mod actions;
pub mod nodes;
pub mod proto;
pub mod settings;
pub mod types;

// Re-export the main entry points for convenience
pub use account::AccountManager;
pub use actions::{Actions, ClientType, SessionConfig};

// Re-export commonly used types from each module
pub use nodes::{collect_nodes, find_node, require_node, text_of};
pub use settings::{NotificationSetting, PrivacySetting};
pub use types::{AccountInfo, AnalyticsScreen, ApiResponse, Thumbnail, TimeWatchedStat};
