//! Request dispatch to the innertube API.
//!
//! Every operation in this crate funnels through [`Actions::execute`], which
//! owns the request shape innertube expects: a POST to
//! `youtubei/v1/<endpoint>` whose JSON body carries a `context` object
//! describing the calling client alongside the endpoint-specific fields.
//! Session credentials are injected as ready-to-send header values; this
//! module does not mint or refresh them.

use eyre::{Context, bail};
use serde_json::Value;
use tracing::instrument;

use crate::types::ApiResponse;

const INNERTUBE_BASE: &str = "https://www.youtube.com/youtubei/v1";
const ORIGIN: &str = "https://www.youtube.com";

/// Which innertube client a request identifies itself as.
///
/// The server shapes its response to the client it believes it is talking
/// to. Account pages render their full settings tree only for
/// [`ClientType::Web`], while the account list and several mutation
/// endpoints are only reliable on [`ClientType::Android`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientType {
    Web,
    Android,
}

impl ClientType {
    fn name(self) -> &'static str {
        match self {
            ClientType::Web => "WEB",
            ClientType::Android => "ANDROID",
        }
    }

    fn version(self) -> &'static str {
        match self {
            ClientType::Web => "2.20240808.00.00",
            ClientType::Android => "19.35.36",
        }
    }

    fn android_sdk_version(self) -> Option<u32> {
        match self {
            ClientType::Web => None,
            ClientType::Android => Some(30),
        }
    }

    fn user_agent(self) -> &'static str {
        match self {
            ClientType::Web => {
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/127.0.0.0 Safari/537.36"
            }
            ClientType::Android => {
                "com.google.android.youtube/19.35.36 (Linux; U; Android 11) gzip"
            }
        }
    }
}

/// Credentials and locale for an innertube session.
///
/// The `authorization` and `cookie` values are sent verbatim as the
/// `Authorization` and `Cookie` headers; producing them (OAuth exchange,
/// SAPISID hashing) is the caller's concern. `visitor_data` is the opaque
/// visitor token YouTube hands out to tie requests together; when present
/// it is sent both as a header and inside the client context.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub authorization: Option<String>,
    #[serde(default)]
    pub cookie: Option<String>,
    #[serde(default)]
    pub visitor_data: Option<String>,
    /// Interface language, e.g. `en`.
    #[serde(default = "default_hl")]
    pub hl: String,
    /// Geolocation used for region-dependent responses, e.g. `US`.
    #[serde(default = "default_gl")]
    pub gl: String,
}

fn default_hl() -> String {
    "en".to_string()
}

fn default_gl() -> String {
    "US".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            authorization: None,
            cookie: None,
            visitor_data: None,
            hl: default_hl(),
            gl: default_gl(),
        }
    }
}

/// Dispatcher for innertube API requests.
///
/// Holds the HTTP client and session credentials shared by every API
/// surface in this crate. Cloning is cheap and clones share the underlying
/// connection pool.
#[derive(Debug, Clone)]
pub struct Actions {
    /// HTTP client for API requests
    client: reqwest::Client,
    session: SessionConfig,
}

impl Actions {
    /// Creates a dispatcher from a shared HTTP client and session credentials.
    pub fn new(client: reqwest::Client, session: SessionConfig) -> Self {
        Self { client, session }
    }

    /// Returns the session configuration this dispatcher sends with.
    pub fn session(&self) -> &SessionConfig {
        &self.session
    }

    /// Sends a request to an innertube endpoint and returns the raw response.
    ///
    /// `payload` must be a JSON object; its fields are laid alongside the
    /// generated `context` at the top level of the request body. The
    /// response body is returned unparsed because innertube responses have
    /// no stable schema; callers project out what they need.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Path below `youtubei/v1`, e.g. `browse` or
    ///   `account/set_setting`
    /// * `client` - Which [`ClientType`] to identify as
    /// * `payload` - Endpoint-specific body fields
    ///
    /// # Returns
    ///
    /// The [`ApiResponse`] for any 2xx status, or an error carrying the
    /// status and response text otherwise.
    #[instrument(skip(self, payload), level = tracing::Level::DEBUG)]
    pub async fn execute(
        &self,
        endpoint: &str,
        client: ClientType,
        payload: Value,
    ) -> eyre::Result<ApiResponse> {
        let fields = match payload {
            Value::Object(fields) => fields,
            other => bail!(
                "innertube payload for `{}` must be a JSON object, got {}",
                endpoint,
                json_kind(&other)
            ),
        };

        let url = format!("{INNERTUBE_BASE}/{endpoint}");
        let body = self.request_body(client, fields)?;

        let mut request = self
            .client
            .post(&url)
            .header("X-Origin", ORIGIN)
            .header("User-Agent", client.user_agent())
            .json(&body);

        if let Some(ref authorization) = self.session.authorization {
            request = request.header("Authorization", authorization);
        }
        if let Some(ref cookie) = self.session.cookie {
            request = request.header("Cookie", cookie);
        }
        if let Some(ref visitor_data) = self.session.visitor_data {
            request = request.header("X-Goog-Visitor-Id", visitor_data);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("send innertube request to {}", url))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(eyre::eyre!(
                "innertube {} request failed with status {}: {}",
                endpoint,
                status,
                error_text
            ));
        }

        let data = response
            .json()
            .await
            .context("parse innertube response as JSON")?;

        tracing::debug!(endpoint, status = %status, "innertube request succeeded");

        Ok(ApiResponse { status, data })
    }

    /// Fetches a browse page such as a settings or analytics screen.
    ///
    /// Thin wrapper over [`Self::execute`] for the `browse` endpoint, which
    /// nearly every read in this crate goes through.
    pub async fn browse(
        &self,
        browse_id: &str,
        client: ClientType,
        params: Option<&str>,
    ) -> eyre::Result<ApiResponse> {
        let mut payload = serde_json::json!({ "browseId": browse_id });
        if let Some(params) = params {
            payload["params"] = Value::String(params.to_owned());
        }
        self.execute("browse", client, payload).await
    }

    fn request_body(
        &self,
        client: ClientType,
        fields: serde_json::Map<String, Value>,
    ) -> eyre::Result<Value> {
        let context = wire::Context {
            client: wire::Client {
                client_name: client.name(),
                client_version: client.version(),
                android_sdk_version: client.android_sdk_version(),
                visitor_data: self.session.visitor_data.as_deref(),
                hl: &self.session.hl,
                gl: &self.session.gl,
            },
        };

        let mut body = serde_json::Map::new();
        body.insert(
            "context".to_string(),
            serde_json::to_value(context).context("serialize innertube context")?,
        );
        body.extend(fields);
        Ok(Value::Object(body))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

mod wire {
    use serde::Serialize;
    use serde_with::skip_serializing_none;

    #[derive(Serialize, Clone)]
    pub struct Context<'a> {
        pub client: Client<'a>,
    }

    #[skip_serializing_none]
    #[derive(Serialize, Clone)]
    pub struct Client<'a> {
        #[serde(rename = "clientName")]
        pub client_name: &'static str,
        #[serde(rename = "clientVersion")]
        pub client_version: &'static str,
        #[serde(rename = "androidSdkVersion")]
        pub android_sdk_version: Option<u32>,
        #[serde(rename = "visitorData")]
        pub visitor_data: Option<&'a str>,
        pub hl: &'a str,
        pub gl: &'a str,
    }
}
