use reqwest::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE},
    Client, Method,
};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;

pub const PROFILES_PATH: &str = "api/profiles/";
pub const EVENTS_PATH: &str = "api/events/";
pub const REVISION_HEADER: &str = "revision";

/// Upstream error text that marks a duplicate profile.
const ALREADY_EXISTS: &str = "already exists";

/// Adapter for the marketing-automation REST API.
///
/// Every call opens its own connection (the pool keeps no idle connections),
/// there are no retries and no client side timeout.
#[derive(Debug, Clone)]
pub struct MarketingClient {
    http_client: Client,
    base_url: reqwest::Url,
    revision: String,
}

impl MarketingClient {
    pub fn new<S: AsRef<str>>(base_url: S, revision: impl Into<String>) -> Result<Self> {
        let base_url =
            reqwest::Url::parse(base_url.as_ref()).map_err(|e| Error::UrlParsing(e.to_string()))?;

        let http_client = Client::builder().pool_max_idle_per_host(0).build()?;

        Ok(MarketingClient {
            http_client,
            base_url,
            revision: revision.into(),
        })
    }

    /// Sends one JSON request and folds every outcome into a `RemoteCallResult`.
    /// Nothing escapes this boundary as a panic, transport and parsing failures are `Err` values.
    pub async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        api_key: &SecretString,
    ) -> RemoteCallResult
    where
        B: Serialize + ?Sized,
    {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| RemoteError::Url(e.to_string()))?;
        let payload = serde_json::to_vec(body).map_err(RemoteError::Serialize)?;

        let resp = self
            .http_client
            .request(method, url)
            .header(
                AUTHORIZATION,
                format!("Klaviyo-API-Key {}", api_key.expose_secret()),
            )
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(CONTENT_LENGTH, payload.len())
            .header(REVISION_HEADER, &self.revision)
            .body(payload)
            .send()
            .await
            .map_err(RemoteError::Transport)?;

        let status = resp.status();
        let status_code = status.as_u16();
        // Buffer the whole body before looking at it.
        let raw_body = resp.bytes().await.map_err(RemoteError::Transport)?;

        if !status.is_success() {
            let detail =
                first_error_detail(&raw_body).unwrap_or_else(|| format!("HTTP {status_code}"));
            return Err(RemoteError::Upstream {
                status_code,
                detail,
            });
        }

        let data = if raw_body.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(&raw_body)
                .map_err(|source| RemoteError::MalformedBody {
                    status_code,
                    source,
                })?
        };

        Ok(RemoteResponse { status_code, data })
    }

    /// Creates the profile, the response carries the new profile id.
    pub async fn upsert_profile<P>(
        &self,
        api_key: &SecretString,
        email: &str,
        properties: &P,
    ) -> RemoteCallResult
    where
        P: Serialize,
    {
        let document = ProfileDocument {
            data: ProfileData {
                kind: "profile",
                attributes: ProfileAttributes { email, properties },
            },
        };

        self.send(Method::POST, PROFILES_PATH, &document, api_key)
            .await
    }

    pub async fn add_profile_to_list(
        &self,
        api_key: &SecretString,
        list_id: &str,
        profile_id: &str,
    ) -> RemoteCallResult {
        let path = format!("api/lists/{list_id}/relationships/profiles/");
        let document = RelationshipDocument {
            data: [ResourceIdentifier {
                kind: "profile",
                id: profile_id,
            }],
        };

        self.send(Method::POST, &path, &document, api_key).await
    }

    pub async fn track_event<P>(
        &self,
        api_key: &SecretString,
        email: &str,
        metric_name: &str,
        properties: &P,
        time: &str,
    ) -> RemoteCallResult
    where
        P: Serialize,
    {
        let document = EventDocument {
            data: EventData {
                kind: "event",
                attributes: EventAttributes {
                    properties,
                    time,
                    metric: Nested {
                        data: MetricData {
                            kind: "metric",
                            attributes: MetricAttributes { name: metric_name },
                        },
                    },
                    profile: Nested {
                        data: EventProfileData {
                            kind: "profile",
                            attributes: EventProfileAttributes { email },
                        },
                    },
                },
            },
        };

        self.send(Method::POST, EVENTS_PATH, &document, api_key)
            .await
    }
}

// ###################################
// ->   RESULT ENVELOPE
// ###################################
/// The outcome of a single remote call. Callers only branch on `Ok`/`Err`.
pub type RemoteCallResult = core::result::Result<RemoteResponse, RemoteError>;

#[derive(Debug, Clone)]
pub struct RemoteResponse {
    pub status_code: u16,
    pub data: Value,
}

impl RemoteResponse {
    /// The `data.id` of a JSON:API document, e.g. the id of a created profile.
    pub fn resource_id(&self) -> Option<&str> {
        self.data.get("data")?.get("id")?.as_str()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("{detail}")]
    Upstream { status_code: u16, detail: String },
    #[error("malformed response body (HTTP {status_code}): {source}")]
    MalformedBody {
        status_code: u16,
        #[source]
        source: serde_json::Error,
    },
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("invalid request url: {0}")]
    Url(String),
    #[error("failed to serialize the request body: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl RemoteError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RemoteError::Upstream { status_code, .. }
            | RemoteError::MalformedBody { status_code, .. } => Some(*status_code),
            RemoteError::Transport(er) => er.status().map(|s| s.as_u16()),
            RemoteError::Url(_) | RemoteError::Serialize(_) => None,
        }
    }

    /// Matches on the upstream wording, so it breaks if the API rephrases the message.
    pub fn is_already_exists(&self) -> bool {
        self.to_string().contains(ALREADY_EXISTS)
    }
}

fn first_error_detail(body: &[u8]) -> Option<String> {
    let body: Value = serde_json::from_slice(body).ok()?;
    body.get("errors")?
        .as_array()?
        .first()?
        .get("detail")?
        .as_str()
        .map(ToOwned::to_owned)
}

// ###################################
// ->   PAYLOADS
// ###################################
#[derive(Serialize)]
struct ProfileDocument<'a, P> {
    data: ProfileData<'a, P>,
}

#[derive(Serialize)]
struct ProfileData<'a, P> {
    #[serde(rename = "type")]
    kind: &'static str,
    attributes: ProfileAttributes<'a, P>,
}

#[derive(Serialize)]
struct ProfileAttributes<'a, P> {
    email: &'a str,
    properties: &'a P,
}

#[derive(Serialize)]
struct RelationshipDocument<'a> {
    data: [ResourceIdentifier<'a>; 1],
}

#[derive(Serialize)]
struct ResourceIdentifier<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    id: &'a str,
}

#[derive(Serialize)]
struct EventDocument<'a, P> {
    data: EventData<'a, P>,
}

#[derive(Serialize)]
struct EventData<'a, P> {
    #[serde(rename = "type")]
    kind: &'static str,
    attributes: EventAttributes<'a, P>,
}

#[derive(Serialize)]
struct EventAttributes<'a, P> {
    properties: &'a P,
    time: &'a str,
    metric: Nested<MetricData<'a>>,
    profile: Nested<EventProfileData<'a>>,
}

#[derive(Serialize)]
struct Nested<T> {
    data: T,
}

#[derive(Serialize)]
struct MetricData<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    attributes: MetricAttributes<'a>,
}

#[derive(Serialize)]
struct MetricAttributes<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct EventProfileData<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    attributes: EventProfileAttributes<'a>,
}

#[derive(Serialize)]
struct EventProfileAttributes<'a> {
    email: &'a str,
}

// ###################################
// ->   ERROR & RESULT
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, derive_more::From)]
pub enum Error {
    UrlParsing(String),
    #[from]
    Reqwest(reqwest::Error),
}
// Error Boilerplate
impl core::fmt::Display for Error {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
