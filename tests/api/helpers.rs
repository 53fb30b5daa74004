//! Spawns the service on a random port with the marketing API replaced by a `MockServer`.
use std::{net::SocketAddr, sync::OnceLock};

use alertomat::{
    config::{AppConfig, Environment, MarketingConfig, NetConfig},
    init_dbg_tracing, App,
};
use anyhow::Result;
use reqwest::Response;
use secrecy::SecretString;
use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path, path_regex},
    Mock, MockServer, ResponseTemplate,
};

pub const TEST_LIST_ID: &str = "TestList";
pub const TEST_PROFILE_ID: &str = "01TESTPROFILE";

pub struct TestApp {
    pub addr: SocketAddr,
    pub http_client: reqwest::Client,
    pub marketing_server: MockServer,
}

fn _init_test_subscriber() {
    static SUBSCRIBER: OnceLock<()> = OnceLock::new();
    SUBSCRIBER.get_or_init(|| {
        init_dbg_tracing();
    });
}

/// Configuration pointing at the mock server. Port 0 lets the OS pick a free port.
fn test_config(marketing_server: &MockServer) -> AppConfig {
    AppConfig {
        environment: Environment::Local,
        net_config: NetConfig {
            host: [127, 0, 0, 1],
            app_port: 0,
        },
        marketing_config: MarketingConfig {
            base_url: marketing_server.uri(),
            revision: "2024-10-15".into(),
            api_key: Some(SecretString::from("pk_test_key")),
            list_id: Some(TEST_LIST_ID.into()),
        },
    }
}

impl TestApp {
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(|_| {}).await
    }

    /// Spawns the app after letting the caller tweak the configuration.
    pub async fn spawn_with<F>(configure: F) -> Result<Self>
    where
        F: FnOnce(&mut AppConfig),
    {
        // _init_test_subscriber();

        let marketing_server = MockServer::start().await;
        let mut config = test_config(&marketing_server);
        configure(&mut config);

        let app = App::build_from_config(config).await?;
        let addr = app.local_addr()?;

        tokio::spawn(alertomat::serve(app));

        Ok(TestApp {
            addr,
            http_client: reqwest::Client::new(),
            marketing_server,
        })
    }

    pub async fn post_json(&self, endpoint: &str, body: &Value) -> Result<Response> {
        let res = self
            .http_client
            .post(format!("http://{}/api/{endpoint}", self.addr))
            .json(body)
            .send()
            .await?;
        Ok(res)
    }

    pub async fn post_raw(&self, endpoint: &str, body: &'static str) -> Result<Response> {
        let res = self
            .http_client
            .post(format!("http://{}/api/{endpoint}", self.addr))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?;
        Ok(res)
    }

    pub async fn request(&self, method: reqwest::Method, endpoint: &str) -> Result<Response> {
        let res = self
            .http_client
            .request(method, format!("http://{}/api/{endpoint}", self.addr))
            .send()
            .await?;
        Ok(res)
    }

    /// Sends a preflight with an arbitrary body. The body is never looked at.
    pub async fn preflight_with_body(
        &self,
        endpoint: &str,
        body: &'static str,
    ) -> Result<Response> {
        let res = self
            .http_client
            .request(
                reqwest::Method::OPTIONS,
                format!("http://{}/api/{endpoint}", self.addr),
            )
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?;
        Ok(res)
    }

    /// Mounts a successful marketing API: profile created, list attach and events accepted.
    pub async fn mount_happy_marketing_api(&self) {
        mount_profile_created(&self.marketing_server).await;
        Mock::given(method("POST"))
            .and(path_regex(r"^/api/lists/[^/]+/relationships/profiles/$"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&self.marketing_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/events/"))
            .respond_with(ResponseTemplate::new(202))
            .mount(&self.marketing_server)
            .await;
    }

    /// Requests the marketing server received, grouped by path.
    pub async fn received_paths(&self) -> Vec<String> {
        self.marketing_server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|req| req.url.path().to_string())
            .collect()
    }
}

pub async fn mount_profile_created(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/profiles/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": { "type": "profile", "id": TEST_PROFILE_ID }
        })))
        .mount(server)
        .await;
}

pub fn upstream_error(status: u16, detail: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "errors": [{ "status": status, "detail": detail }]
    }))
}

/// Preflight bodies the gate must ignore: none, a valid signup, and garbage.
pub const PREFLIGHT_BODIES: [&str; 3] = [
    "",
    r#"{"email":"a@b.com","destination":"Paris"}"#,
    "{ not json",
];

/// Asserts a 200 with an empty body and the full CORS header set.
pub async fn assert_preflight_ok(res: Response) -> Result<()> {
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let headers = res.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], "POST, OPTIONS");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
    assert!(res.text().await?.is_empty(), "preflight body must be empty");
    Ok(())
}
