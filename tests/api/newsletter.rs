use anyhow::Result;
use claims::assert_none;
use fake::{faker::internet::en::SafeEmail, Fake};
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use wiremock::{
    matchers::{any, body_partial_json, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::{
    assert_preflight_ok, upstream_error, TestApp, PREFLIGHT_BODIES, TEST_PROFILE_ID,
};

const ENDPOINT: &str = "newsletter-signup";

#[tokio::test]
async fn newsletter_preflight_and_method_gate() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.marketing_server)
        .await;

    for body in PREFLIGHT_BODIES {
        assert_preflight_ok(app.preflight_with_body(ENDPOINT, body).await?).await?;
    }

    for verb in [Method::GET, Method::PATCH] {
        let res = app.request(verb.clone(), ENDPOINT).await?;
        assert_eq!(
            res.status(),
            StatusCode::METHOD_NOT_ALLOWED,
            "Wrong status for {verb}"
        );
        let body: Value = res.json().await?;
        assert_eq!(body, json!({ "error": "Method not allowed" }));
    }

    Ok(())
}

#[tokio::test]
async fn newsletter_signup_ok() -> Result<()> {
    let app = TestApp::spawn().await?;
    app.mount_happy_marketing_api().await;
    let email: String = SafeEmail().fake();

    let res = app
        .post_json(ENDPOINT, &json!({ "email": email, "language": "en" }))
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(
        body,
        json!({
            "success": true,
            "message": "Successfully subscribed to newsletter",
            "status": "subscribed",
            "profile_id": TEST_PROFILE_ID
        })
    );
    assert_eq!(
        app.received_paths().await,
        [
            "/api/profiles/",
            "/api/lists/TestList/relationships/profiles/",
            "/api/events/",
            "/api/events/",
        ]
    );

    Ok(())
}

#[tokio::test]
async fn newsletter_profile_and_segment_event_use_defaults() -> Result<()> {
    let app = TestApp::spawn().await?;
    app.mount_happy_marketing_api().await;

    let res = app
        .post_json(ENDPOINT, &json!({ "email": "lector@example.com" }))
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let requests = app
        .marketing_server
        .received_requests()
        .await
        .unwrap_or_default();
    let bodies = requests
        .iter()
        .map(|req| serde_json::from_slice::<Value>(&req.body))
        .collect::<Result<Vec<_>, _>>()?;

    let properties = &bodies[0]["data"]["attributes"]["properties"];
    assert_eq!(properties["signup_source"], "newsletter_form");
    assert_eq!(properties["language"], "es");
    assert_eq!(properties["newsletter_subscriber"], true);
    assert_eq!(properties["marketing_consent"], true);

    let segment_event = &bodies[3]["data"]["attributes"];
    assert_eq!(
        segment_event["metric"]["data"]["attributes"]["name"],
        "Market Segment Identified"
    );
    assert_eq!(segment_event["properties"]["market_segment"], "spanish_speaking");

    Ok(())
}

#[tokio::test]
async fn invalid_emails_are_rejected() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.marketing_server)
        .await;

    let tests = [
        (json!({}), "Email is required"),
        (json!({ "email": "" }), "Email is required"),
        (json!({ "email": false }), "Email is required"),
        (json!({ "email": "not-an-email" }), "Invalid email format"),
        (json!({ "email": "a b@c.com" }), "Invalid email format"),
        (json!({ "email": "a@b" }), "Invalid email format"),
    ];

    for (body, expected) in tests {
        let res = app.post_json(ENDPOINT, &body).await?;
        assert_eq!(
            res.status(),
            StatusCode::BAD_REQUEST,
            "Wrong status for: {body}"
        );
        let res_body: Value = res.json().await?;
        assert_eq!(res_body["error"], expected, "Wrong message for: {body}");
    }

    Ok(())
}

#[tokio::test]
async fn existing_subscriber_is_a_success() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(method("POST"))
        .and(path("/api/profiles/"))
        .and(body_partial_json(json!({
            "data": { "attributes": { "email": "vuelve@example.com" } }
        })))
        .respond_with(upstream_error(
            409,
            "A profile already exists with one of these identifiers.",
        ))
        .expect(1)
        .mount(&app.marketing_server)
        .await;

    let res = app
        .post_json(ENDPOINT, &json!({ "email": "vuelve@example.com" }))
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], "existing_subscriber");
    assert_eq!(
        body["message"],
        "You are already subscribed to our newsletter"
    );
    assert_none!(body.get("profile_id"));
    assert_eq!(app.received_paths().await, ["/api/profiles/"]);

    Ok(())
}

#[tokio::test]
async fn other_upsert_failures_are_server_errors() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(path("/api/profiles/"))
        .respond_with(upstream_error(400, "Invalid email address"))
        .expect(1)
        .mount(&app.marketing_server)
        .await;

    let res = app
        .post_json(ENDPOINT, &json!({ "email": "x@example.com" }))
        .await?;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "Internal server error");
    assert_eq!(
        body["details"],
        "signup error: failed to create profile: Invalid email address"
    );

    Ok(())
}
