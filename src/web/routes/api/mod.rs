mod custom_alert;
mod newsletter;
mod quick_alert;

pub use custom_alert::custom_alert;
pub use newsletter::newsletter_signup;
pub use quick_alert::quick_alert;

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

use crate::web::{Error, WebResult};

/// Request gate shared by the signup endpoints.
/// Returns `Some(response)` for a preflight, rejects everything that is not a `POST`.
fn preflight_or_reject(method: &Method) -> WebResult<Option<Response>> {
    if *method == Method::OPTIONS {
        return Ok(Some(StatusCode::OK.into_response()));
    }
    if *method != Method::POST {
        return Err(Error::MethodNotAllowed(method.clone()));
    }

    Ok(None)
}

/// Buffers and parses the body. Only called after the method gate, so preflights
/// never touch the body. A malformed or oversized body ends up as a 500.
async fn read_body<T: DeserializeOwned>(request: Request) -> WebResult<T> {
    let body = Bytes::from_request(request, &()).await?;
    Ok(serde_json::from_slice(&body)?)
}
