use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    web::{log, Error, REQUEST_ID_HEADER},
    AppState,
};

/// Turns an `Error` stored in the response extensions into the JSON body the caller sees.
/// Outside production, generic 500s also carry the underlying error message in `details`.
pub async fn response_mapper(
    State(app_state): State<AppState>,
    req_method: Method,
    uri: Uri,
    req_headers: HeaderMap,
    resp: Response,
) -> Response {
    let uuid = req_headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v).ok())
        .unwrap_or_else(Uuid::new_v4);

    let web_error = resp.extensions().get::<Arc<Error>>().map(Arc::as_ref);
    let client_status_and_error = web_error.map(Error::status_code_and_client_error);

    let err_resp = client_status_and_error
        .as_ref()
        .zip(web_error)
        .map(|((status, cl_err), web_er)| {
            let mut client_error_body = json!({ "error": cl_err.to_string() });
            if cl_err.may_expose_details() && !app_state.environment.is_production() {
                client_error_body["details"] = json!(web_er.to_string());
            }

            if status.is_server_error() {
                tracing::error!("SERVER ERROR: {web_er} ID: {uuid}");
            }

            (*status, Json(client_error_body)).into_response()
        });

    log::log_request(
        uuid,
        &req_method,
        &uri,
        err_resp.as_ref().map_or(resp.status(), |r| r.status()),
        web_error,
        client_status_and_error.as_ref().map(|(_, ce)| ce),
    );

    err_resp.unwrap_or(resp)
}
