use axum::{
    extract::{Request, State},
    http::Method,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use tracing::info;

use super::{preflight_or_reject, read_body};
use crate::{
    enrichment::{parse_price, price_range},
    signup::{self, custom_alert_plan},
    web::{
        types::{AlertCreated, AlertDetails, DeserAlertRequest, ValidCustomAlert},
        WebResult,
    },
    AppState,
};

#[tracing::instrument(name = "Creating custom alert", skip_all, fields(method = %method))]
pub async fn custom_alert(
    State(app_state): State<AppState>,
    method: Method,
    request: Request,
) -> WebResult<Response> {
    if let Some(preflight) = preflight_or_reject(&method)? {
        return Ok(preflight);
    }

    let alert: ValidCustomAlert = read_body::<DeserAlertRequest>(request).await?.try_into()?;
    let credentials = app_state.credentials()?;

    let plan = custom_alert_plan(&alert, Utc::now());
    let profile_id = signup::run(&app_state.marketing_client, &credentials, plan).await?;
    info!("{:<20} - {profile_id}", "Custom alert created");

    let ValidCustomAlert {
        destination,
        departure_airport,
        target_price,
        ..
    } = alert;

    Ok(Json(AlertCreated {
        success: true,
        message: "Custom alert created successfully",
        profile_id,
        alert_details: AlertDetails {
            destination,
            departure_airport: Some(departure_airport),
            price_range: price_range(parse_price(&target_price)),
            target_price,
            destination_code: None,
        },
    })
    .into_response())
}
