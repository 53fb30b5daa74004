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
    signup::{self, quick_alert_plan},
    web::{
        types::{AlertCreated, AlertDetails, DeserAlertRequest, ValidQuickAlert},
        WebResult,
    },
    AppState,
};

#[tracing::instrument(name = "Creating quick alert", skip_all, fields(method = %method))]
pub async fn quick_alert(
    State(app_state): State<AppState>,
    method: Method,
    request: Request,
) -> WebResult<Response> {
    if let Some(preflight) = preflight_or_reject(&method)? {
        return Ok(preflight);
    }

    let alert: ValidQuickAlert = read_body::<DeserAlertRequest>(request).await?.try_into()?;
    let credentials = app_state.credentials()?;

    let plan = quick_alert_plan(&alert, Utc::now());
    let tags = plan.profile.tags();
    let profile_id = signup::run(&app_state.marketing_client, &credentials, plan).await?;
    info!("{:<20} - {profile_id}", "Quick alert created");

    let ValidQuickAlert {
        destination,
        target_price,
        departure_airport,
        ..
    } = alert;

    Ok(Json(AlertCreated {
        success: true,
        message: "Quick alert created successfully",
        profile_id,
        alert_details: AlertDetails {
            destination,
            departure_airport,
            price_range: price_range(parse_price(&target_price)),
            target_price,
            destination_code: tags.destination_code,
        },
    })
    .into_response())
}
