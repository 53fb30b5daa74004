use axum::{
    extract::{Request, State},
    http::Method,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use tracing::{info, warn};

use super::{preflight_or_reject, read_body};
use crate::{
    signup::{self, newsletter_plan},
    web::{
        types::{
            DeserNewsletterSignup, NewsletterSubscribed, SubscriptionStatus,
            ValidNewsletterSignup,
        },
        WebResult,
    },
    AppState,
};

#[tracing::instrument(name = "Subscribing to the newsletter", skip_all, fields(method = %method))]
pub async fn newsletter_signup(
    State(app_state): State<AppState>,
    method: Method,
    request: Request,
) -> WebResult<Response> {
    if let Some(preflight) = preflight_or_reject(&method)? {
        return Ok(preflight);
    }

    let signup: ValidNewsletterSignup = read_body::<DeserNewsletterSignup>(request)
        .await?
        .try_into()?;
    let credentials = app_state.credentials()?;

    let plan = newsletter_plan(&signup, Utc::now());
    let response = match signup::run(&app_state.marketing_client, &credentials, plan).await {
        Ok(profile_id) => {
            info!("{:<20} - {profile_id}", "Newsletter signup");
            NewsletterSubscribed {
                success: true,
                message: "Successfully subscribed to newsletter",
                status: SubscriptionStatus::Subscribed,
                profile_id: Some(profile_id),
            }
        }
        // Duplicate signups are fine, the upstream only tells us through its error message.
        Err(er) if er.is_existing_profile() => {
            warn!("{:<20} - {er}", "Existing subscriber");
            NewsletterSubscribed {
                success: true,
                message: "You are already subscribed to our newsletter",
                status: SubscriptionStatus::ExistingSubscriber,
                profile_id: None,
            }
        }
        Err(er) => return Err(er.into()),
    };

    Ok(Json(response).into_response())
}
