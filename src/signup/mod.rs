//! Orchestration of a signup against the marketing API.
//!
//! A signup is described by a `SignupPlan` and executed strictly in order:
//! profile upsert, list attach, primary event, optional secondary event.
//! Only the profile upsert can fail the signup, every later step is best effort.

mod custom_alert;
mod newsletter;
mod quick_alert;

pub use custom_alert::custom_alert_plan;
pub use newsletter::newsletter_plan;
pub use quick_alert::quick_alert_plan;

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use secrecy::SecretString;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    enrichment::{DestinationCode, DestinationPopularity, DestinationRegion, PriceRange},
    marketing_client::{MarketingClient, RemoteCallResult, RemoteError, RemoteResponse},
};

// ###################################
// ->   STRUCTS
// ###################################
/// The API key and list id every signup needs.
#[derive(Debug, Clone)]
pub struct MarketingCredentials {
    pub api_key: SecretString,
    pub list_id: String,
}

/// Profile properties sent with the upsert: the submitted fields, the derived tags
/// and fixed metadata. Built once per request and never changed afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedProfileAttributes {
    #[serde(flatten)]
    submitted: SubmittedFields,
    #[serde(skip_serializing_if = "Option::is_none")]
    destination_code: Option<DestinationCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    destination_region: Option<DestinationRegion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    destination_popularity: Option<DestinationPopularity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price_range: Option<PriceRange>,
    signup_date: String,
    last_updated: String,
    #[serde(flatten)]
    flags: BTreeMap<&'static str, bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SubmittedFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_airport: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_price: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_type: Option<String>,
    pub signup_source: String,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DerivedTags {
    pub destination_code: Option<DestinationCode>,
    pub destination_region: Option<DestinationRegion>,
    pub destination_popularity: Option<DestinationPopularity>,
    pub price_range: Option<PriceRange>,
}

/// A tracking event: metric name plus a snapshot of properties.
#[derive(Debug, Clone)]
pub struct EventSpec {
    pub metric: &'static str,
    pub properties: Value,
}

#[derive(Debug, Clone)]
pub struct SignupPlan {
    pub email: String,
    pub profile: EnrichedProfileAttributes,
    pub primary_event: EventSpec,
    pub secondary_event: Option<EventSpec>,
    pub timestamp: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SignupError {
    #[error("failed to create profile: {0}")]
    ProfileUpsert(#[source] RemoteError),
    #[error("profile upsert response did not contain a profile id")]
    MissingProfileId,
}

impl SignupError {
    /// True when the upstream rejected the profile as a duplicate.
    pub fn is_existing_profile(&self) -> bool {
        matches!(self, SignupError::ProfileUpsert(er) if er.is_already_exists())
    }
}

// ###################################
// ->   IMPLS
// ###################################
impl EnrichedProfileAttributes {
    pub fn new(
        submitted: SubmittedFields,
        tags: DerivedTags,
        flags: &[&'static str],
        now: DateTime<Utc>,
    ) -> Self {
        let now = timestamp(now);

        EnrichedProfileAttributes {
            submitted,
            destination_code: tags.destination_code,
            destination_region: tags.destination_region,
            destination_popularity: tags.destination_popularity,
            price_range: tags.price_range,
            signup_date: now.clone(),
            last_updated: now,
            flags: flags.iter().map(|flag| (*flag, true)).collect(),
        }
    }

    pub fn tags(&self) -> DerivedTags {
        DerivedTags {
            destination_code: self.destination_code,
            destination_region: self.destination_region,
            destination_popularity: self.destination_popularity,
            price_range: self.price_range,
        }
    }
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-05-01T10:00:00.000Z`.
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ###################################
// ->   ORCHESTRATION
// ###################################
/// Runs the plan and returns the external profile id.
/// Calls are awaited one after the other, never concurrently.
#[tracing::instrument(name = "Running signup", skip_all, fields(primary_event = plan.primary_event.metric))]
pub async fn run(
    client: &MarketingClient,
    credentials: &MarketingCredentials,
    plan: SignupPlan,
) -> Result<String, SignupError> {
    let SignupPlan {
        email,
        profile,
        primary_event,
        secondary_event,
        timestamp,
    } = plan;
    let api_key = &credentials.api_key;

    // 1. Profile upsert, the only fatal step.
    let created = client
        .upsert_profile(api_key, &email, &profile)
        .await
        .map_err(SignupError::ProfileUpsert)?;
    let profile_id = created
        .resource_id()
        .ok_or(SignupError::MissingProfileId)?
        .to_string();
    info!("{:<20} - {profile_id}", "Profile upserted");

    // 2. List attach
    best_effort(
        "add_profile_to_list",
        client
            .add_profile_to_list(api_key, &credentials.list_id, &profile_id)
            .await,
    );

    // 3. Primary event
    best_effort(
        primary_event.metric,
        client
            .track_event(
                api_key,
                &email,
                primary_event.metric,
                &primary_event.properties,
                &timestamp,
            )
            .await,
    );

    // 4. Secondary event
    if let Some(event) = secondary_event {
        best_effort(
            event.metric,
            client
                .track_event(api_key, &email, event.metric, &event.properties, &timestamp)
                .await,
        );
    }

    Ok(profile_id)
}

/// Logs a failed non-critical call and swallows it.
fn best_effort(step: &str, result: RemoteCallResult) -> Option<RemoteResponse> {
    match result {
        Ok(resp) => Some(resp),
        Err(er) => {
            warn!(
                step,
                status_code = er.status_code(),
                "{:<20} - non-critical call failed: {er}",
                "best_effort"
            );
            None
        }
    }
}
