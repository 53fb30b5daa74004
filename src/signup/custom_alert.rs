use chrono::{DateTime, Utc};
use serde_json::json;

use super::{
    timestamp, DerivedTags, EnrichedProfileAttributes, EventSpec, SignupPlan, SubmittedFields,
};
use crate::{
    enrichment::{self, RegionKeywords},
    web::types::ValidCustomAlert,
};

pub const CUSTOM_ALERT_CREATED: &str = "Custom Flight Alert Created";

const FLAGS: &[&str] = &["custom_alert_active", "email_notifications", "price_alerts_enabled"];

/// Custom alerts only carry region and price tags and track no secondary event.
pub fn custom_alert_plan(alert: &ValidCustomAlert, now: DateTime<Utc>) -> SignupPlan {
    let tags = DerivedTags {
        destination_region: Some(enrichment::destination_region(
            &alert.destination,
            RegionKeywords::CustomAlert,
        )),
        price_range: Some(enrichment::price_range(enrichment::parse_price(
            &alert.target_price,
        ))),
        ..Default::default()
    };

    let submitted = SubmittedFields {
        destination: Some(alert.destination.clone()),
        departure_airport: Some(alert.departure_airport.clone()),
        timeframe: alert.timeframe.clone(),
        travel_class: Some(alert.travel_class.clone().unwrap_or_else(|| "economy".into())),
        target_price: Some(alert.target_price.clone()),
        alert_type: Some(alert.alert_type.clone().unwrap_or_else(|| "custom".into())),
        signup_source: alert
            .signup_source
            .clone()
            .unwrap_or_else(|| "custom_alert_form".into()),
        language: alert.language.clone().unwrap_or_else(|| "es".into()),
        location: alert.location.clone(),
    };

    let primary_event = EventSpec {
        metric: CUSTOM_ALERT_CREATED,
        properties: json!({
            "destination": submitted.destination,
            "departure_airport": submitted.departure_airport,
            "target_price": submitted.target_price,
            "timeframe": submitted.timeframe,
            "travel_class": submitted.travel_class,
            "alert_type": submitted.alert_type,
            "signup_source": submitted.signup_source,
            "destination_region": tags.destination_region,
            "price_range": tags.price_range,
        }),
    };

    SignupPlan {
        email: alert.email.clone(),
        profile: EnrichedProfileAttributes::new(submitted, tags, FLAGS, now),
        primary_event,
        secondary_event: None,
        timestamp: timestamp(now),
    }
}
