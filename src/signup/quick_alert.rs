use chrono::{DateTime, Utc};
use serde_json::json;

use super::{
    timestamp, DerivedTags, EnrichedProfileAttributes, EventSpec, SignupPlan, SubmittedFields,
};
use crate::{
    enrichment::{self, RegionKeywords},
    web::types::ValidQuickAlert,
};

pub const QUICK_ALERT_CREATED: &str = "Quick Flight Alert Created";
pub const DESTINATION_INTEREST: &str = "Destination Interest";

const FLAGS: &[&str] = &["quick_alert_active", "email_notifications", "price_alerts_enabled"];

/// Builds the quick alert signup: every derived tag, plus a destination interest event.
pub fn quick_alert_plan(alert: &ValidQuickAlert, now: DateTime<Utc>) -> SignupPlan {
    let tags = DerivedTags {
        destination_code: Some(enrichment::destination_code(&alert.destination)),
        destination_region: Some(enrichment::destination_region(
            &alert.destination,
            RegionKeywords::QuickAlert,
        )),
        destination_popularity: Some(enrichment::destination_popularity(&alert.destination)),
        price_range: Some(enrichment::price_range(enrichment::parse_price(
            &alert.target_price,
        ))),
    };

    let submitted = SubmittedFields {
        destination: Some(alert.destination.clone()),
        departure_airport: alert.departure_airport.clone(),
        timeframe: Some(alert.timeframe.clone().unwrap_or_else(|| "flexible".into())),
        travel_class: Some(alert.travel_class.clone().unwrap_or_else(|| "economy".into())),
        target_price: Some(alert.target_price.clone()),
        alert_type: Some(alert.alert_type.clone().unwrap_or_else(|| "quick".into())),
        signup_source: alert
            .signup_source
            .clone()
            .unwrap_or_else(|| "quick_alert_form".into()),
        language: alert.language.clone().unwrap_or_else(|| "es".into()),
        location: alert.location.clone(),
    };

    let primary_event = EventSpec {
        metric: QUICK_ALERT_CREATED,
        properties: json!({
            "destination": submitted.destination,
            "departure_airport": submitted.departure_airport,
            "target_price": submitted.target_price,
            "timeframe": submitted.timeframe,
            "travel_class": submitted.travel_class,
            "alert_type": submitted.alert_type,
            "signup_source": submitted.signup_source,
            "language": submitted.language,
            "destination_code": tags.destination_code,
            "destination_region": tags.destination_region,
            "destination_popularity": tags.destination_popularity,
            "price_range": tags.price_range,
        }),
    };

    let secondary_event = EventSpec {
        metric: DESTINATION_INTEREST,
        properties: json!({
            "destination": submitted.destination,
            "destination_code": tags.destination_code,
            "destination_region": tags.destination_region,
            "destination_popularity": tags.destination_popularity,
            "price_range": tags.price_range,
            "interest_source": "quick_alert",
        }),
    };

    SignupPlan {
        email: alert.email.clone(),
        profile: EnrichedProfileAttributes::new(submitted, tags, FLAGS, now),
        primary_event,
        secondary_event: Some(secondary_event),
        timestamp: timestamp(now),
    }
}
