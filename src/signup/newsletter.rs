use chrono::{DateTime, Utc};
use serde_json::json;

use super::{
    timestamp, DerivedTags, EnrichedProfileAttributes, EventSpec, SignupPlan, SubmittedFields,
};
use crate::web::types::ValidNewsletterSignup;

pub const NEWSLETTER_SIGNUP: &str = "Newsletter Signup";
pub const MARKET_SEGMENT_IDENTIFIED: &str = "Market Segment Identified";

const FLAGS: &[&str] = &["newsletter_subscriber", "marketing_consent", "email_notifications"];

pub fn newsletter_plan(signup: &ValidNewsletterSignup, now: DateTime<Utc>) -> SignupPlan {
    let submitted = SubmittedFields {
        signup_source: signup
            .signup_source
            .clone()
            .unwrap_or_else(|| "newsletter_form".into()),
        language: signup.language.clone().unwrap_or_else(|| "es".into()),
        location: signup.location.clone(),
        ..Default::default()
    };

    let primary_event = EventSpec {
        metric: NEWSLETTER_SIGNUP,
        properties: json!({
            "signup_source": submitted.signup_source,
            "language": submitted.language,
            "location": submitted.location,
        }),
    };

    let secondary_event = EventSpec {
        metric: MARKET_SEGMENT_IDENTIFIED,
        properties: json!({
            "market_segment": market_segment(&submitted.language),
            "language": submitted.language,
            "location": submitted.location,
            "signup_source": submitted.signup_source,
        }),
    };

    SignupPlan {
        email: signup.email.as_ref().to_string(),
        profile: EnrichedProfileAttributes::new(submitted, DerivedTags::default(), FLAGS, now),
        primary_event,
        secondary_event: Some(secondary_event),
        timestamp: timestamp(now),
    }
}

fn market_segment(language: &str) -> &'static str {
    match language.to_lowercase().as_str() {
        "es" => "spanish_speaking",
        "en" => "english_speaking",
        _ => "other",
    }
}
