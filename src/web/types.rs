//! Request and response bodies of the signup endpoints.
//! Includes structs that need to be validated, their parsing implementations and tests for those

use lazy_regex::regex_is_match;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::enrichment::{DestinationCode, PriceRange};

// ###################################
// ->   REQUESTS
// ###################################
/// Deserializable alert request, shared by the quick and custom alert forms.
/// Every field is optional here, `TryFrom` decides what is required.
#[derive(Debug, Default, Deserialize)]
pub struct DeserAlertRequest {
    pub email: Option<Value>,
    pub destination: Option<Value>,
    pub departure_airport: Option<Value>,
    pub timeframe: Option<String>,
    pub travel_class: Option<String>,
    /// A number or a numeric string.
    pub target_price: Option<Value>,
    pub alert_type: Option<String>,
    pub signup_source: Option<String>,
    pub language: Option<String>,
    pub location: Option<String>,
}

/// Deserializable newsletter signup
#[derive(Debug, Default, Deserialize)]
pub struct DeserNewsletterSignup {
    pub email: Option<Value>,
    pub signup_source: Option<String>,
    pub language: Option<String>,
    pub location: Option<String>,
}

/// Validated quick alert: `email`, `destination` and `target_price` are present.
#[derive(Debug, Clone)]
pub struct ValidQuickAlert {
    pub email: String,
    pub destination: String,
    pub target_price: Value,
    pub departure_airport: Option<String>,
    pub timeframe: Option<String>,
    pub travel_class: Option<String>,
    pub alert_type: Option<String>,
    pub signup_source: Option<String>,
    pub language: Option<String>,
    pub location: Option<String>,
}

/// Validated custom alert: like the quick alert but `departure_airport` is required too.
#[derive(Debug, Clone)]
pub struct ValidCustomAlert {
    pub email: String,
    pub destination: String,
    pub departure_airport: String,
    pub target_price: Value,
    pub timeframe: Option<String>,
    pub travel_class: Option<String>,
    pub alert_type: Option<String>,
    pub signup_source: Option<String>,
    pub language: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ValidNewsletterSignup {
    pub email: ValidEmail,
    pub signup_source: Option<String>,
    pub language: Option<String>,
    pub location: Option<String>,
}

/// Email that passed the newsletter address pattern.
#[derive(Debug, Clone)]
pub struct ValidEmail(String);

impl AsRef<str> for ValidEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ValidEmail {
    pub fn parse<S>(value: S) -> Result<Self, DataParsingError>
    where
        S: AsRef<str>,
    {
        let value = value.as_ref();

        if regex_is_match!(r"^[^\s@]+@[^\s@]+\.[^\s@]+$", value) {
            Ok(ValidEmail(value.to_owned()))
        } else {
            Err(DataParsingError::EmailInvalid)
        }
    }
}

impl TryFrom<DeserAlertRequest> for ValidQuickAlert {
    type Error = DataParsingError;

    fn try_from(req: DeserAlertRequest) -> Result<Self, Self::Error> {
        let missing = DataParsingError::MissingFields("email, destination, target_price");

        let (Some(email), Some(destination), Some(target_price)) = (
            present_text(req.email),
            present_text(req.destination),
            present(req.target_price),
        ) else {
            return Err(missing);
        };

        Ok(ValidQuickAlert {
            email,
            destination,
            target_price,
            departure_airport: present_text(req.departure_airport),
            timeframe: req.timeframe,
            travel_class: req.travel_class,
            alert_type: req.alert_type,
            signup_source: req.signup_source,
            language: req.language,
            location: req.location,
        })
    }
}

impl TryFrom<DeserAlertRequest> for ValidCustomAlert {
    type Error = DataParsingError;

    fn try_from(req: DeserAlertRequest) -> Result<Self, Self::Error> {
        let missing =
            DataParsingError::MissingFields("email, destination, departure_airport, target_price");

        let (Some(email), Some(destination), Some(departure_airport), Some(target_price)) = (
            present_text(req.email),
            present_text(req.destination),
            present_text(req.departure_airport),
            present(req.target_price),
        ) else {
            return Err(missing);
        };

        Ok(ValidCustomAlert {
            email,
            destination,
            departure_airport,
            target_price,
            timeframe: req.timeframe,
            travel_class: req.travel_class,
            alert_type: req.alert_type,
            signup_source: req.signup_source,
            language: req.language,
            location: req.location,
        })
    }
}

impl TryFrom<DeserNewsletterSignup> for ValidNewsletterSignup {
    type Error = DataParsingError;

    fn try_from(req: DeserNewsletterSignup) -> Result<Self, Self::Error> {
        let email = present_text(req.email).ok_or(DataParsingError::EmailMissing)?;

        Ok(ValidNewsletterSignup {
            email: ValidEmail::parse(email)?,
            signup_source: req.signup_source,
            language: req.language,
            location: req.location,
        })
    }
}

/// `null`, `false`, `0` and `""` count as missing.
fn present(value: Option<Value>) -> Option<Value> {
    value.filter(|v| match v {
        Value::Null | Value::Bool(false) => false,
        Value::Number(num) => num.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        _ => true,
    })
}

/// A present value as text. Non-string values keep their JSON rendering.
fn present_text(value: Option<Value>) -> Option<String> {
    present(value).map(|v| match v {
        Value::String(s) => s,
        other => other.to_string(),
    })
}

// ###################################
// ->   RESPONSES
// ###################################
#[derive(Debug, Serialize)]
pub struct AlertCreated {
    pub success: bool,
    pub message: &'static str,
    pub profile_id: String,
    pub alert_details: AlertDetails,
}

#[derive(Debug, Serialize)]
pub struct AlertDetails {
    pub destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_airport: Option<String>,
    pub target_price: Value,
    pub price_range: PriceRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_code: Option<DestinationCode>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Subscribed,
    ExistingSubscriber,
}

#[derive(Debug, Serialize)]
pub struct NewsletterSubscribed {
    pub success: bool,
    pub message: &'static str,
    pub status: SubscriptionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
}

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum DataParsingError {
    #[error("Missing required fields: {0}")]
    MissingFields(&'static str),

    #[error("Email is required")]
    EmailMissing,
    #[error("Invalid email format")]
    EmailInvalid,
}
