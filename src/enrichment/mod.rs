//! Classification tags derived from the free-text signup fields.
//!
//! Every function here is total and pure: any input string maps to exactly one tag.

mod tables;

use lazy_regex::regex_captures;
use serde::Serialize;
use serde_json::Value;
use strum_macros::AsRefStr;

pub use tables::KeywordTable;
use tables::{
    CUSTOM_ALERT_REGIONS, DESTINATION_CODES, POPULARITY_TIERS, QUICK_ALERT_REGIONS,
};

// ###################################
// ->   TAGS
// ###################################
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DestinationCode {
    DomRep,
    Mexico,
    Paris,
    Madrid,
    Barcelona,
    Rome,
    London,
    NewYork,
    Miami,
    Orlando,
    Colombia,
    Argentina,
    Peru,
    Tokyo,
    Dubai,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DestinationRegion {
    LatinAmerica,
    Europe,
    Asia,
    MiddleEastAfrica,
    Oceania,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Serialize)]
pub enum DestinationPopularity {
    #[serde(rename = "tier1_high")]
    #[strum(serialize = "tier1_high")]
    Tier1High,
    #[serde(rename = "tier2_medium")]
    #[strum(serialize = "tier2_medium")]
    Tier2Medium,
    #[serde(rename = "tier3_aspirational")]
    #[strum(serialize = "tier3_aspirational")]
    Tier3Aspirational,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Serialize)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PriceRange {
    Budget,
    MidRange,
    Premium,
    Luxury,
}

/// Which region keyword table to use. The two signup forms were tuned separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKeywords {
    QuickAlert,
    CustomAlert,
}

// ###################################
// ->   CLASSIFIERS
// ###################################
/// Returns the tag of the first row in `table` that has a keyword contained in `haystack`.
pub fn first_match<T: Copy>(table: KeywordTable<T>, haystack: &str) -> Option<T> {
    table
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|kw| haystack.contains(kw)))
        .map(|(_, tag)| *tag)
}

pub fn destination_code(destination: &str) -> DestinationCode {
    first_match(DESTINATION_CODES, &destination.to_lowercase()).unwrap_or(DestinationCode::Other)
}

pub fn destination_region(destination: &str, keywords: RegionKeywords) -> DestinationRegion {
    let table = match keywords {
        RegionKeywords::QuickAlert => QUICK_ALERT_REGIONS,
        RegionKeywords::CustomAlert => CUSTOM_ALERT_REGIONS,
    };

    first_match(table, &destination.to_lowercase()).unwrap_or(DestinationRegion::Other)
}

pub fn destination_popularity(destination: &str) -> DestinationPopularity {
    first_match(POPULARITY_TIERS, &destination.to_lowercase())
        .unwrap_or(DestinationPopularity::Tier2Medium)
}

/// Buckets a price using inclusive upper bounds.
/// NaN fails every comparison and therefore lands in `Luxury`.
pub fn price_range(price: f64) -> PriceRange {
    if price <= 400.0 {
        PriceRange::Budget
    } else if price <= 800.0 {
        PriceRange::MidRange
    } else if price <= 1500.0 {
        PriceRange::Premium
    } else {
        PriceRange::Luxury
    }
}

/// Reads a price the way a lenient float parser does: JSON numbers are taken as is,
/// strings contribute their longest leading numeric prefix (after leading whitespace).
/// Everything else, including strings without a numeric prefix, is NaN.
pub fn parse_price(value: &Value) -> f64 {
    match value {
        Value::Number(num) => num.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_float_prefix(s),
        _ => f64::NAN,
    }
}

fn parse_float_prefix(input: &str) -> f64 {
    let input = input.trim_start();

    if let Some((_whole, sign, _)) = regex_captures!(r"^([+-]?)(Infinity)", input) {
        return if sign == "-" {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    regex_captures!(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?", input)
        .and_then(|whole| whole.parse().ok())
        .unwrap_or(f64::NAN)
}
