//! Tap configuration
//!
//! The configuration is a flat JSON object supplied by the caller:
//!
//! ```json
//! {
//!   "api_key": "...",
//!   "secret_key": "...",
//!   "account_id": 1234,
//!   "profile_id": 5678,
//!   "start_date": "2024-03-01T00:00:00Z"
//! }
//! ```
//!
//! `api_key` and `secret_key` are required; everything else narrows or
//! annotates the output. The config is read-only once loaded and is passed
//! by reference into every function that needs it.

use crate::error::{Error, Result, ResultExt};
use crate::types::{JsonValue, OptionStringExt};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::json;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

// ============================================================================
// Tap Config
// ============================================================================

/// Runtime configuration for the tap
#[derive(Clone, Default, PartialEq, Deserialize)]
pub struct TapConfig {
    /// API token, sent as the basic-auth username
    #[serde(default)]
    pub api_key: String,

    /// API secret, sent as the basic-auth password
    #[serde(default)]
    pub secret_key: String,

    /// Restrict output to one profile and stamp it on every record
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub profile_id: Option<i64>,

    /// Restrict output to one account
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub account_id: Option<i64>,

    /// Lower bound for leads
    #[serde(default, deserialize_with = "deserialize_optional_start_date")]
    pub start_date: Option<StartDate>,
}

impl TapConfig {
    /// Create a config with just the credentials
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: secret_key.into(),
            ..Default::default()
        }
    }

    /// Set the profile filter
    #[must_use]
    pub fn with_profile_id(mut self, profile_id: i64) -> Self {
        self.profile_id = Some(profile_id);
        self
    }

    /// Set the account filter
    #[must_use]
    pub fn with_account_id(mut self, account_id: i64) -> Self {
        self.account_id = Some(account_id);
        self
    }

    /// Set the leads start date
    #[must_use]
    pub fn with_start_date(mut self, start_date: StartDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Parse and validate a config from a JSON value
    pub fn from_value(value: JsonValue) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::config("Config must be a JSON object"));
        }
        let config: Self = serde_json::from_value(value)
            .map_err(|e| Error::config(format!("Invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a config from a JSON string
    pub fn from_json_str(json_str: &str) -> Result<Self> {
        let value: JsonValue = serde_json::from_str(json_str)
            .map_err(|e| Error::config(format!("Invalid config JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Load and validate a config from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json_str(&content)
    }

    /// Check that the required credentials are present
    pub fn validate(&self) -> Result<()> {
        if self.api_key.clone().none_if_empty().is_none() {
            return Err(Error::missing_field("api_key"));
        }
        if self.secret_key.clone().none_if_empty().is_none() {
            return Err(Error::missing_field("secret_key"));
        }
        Ok(())
    }

    /// JSON schema describing the accepted configuration
    pub fn json_schema() -> JsonValue {
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "type": "object",
            "properties": {
                "api_key": {
                    "type": "string",
                    "title": "API Key",
                    "description": "The api key to authenticate against the API service",
                    "secret": true,
                    "writeOnly": true
                },
                "secret_key": {
                    "type": "string",
                    "title": "Secret Key",
                    "description": "The secret key to authenticate against the API service",
                    "secret": true,
                    "writeOnly": true
                },
                "profile_id": {
                    "type": ["integer", "null"],
                    "title": "Profile ID",
                    "description": "Only sync this profile. If not provided, all profiles are synced."
                },
                "account_id": {
                    "type": ["integer", "null"],
                    "title": "Account ID",
                    "description": "Only sync this account. If not provided, all accounts are synced."
                },
                "start_date": {
                    "type": ["string", "null"],
                    "format": "date-time",
                    "title": "Start Date",
                    "description": "The earliest record date to sync"
                }
            },
            "required": ["api_key", "secret_key"]
        })
    }
}

impl fmt::Debug for TapConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TapConfig")
            .field("api_key", &redact(&self.api_key))
            .field("secret_key", &redact(&self.secret_key))
            .field("profile_id", &self.profile_id)
            .field("account_id", &self.account_id)
            .field("start_date", &self.start_date)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        ""
    } else {
        "********"
    }
}

/// Ids may arrive as JSON numbers or numeric strings
#[derive(Deserialize)]
#[serde(untagged)]
enum IdValue {
    Int(i64),
    Str(String),
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<IdValue>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IdValue::Int(id)) => Ok(Some(id)),
        Some(IdValue::Str(raw)) => match raw.none_if_empty() {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("expected an integer id, got '{raw}'"))),
        },
    }
}

fn deserialize_optional_start_date<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<StartDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.none_if_empty() {
        None => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(D::Error::custom),
    }
}

// ============================================================================
// Start Date
// ============================================================================

/// Calendar date used as the lower bound for leads.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive `YYYY-MM-DDTHH:MM:SS`
/// timestamps. Timestamps keep the date as written; no timezone shift is
/// applied. Always rendered as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StartDate(NaiveDate);

impl StartDate {
    /// Wrap a calendar date
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The underlying date
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Render as a `YYYY-MM-DD` query value
    pub fn to_query_value(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl From<NaiveDate> for StartDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl<Tz: chrono::TimeZone> From<DateTime<Tz>> for StartDate {
    fn from(timestamp: DateTime<Tz>) -> Self {
        Self(timestamp.naive_local().date())
    }
}

impl FromStr for StartDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();

        if let Ok(timestamp) = DateTime::parse_from_rfc3339(s) {
            return Ok(timestamp.into());
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(timestamp) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(Self(timestamp.date()));
            }
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|e| Error::invalid_value("start_date", format!("'{s}' is not a date: {e}")))
    }
}

impl fmt::Display for StartDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Serialize for StartDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_query_value())
    }
}

impl<'de> Deserialize<'de> for StartDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}
