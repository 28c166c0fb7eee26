use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

/// Claims carried by an access token.
///
/// The payload is whatever object the caller asked to sign; the issuer only
/// owns the registered time claims `iat` and `exp`. Payload keys with those
/// names are dropped so the serialized token never holds duplicates.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Caller-supplied fields, flattened into the token
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    const RESERVED: [&'static str; 2] = ["iat", "exp"];

    /// Create empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an arbitrary JSON object as a claims payload.
    pub fn from_payload(mut payload: Map<String, Value>) -> Self {
        for key in Self::RESERVED {
            payload.remove(key);
        }
        Self {
            iat: None,
            exp: None,
            extra: payload,
        }
    }

    /// Add a custom field. Reserved time claims are ignored.
    ///
    /// A value that has no JSON representation (for example a map with
    /// non-string keys) is skipped and the claims are returned unchanged.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        let key = key.to_string();
        if Self::RESERVED.contains(&key.as_str()) {
            return self;
        }
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key, json_value);
        }
        self
    }

    /// Stamp `iat = issued_at` and `exp = issued_at + ttl`.
    pub fn stamped(mut self, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        self.iat = Some(issued_at.timestamp());
        self.exp = Some((issued_at + ttl).timestamp());
        self
    }

    /// Caller-supplied fields without the time claims.
    pub fn payload(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Look up a single caller-supplied field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(false, |exp| exp < current_timestamp)
    }
}
