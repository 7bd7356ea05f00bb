//! Inbound scan request and the rules for extracting it from HTTP input.

use serde_json::Value;
use tracing::debug;

use super::{ScanOptions, ScanProfile};

/// Target scanned when the request names none.
pub const DEFAULT_TARGET: &str = "127.0.0.1";

/// What to scan and how broadly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    /// Address or hostname, passed through to the scanner unvalidated.
    pub target: String,
    pub quick: bool,
}

impl ScanRequest {
    pub fn new(target: impl Into<String>, quick: bool) -> Self {
        Self {
            target: target.into(),
            quick,
        }
    }

    /// Extract a request from a JSON body.
    ///
    /// Parsing is lenient: a malformed body, or one that is not a JSON
    /// object, yields the defaults. `target` must be a non-empty string to
    /// be used. A present `quick` is read by truthiness, so `null` or `0`
    /// select the full profile.
    pub fn from_json_body(body: &[u8]) -> Self {
        let mut request = Self::default();

        let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(body) else {
            return request;
        };

        match fields.get("target") {
            Some(Value::String(target)) if !target.is_empty() => {
                request.target = target.clone();
            }
            Some(other) if is_truthy(other) => {
                debug!(target_value = %other, "Ignoring non-string target");
            }
            _ => {}
        }

        if let Some(quick) = fields.get("quick") {
            request.quick = is_truthy(quick);
        }

        request
    }

    /// Extract a request from the `target` query parameter.
    ///
    /// A query string cannot select the profile, so `quick` stays on.
    pub fn from_query_target(target: Option<&str>) -> Self {
        match target {
            Some(t) if !t.is_empty() => Self::new(t, true),
            _ => Self::default(),
        }
    }

    pub fn profile(&self) -> ScanProfile {
        ScanProfile::from_quick(self.quick)
    }

    /// Options record for this request. Depends on `quick` only.
    pub fn options(&self) -> ScanOptions {
        ScanOptions::for_profile(self.profile())
    }
}

impl Default for ScanRequest {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET, true)
    }
}

/// JSON truthiness: `false`, `null`, zero, and empty strings, arrays and
/// objects are false.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
