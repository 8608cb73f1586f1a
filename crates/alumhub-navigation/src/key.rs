//! Dedup keys for navigation requests.

use serde::Serialize;
use serde_json::Value;

use alumhub_core::NavigationError;

/// Identity of a navigation request for debounce purposes
///
/// Push and replace share the `Target` namespace, so a push to `/forum`
/// also holds off a replace to `/forum` inside the same window.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NavKey {
    /// A route string used by push and replace, verbatim.
    Target(String),
    /// Canonical JSON of structured navigate params.
    Params(String),
    /// The single back slot.
    Back,
}

impl NavKey {
    /// Key for a push or replace target
    pub fn target(target: impl Into<String>) -> Self {
        NavKey::Target(target.into())
    }

    /// Key for already-converted navigate params
    pub fn params(params: &Value) -> Self {
        NavKey::Params(canonical_json(params))
    }

    /// Key for any serializable navigate params
    pub fn from_params<P: Serialize + ?Sized>(params: &P) -> Result<Self, NavigationError> {
        Ok(Self::params(&to_params_value(params)?))
    }
}

impl std::fmt::Display for NavKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NavKey::Target(target) => write!(f, "{}", target),
            NavKey::Params(json) => write!(f, "params{}", json),
            NavKey::Back => write!(f, "<back>"),
        }
    }
}

pub(crate) fn to_params_value<P: Serialize + ?Sized>(params: &P) -> Result<Value, NavigationError> {
    serde_json::to_value(params).map_err(|e| NavigationError::InvalidParams {
        reason: e.to_string(),
    })
}

/// Compact JSON with object keys sorted at every level
///
/// Two values that are equal as JSON always produce the same string, no
/// matter the insertion order of their maps.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));

            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(item, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}
