use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

pub const ID_FIELD: &str = "id";
pub const ADDED_FIELD: &str = "added";
pub const UPDATED_FIELD: &str = "updated";

/// Fields owned by the server. Request bodies cannot set them.
pub const RESERVED_FIELDS: [&str; 3] = [ID_FIELD, ADDED_FIELD, UPDATED_FIELD];

/// A single vendor record
///
/// Arbitrary JSON attributes plus the reserved `id`, `added` and `updated`
/// fields. Key order is kept as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vendor(Map<String, JsonValue>);

impl Vendor {
    pub fn from_fields(fields: Map<String, JsonValue>) -> Self {
        Self(fields)
    }

    /// Canonical identifier of the record, if its `id` normalizes to one.
    pub fn id(&self) -> Option<i64> {
        self.0.get(ID_FIELD).and_then(normalize_id)
    }

    pub(crate) fn fields_mut(&mut self) -> &mut Map<String, JsonValue> {
        &mut self.0
    }
}

#[cfg(test)]
impl Vendor {
    pub fn get(&self, field: &str) -> Option<&JsonValue> {
        self.0.get(field)
    }

    pub fn fields(&self) -> &Map<String, JsonValue> {
        &self.0
    }
}

/// Normalize a stored `id` value to an integer.
///
/// JSON integers, integral floats and numeric strings all map to the same
/// value, so `42`, `42.0` and `"42"` identify one record.
pub fn normalize_id(value: &JsonValue) -> Option<i64> {
    match value {
        JsonValue::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        JsonValue::String(s) => parse_id(s),
        _ => None,
    }
}

/// Parse an identifier taken from a request path.
pub fn parse_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().and_then(integral))
}

fn integral(value: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound
    if value.is_finite()
        && value.fract() == 0.0
        && value >= i64::MIN as f64
        && value < i64::MAX as f64
    {
        Some(value as i64)
    } else {
        None
    }
}

/// Response type for successful DELETE operations
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

impl DeleteResponse {
    pub fn deleted() -> Self {
        Self {
            success: true,
            message: "Vendor deleted".to_string(),
        }
    }
}
