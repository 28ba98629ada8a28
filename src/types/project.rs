use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ProjectId;

/// Display projection of a project record. Only used for rendering; the
/// API layer itself transports projects as raw JSON.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ProjectSummary {
    pub id: Option<ProjectId>,
    pub title: String,
    pub status: Option<String>,
    pub fund: Option<String>,
    pub country: Option<NamedRef>,
    pub lead_org_unit: Option<NamedRef>,
    pub themes: Vec<NamedRef>,
    pub donors: Vec<NamedRef>,
    pub pag_value: Option<Value>,
    pub budget_amount: Option<Value>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub created_at: Option<String>,
}

/// Nested country / org unit / theme / donor as serialized by the backend.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub struct NamedRef {
    pub id: Option<i64>,
    pub name: String,
}

impl ProjectSummary {
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}

/// Items of a list response, whether paginated (`{"results": [...]}`)
/// or a bare array.
pub fn list_items(body: &Value) -> &[Value] {
    match body {
        Value::Array(items) => items,
        Value::Object(map) => map
            .get("results")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    }
}

/// Total count reported by a paginated list response.
pub fn list_count(body: &Value) -> Option<u64> {
    body.get("count").and_then(Value::as_u64)
}
