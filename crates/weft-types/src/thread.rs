use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single conversation: an opaque id, an optional auto-derived title,
/// and an ordered list of items owned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thread {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Thread {
    /// New untitled thread. The title is derived later by the store from
    /// the first user text item.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            created_at: Utc::now(),
        }
    }
}
