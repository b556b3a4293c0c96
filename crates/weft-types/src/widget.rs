use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Recursive UI description rendered client-side. The backend only builds
/// these trees; it never walks them again once emitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetNode {
    Card {
        children: Vec<WidgetNode>,
    },
    Col {
        children: Vec<WidgetNode>,
        #[serde(skip_serializing_if = "Option::is_none")]
        gap: Option<String>,
    },
    Text {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        size: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        weight: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },
    Button {
        label: String,
        on_click: WidgetAction,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<String>,
    },
}

/// Action binding attached to a widget button. `handler = "client"` means
/// the UI executes it without a round trip to the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetAction {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default)]
    pub payload: Value,
    pub handler: String,
}
