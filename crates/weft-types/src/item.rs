use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::widget::WidgetNode;

/// One unit of conversation content. The variant set is closed; dispatch is
/// on the serde tag, not a trait hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ThreadItem {
    UserMessage(UserMessageItem),
    AssistantMessage(AssistantMessageItem),
    Widget(WidgetItem),
}

impl ThreadItem {
    pub fn id(&self) -> &str {
        match self {
            ThreadItem::UserMessage(item) => &item.id,
            ThreadItem::AssistantMessage(item) => &item.id,
            ThreadItem::Widget(item) => &item.id,
        }
    }

    pub fn thread_id(&self) -> &str {
        match self {
            ThreadItem::UserMessage(item) => &item.thread_id,
            ThreadItem::AssistantMessage(item) => &item.thread_id,
            ThreadItem::Widget(item) => &item.thread_id,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            ThreadItem::UserMessage(item) => item.created_at,
            ThreadItem::AssistantMessage(item) => item.created_at,
            ThreadItem::Widget(item) => item.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserMessageItem {
    pub id: String,
    pub thread_id: String,
    pub created_at: DateTime<Utc>,
    pub content: Vec<UserContent>,
}

impl UserMessageItem {
    /// Concatenated text of all `Text` parts, in order. Tags are skipped.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|part| match part {
                UserContent::Text { text } => Some(text.as_str()),
                UserContent::Tag { .. } => None,
            })
            .collect()
    }
}

/// User input parts. Tags are opaque mention markers carried through
/// untouched; the core never interprets them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UserContent {
    Text {
        text: String,
    },
    Tag {
        name: String,
        #[serde(default)]
        data: Value,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantMessageItem {
    pub id: String,
    pub thread_id: String,
    pub created_at: DateTime<Utc>,
    pub content: Vec<AssistantContent>,
}

impl AssistantMessageItem {
    /// Concatenated display/model text of all parts, in order.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .map(|part| match part {
                AssistantContent::Text { text } => text.as_str(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssistantContent {
    Text { text: String },
}

/// An inert UI payload. Constructed once by the action dispatcher and never
/// inspected afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetItem {
    pub id: String,
    pub thread_id: String,
    pub created_at: DateTime<Utc>,
    pub widget: WidgetNode,
}
