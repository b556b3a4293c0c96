use chrono::Utc;

use crate::request::ActionPayload;
use weft_store::ThreadStore;
use weft_types::{
    ErrorCode, Thread, ThreadItem, ThreadStreamEvent, WidgetAction, WidgetItem, WidgetNode,
};

/// Dispatch a discrete client action without touching the model.
///
/// `share_thread` synthesizes a one-off widget carrying a copyable link;
/// it is emitted as a done event but not persisted to the thread. Unknown
/// types produce a single non-retryable error event and never raise.
pub fn dispatch_action(
    store: &dyn ThreadStore,
    thread: &Thread,
    action: &ActionPayload,
    share_base_url: &str,
) -> ThreadStreamEvent {
    match action.action_type.as_str() {
        "share_thread" => {
            let share_url = format!("{}/thread/{}", share_base_url, thread.id);
            let item = WidgetItem {
                id: store.generate_item_id("widget"),
                thread_id: thread.id.clone(),
                created_at: Utc::now(),
                widget: share_widget(&thread.id, &share_url),
            };
            tracing::info!(thread_id = %thread.id, "issued share widget");
            ThreadStreamEvent::ItemDone {
                item: ThreadItem::Widget(item),
            }
        }
        other => {
            tracing::warn!(action_type = other, "unknown action type");
            ThreadStreamEvent::Error {
                code: ErrorCode::UnknownAction,
                message: format!("Unknown action type: {other}"),
                allow_retry: false,
            }
        }
    }
}

fn share_widget(thread_id: &str, share_url: &str) -> WidgetNode {
    WidgetNode::Card {
        children: vec![WidgetNode::Col {
            children: vec![
                WidgetNode::Text {
                    text: "Share this conversation".to_string(),
                    size: Some("lg".to_string()),
                    weight: Some("bold".to_string()),
                    color: None,
                },
                WidgetNode::Text {
                    text: format!("Thread ID: {thread_id}"),
                    size: Some("sm".to_string()),
                    weight: None,
                    color: Some("secondary".to_string()),
                },
                WidgetNode::Button {
                    label: "Copy Link".to_string(),
                    on_click: WidgetAction {
                        action_type: "copy_to_clipboard".to_string(),
                        payload: serde_json::json!({ "text": share_url }),
                        handler: "client".to_string(),
                    },
                    style: Some("primary".to_string()),
                },
                WidgetNode::Text {
                    text: share_url.to_string(),
                    size: Some("sm".to_string()),
                    weight: None,
                    color: Some("secondary".to_string()),
                },
            ],
            gap: Some("md".to_string()),
        }],
    }
}
