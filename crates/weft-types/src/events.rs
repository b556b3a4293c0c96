use serde::{Deserialize, Serialize};

use crate::item::ThreadItem;

/// Outbound stream protocol for a conversational turn. A terminal event
/// (`item.done` or `error`) ends the stream; the client never sees a
/// silently truncated response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ThreadStreamEvent {
    /// Incremental assistant text, emitted in the runner's order with no
    /// buffering. `item_id` matches the finalized item that follows.
    #[serde(rename = "item.delta")]
    ItemDelta { item_id: String, delta: String },

    /// A finalized item, persisted (conversational path) or synthesized
    /// (action path).
    #[serde(rename = "item.done")]
    ItemDone { item: ThreadItem },

    /// Terminal failure. `allow_retry` distinguishes transient runner
    /// faults from permanent ones like an unknown action type.
    #[serde(rename = "error")]
    Error {
        code: ErrorCode,
        message: String,
        allow_retry: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    StreamError,
    UnknownAction,
}
