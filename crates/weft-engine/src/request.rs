use serde::Deserialize;
use serde_json::Value;

use weft_types::UserContent;

/// Inbound payload for the single chat endpoint, discriminated by shape:
/// an `action` field routes to the dispatcher, an `input` field routes to
/// the conversational path.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ClientRequest {
    Action(ActionRequest),
    Message(MessageRequest),
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    /// Absent id means "start a new thread".
    #[serde(default)]
    pub thread_id: Option<String>,
    pub input: UserInput,
}

#[derive(Debug, Deserialize)]
pub struct UserInput {
    pub content: Vec<UserContent>,
}

#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub thread_id: String,
    pub action: ActionPayload,
    /// The widget item that triggered the action, when there was one.
    #[serde(default)]
    pub sender_item_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActionPayload {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default)]
    pub payload: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_shape_parses() {
        let body = r#"{"thread_id":"thread_1","input":{"content":[{"type":"text","text":"hi"}]}}"#;
        let request: ClientRequest = serde_json::from_str(body).unwrap();
        match request {
            ClientRequest::Message(message) => {
                assert_eq!(message.thread_id.as_deref(), Some("thread_1"));
                assert_eq!(message.input.content.len(), 1);
            }
            _ => panic!("Expected Message shape"),
        }
    }

    #[test]
    fn test_message_without_thread_id() {
        let body = r#"{"input":{"content":[{"type":"text","text":"hi"}]}}"#;
        let request: ClientRequest = serde_json::from_str(body).unwrap();
        assert!(matches!(
            request,
            ClientRequest::Message(MessageRequest { thread_id: None, .. })
        ));
    }

    #[test]
    fn test_action_shape_parses() {
        let body = r#"{"thread_id":"thread_1","action":{"type":"share_thread","payload":{}},"sender_item_id":"widget_9"}"#;
        let request: ClientRequest = serde_json::from_str(body).unwrap();
        match request {
            ClientRequest::Action(action) => {
                assert_eq!(action.action.action_type, "share_thread");
                assert_eq!(action.sender_item_id.as_deref(), Some("widget_9"));
            }
            _ => panic!("Expected Action shape"),
        }
    }

    #[test]
    fn test_garbage_body_is_rejected() {
        let result = serde_json::from_str::<ClientRequest>(r#"{"neither":"shape"}"#);
        assert!(result.is_err());
    }
}
