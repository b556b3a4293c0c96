use chrono::Utc;
use weft_types::{
    AssistantContent, AssistantMessageItem, ErrorCode, ThreadItem, ThreadStreamEvent, UserContent,
    UserMessageItem,
};

#[test]
fn test_item_delta_wire_tag() {
    let event = ThreadStreamEvent::ItemDelta {
        item_id: "message_abc".to_string(),
        delta: "Hi".to_string(),
    };

    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("\"type\":\"item.delta\""));
    assert!(json.contains("\"item_id\":\"message_abc\""));
    assert!(json.contains("\"delta\":\"Hi\""));
}

#[test]
fn test_item_done_wire_tag() {
    let item = ThreadItem::AssistantMessage(AssistantMessageItem {
        id: "message_abc".to_string(),
        thread_id: "thread_xyz".to_string(),
        created_at: Utc::now(),
        content: vec![AssistantContent::Text {
            text: "Hello".to_string(),
        }],
    });
    let event = ThreadStreamEvent::ItemDone { item };

    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("\"type\":\"item.done\""));
    assert!(json.contains("\"assistant_message\""));
}

#[test]
fn test_error_wire_shape() {
    let event = ThreadStreamEvent::Error {
        code: ErrorCode::StreamError,
        message: "rate limited".to_string(),
        allow_retry: true,
    };

    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("\"type\":\"error\""));
    assert!(json.contains("\"code\":\"stream_error\""));
    assert!(json.contains("\"allow_retry\":true"));
}

#[test]
fn test_error_event_roundtrip() {
    let event = ThreadStreamEvent::Error {
        code: ErrorCode::UnknownAction,
        message: "unknown action type: bogus".to_string(),
        allow_retry: false,
    };

    let json = serde_json::to_string(&event).unwrap();
    let parsed: ThreadStreamEvent = serde_json::from_str(&json).unwrap();
    match parsed {
        ThreadStreamEvent::Error {
            code,
            message,
            allow_retry,
        } => {
            assert_eq!(code, ErrorCode::UnknownAction);
            assert!(message.contains("bogus"));
            assert!(!allow_retry);
        }
        _ => panic!("Expected Error variant"),
    }
}

#[test]
fn test_user_message_text_skips_tags() {
    let item = UserMessageItem {
        id: "message_1".to_string(),
        thread_id: "thread_1".to_string(),
        created_at: Utc::now(),
        content: vec![
            UserContent::Text {
                text: "Hello ".to_string(),
            },
            UserContent::Tag {
                name: "project".to_string(),
                data: serde_json::json!({"id": 7}),
            },
            UserContent::Text {
                text: "world".to_string(),
            },
        ],
    };

    assert_eq!(item.text(), "Hello world");
}

#[test]
fn test_user_content_wire_tags() {
    let part = UserContent::Text {
        text: "hi".to_string(),
    };
    let json = serde_json::to_string(&part).unwrap();
    assert!(json.contains("\"type\":\"text\""));

    let parsed: UserContent =
        serde_json::from_str(r#"{"type":"tag","name":"doc","data":{"id":1}}"#).unwrap();
    match parsed {
        UserContent::Tag { name, .. } => assert_eq!(name, "doc"),
        _ => panic!("Expected Tag variant"),
    }
}

#[test]
fn test_assistant_message_concatenates_parts() {
    let item = AssistantMessageItem {
        id: "message_2".to_string(),
        thread_id: "thread_1".to_string(),
        created_at: Utc::now(),
        content: vec![
            AssistantContent::Text {
                text: "Hi".to_string(),
            },
            AssistantContent::Text {
                text: " there".to_string(),
            },
        ],
    };

    assert_eq!(item.text(), "Hi there");
}

#[test]
fn test_thread_item_roundtrip() {
    let item = ThreadItem::UserMessage(UserMessageItem {
        id: "message_3".to_string(),
        thread_id: "thread_9".to_string(),
        created_at: Utc::now(),
        content: vec![UserContent::Text {
            text: "ping".to_string(),
        }],
    });

    let json = serde_json::to_string(&item).unwrap();
    assert!(json.contains("\"type\":\"user_message\""));

    let parsed: ThreadItem = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.id(), "message_3");
    assert_eq!(parsed.thread_id(), "thread_9");
}
