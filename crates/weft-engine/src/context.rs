use weft_agent::Turn;
use weft_types::ThreadItem;

/// How many recent items feed a model call.
pub const CONTEXT_WINDOW: usize = 20;

/// Project chronologically ordered items into role-tagged model input.
///
/// User and assistant messages map to their concatenated text; items whose
/// projection is empty are omitted rather than emitted as blank turns, and
/// widgets never reach the model.
pub fn project_turns(items: &[ThreadItem]) -> Vec<Turn> {
    items
        .iter()
        .filter_map(|item| match item {
            ThreadItem::UserMessage(message) => {
                let text = message.text();
                (!text.is_empty()).then(|| Turn::user(text))
            }
            ThreadItem::AssistantMessage(message) => {
                let text = message.text();
                (!text.is_empty()).then(|| Turn::assistant(text))
            }
            ThreadItem::Widget(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use weft_agent::Role;
    use weft_types::{
        AssistantContent, AssistantMessageItem, UserContent, UserMessageItem, WidgetItem,
        WidgetNode,
    };

    fn user(text: &str) -> ThreadItem {
        ThreadItem::UserMessage(UserMessageItem {
            id: "message_u".to_string(),
            thread_id: "thread_1".to_string(),
            created_at: Utc::now(),
            content: vec![UserContent::Text {
                text: text.to_string(),
            }],
        })
    }

    fn assistant(content: Vec<AssistantContent>) -> ThreadItem {
        ThreadItem::AssistantMessage(AssistantMessageItem {
            id: "message_a".to_string(),
            thread_id: "thread_1".to_string(),
            created_at: Utc::now(),
            content,
        })
    }

    #[test]
    fn test_empty_assistant_item_is_omitted() {
        let items = vec![user("hi"), assistant(vec![])];
        let turns = project_turns(&items);
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[0].text, "hi");
    }

    #[test]
    fn test_widget_items_are_excluded() {
        let items = vec![
            user("share please"),
            ThreadItem::Widget(WidgetItem {
                id: "widget_1".to_string(),
                thread_id: "thread_1".to_string(),
                created_at: Utc::now(),
                widget: WidgetNode::Card { children: vec![] },
            }),
        ];
        let turns = project_turns(&items);
        assert_eq!(turns.len(), 1);
    }

    #[test]
    fn test_tag_only_user_message_is_omitted() {
        let items = vec![ThreadItem::UserMessage(UserMessageItem {
            id: "message_t".to_string(),
            thread_id: "thread_1".to_string(),
            created_at: Utc::now(),
            content: vec![UserContent::Tag {
                name: "doc".to_string(),
                data: serde_json::Value::Null,
            }],
        })];
        assert!(project_turns(&items).is_empty());
    }

    #[test]
    fn test_roles_and_order_preserved() {
        let items = vec![
            user("question"),
            assistant(vec![AssistantContent::Text {
                text: "answer".to_string(),
            }]),
            user("follow-up"),
        ];
        let turns = project_turns(&items);
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[1].role, Role::Assistant);
        assert_eq!(turns[1].text, "answer");
        assert_eq!(turns[2].text, "follow-up");
    }
}
