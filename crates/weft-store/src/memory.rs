use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{Result, StoreError};
use crate::store::ThreadStore;
use weft_types::{Page, SortOrder, Thread, ThreadItem, UserContent};

const TITLE_MAX_CHARS: usize = 50;

/// Volatile reference backend. Threads and item lists live behind a single
/// `RwLock`, so a cascade delete is atomic; there is deliberately no
/// per-thread lock, and concurrent appends to one thread may interleave in
/// either order.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    threads: HashMap<String, Thread>,
    items: HashMap<String, Vec<ThreadItem>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ThreadStore for MemoryStore {
    async fn save_thread(&self, thread: &Thread) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.items.entry(thread.id.clone()).or_default();
        inner.threads.insert(thread.id.clone(), thread.clone());
        Ok(())
    }

    async fn load_thread(&self, thread_id: &str) -> Result<Thread> {
        let inner = self.inner.read().await;
        inner
            .threads
            .get(thread_id)
            .cloned()
            .ok_or_else(|| StoreError::ThreadNotFound(thread_id.to_string()))
    }

    async fn delete_thread(&self, thread_id: &str) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.threads.remove(thread_id);
        inner.items.remove(thread_id);
        Ok(())
    }

    async fn add_item(&self, thread_id: &str, item: &ThreadItem) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner
            .items
            .entry(thread_id.to_string())
            .or_default()
            .push(item.clone());

        // First user text item names the thread; the title is never
        // overwritten afterwards.
        if let Some(thread) = inner.threads.get_mut(thread_id) {
            if thread.title.is_none() {
                if let ThreadItem::UserMessage(message) = item {
                    if let Some(UserContent::Text { text }) = message.content.first() {
                        thread.title = derive_title(text);
                        if let Some(ref title) = thread.title {
                            tracing::debug!(thread_id, title, "derived thread title");
                        }
                    }
                }
            }
        }
        Ok(())
    }

    async fn update_item(&self, thread_id: &str, item: &ThreadItem) -> Result<()> {
        let mut inner = self.inner.write().await;
        if let Some(items) = inner.items.get_mut(thread_id) {
            if let Some(existing) = items.iter_mut().find(|i| i.id() == item.id()) {
                *existing = item.clone();
            }
        }
        Ok(())
    }

    async fn delete_item(&self, thread_id: &str, item_id: &str) -> Result<()> {
        let mut inner = self.inner.write().await;
        if let Some(items) = inner.items.get_mut(thread_id) {
            items.retain(|i| i.id() != item_id);
        }
        Ok(())
    }

    async fn load_item(&self, thread_id: &str, item_id: &str) -> Result<Option<ThreadItem>> {
        let inner = self.inner.read().await;
        Ok(inner
            .items
            .get(thread_id)
            .and_then(|items| items.iter().find(|i| i.id() == item_id))
            .cloned())
    }

    async fn list_items(
        &self,
        thread_id: &str,
        after: Option<&str>,
        limit: usize,
        order: SortOrder,
    ) -> Result<Page<ThreadItem>> {
        let inner = self.inner.read().await;
        let mut items = inner.items.get(thread_id).cloned().unwrap_or_default();
        if order == SortOrder::Desc {
            items.reverse();
        }
        Ok(paginate(items, after, limit, |item| item.id()))
    }

    async fn list_threads(
        &self,
        after: Option<&str>,
        limit: usize,
        order: SortOrder,
    ) -> Result<Page<Thread>> {
        let inner = self.inner.read().await;
        let mut threads: Vec<Thread> = inner.threads.values().cloned().collect();
        threads.sort_by_key(|t| t.created_at);
        if order == SortOrder::Desc {
            threads.reverse();
        }
        Ok(paginate(threads, after, limit, |thread| &thread.id))
    }
}

/// Cursor + limit over an already-ordered slice. The cursor is exclusive:
/// only entries strictly past it are returned, and an unknown cursor yields
/// an empty page.
fn paginate<T, F>(mut entries: Vec<T>, after: Option<&str>, limit: usize, id_of: F) -> Page<T>
where
    F: Fn(&T) -> &str,
{
    if let Some(cursor) = after {
        match entries.iter().position(|e| id_of(e) == cursor) {
            Some(index) => {
                entries.drain(..=index);
            }
            None => entries.clear(),
        }
    }

    let has_more = entries.len() > limit;
    let next_cursor = if has_more {
        limit
            .checked_sub(1)
            .and_then(|i| entries.get(i))
            .map(|e| id_of(e).to_string())
    } else {
        None
    };
    entries.truncate(limit);

    Page {
        data: entries,
        has_more,
        after: next_cursor,
    }
}

/// First 50 characters of the text, trimmed, with an ellipsis when the
/// source ran longer. Whitespace-only text produces no title.
fn derive_title(text: &str) -> Option<String> {
    let truncated: String = text.chars().take(TITLE_MAX_CHARS).collect();
    let title = truncated.trim();
    if title.is_empty() {
        return None;
    }
    if text.chars().count() <= TITLE_MAX_CHARS {
        Some(title.to_string())
    } else {
        Some(format!("{title}..."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_title_short_text() {
        assert_eq!(derive_title("Hello"), Some("Hello".to_string()));
    }

    #[test]
    fn test_derive_title_truncates_with_ellipsis() {
        let text = "a".repeat(60);
        let title = derive_title(&text).unwrap();
        assert_eq!(title, format!("{}...", "a".repeat(50)));
    }

    #[test]
    fn test_derive_title_exactly_fifty_chars() {
        let text = "b".repeat(50);
        assert_eq!(derive_title(&text), Some(text));
    }

    #[test]
    fn test_derive_title_whitespace_only() {
        assert_eq!(derive_title("   "), None);
    }
}
