use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use weft_types::{Page, SortOrder, Thread, ThreadItem};

/// Storage contract for threads and their ordered item lists.
///
/// Implementations may be in-memory, on disk, or remote. Two invariants
/// bind every backend: item ids are unique across the whole store, and a
/// thread's item list preserves insertion order (it is the sole order of
/// truth). No cross-request ordering is guaranteed for concurrent writers
/// against the same thread.
#[async_trait]
pub trait ThreadStore: Send + Sync {
    /// Upsert a thread by id. The first insert initializes its empty item
    /// list.
    async fn save_thread(&self, thread: &Thread) -> Result<()>;

    /// Load a thread, failing with `ThreadNotFound` if absent.
    async fn load_thread(&self, thread_id: &str) -> Result<Thread>;

    /// Remove a thread and all its items. Idempotent; an absent id is a
    /// no-op.
    async fn delete_thread(&self, thread_id: &str) -> Result<()>;

    /// Append an item to the thread's list. When the thread has no title
    /// yet and the item is a user message whose first content part is text,
    /// the title is derived from that text as a side effect.
    async fn add_item(&self, thread_id: &str, item: &ThreadItem) -> Result<()>;

    /// Replace the item with a matching id in place. No match is a silent
    /// no-op.
    async fn update_item(&self, thread_id: &str, item: &ThreadItem) -> Result<()>;

    /// Remove the matching item. An absent id is a no-op.
    async fn delete_item(&self, thread_id: &str, item_id: &str) -> Result<()>;

    async fn load_item(&self, thread_id: &str, item_id: &str) -> Result<Option<ThreadItem>>;

    /// Page through a thread's items in the requested direction over
    /// insertion order. `after` is an item-id cursor: only items strictly
    /// past it are returned, and an unknown cursor yields an empty page.
    async fn list_items(
        &self,
        thread_id: &str,
        after: Option<&str>,
        limit: usize,
        order: SortOrder,
    ) -> Result<Page<ThreadItem>>;

    /// Page through threads sorted by creation time (desc = newest first),
    /// with the same cursor semantics as `list_items`.
    async fn list_threads(
        &self,
        after: Option<&str>,
        limit: usize,
        order: SortOrder,
    ) -> Result<Page<Thread>>;

    /// Globally-unique opaque id, prefixed by `kind` for debuggability.
    /// The uuid suffix carries 122 bits of randomness.
    fn generate_item_id(&self, kind: &str) -> String {
        format!("{}_{}", kind, Uuid::new_v4().simple())
    }
}
