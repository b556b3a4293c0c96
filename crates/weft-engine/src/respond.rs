use std::sync::Arc;

use chrono::Utc;
use futures::StreamExt;
use tokio::sync::mpsc;

use crate::context::{project_turns, CONTEXT_WINDOW};
use weft_agent::{AgentRunner, Fragment};
use weft_store::ThreadStore;
use weft_types::{
    AssistantContent, AssistantMessageItem, ErrorCode, SortOrder, Thread, ThreadItem,
    ThreadStreamEvent,
};

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamState {
    Idle,
    Streaming,
    Completed,
    Errored,
}

/// Spawn the conversational response flow in the background and hand back
/// the event receiver. Dropping the receiver cancels the flow: the next
/// failed send stops the pull task, which drops the runner stream.
pub fn spawn_respond(
    store: Arc<dyn ThreadStore>,
    runner: Arc<dyn AgentRunner>,
    instructions: String,
    thread: Thread,
) -> mpsc::Receiver<ThreadStreamEvent> {
    let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

    tokio::spawn(async move {
        ResponseStream::new(store, runner, instructions, thread, tx)
            .run()
            .await;
    });

    rx
}

/// Per-request state machine: `Idle → Streaming → {Completed, Errored}`.
/// Runner fragments are forwarded as events in emission order with no
/// buffering; every expected failure is converted into a single terminal
/// error event rather than escaping this boundary.
struct ResponseStream {
    store: Arc<dyn ThreadStore>,
    runner: Arc<dyn AgentRunner>,
    instructions: String,
    thread: Thread,
    tx: mpsc::Sender<ThreadStreamEvent>,
    state: StreamState,
}

impl ResponseStream {
    fn new(
        store: Arc<dyn ThreadStore>,
        runner: Arc<dyn AgentRunner>,
        instructions: String,
        thread: Thread,
        tx: mpsc::Sender<ThreadStreamEvent>,
    ) -> Self {
        Self {
            store,
            runner,
            instructions,
            thread,
            tx,
            state: StreamState::Idle,
        }
    }

    async fn run(mut self) {
        if let Err(fault) = self.drive().await {
            if self.state != StreamState::Completed {
                self.state = StreamState::Errored;
                tracing::warn!(
                    thread_id = %self.thread.id,
                    error = %fault,
                    "response stream failed"
                );
                let _ = self
                    .tx
                    .send(ThreadStreamEvent::Error {
                        code: ErrorCode::StreamError,
                        message: fault.to_string(),
                        allow_retry: true,
                    })
                    .await;
            }
        }
    }

    async fn drive(&mut self) -> anyhow::Result<()> {
        let page = self
            .store
            .list_items(&self.thread.id, None, CONTEXT_WINDOW, SortOrder::Desc)
            .await?;

        // The runner expects the most recent turn last.
        let mut items = page.data;
        items.reverse();
        let turns = project_turns(&items);

        let mut fragments = self.runner.run(&self.instructions, &turns).await?;
        self.state = StreamState::Streaming;

        // Deltas and the finalized item share this id.
        let item_id = self.store.generate_item_id("message");

        while let Some(fragment) = fragments.next().await {
            match fragment? {
                Fragment::TextDelta { text } => {
                    let event = ThreadStreamEvent::ItemDelta {
                        item_id: item_id.clone(),
                        delta: text,
                    };
                    if self.tx.send(event).await.is_err() {
                        tracing::debug!(thread_id = %self.thread.id, "client disconnected mid-stream");
                        return Ok(());
                    }
                }
                Fragment::MessageDone { text } => {
                    let item = ThreadItem::AssistantMessage(AssistantMessageItem {
                        id: item_id.clone(),
                        thread_id: self.thread.id.clone(),
                        created_at: Utc::now(),
                        content: vec![AssistantContent::Text { text }],
                    });
                    self.store.add_item(&self.thread.id, &item).await?;
                    self.state = StreamState::Completed;
                    let _ = self.tx.send(ThreadStreamEvent::ItemDone { item }).await;
                    return Ok(());
                }
            }
        }

        anyhow::bail!("model stream ended without completing the message")
    }
}
