use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;

use crate::actions::dispatch_action;
use crate::error::EngineError;
use crate::request::{ActionRequest, ClientRequest, MessageRequest};
use crate::respond::spawn_respond;
use weft_agent::AgentRunner;
use weft_store::ThreadStore;
use weft_types::{Thread, ThreadItem, ThreadStreamEvent, UserMessageItem};

/// Single entry point for the chat surface. Deserializes the raw body,
/// routes to the conversational or action path, and reports which response
/// mode the caller should use.
pub struct Engine {
    store: Arc<dyn ThreadStore>,
    runner: Arc<dyn AgentRunner>,
    instructions: String,
    share_base_url: String,
}

/// How the transport should answer: a live event stream for conversational
/// turns, a single JSON document for actions.
#[derive(Debug)]
pub enum EngineResponse {
    Stream(mpsc::Receiver<ThreadStreamEvent>),
    Json(ThreadStreamEvent),
}

impl Engine {
    pub fn new(
        store: Arc<dyn ThreadStore>,
        runner: Arc<dyn AgentRunner>,
        instructions: impl Into<String>,
        share_base_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            runner,
            instructions: instructions.into(),
            share_base_url: share_base_url.into(),
        }
    }

    pub async fn process(&self, body: &[u8]) -> Result<EngineResponse, EngineError> {
        let request: ClientRequest = serde_json::from_slice(body)
            .map_err(|e| EngineError::BadRequest(format!("malformed request body: {e}")))?;

        match request {
            ClientRequest::Message(message) => self.handle_message(message).await,
            ClientRequest::Action(action) => self.handle_action(action).await,
        }
    }

    /// Conversational path: resolve (or create) the thread, persist the
    /// user message, then stream the model's response.
    async fn handle_message(&self, request: MessageRequest) -> Result<EngineResponse, EngineError> {
        let thread = match request.thread_id {
            Some(id) => self.store.load_thread(&id).await?,
            None => {
                let thread = Thread::new(self.store.generate_item_id("thread"));
                self.store.save_thread(&thread).await?;
                tracing::info!(thread_id = %thread.id, "created thread");
                thread
            }
        };

        let item = ThreadItem::UserMessage(UserMessageItem {
            id: self.store.generate_item_id("message"),
            thread_id: thread.id.clone(),
            created_at: Utc::now(),
            content: request.input.content,
        });
        self.store.add_item(&thread.id, &item).await?;

        let events = spawn_respond(
            Arc::clone(&self.store),
            Arc::clone(&self.runner),
            self.instructions.clone(),
            thread,
        );
        Ok(EngineResponse::Stream(events))
    }

    /// Action path: no model involved, the single resulting event is the
    /// whole response document.
    async fn handle_action(&self, request: ActionRequest) -> Result<EngineResponse, EngineError> {
        let thread = self.store.load_thread(&request.thread_id).await?;
        let event = dispatch_action(
            self.store.as_ref(),
            &thread,
            &request.action,
            &self.share_base_url,
        );
        Ok(EngineResponse::Json(event))
    }
}
