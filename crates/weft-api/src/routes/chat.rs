use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    response::{
        sse::{Event, Sse},
        IntoResponse, Response,
    },
    Json,
};
use futures::StreamExt;
use tokio_stream::wrappers::ReceiverStream;

use crate::{error::ApiResult, state::AppState};
use weft_engine::EngineResponse;

/// The single chat endpoint. The engine decides the response mode:
/// conversational turns stream events, actions answer with one JSON
/// document.
pub async fn chat(State(state): State<Arc<AppState>>, body: Bytes) -> ApiResult<Response> {
    match state.engine.process(&body).await? {
        EngineResponse::Stream(receiver) => {
            let event_stream = ReceiverStream::new(receiver)
                .map(|event| Event::default().json_data(&event));
            Ok(Sse::new(event_stream).into_response())
        }
        EngineResponse::Json(event) => Ok(Json(event).into_response()),
    }
}
