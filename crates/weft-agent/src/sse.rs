use std::collections::VecDeque;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};

use crate::runner::{Fragment, FragmentStream, RunnerError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatStreamChunk {
    pub choices: Vec<StreamChoice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamChoice {
    pub delta: Delta,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Delta {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatStreamChunk {
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.delta.content.as_deref())
    }

    pub fn is_done(&self) -> bool {
        self.choices
            .first()
            .and_then(|c| c.finish_reason.as_ref())
            .is_some()
    }
}

/// Parse a provider SSE byte stream into fragments. Text deltas pass
/// through in arrival order; the accumulated full text rides on the single
/// `MessageDone` emitted at `[DONE]` or the first finish_reason.
pub fn parse_fragment_stream<S, E>(byte_stream: S) -> FragmentStream
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Into<RunnerError> + Send + 'static,
{
    Box::pin(async_stream::stream! {
        let mut byte_chunks = Box::pin(byte_stream);
        let mut buffer = VecDeque::with_capacity(8192);
        let mut full_text = String::new();
        let mut done = false;

        while let Some(chunk_result) = byte_chunks.next().await {
            match chunk_result {
                Ok(bytes) => {
                    buffer.extend(bytes);

                    while let Some(newline_pos) = buffer.iter().position(|&b| b == b'\n') {
                        let line_bytes: Vec<u8> = buffer.drain(..=newline_pos).collect();

                        if let Ok(line_str) = std::str::from_utf8(&line_bytes) {
                            let line = line_str.trim();

                            if line.is_empty() {
                                continue;
                            }

                            if let Some(data) = line.strip_prefix("data: ") {
                                if data == "[DONE]" {
                                    if !done {
                                        done = true;
                                        yield Ok(Fragment::MessageDone { text: full_text.clone() });
                                    }
                                    break;
                                }

                                match serde_json::from_str::<ChatStreamChunk>(data) {
                                    Ok(chunk) => {
                                        if let Some(content) = chunk.content() {
                                            if !content.is_empty() {
                                                full_text.push_str(content);
                                                yield Ok(Fragment::TextDelta { text: content.to_string() });
                                            }
                                        }
                                        if chunk.is_done() && !done {
                                            done = true;
                                            yield Ok(Fragment::MessageDone { text: full_text.clone() });
                                        }
                                    }
                                    Err(e) => {
                                        yield Err(RunnerError::Provider(format!("Failed to parse stream chunk: {e}")));
                                        return;
                                    }
                                }
                            }
                        }
                    }

                    if done {
                        break;
                    }
                }
                Err(e) => {
                    yield Err(e.into());
                    return;
                }
            }
        }
    })
}
