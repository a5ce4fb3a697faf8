//! Server-sent event decoding for OpenAI-compatible chat completion streams.
//!
//! Upstream bytes arrive in arbitrary slices, so lines are reassembled in a
//! buffer before `data:` payloads are decoded into text deltas.

use std::collections::VecDeque;
use std::fmt::Display;

use bytes::Bytes;
use futures_util::{stream, Stream, StreamExt};
use serde::Deserialize;

use crate::errors::AppError;

const DONE_SENTINEL: &str = "[DONE]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    Data(String),
    Done,
}

/// Incremental line splitter for an SSE byte stream.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    /// Feeds one upstream slice and returns every event completed by it.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if let Some(event) = parse_line(&line) {
                events.push(event);
            }
        }
        events
    }

    /// Flushes a trailing line that was not newline-terminated.
    pub fn finish(&mut self) -> Option<SseEvent> {
        let rest = std::mem::take(&mut self.buffer);
        parse_line(&rest)
    }
}

/// Comments, blank lines and non-`data` fields carry nothing we relay.
fn parse_line(raw: &[u8]) -> Option<SseEvent> {
    let line = String::from_utf8_lossy(raw);
    let line = line.trim_end_matches(|c: char| c == '\r' || c == '\n');

    let data = line.strip_prefix("data:")?;
    let data = data.strip_prefix(' ').unwrap_or(data);

    match data.trim() {
        "" => None,
        DONE_SENTINEL => Some(SseEvent::Done),
        _ => Some(SseEvent::Data(data.to_string())),
    }
}

// ── Completion chunk payloads ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CompletionChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: Option<ChunkDelta>,
}

#[derive(Debug, Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

/// Extracts `choices[0].delta.content` from one event payload, empty when absent.
pub fn delta_text(data: &str) -> Result<String, AppError> {
    let chunk: CompletionChunk = serde_json::from_str(data).map_err(|e| AppError::StreamAborted {
        message: format!("undecodable completion chunk: {e}"),
    })?;

    if let Some(err) = chunk.error {
        return Err(AppError::StreamAborted { message: format!("provider reported an error: {err}") });
    }

    Ok(chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta)
        .and_then(|delta| delta.content)
        .unwrap_or_default())
}

struct DeltaState<S> {
    bytes: S,
    decoder: SseDecoder,
    pending: VecDeque<SseEvent>,
    exhausted: bool,
}

/// Turns a raw completion byte stream into a stream of text deltas.
///
/// Ends cleanly at `[DONE]` or end of input. A transport error or an
/// undecodable event yields one `Err` and then ends the stream.
pub fn text_deltas<S, E>(bytes: S) -> impl Stream<Item = Result<String, AppError>>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: Display,
{
    let state = DeltaState {
        bytes,
        decoder: SseDecoder::default(),
        pending: VecDeque::new(),
        exhausted: false,
    };

    stream::unfold(Some(state), |state| async move {
        let mut state = state?;
        loop {
            if let Some(event) = state.pending.pop_front() {
                return match event {
                    SseEvent::Done => None,
                    SseEvent::Data(data) => match delta_text(&data) {
                        Ok(text) => Some((Ok(text), Some(state))),
                        Err(e) => Some((Err(e), None)),
                    },
                };
            }

            if state.exhausted {
                return None;
            }

            match state.bytes.next().await {
                Some(Ok(chunk)) => {
                    let events = state.decoder.push(&chunk);
                    state.pending.extend(events);
                }
                Some(Err(e)) => {
                    return Some((Err(AppError::StreamAborted { message: e.to_string() }), None));
                }
                None => {
                    state.exhausted = true;
                    state.pending.extend(state.decoder.finish());
                }
            }
        }
    })
}
