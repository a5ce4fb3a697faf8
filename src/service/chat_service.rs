use bytes::Bytes;
use futures_util::future;
use futures_util::stream::{BoxStream, Stream, StreamExt};
use tracing::{error, info, info_span, Instrument, Span};
use uuid::Uuid;

use crate::agent::GroqAgentService;
use crate::errors::AppError;
use crate::models::ChatRequest;
use crate::protocol::encode_text_part;

pub type ChatByteStream = BoxStream<'static, Result<Bytes, AppError>>;

#[derive(Clone)]
pub struct ChatService {
    agent: GroqAgentService,
}

impl ChatService {
    pub fn new(agent: GroqAgentService) -> Self {
        Self { agent }
    }

    /// Opens the upstream completion and returns the framed response body.
    ///
    /// Errors returned here happen before any byte is written to the client.
    pub async fn stream_reply(&self, request: ChatRequest) -> Result<ChatByteStream, AppError> {
        let request_id = Uuid::new_v4();
        let span = info_span!("chat_stream", %request_id);
        let turns = request.messages.len();

        let deltas = self
            .agent
            .stream_chat(request.messages)
            .instrument(span.clone())
            .await?;

        info!(parent: &span, turns, "completion stream opened");
        Ok(frame_deltas(deltas, span).boxed())
    }
}

/// Frames each non-empty delta as one text-part line; empty deltas are dropped.
/// An upstream error is passed through once, which aborts the response body.
pub fn frame_deltas<S>(deltas: S, span: Span) -> impl Stream<Item = Result<Bytes, AppError>>
where
    S: Stream<Item = Result<String, AppError>>,
{
    deltas.filter_map(move |delta| {
        let frame = match delta {
            Ok(text) => encode_text_part(&text).map(|line| Ok(Bytes::from(line))),
            Err(e) => {
                error!(parent: &span, "chat stream aborted: {e}");
                Some(Err(e))
            }
        };
        future::ready(frame)
    })
}
