//! Bedrock Agents adapter for [`AgentClient`].

use async_trait::async_trait;
use aws_sdk_bedrockagentruntime::{
    Client,
    error::DisplayErrorContext,
    primitives::event_stream::EventReceiver,
    types::{ResponseStream, error::ResponseStreamError},
};
use bytes::Bytes;
use futures::{Stream, StreamExt, stream};

use super::agent::{AgentClient, AgentError, AgentInvocation, CompletionStream};

#[derive(Clone, Debug)]
pub struct BedrockAgentClient {
    client: Client,
}

impl BedrockAgentClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the default AWS credential chain, pinned to `region`.
    pub async fn from_region(region: impl Into<String>) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.into()))
            .load()
            .await;
        Self::new(Client::new(&sdk_config))
    }
}

#[async_trait]
impl AgentClient for BedrockAgentClient {
    async fn invoke(&self, invocation: AgentInvocation) -> Result<CompletionStream, AgentError> {
        let output = self
            .client
            .invoke_agent()
            .agent_id(invocation.agent_id)
            .agent_alias_id(invocation.agent_alias_id)
            .session_id(invocation.session_id)
            .input_text(invocation.input_text)
            .send()
            .await
            .map_err(|e| AgentError::Invoke(DisplayErrorContext(&e).to_string()))?;

        Ok(chunk_stream(output.completion))
    }
}

type Receiver = EventReceiver<ResponseStream, ResponseStreamError>;

fn chunk_stream(receiver: Receiver) -> CompletionStream {
    let events = stream::unfold(receiver, |mut receiver| async move {
        match receiver.recv().await {
            Ok(Some(event)) => Some((Ok(event), receiver)),
            Ok(None) => None,
            Err(e) => {
                let err = AgentError::Stream(DisplayErrorContext(&e).to_string());
                Some((Err(err), receiver))
            }
        }
    });
    completion_chunks(events)
}

/// Yield the payload of every `chunk` event. The stream ends after the first error.
fn completion_chunks<S>(events: S) -> CompletionStream
where
    S: Stream<Item = Result<ResponseStream, AgentError>> + Send + 'static,
{
    Box::pin(stream::unfold(Some(Box::pin(events)), |state| async move {
        let mut events = state?;
        loop {
            match events.next().await? {
                Ok(event) => {
                    if let Some(chunk) = chunk_bytes(event) {
                        return Some((Ok(chunk), Some(events)));
                    }
                }
                Err(e) => return Some((Err(e), None)),
            }
        }
    }))
}

/// Trace and other non-chunk events carry nothing for the caller.
fn chunk_bytes(event: ResponseStream) -> Option<Bytes> {
    match event {
        ResponseStream::Chunk(part) => part.bytes().map(|blob| Bytes::copy_from_slice(blob.as_ref())),
        other => {
            tracing::trace!(event = ?other, "skipping non-chunk agent event");
            None
        }
    }
}
