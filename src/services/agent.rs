//! Conversational agent port.
//!
//! The relay only needs one capability from the hosted agent: send a prompt
//! for a session and read back the reply as an ordered stream of byte chunks.
//! [`AgentClient`] captures that so the HTTP and serverless entry points can
//! run against Bedrock in production and against a scripted stream in tests.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};
use thiserror::Error;

/// Lazy, finite completion. Consumed exactly once per request.
pub type CompletionStream = Pin<Box<dyn Stream<Item = Result<Bytes, AgentError>> + Send>>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentInvocation {
    pub agent_id: String,
    pub agent_alias_id: String,
    pub session_id: String,
    pub input_text: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AgentError {
    #[error("agent invocation failed: {0}")]
    Invoke(String),

    #[error("completion stream failed: {0}")]
    Stream(String),
}

#[async_trait]
pub trait AgentClient: Send + Sync {
    async fn invoke(&self, invocation: AgentInvocation) -> Result<CompletionStream, AgentError>;
}

/// Drain a completion in arrival order and decode it as text.
///
/// Bytes are joined before decoding so a multi-byte character split across
/// two chunks still decodes cleanly.
pub async fn collect_completion(mut stream: CompletionStream) -> Result<String, AgentError> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = stream.next().await {
        buf.extend_from_slice(&chunk?);
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
