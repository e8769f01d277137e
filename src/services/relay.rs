// src/services/relay.rs
use std::{sync::Arc, time::Duration};

use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::message::{ChatRequest, ChatResponse};

use super::{
    agent::{AgentClient, AgentError, AgentInvocation, collect_completion},
    message_id::MessageIdGenerator,
    prompt::{PromptStyle, build_prompt},
    students::StudentDirectory,
};

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("student {0} not found")]
    NotFound(String),

    #[error(transparent)]
    Upstream(#[from] AgentError),

    #[error("agent did not finish within {0:?}")]
    Timeout(Duration),
}

#[derive(Clone, Debug)]
pub struct RelaySettings {
    pub agent_id: String,
    pub agent_alias_id: String,
    pub prompt_style: PromptStyle,
    pub fallback_reply: String,
    pub timeout: Duration,
}

/// Forwards a student's message, prefixed with their profile, to the agent and
/// relays the assembled reply. Holds no per-session state.
pub struct ChatRelay {
    students: Arc<dyn StudentDirectory>,
    agent: Arc<dyn AgentClient>,
    settings: RelaySettings,
    ids: MessageIdGenerator,
}

impl ChatRelay {
    pub fn new(
        students: Arc<dyn StudentDirectory>,
        agent: Arc<dyn AgentClient>,
        settings: RelaySettings,
    ) -> Self {
        Self { students, agent, settings, ids: MessageIdGenerator::new() }
    }

    #[tracing::instrument(
        name = "chat",
        skip(self, request),
        fields(
            student_id = %request.student_id,
            conversation_type = %request.conversation_type,
            session_id = tracing::field::Empty,
        )
    )]
    pub async fn handle(&self, request: ChatRequest) -> Result<ChatResponse, RelayError> {
        // A supplied session id is forwarded verbatim, even if blank.
        let session_id = request
            .session_id
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        tracing::Span::current().record("session_id", session_id.as_str());

        let student = self
            .students
            .get_by_id(&request.student_id)
            .ok_or_else(|| RelayError::NotFound(request.student_id.clone()))?;

        let invocation = AgentInvocation {
            agent_id: self.settings.agent_id.clone(),
            agent_alias_id: self.settings.agent_alias_id.clone(),
            session_id: session_id.clone(),
            input_text: build_prompt(
                self.settings.prompt_style,
                &student,
                &request.conversation_type,
                &request.message,
            ),
        };

        let reply = tokio::time::timeout(self.settings.timeout, async {
            let completion = self.agent.invoke(invocation).await?;
            Ok::<_, AgentError>(collect_completion(completion).await?)
        })
        .await
        .map_err(|_| RelayError::Timeout(self.settings.timeout))??;

        let response = if reply.is_empty() {
            warn!("agent returned an empty completion");
            self.settings.fallback_reply.clone()
        } else {
            reply
        };

        let message_id = self.ids.next_id();
        info!(%message_id, reply_len = response.len(), "relayed agent reply");

        Ok(ChatResponse { response, message_id, session_id })
    }
}
