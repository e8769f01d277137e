#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use bytes::Bytes;
use chat_relay::config::DEFAULT_FALLBACK_REPLY;
use chat_relay::services::{
    agent::{AgentClient, AgentError, AgentInvocation, CompletionStream},
    prompt::PromptStyle,
    relay::{ChatRelay, RelaySettings},
    students::StaticDirectory,
};
use futures::{StreamExt, stream};

pub enum Script {
    Reply(Vec<&'static str>),
    Fail(AgentError),
    FailMidStream(Vec<&'static str>, AgentError),
    /// Replies "reply for <session id>" in slow chunks so concurrent calls interleave.
    EchoSession,
    Stall,
}

pub struct ScriptedAgent {
    script: Script,
    calls: Mutex<Vec<AgentInvocation>>,
}

impl ScriptedAgent {
    pub fn new(script: Script) -> Arc<Self> {
        Arc::new(Self { script, calls: Mutex::new(Vec::new()) })
    }

    pub fn calls(&self) -> Vec<AgentInvocation> {
        self.calls.lock().unwrap().clone()
    }
}

fn chunks(parts: &[&'static str]) -> Vec<Result<Bytes, AgentError>> {
    parts.iter().map(|p| Ok(Bytes::from_static(p.as_bytes()))).collect()
}

#[async_trait]
impl AgentClient for ScriptedAgent {
    async fn invoke(&self, invocation: AgentInvocation) -> Result<CompletionStream, AgentError> {
        self.calls.lock().unwrap().push(invocation.clone());

        match &self.script {
            Script::Reply(parts) => Ok(Box::pin(stream::iter(chunks(parts)))),
            Script::Fail(err) => Err(err.clone()),
            Script::FailMidStream(parts, err) => {
                let mut items = chunks(parts);
                items.push(Err(err.clone()));
                Ok(Box::pin(stream::iter(items)))
            }
            Script::EchoSession => {
                let parts = vec!["reply ".to_string(), "for ".to_string(), invocation.session_id];
                Ok(Box::pin(stream::iter(parts).then(|part| async move {
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    Ok::<_, AgentError>(Bytes::from(part))
                })))
            }
            Script::Stall => Ok(Box::pin(stream::pending::<Result<Bytes, AgentError>>())),
        }
    }
}

pub fn settings() -> RelaySettings {
    RelaySettings {
        agent_id: "4EU9JDZKML".to_string(),
        agent_alias_id: "TSTALIASID".to_string(),
        prompt_style: PromptStyle::Bracketed,
        fallback_reply: DEFAULT_FALLBACK_REPLY.to_string(),
        timeout: Duration::from_secs(5),
    }
}

pub fn relay_with(agent: Arc<ScriptedAgent>, settings: RelaySettings) -> ChatRelay {
    ChatRelay::new(Arc::new(StaticDirectory::builtin()), agent, settings)
}

pub fn relay(agent: Arc<ScriptedAgent>) -> ChatRelay {
    relay_with(agent, settings())
}
