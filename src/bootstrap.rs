// src/bootstrap.rs
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::{
    config::Settings,
    services::{
        bedrock::BedrockAgentClient,
        prompt::PromptStyle,
        relay::{ChatRelay, RelaySettings},
        students::{StaticDirectory, StudentDirectory},
    },
};

/// Wire the relay from validated settings. `default_style` applies when
/// `agent.prompt_style` is unset.
pub async fn build_relay(settings: &Settings, default_style: PromptStyle) -> anyhow::Result<ChatRelay> {
    let students = load_students(settings)?;
    let agent = BedrockAgentClient::from_region(settings.agent.region.clone()).await;

    let relay_settings = RelaySettings {
        agent_id: settings.agent.agent_id.clone().context("agent.agent_id is not set")?,
        agent_alias_id: settings
            .agent
            .agent_alias_id
            .clone()
            .context("agent.agent_alias_id is not set")?,
        prompt_style: settings.agent.prompt_style.unwrap_or(default_style),
        fallback_reply: settings.agent.fallback_reply.clone(),
        timeout: settings.agent.timeout(),
    };

    info!(
        agent_id = %relay_settings.agent_id,
        agent_alias_id = %relay_settings.agent_alias_id,
        region = %settings.agent.region,
        prompt_style = ?relay_settings.prompt_style,
        "agent configured"
    );

    Ok(ChatRelay::new(students, Arc::new(agent), relay_settings))
}

fn load_students(settings: &Settings) -> anyhow::Result<Arc<dyn StudentDirectory>> {
    let directory = match &settings.students.path {
        Some(path) => StaticDirectory::from_json_file(path)
            .with_context(|| format!("loading student roster from {}", path.display()))?,
        None => StaticDirectory::builtin(),
    };
    info!(students = directory.len(), "student directory loaded");
    Ok(Arc::new(directory))
}
