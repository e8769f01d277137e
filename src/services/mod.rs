// src/services/mod.rs
pub mod agent;
pub mod bedrock;
pub mod message_id;
pub mod prompt;
pub mod relay;
pub mod students;
