// src/services/prompt.rs
use serde::Deserialize;

use super::students::StudentRecord;

/// Label layout of the context prefix sent to the agent.
///
/// The agent-side instructions were tuned against these exact layouts, so the
/// field order and wording must not drift.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptStyle {
    /// Layout used by the standalone server.
    #[default]
    Bracketed,
    /// Layout used by the serverless function.
    Plain,
}

pub fn build_prompt(
    style: PromptStyle,
    student: &StudentRecord,
    conversation_type: &str,
    message: &str,
) -> String {
    let s = &student.scores;
    match style {
        PromptStyle::Bracketed => format!(
            "[Student: {}, {}, Age {}]\n\
             [Scores - Technical: {}/100, Musicianship: {}/100, Repertoire: {}/100, Artistry: {}/100]\n\
             [Context: {}]\n\
             [Conversation Type: {}]\n\
             \n\
             Student: {}",
            student.name,
            student.instrument,
            student.age,
            s.technical,
            s.musicianship,
            s.repertoire,
            s.artistry,
            student.context,
            conversation_type,
            message,
        ),
        PromptStyle::Plain => format!(
            "Student: {}, {}, Age {}\n\
             Technical Skills: {}/100, Musicianship: {}/100, Repertoire: {}/100, Artistry: {}/100\n\
             Context: {}\n\
             Conversation Type: {}\n\
             \n\
             {}",
            student.name,
            student.instrument,
            student.age,
            s.technical,
            s.musicianship,
            s.repertoire,
            s.artistry,
            student.context,
            conversation_type,
            message,
        ),
    }
}
