use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use serde::Serialize;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Error,
    Warning,
    Question,
}

/// Notification
///
/// A blocking modal shown after an action completes or fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub tone: Tone,
    pub title: String,
    pub text: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Success,
            title: title.into(),
            text: text.into(),
        }
    }

    pub fn error(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Error,
            title: title.into(),
            text: text.into(),
        }
    }

    /// Error modal carrying the server-provided (or generic) message.
    pub fn from_error(title: impl Into<String>, err: &ApiError) -> Self {
        Self::error(title, err.user_message())
    }

    pub fn is_error(&self) -> bool {
        self.tone == Tone::Error
    }
}

/// Prompt
///
/// A confirmation dialog shown before any mutating call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub tone: Tone,
    pub title: String,
    pub text: String,
    pub confirm_label: String,
}

impl Prompt {
    pub fn new(
        tone: Tone,
        title: impl Into<String>,
        text: impl Into<String>,
        confirm_label: impl Into<String>,
    ) -> Self {
        Self {
            tone,
            title: title.into(),
            text: text.into(),
            confirm_label: confirm_label.into(),
        }
    }
}

/// Confirm
///
/// Whatever renders the prompt and reports the user's answer.
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, prompt: &Prompt) -> bool;
}

/// ScriptedConfirm
///
/// Answers prompts from a fixed script and remembers what it was asked. Answers
/// `default_answer` once the script runs out.
#[derive(Clone)]
pub struct ScriptedConfirm {
    answers: Arc<Mutex<VecDeque<bool>>>,
    asked: Arc<Mutex<Vec<Prompt>>>,
    default_answer: bool,
}

impl ScriptedConfirm {
    pub fn always(answer: bool) -> Self {
        Self::script(Vec::new(), answer)
    }

    pub fn script(answers: Vec<bool>, default_answer: bool) -> Self {
        Self {
            answers: Arc::new(Mutex::new(answers.into())),
            asked: Arc::new(Mutex::new(Vec::new())),
            default_answer,
        }
    }

    pub fn prompts(&self) -> Vec<Prompt> {
        self.asked
            .lock()
            .map(|asked| asked.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Confirm for ScriptedConfirm {
    async fn confirm(&self, prompt: &Prompt) -> bool {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(prompt.clone());
        }
        self.answers
            .lock()
            .ok()
            .and_then(|mut answers| answers.pop_front())
            .unwrap_or(self.default_answer)
    }
}
