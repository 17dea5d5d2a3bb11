use std::fmt;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use super::Event;
use super::Message;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendName {
    Ollama,
    Cerebras,
}

impl fmt::Display for BackendName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendName::Ollama => return write!(f, "Ollama"),
            BackendName::Cerebras => return write!(f, "Cerebras"),
        }
    }
}

/// What a backend gets asked. The local backend prompts with the full
/// history and ignores nothing; the remote backend gets the bare text and an
/// empty history, so the two models never see each other's answers.
pub struct BackendPrompt {
    pub text: String,
    pub history: Vec<Message>,
}

impl BackendPrompt {
    pub fn new(text: &str) -> BackendPrompt {
        return BackendPrompt {
            text: text.to_string(),
            history: vec![],
        };
    }

    pub fn with_history(text: &str, history: &[Message]) -> BackendPrompt {
        return BackendPrompt {
            text: text.to_string(),
            history: history.to_vec(),
        };
    }
}

/// One streaming update. `text` is the cumulative output so far rather than
/// a delta, so a pane can be redrawn by plain replacement and a dropped
/// update costs nothing.
pub struct BackendResponse {
    pub backend: BackendName,
    pub text: String,
    pub done: bool,
}

pub type BackendBox = Box<dyn Backend + Send + Sync>;

#[async_trait]
pub trait Backend {
    fn name(&self) -> BackendName;

    /// Used at startup to verify the backend is configured and reachable.
    async fn health_check(&self) -> Result<()>;

    /// Streams a completion, sending a `BackendResponse` with the cumulative
    /// text through the channel after every chunk, followed by exactly one
    /// response flagged `done` carrying the final text. The same final text
    /// is returned.
    ///
    /// Failures the backend can express as display text are reported through
    /// the channel as that text, not as an `Err`.
    async fn get_completion<'a>(
        &self,
        prompt: BackendPrompt,
        tx: &'a mpsc::UnboundedSender<Event>,
    ) -> Result<String>;
}
