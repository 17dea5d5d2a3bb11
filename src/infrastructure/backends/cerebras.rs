#[cfg(test)]
#[path = "cerebras_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use serde::Deserialize;
use serde::Serialize;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use tokio_util::io::StreamReader;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;
use crate::domain::models::BackendName;
use crate::domain::models::BackendPrompt;
use crate::domain::models::BackendResponse;
use crate::domain::models::Event;

fn convert_err(err: reqwest::Error) -> std::io::Error {
    let err_msg = err.to_string();
    return std::io::Error::new(std::io::ErrorKind::Interrupted, err_msg);
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct MessageRequest {
    role: String,
    content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<MessageRequest>,
    stream: bool,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionDeltaResponse {
    content: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionChoiceResponse {
    delta: CompletionDeltaResponse,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoiceResponse>,
}

pub struct Cerebras {
    url: String,
    token: String,
}

impl Default for Cerebras {
    fn default() -> Cerebras {
        return Cerebras {
            url: Config::get(ConfigKey::CerebrasURL),
            token: Config::get(ConfigKey::CerebrasAPIKey),
        };
    }
}

impl Cerebras {
    async fn stream_completion<'a>(
        &self,
        prompt: &BackendPrompt,
        tx: &'a mpsc::UnboundedSender<Event>,
    ) -> Result<String> {
        let req = CompletionRequest {
            model: Config::get(ConfigKey::RemoteModel),
            messages: vec![MessageRequest {
                role: "user".to_string(),
                content: prompt.text.to_string(),
            }],
            stream: true,
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/v1/chat/completions", url = self.url))
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            let code = res.status().as_u16();
            tracing::error!(status = code, "Failed to make completion request to Cerebras");
            bail!("completion request returned status code {code}");
        }

        let stream = res.bytes_stream().map_err(convert_err);
        let mut lines_reader = StreamReader::new(stream).lines();

        let mut accumulator = String::new();
        while let Ok(line) = lines_reader.next_line().await {
            if line.is_none() {
                break;
            }

            let mut cleaned_line = line.unwrap().trim().to_string();
            if cleaned_line.starts_with("data:") {
                cleaned_line = cleaned_line.split_off(5).trim().to_string();
            }
            if cleaned_line.is_empty() {
                continue;
            }
            if cleaned_line == "[DONE]" {
                break;
            }

            let chunk: CompletionResponse = serde_json::from_str(&cleaned_line)?;
            tracing::debug!(body = ?chunk, "Completion response");

            let token = chunk
                .choices
                .first()
                .and_then(|choice| {
                    return choice.delta.content.clone();
                })
                .unwrap_or_default();

            accumulator += &token;
            tx.send(Event::BackendStreamUpdate(BackendResponse {
                backend: BackendName::Cerebras,
                text: accumulator.to_string(),
                done: false,
            }))?;
        }

        return Ok(accumulator);
    }
}

#[async_trait]
impl Backend for Cerebras {
    fn name(&self) -> BackendName {
        return BackendName::Cerebras;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.token.is_empty() {
            bail!("Please set the CEREBRAS_API_KEY environment variable.");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion<'a>(
        &self,
        prompt: BackendPrompt,
        tx: &'a mpsc::UnboundedSender<Event>,
    ) -> Result<String> {
        // Anything that goes wrong during the request or mid-stream collapses
        // to a single error line in the pane. The comparison only ever
        // commits the local answer, so this text never reaches the
        // transcript.
        let text = match self.stream_completion(&prompt, tx).await {
            Ok(text) => text,
            Err(err) => {
                tracing::error!(error = ?err, "Cerebras stream failed");
                format!("Failed to generate response from Cerebras: {err}")
            }
        };

        tx.send(Event::BackendStreamUpdate(BackendResponse {
            backend: BackendName::Cerebras,
            text: text.to_string(),
            done: true,
        }))?;

        return Ok(text);
    }
}
