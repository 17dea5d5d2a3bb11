#[cfg(test)]
#[path = "ollama_test.rs"]
mod tests;

use std::time::Duration;

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
use crate::domain::models::Message;

fn convert_err(err: reqwest::Error) -> std::io::Error {
    let err_msg = err.to_string();
    return std::io::Error::new(std::io::ErrorKind::Interrupted, err_msg);
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct GenerateResponse {
    pub response: String,
}

// The entire prompting strategy: every turn so far as a "role: content"
// line, then an open "assistant:" line for the model to continue. No
// windowing or truncation, whatever the length.
fn flatten_history(history: &[Message]) -> String {
    let mut lines = history
        .iter()
        .map(|turn| {
            return format!("{role}: {content}", role = turn.author, content = turn.text);
        })
        .collect::<Vec<String>>();

    lines.push("assistant:".to_string());

    return lines.join("\n");
}

pub struct Ollama {
    url: String,
    timeout: String,
}

impl Default for Ollama {
    fn default() -> Ollama {
        return Ollama {
            url: Config::get(ConfigKey::OllamaURL),
            timeout: Config::get(ConfigKey::BackendHealthCheckTimeout),
        };
    }
}

#[async_trait]
impl Backend for Ollama {
    fn name(&self) -> BackendName {
        return BackendName::Ollama;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        let res = reqwest::Client::new()
            .get(&self.url)
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "Ollama is not running");
            bail!("Ollama is not running");
        }

        let res = res.unwrap();
        if res.status() != 200 {
            tracing::error!(status = res.status().as_u16(), "Ollama health check failed");
            bail!("Ollama health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion<'a>(
        &self,
        prompt: BackendPrompt,
        tx: &'a mpsc::UnboundedSender<Event>,
    ) -> Result<String> {
        let req = GenerateRequest {
            model: Config::get(ConfigKey::LocalModel),
            prompt: flatten_history(&prompt.history),
            stream: true,
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/api/generate", url = self.url))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            let code = res.status().as_u16();
            tracing::error!(status = code, "Failed to make completion request to Ollama");

            // The error line stands in for the whole completion, so it flows
            // through the same channel and ends up committed to the
            // transcript like any other answer.
            let text = format!("Failed to generate response. Status code: {code}");
            tx.send(Event::BackendStreamUpdate(BackendResponse {
                backend: BackendName::Ollama,
                text: text.to_string(),
                done: true,
            }))?;

            return Ok(text);
        }

        let stream = res.bytes_stream().map_err(convert_err);
        let mut lines_reader = StreamReader::new(stream).lines();

        let mut accumulator = String::new();
        while let Ok(line) = lines_reader.next_line().await {
            if line.is_none() {
                break;
            }

            // A record that does not parse as JSON is skipped and the stream
            // carries on with the next line.
            let record = match serde_json::from_str::<GenerateResponse>(&line.unwrap()) {
                Ok(record) => record,
                Err(_) => continue,
            };

            tracing::debug!(body = ?record, "Generate response");
            accumulator += &record.response;

            tx.send(Event::BackendStreamUpdate(BackendResponse {
                backend: BackendName::Ollama,
                text: accumulator.to_string(),
                done: false,
            }))?;
        }

        tx.send(Event::BackendStreamUpdate(BackendResponse {
            backend: BackendName::Ollama,
            text: accumulator.to_string(),
            done: true,
        }))?;

        return Ok(accumulator);
    }
}
