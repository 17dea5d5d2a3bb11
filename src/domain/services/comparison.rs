#[cfg(test)]
#[path = "comparison_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::Author;
use crate::domain::models::BackendBox;
use crate::domain::models::BackendPrompt;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::Transcript;

/// Runs one prompt against both backends at once.
///
/// The local backend prompts with the full transcript, the remote backend
/// with the bare text. Once both streams have finished, only the local
/// backend's final text is committed back to the transcript; the remote
/// answer stays display-only.
pub struct Comparison {
    local: BackendBox,
    remote: BackendBox,
}

impl Comparison {
    pub fn new(local: BackendBox, remote: BackendBox) -> Comparison {
        return Comparison { local, remote };
    }

    pub async fn run<'a>(
        &self,
        transcript: &mut Transcript,
        prompt: &str,
        tx: &'a mpsc::UnboundedSender<Event>,
    ) -> Result<String> {
        // The user turn goes in first so the local backend's flattened
        // history includes it.
        transcript.push(Message::new(Author::User, prompt));

        tracing::debug!(
            local = %self.local.name(),
            remote = %self.remote.name(),
            turns = transcript.len(),
            "starting comparison"
        );

        let local_prompt = BackendPrompt::with_history(prompt, transcript.turns());
        let remote_prompt = BackendPrompt::new(prompt);

        // Both futures are started before either is awaited, and the join
        // resolves only once the slower of the two has finished. No timeout:
        // a hung backend stalls the comparison and the next prompt with it.
        let (local_res, remote_res) = tokio::join!(
            self.local.get_completion(local_prompt, tx),
            self.remote.get_completion(remote_prompt, tx),
        );

        let local_text = local_res?;
        remote_res?;

        let reply = Message::new(Author::Assistant, &local_text);
        transcript.push(reply.clone());
        tx.send(Event::ComparisonComplete(reply))?;

        return Ok(local_text);
    }
}
