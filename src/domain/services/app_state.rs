#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use crate::domain::models::BackendName;
use crate::domain::models::BackendResponse;
use crate::domain::models::Message;

/// View-side state for the shell. The authoritative transcript lives in the
/// worker loop; this mirrors it for rendering, alongside the two live panes.
#[derive(Default)]
pub struct AppState {
    pub messages: Vec<Message>,
    pub local_pane: String,
    pub remote_pane: String,
    pub waiting_for_backend: bool,
    pub scroll_position: u16,
}

impl AppState {
    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn begin_comparison(&mut self) {
        self.local_pane = "".to_string();
        self.remote_pane = "".to_string();
        self.waiting_for_backend = true;
    }

    /// Replaces the matching pane wholesale. Updates carry the full text so
    /// far, so a dropped or replayed update leaves the pane correct.
    pub fn handle_stream_update(&mut self, res: BackendResponse) {
        match res.backend {
            BackendName::Ollama => self.local_pane = res.text,
            BackendName::Cerebras => self.remote_pane = res.text,
        }
    }

    pub fn complete_comparison(&mut self, reply: Message) {
        self.messages.push(reply);
        self.waiting_for_backend = false;
    }

    pub fn scroll_up(&mut self) {
        self.scroll_position = self.scroll_position.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_position = self.scroll_position.saturating_add(1);
    }

    pub fn scroll_page_up(&mut self) {
        self.scroll_position = self.scroll_position.saturating_sub(10);
    }

    pub fn scroll_page_down(&mut self) {
        self.scroll_position = self.scroll_position.saturating_add(10);
    }
}
