use super::AppState;
use crate::domain::models::Author;
use crate::domain::models::BackendName;
use crate::domain::models::BackendResponse;
use crate::domain::models::Message;

#[test]
fn it_clears_panes_when_a_comparison_begins() {
    let mut app_state = AppState {
        local_pane: "old".to_string(),
        remote_pane: "old".to_string(),
        ..AppState::default()
    };

    app_state.begin_comparison();

    assert!(app_state.local_pane.is_empty());
    assert!(app_state.remote_pane.is_empty());
    assert!(app_state.waiting_for_backend);
}

#[test]
fn it_overwrites_the_matching_pane() {
    let mut app_state = AppState::default();

    app_state.handle_stream_update(BackendResponse {
        backend: BackendName::Ollama,
        text: "He".to_string(),
        done: false,
    });
    app_state.handle_stream_update(BackendResponse {
        backend: BackendName::Cerebras,
        text: "Wor".to_string(),
        done: false,
    });
    app_state.handle_stream_update(BackendResponse {
        backend: BackendName::Ollama,
        text: "Hello".to_string(),
        done: true,
    });

    assert_eq!(app_state.local_pane, "Hello".to_string());
    assert_eq!(app_state.remote_pane, "Wor".to_string());
}

#[test]
fn it_reenables_input_on_completion() {
    let mut app_state = AppState::default();
    app_state.begin_comparison();

    app_state.complete_comparison(Message::new(Author::Assistant, "Hello"));

    assert!(!app_state.waiting_for_backend);
    assert_eq!(app_state.messages.len(), 1);
    assert_eq!(app_state.messages[0].text, "Hello".to_string());
}

#[test]
fn it_saturates_scrolling_at_zero() {
    let mut app_state = AppState::default();

    app_state.scroll_up();
    assert_eq!(app_state.scroll_position, 0);

    app_state.scroll_down();
    app_state.scroll_down();
    app_state.scroll_page_up();
    assert_eq!(app_state.scroll_position, 0);

    app_state.scroll_page_down();
    assert_eq!(app_state.scroll_position, 10);
}
