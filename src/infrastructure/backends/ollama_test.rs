use anyhow::bail;
use anyhow::Result;
use tokio::sync::mpsc;

use super::flatten_history;
use super::Ollama;
use crate::domain::models::Author;
use crate::domain::models::Backend;
use crate::domain::models::BackendPrompt;
use crate::domain::models::BackendResponse;
use crate::domain::models::Event;
use crate::domain::models::Message;

impl Ollama {
    fn with_url(url: String) -> Ollama {
        return Ollama {
            url,
            timeout: "200".to_string(),
        };
    }
}

fn to_res(event: Option<Event>) -> Result<BackendResponse> {
    let res = match event.unwrap() {
        Event::BackendStreamUpdate(res) => res,
        _ => bail!("Wrong event type from recv"),
    };

    return Ok(res);
}

#[test]
fn it_flattens_a_first_prompt() {
    let history = vec![Message::new(Author::User, "Hello there")];
    assert_eq!(flatten_history(&history), "user: Hello there\nassistant:");
}

#[test]
fn it_flattens_a_prior_exchange() {
    let history = vec![
        Message::new(Author::User, "Hello there"),
        Message::new(Author::Assistant, "General Kenobi"),
        Message::new(Author::User, "How are you?"),
    ];

    assert_eq!(
        flatten_history(&history),
        "user: Hello there\nassistant: General Kenobi\nuser: How are you?\nassistant:"
    );
}

#[tokio::test]
async fn it_successfully_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", "/").with_status(200).create();

    let backend = Ollama::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_ok());
    mock.assert();
}

#[tokio::test]
async fn it_fails_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", "/").with_status(500).create();

    let backend = Ollama::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_err());
    mock.assert();
}

#[tokio::test]
async fn it_streams_cumulative_completions() -> Result<()> {
    let body = "{\"response\":\"He\"}\n{\"response\":\"llo\"}";

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body(body)
        .create();

    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();

    let backend = Ollama::with_url(server.url());
    let prompt = BackendPrompt::with_history("Hello", &[Message::new(Author::User, "Hello")]);
    let final_text = backend.get_completion(prompt, &tx).await?;

    mock.assert();
    assert_eq!(final_text, "Hello".to_string());

    let first = to_res(rx.recv().await)?;
    assert_eq!(first.text, "He".to_string());
    assert!(!first.done);

    let second = to_res(rx.recv().await)?;
    assert_eq!(second.text, "Hello".to_string());
    assert!(!second.done);

    let last = to_res(rx.recv().await)?;
    assert_eq!(last.text, "Hello".to_string());
    assert!(last.done);

    assert!(rx.try_recv().is_err());
    return Ok(());
}

#[tokio::test]
async fn it_skips_malformed_records() -> Result<()> {
    let body = "{\"response\":\"A\"}\nnot-json\n{\"response\":\"B\"}";

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body(body)
        .create();

    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();

    let backend = Ollama::with_url(server.url());
    let prompt = BackendPrompt::with_history("hi", &[Message::new(Author::User, "hi")]);
    let final_text = backend.get_completion(prompt, &tx).await?;

    mock.assert();
    assert_eq!(final_text, "AB".to_string());

    let first = to_res(rx.recv().await)?;
    assert_eq!(first.text, "A".to_string());
    assert!(!first.done);

    let second = to_res(rx.recv().await)?;
    assert_eq!(second.text, "AB".to_string());
    assert!(!second.done);

    let last = to_res(rx.recv().await)?;
    assert!(last.done);

    assert!(rx.try_recv().is_err());
    return Ok(());
}

#[tokio::test]
async fn it_degrades_to_an_error_line_on_bad_status() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/generate")
        .with_status(503)
        .create();

    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();

    let backend = Ollama::with_url(server.url());
    let prompt = BackendPrompt::with_history("hi", &[Message::new(Author::User, "hi")]);
    let final_text = backend.get_completion(prompt, &tx).await?;

    mock.assert();
    assert_eq!(
        final_text,
        "Failed to generate response. Status code: 503".to_string()
    );

    let only = to_res(rx.recv().await)?;
    assert_eq!(only.text, final_text);
    assert!(only.done);

    assert!(rx.try_recv().is_err());
    return Ok(());
}
