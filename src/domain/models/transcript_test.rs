use super::Transcript;
use crate::domain::models::Author;
use crate::domain::models::Message;

#[test]
fn it_starts_empty() {
    let transcript = Transcript::default();
    assert!(transcript.is_empty());
    assert_eq!(transcript.len(), 0);
}

#[test]
fn it_keeps_turns_in_arrival_order() {
    let mut transcript = Transcript::default();
    transcript.push(Message::new(Author::User, "first"));
    transcript.push(Message::new(Author::Assistant, "second"));
    transcript.push(Message::new(Author::User, "third"));

    assert_eq!(transcript.len(), 3);

    let texts = transcript
        .turns()
        .iter()
        .map(|turn| {
            return turn.text.to_string();
        })
        .collect::<Vec<String>>();
    assert_eq!(texts, vec!["first", "second", "third"]);

    let authors = transcript
        .turns()
        .iter()
        .map(|turn| {
            return turn.author;
        })
        .collect::<Vec<Author>>();
    assert_eq!(authors, vec![Author::User, Author::Assistant, Author::User]);
}
