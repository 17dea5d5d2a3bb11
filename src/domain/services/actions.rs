use anyhow::Result;
use tokio::sync::mpsc;

use super::Comparison;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::BackendBox;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::Transcript;

fn worker_error(err: anyhow::Error, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    tx.send(Event::BackendMessage(Message::new_with_type(
        Author::Assistant,
        MessageType::Error,
        &format!("The comparison failed with the following error: {:?}", err),
    )))?;

    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        local: BackendBox,
        remote: BackendBox,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let comparison = Comparison::new(local, remote);

        // The transcript is the session state, created here and dropped when
        // the loop dies with the process. This loop is its only writer.
        let mut transcript = Transcript::default();

        loop {
            let event = rx.recv().await;
            if event.is_none() {
                continue;
            }

            match event.unwrap() {
                Action::ComparisonRequest(prompt) => {
                    // One comparison in flight at a time. The UI keeps input
                    // disabled until it sees the completion event.
                    let res = comparison.run(&mut transcript, &prompt, &tx).await;
                    if let Err(err) = res {
                        worker_error(err, &tx)?;
                    }
                }
            }
        }
    }
}
