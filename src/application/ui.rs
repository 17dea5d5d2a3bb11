use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use tokio::sync::mpsc;
use tui_textarea::TextArea;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;

fn build_textarea() -> TextArea<'static> {
    let mut textarea = TextArea::default();
    textarea.set_block(Block::default().borders(Borders::ALL).title("Prompt"));
    return textarea;
}

fn transcript_text(app_state: &AppState) -> Text<'static> {
    let mut lines: Vec<Line> = vec![];

    for message in &app_state.messages {
        let style = match message.message_type() {
            MessageType::Error => Style::default().fg(Color::Red),
            MessageType::Normal => match message.author {
                Author::User => Style::default().fg(Color::Cyan),
                Author::Assistant => Style::default().fg(Color::Green),
            },
        };

        lines.push(Line::from(Span::styled(
            format!("{}:", message.author),
            style.add_modifier(Modifier::BOLD),
        )));
        for text_line in message.text.split('\n') {
            lines.push(Line::from(text_line.to_string()));
        }
        lines.push(Line::from(""));
    }

    return Text::from(lines);
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    events: &mut EventsService,
) -> Result<()> {
    let mut textarea = build_textarea();

    let local_title = format!("Ollama ({})", Config::get(ConfigKey::LocalModel));
    let remote_title = format!("Cerebras ({})", Config::get(ConfigKey::RemoteModel));

    loop {
        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![
                    Constraint::Min(1),
                    Constraint::Percentage(40),
                    Constraint::Max(4),
                ])
                .split(frame.size());

            let transcript = Paragraph::new(transcript_text(app_state))
                .block(Block::default().borders(Borders::ALL).title("Transcript"))
                .wrap(Wrap { trim: false })
                .scroll((app_state.scroll_position, 0));
            frame.render_widget(transcript, layout[0]);

            let panes = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(layout[1]);

            let local_pane = Paragraph::new(app_state.local_pane.as_str())
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(local_title.as_str()),
                )
                .wrap(Wrap { trim: false });
            frame.render_widget(local_pane, panes[0]);

            let remote_pane = Paragraph::new(app_state.remote_pane.as_str())
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(remote_title.as_str()),
                )
                .wrap(Wrap { trim: false });
            frame.render_widget(remote_pane, panes[1]);

            if app_state.waiting_for_backend {
                let waiting = Paragraph::new("Streaming both responses...").block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("Prompt (disabled)"),
                );
                frame.render_widget(waiting, layout[2]);
            } else {
                frame.render_widget(textarea.widget(), layout[2]);
            }
        })?;

        match events.next().await? {
            Event::BackendMessage(msg) => {
                app_state.add_message(msg);
                app_state.waiting_for_backend = false;
            }
            Event::BackendStreamUpdate(res) => {
                app_state.handle_stream_update(res);
            }
            Event::ComparisonComplete(reply) => {
                app_state.complete_comparison(reply);
            }
            Event::KeyboardCTRLC() => break,
            Event::KeyboardEnter() => {
                if app_state.waiting_for_backend {
                    continue;
                }

                let input_str = textarea.lines().join("\n");
                if input_str.trim().is_empty() {
                    continue;
                }

                textarea = build_textarea();
                app_state.add_message(Message::new(Author::User, &input_str));
                app_state.begin_comparison();
                tx.send(Action::ComparisonRequest(input_str))?;
            }
            Event::KeyboardCharInput(input) => {
                if !app_state.waiting_for_backend {
                    textarea.input(input);
                }
            }
            Event::UIScrollUp() => app_state.scroll_up(),
            Event::UIScrollDown() => app_state.scroll_down(),
            Event::UIScrollPageUp() => app_state.scroll_page_up(),
            Event::UIScrollPageDown() => app_state.scroll_page_down(),
            Event::UITick() => continue,
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    disable_raw_mode().unwrap();
    crossterm::execute!(io::stdout(), LeaveAlternateScreen).unwrap();
    crossterm::execute!(io::stdout(), cursor::Show).unwrap();
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut events = EventsService::new(rx);

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen)?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;
    let mut app_state = AppState::default();

    start_loop(&mut terminal, &mut app_state, tx, &mut events).await?;

    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    return Ok(());
}
