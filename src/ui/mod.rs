mod quiz;
mod score;
mod welcome;

use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph, Wrap},
};

use crate::app::App;
use crate::llm::TextGenerator;
use crate::models::AppState;

pub fn render<G: TextGenerator>(frame: &mut Frame, app: &App<G>) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let chunks = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(area);

    match app.state {
        AppState::Welcome => welcome::render(frame, chunks[0]),
        AppState::Generating => render_generating(frame, chunks[0], app.question_number() + 1),
        AppState::Question => quiz::render(frame, chunks[0], app),
        AppState::Error => render_error(frame, chunks[0], app.error().unwrap_or("")),
    }

    score::render(frame, chunks[1], app.score(), app.question_number());
}

fn render_generating(frame: &mut Frame, area: Rect, number: usize) {
    let chunks = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Length(5),
        Constraint::Percentage(40),
    ])
    .split(area);

    let content = vec![
        Line::from(Span::styled(
            format!("QUESTION {}", number),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Generating a new question...",
            Style::default().fg(Color::Yellow),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}

fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let chunks = Layout::vertical([
        Constraint::Percentage(30),
        Constraint::Min(9),
        Constraint::Percentage(30),
    ])
    .split(area);

    let mut content = vec![
        Line::from(Span::styled(
            "COULD NOT GET A QUESTION",
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from(""),
    ];
    content.extend(message.lines().map(|line| Line::from(line.to_string())));

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, chunks[1]);
}
