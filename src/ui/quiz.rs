use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::{App, StatusKind, StatusLine};
use crate::llm::TextGenerator;
use crate::models::{OPTION_LABELS, Outcome, Question};

pub fn render<G: TextGenerator>(frame: &mut Frame, area: Rect, app: &App<G>) {
    let Some(question) = app.current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1), // Progress
        Constraint::Length(6), // Question text
        Constraint::Min(10),   // Options
        Constraint::Length(2), // Feedback
        Constraint::Length(1), // Controls
    ])
    .margin(1)
    .split(area);

    render_progress(frame, chunks[0], app);
    render_question_text(frame, chunks[1], &question.text);
    render_options(
        frame,
        chunks[2],
        question,
        app.selected_option(),
        app.outcome(),
    );
    render_status(frame, chunks[3], app.status());
    render_controls(frame, chunks[4], app.can_submit());
}

fn render_progress<G: TextGenerator>(frame: &mut Frame, area: Rect, app: &App<G>) {
    let style_tag = app
        .current_style()
        .map(|style| format!("  ·  {}", style))
        .unwrap_or_default();
    let progress = format!("Question {}{}", app.question_number(), style_tag);

    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White).bold())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, area);
}

fn option_style(index: usize, selected: Option<usize>, outcome: Option<&Outcome>) -> Style {
    match outcome {
        Some(outcome) if index == outcome.correct_index => {
            Style::default().fg(Color::Black).bg(Color::Green).bold()
        }
        Some(outcome) if index == outcome.selected_index => {
            Style::default().fg(Color::White).bg(Color::Red).bold()
        }
        Some(_) => Style::default().fg(Color::DarkGray),
        None if selected == Some(index) => Style::default().fg(Color::Yellow).bold(),
        None => Style::default().fg(Color::Gray),
    }
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    selected: Option<usize>,
    outcome: Option<&Outcome>,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(question.answers.len() * 2);

    for (index, answer) in question.answers.iter().enumerate() {
        let style = option_style(index, selected, outcome);
        let marker = if selected == Some(index) { ">" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", OPTION_LABELS[index]), style),
            Span::styled(answer.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Options ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_status(frame: &mut Frame, area: Rect, status: Option<&StatusLine>) {
    let Some(status) = status else {
        return;
    };

    let color = match status.kind {
        StatusKind::Warning => Color::Yellow,
        StatusKind::Success => Color::Green,
        StatusKind::Failure => Color::Red,
    };

    let widget = Paragraph::new(status.text.as_str())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(color).bold());
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, can_submit: bool) {
    let hint = if can_submit {
        "j/k navigate  ·  a-d choose  ·  enter submit  ·  q quit"
    } else {
        "n next question  ·  q quit"
    };

    let widget = Paragraph::new(hint)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
