use ratatui::{prelude::*, widgets::Paragraph};

use crate::models::Score;

fn grade_color(percentage: f64) -> Color {
    match percentage as u32 {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

pub fn render(frame: &mut Frame, area: Rect, score: Score, asked: usize) {
    frame.render_widget(
        Paragraph::new(score_line(score, asked)).alignment(Alignment::Center),
        area,
    );
}

fn score_line(score: Score, asked: usize) -> Line<'static> {
    let summary_color = if score.total() == 0 {
        Color::DarkGray
    } else {
        grade_color(score.percentage())
    };

    Line::from(vec![
        Span::styled("Score: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("✔ {}", score.correct),
            Style::default().fg(Color::Green).bold(),
        ),
        Span::raw("  "),
        Span::styled(
            format!("✘ {}", score.wrong),
            Style::default().fg(Color::Red).bold(),
        ),
        Span::styled(
            format!("  ({:.0}%)", score.percentage()),
            Style::default().fg(summary_color),
        ),
        Span::styled(
            format!("  ·  Questions asked: {}", asked),
            Style::default().fg(Color::Gray),
        ),
    ])
}
