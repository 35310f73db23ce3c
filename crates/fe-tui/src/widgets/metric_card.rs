use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use fe_core::analysis::{Metric, Sentiment, Trend};
use fe_core::format::format_percent;

fn sentiment_color(s: Sentiment) -> Color {
    match s {
        Sentiment::Positive => Color::Green,
        Sentiment::Negative => Color::Red,
        Sentiment::Neutral => Color::DarkGray,
    }
}

/// KPI tile: value with unit, then the trend arrow colored by sentiment.
pub fn render(frame: &mut Frame, area: Rect, metric: &Metric) {
    let value = metric.display_value();

    let arrow = match metric.trend {
        Trend::Up => "\u{25b2}",
        Trend::Down => "\u{25bc}",
        Trend::Neutral => "-",
    };
    let trend_text = match metric.trend_percent {
        Some(p) => format!("{} {}", arrow, format_percent(p, 1)),
        None => arrow.to_string(),
    };

    let lines = vec![
        Line::from(Span::styled(
            value,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            trend_text,
            Style::default().fg(sentiment_color(metric.sentiment())),
        )),
    ];

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", metric.label)),
    );
    frame.render_widget(card, area);
}
