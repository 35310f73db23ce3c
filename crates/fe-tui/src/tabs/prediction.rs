use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use fe_core::analysis::{self, InsightCard, Tone};
use fe_core::fixtures;

use crate::app::App;
use crate::widgets::{chart, gate_overlay};

/// Tab 3: two-week forecast with confidence band and insight cards.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    gate_overlay::render_gated(frame, area, &app.page_gate(), render_content);
}

fn render_content(frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(6)])
        .split(area);

    match fixtures::prediction() {
        Ok(ds) => chart::render_dataset(frame, chunks[0], "Energy Forecast (14 days)", &ds, "kWh"),
        Err(e) => tracing::error!(error = %e, "prediction dataset failed to build"),
    }

    let cards = analysis::prediction_cards();
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, cards.len().max(1) as u32); cards.len().max(1)])
        .split(chunks[1]);
    for (card, cell) in cards.iter().zip(cells.iter()) {
        render_card(frame, *cell, card);
    }
}

fn render_card(frame: &mut Frame, area: Rect, card: &InsightCard) {
    let color = match card.tone {
        Tone::Positive => Color::Green,
        Tone::Warning => Color::Yellow,
        Tone::Info => Color::Cyan,
    };
    let body = Paragraph::new(Line::from(card.body))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(Span::styled(
                    format!(" {} ", card.title),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
        );
    frame.render_widget(body, area);
}
