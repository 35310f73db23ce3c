use chrono::Local;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::App;

/// Render the bottom status bar: plan badge, notice or key hints, clock.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let now = Local::now().format("%Y-%m-%d %H:%M:%S");

    let badge_color = if app.tier().has_premium_access() {
        Color::Yellow
    } else {
        Color::Gray
    };
    let mut left = vec![
        Span::styled(
            format!(" {} ", app.tier().display_label()),
            Style::default()
                .fg(Color::Black)
                .bg(badge_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];

    match &app.notice {
        Some(notice) => left.push(Span::styled(
            notice.clone(),
            Style::default().fg(Color::Yellow),
        )),
        None => left.extend([
            Span::styled("[p]", Style::default().fg(Color::Yellow)),
            Span::raw(" Plan  "),
            Span::styled("[g]", Style::default().fg(Color::Yellow)),
            Span::raw(" Charts  "),
            Span::styled("[u]", Style::default().fg(Color::Yellow)),
            Span::raw(" Upgrade  "),
            Span::styled("[?]", Style::default().fg(Color::Yellow)),
            Span::raw(" Help  "),
            Span::styled("[q]", Style::default().fg(Color::Yellow)),
            Span::raw(" Quit"),
        ]),
    }

    // Left hints and right-aligned timestamp share one line, so pad between.
    let left_len: usize = left.iter().map(|s| s.content.chars().count()).sum();
    let right_text = format!("{}", now);
    let total_width = area.width as usize;
    let padding = if total_width > left_len + right_text.len() {
        total_width - left_len - right_text.len()
    } else {
        1
    };

    let mut spans = left;
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(
        right_text,
        Style::default().fg(Color::DarkGray),
    ));

    let bar = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(bar, area);
}
