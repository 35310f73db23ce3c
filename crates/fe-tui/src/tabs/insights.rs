use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use fe_core::analysis::{self, Insight, Severity};

use crate::app::App;
use crate::widgets::gate_overlay;

fn severity_color(s: Severity) -> Color {
    match s {
        Severity::High => Color::Red,
        Severity::Medium => Color::Yellow,
        Severity::Low => Color::Cyan,
    }
}

/// Tab 6: AI insight feed with category filter.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    gate_overlay::render_gated(frame, area, &app.page_gate(), |frame, area| {
        render_content(frame, app, area)
    });
}

fn render_content(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let mut filters = vec![filter_span("All", app.insights.len(), app.insight_filter.is_none())];
    for (category, count) in analysis::category_counts(&app.insights) {
        filters.push(filter_span(category.label(), count, app.insight_filter == Some(category)));
    }
    filters.push(Span::styled(
        format!("  {} critical  [f] filter", analysis::critical_count(&app.insights)),
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(Line::from(filters)), chunks[0]);

    let mut lines: Vec<Line> = Vec::new();
    for (i, insight) in app.filtered_insights().into_iter().enumerate() {
        push_insight(&mut lines, insight, i == app.selected_index, app.expanded_insight == Some(insight.id));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No insights in this category.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let feed = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" AI Insights "));
    frame.render_widget(feed, chunks[1]);
}

fn filter_span(label: &str, count: usize, active: bool) -> Span<'static> {
    let style = if active {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Span::styled(format!(" {} ({}) ", label, count), style)
}

fn push_insight(lines: &mut Vec<Line<'static>>, insight: &Insight, selected: bool, expanded: bool) {
    let marker = if expanded { "v" } else { ">" };
    let head = Line::from(vec![
        Span::raw(format!(" {} ", marker)),
        Span::styled(
            format!("{:<11}", insight.severity.label()),
            Style::default().fg(severity_color(insight.severity)),
        ),
        Span::styled(insight.title, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("  {}  {}", insight.metric, insight.timestamp),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    lines.push(if selected {
        head.style(Style::default().bg(Color::DarkGray))
    } else {
        head
    });

    if expanded {
        lines.push(Line::from(format!("     {}", insight.description)));
        for action in insight.actions {
            lines.push(Line::from(Span::styled(
                format!("     - {}", action),
                Style::default().fg(Color::Green),
            )));
        }
        lines.push(Line::from(""));
    }
}
