use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use fe_core::analysis;
use fe_core::catalog::{self, ChartCategory, ChartKind};
use fe_core::entitlement::evaluate;

use crate::app::App;
use crate::widgets::{chart, gate_overlay, help_modal, metric_card};

const CHARTS_PER_ROW: usize = 2;

/// Tab 1: KPI tiles and the enabled charts, each behind its own gate.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(area);

    render_filters(frame, app, chunks[0]);
    render_metrics(frame, chunks[1]);
    render_charts(frame, app, chunks[2]);

    if app.show_gallery {
        render_gallery(frame, app);
    }
}

fn render_filters(frame: &mut Frame, app: &App, area: Rect) {
    let site = catalog::site(&app.building)
        .map(|s| s.name)
        .unwrap_or("Unknown site");
    let line = Line::from(vec![
        Span::styled(" Site: ", Style::default().fg(Color::DarkGray)),
        Span::raw(site),
        Span::styled("  Range: ", Style::default().fg(Color::DarkGray)),
        Span::raw(app.time_range.label()),
        Span::styled(
            format!("  {} charts enabled", app.charts.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_metrics(frame: &mut Frame, area: Rect) {
    let metrics = match analysis::dashboard_metrics() {
        Ok(m) => m,
        Err(e) => {
            tracing::error!(error = %e, "dashboard metrics unavailable");
            return;
        }
    };
    if metrics.is_empty() {
        return;
    }
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, metrics.len() as u32); metrics.len()])
        .split(area);
    for (metric, cell) in metrics.iter().zip(cells.iter()) {
        metric_card::render(frame, *cell, metric);
    }
}

fn render_charts(frame: &mut Frame, app: &App, area: Rect) {
    let enabled = app.charts.enabled();
    if enabled.is_empty() {
        let hint = Paragraph::new("No charts enabled. Press g to open the chart gallery.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(" Charts "));
        frame.render_widget(hint, area);
        return;
    }

    let tier = app.tier();
    let rows = enabled.len().div_ceil(CHARTS_PER_ROW);
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(area);

    for (row_area, kinds) in row_areas.iter().zip(enabled.chunks(CHARTS_PER_ROW)) {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, CHARTS_PER_ROW as u32); CHARTS_PER_ROW])
            .split(*row_area);
        for (kind, cell) in kinds.iter().zip(cells.iter()) {
            let gate = evaluate(tier, kind);
            gate_overlay::render_gated(frame, *cell, &gate, |frame, area| {
                chart::render_kind(frame, area, *kind)
            });
        }
    }
}

/// Chart gallery popup: every catalogue chart grouped by category.
fn render_gallery(frame: &mut Frame, app: &App) {
    let area = help_modal::centered_rect(70, 80, frame.area());
    frame.render_widget(Clear, area);

    let tier = app.tier();
    let mut lines: Vec<Line> = Vec::new();
    let mut category: Option<ChartCategory> = None;
    for (i, kind) in ChartKind::ALL.iter().enumerate() {
        if category != Some(kind.category()) {
            category = Some(kind.category());
            if i > 0 {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {} ", kind.category().label()),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("[{}]", kind.category().plan_badge()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        }

        let check = if app.charts.contains(*kind) { "[x]" } else { "[ ]" };
        let locked = !evaluate(tier, kind).is_open();
        let mut spans = vec![
            Span::raw(format!("   {} ", check)),
            Span::raw(kind.name()),
        ];
        if locked {
            spans.push(Span::styled("  locked", Style::default().fg(Color::Yellow)));
        }
        let line = Line::from(spans);
        lines.push(if i == app.selected_index {
            line.style(Style::default().bg(Color::DarkGray))
        } else {
            line
        });
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(4)])
        .split(area);

    let list = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Chart Gallery ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(list, chunks[0]);

    let detail = ChartKind::ALL
        .get(app.selected_index)
        .map(|k| k.description())
        .unwrap_or_default();
    let footer = Paragraph::new(vec![
        Line::from(detail),
        Line::from(Span::styled(
            "Space toggle  j/k move  g/Esc close",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, chunks[1]);
}
