use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use fe_core::datahub::{self, LogLevel, NodeKind, NodeStatus};
use fe_core::format::format_number;

use crate::app::App;

fn status_color(status: NodeStatus) -> Color {
    match status {
        NodeStatus::Online => Color::Green,
        NodeStatus::Warning => Color::Yellow,
        NodeStatus::Offline => Color::Red,
    }
}

fn log_color(level: LogLevel) -> Color {
    match level {
        LogLevel::Success => Color::Green,
        LogLevel::Warning => Color::Yellow,
        LogLevel::Error => Color::Red,
        LogLevel::Info => Color::Gray,
    }
}

/// Tab 2: asset topology, field mapping for the selected equipment and the
/// stream log.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Min(30),
            Constraint::Percentage(35),
        ])
        .split(area);

    render_tree(frame, app, columns[0]);
    render_mapping(frame, app, columns[1]);
    render_pulse(frame, app, columns[2]);
}

fn render_tree(frame: &mut Frame, app: &App, area: Rect) {
    let rows: Vec<Row> = app
        .topology_rows()
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let marker = match (r.node.has_children(), r.expanded) {
                (true, true) => "\u{25be} ",
                (true, false) => "\u{25b8} ",
                (false, _) => "  ",
            };
            let mut spans = vec![
                Span::raw("  ".repeat(r.depth)),
                Span::raw(marker),
                Span::raw(r.node.name),
            ];
            if let Some(status) = r.node.status {
                spans.push(Span::styled(" \u{25cf}", Style::default().fg(status_color(status))));
            }

            let mut style = Style::default();
            if r.node.kind == NodeKind::Equipment && r.node.id == app.selected_equipment {
                style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
            }
            if i == app.selected_index {
                style = style.bg(Color::DarkGray);
            }
            Row::new(vec![Cell::from(Line::from(spans))]).style(style)
        })
        .collect();

    let table = Table::new(rows, [Constraint::Percentage(100)])
        .block(Block::default().borders(Borders::ALL).title(" Asset Topology "));
    frame.render_widget(table, area);
}

fn render_mapping(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    let mut target = vec![];
    match app.selected_node() {
        Some(node) => {
            target.push(Span::styled(
                node.name,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ));
            if let Some(status) = node.status {
                target.push(Span::styled(
                    format!("  [{}]", status.label()),
                    Style::default().fg(status_color(status)),
                ));
            }
        }
        None => target.push(Span::styled("Select an asset", Style::default().fg(Color::DarkGray))),
    }
    let header = Paragraph::new(Line::from(target))
        .block(Block::default().borders(Borders::ALL).title(" Target Asset "));
    frame.render_widget(header, chunks[0]);

    let head = Row::new(vec![Cell::from("Source Field"), Cell::from("System Variable")]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    let rows: Vec<Row> = datahub::field_mappings()
        .into_iter()
        .map(|m| {
            let target = match m.target {
                Some(v) => Cell::from(v.label),
                None => Cell::from(Span::styled("unmapped", Style::default().fg(Color::DarkGray))),
            };
            Row::new(vec![Cell::from(m.source), target])
        })
        .collect();
    let table = Table::new(rows, [Constraint::Length(15), Constraint::Min(20)])
        .header(head)
        .block(Block::default().borders(Borders::ALL).title(" Field Mapping "));
    frame.render_widget(table, chunks[1]);
}

fn render_pulse(frame: &mut Frame, app: &App, area: Rect) {
    let health = datahub::STREAM_HEALTH;
    let (online, warning, offline) = datahub::status_counts(&app.topology);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Throughput    ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{} pts/s", health.throughput_pts_per_sec)),
        ]),
        Line::from(vec![
            Span::styled("Completeness  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}%", format_number(health.completeness_percent, 1)),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            Span::styled("Equipment     ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{online} up "), Style::default().fg(Color::Green)),
            Span::styled(format!("{warning} warn "), Style::default().fg(Color::Yellow)),
            Span::styled(format!("{offline} down"), Style::default().fg(Color::Red)),
        ]),
        Line::from(""),
    ];
    lines.extend(datahub::sync_log().into_iter().map(|entry| {
        Line::from(vec![
            Span::styled(format!("[{}] ", entry.time), Style::default().fg(Color::DarkGray)),
            Span::styled(entry.message, Style::default().fg(log_color(entry.level))),
        ])
    }));

    let pulse = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Stream Pulse  LIVE "));
    frame.render_widget(pulse, area);
}
