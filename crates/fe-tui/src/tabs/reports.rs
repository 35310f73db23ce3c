use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use chrono::Utc;

use fe_core::catalog::{self, ReportModule};
use fe_core::entitlement::evaluate;

use crate::app::App;

/// Tab 7: report builder. Premium modules stay listed but refuse to toggle
/// on a free plan.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(12), Constraint::Min(0)])
        .split(area);

    let header = Row::new(vec![
        Cell::from(""),
        Cell::from("Module"),
        Cell::from("Description"),
        Cell::from("Pages"),
        Cell::from(""),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let tier = app.tier();
    let rows: Vec<Row> = ReportModule::ALL
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let check = if app.reports.contains(*m) { "[x]" } else { "[ ]" };
            let badge = if !evaluate(tier, m).is_open() {
                Cell::from("Pro").style(Style::default().fg(Color::Yellow))
            } else {
                Cell::from("")
            };
            let row = Row::new(vec![
                Cell::from(check),
                Cell::from(m.name()),
                Cell::from(m.description()),
                Cell::from(m.pages().to_string()),
                badge,
            ]);
            if i == app.selected_index {
                row.style(Style::default().bg(Color::DarkGray))
            } else {
                row
            }
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Length(22),
        Constraint::Min(30),
        Constraint::Length(6),
        Constraint::Length(4),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(format!(
            " Report Modules  {} selected, ~{} pages ",
            app.reports.modules().len(),
            app.reports.total_pages()
        )));
    frame.render_widget(table, chunks[0]);

    let now = Utc::now();
    let history: Vec<Row> = catalog::previous_reports()
        .into_iter()
        .map(|r| {
            Row::new(vec![
                Cell::from(r.name),
                Cell::from(r.age_label(now)),
                Cell::from(format!("{} modules", r.modules)),
                Cell::from(format!("{} pages", r.pages)),
            ])
        })
        .collect();
    let widths = [
        Constraint::Min(30),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(10),
    ];
    let table = Table::new(history, widths)
        .block(Block::default().borders(Borders::ALL).title(" Previous Reports "));
    frame.render_widget(table, chunks[1]);
}
