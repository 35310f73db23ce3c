use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use fe_core::analysis::{self, DemandSummary, Difficulty};
use fe_core::fixtures;
use fe_core::format::format_currency;

use crate::app::App;
use crate::widgets::{chart, gate_overlay, gauge_bar, metric_card};

/// Tab 5: demand profile against the contract and load-shifting ideas.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    gate_overlay::render_gated(frame, area, &app.page_gate(), |frame, area| {
        render_content(frame, app, area)
    });
}

fn render_content(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(1),
            Constraint::Length(6),
        ])
        .split(area);

    let metrics = analysis::demand_metrics();
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, metrics.len() as u32); metrics.len()])
        .split(chunks[0]);
    for (metric, cell) in metrics.iter().zip(cells.iter()) {
        metric_card::render(frame, *cell, metric);
    }

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    match fixtures::demand_profile() {
        Ok(ds) => {
            chart::render_dataset(frame, charts[0], "24h Demand Profile", &ds, "kW");
            if let Some(summary) = DemandSummary::from_dataset(&ds, "demand", fixtures::CONTRACTED_KW) {
                gauge_bar::render_utilization(frame, chunks[2], &summary);
            }
        }
        Err(e) => tracing::error!(error = %e, "demand profile failed to build"),
    }
    match fixtures::monthly_peak() {
        Ok(ds) => chart::render_dataset(frame, charts[1], "Monthly Peak", &ds, "kW"),
        Err(e) => tracing::error!(error = %e, "monthly peak failed to build"),
    }

    let header = Row::new(vec![
        Cell::from("Equipment"),
        Cell::from("From"),
        Cell::from("To"),
        Cell::from("Load"),
        Cell::from("Saving"),
        Cell::from("Effort"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    let rows: Vec<Row> = app
        .suggestions
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let effort = match s.difficulty {
                Difficulty::Easy => "easy",
                Difficulty::Medium => "medium",
            };
            let row = Row::new(vec![
                Cell::from(s.equipment),
                Cell::from(s.from),
                Cell::from(s.to),
                Cell::from(format!("{} kW", s.load_kw)),
                Cell::from(format!("{}/mo", format_currency(s.saving as f64))),
                Cell::from(effort),
            ]);
            if i == app.selected_index {
                row.style(Style::default().bg(Color::DarkGray))
            } else {
                row
            }
        })
        .collect();
    let widths = [
        Constraint::Min(22),
        Constraint::Length(13),
        Constraint::Length(13),
        Constraint::Length(7),
        Constraint::Length(14),
        Constraint::Length(7),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(format!(
            " Load Shifting  up to {}/mo ",
            format_currency(analysis::total_shift_saving(&app.suggestions) as f64)
        )));
    frame.render_widget(table, chunks[3]);
}
