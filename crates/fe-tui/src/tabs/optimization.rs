use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use fe_core::analysis::{self, Risk};
use fe_core::fixtures;
use fe_core::format::{format_currency, format_number};

use crate::app::App;
use crate::widgets::{chart, gate_overlay, metric_card};

/// Tab 4: parameter recommendations and the chiller efficiency curve.
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
            Constraint::Length(8),
            Constraint::Min(8),
        ])
        .split(area);

    let metrics = analysis::optimization_metrics(&app.parameters);
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, metrics.len() as u32); metrics.len()])
        .split(chunks[0]);
    for (metric, cell) in metrics.iter().zip(cells.iter()) {
        metric_card::render(frame, *cell, metric);
    }

    let header = Row::new(vec![
        Cell::from("Parameter"),
        Cell::from("Current"),
        Cell::from("Optimal"),
        Cell::from("Change"),
        Cell::from("Savings"),
        Cell::from("Risk"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = app
        .parameters
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let (risk, risk_color) = match p.risk {
                Risk::Low => ("low", Color::Green),
                Risk::Medium => ("medium", Color::Yellow),
                Risk::High => ("high", Color::Red),
            };
            let row = Row::new(vec![
                Cell::from(p.name),
                Cell::from(format!("{} {}", format_number(p.current, 1), p.unit)),
                Cell::from(format!("{} {}", format_number(p.optimal, 1), p.unit)),
                Cell::from(format_number(p.delta(), 1)),
                Cell::from(format!("{}/mo ({}%)", format_currency(p.savings as f64), p.savings_percent)),
                Cell::from(risk).style(Style::default().fg(risk_color)),
            ]);
            if i == app.selected_index {
                row.style(Style::default().bg(Color::DarkGray))
            } else {
                row
            }
        })
        .collect();

    let widths = [
        Constraint::Min(24),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(8),
        Constraint::Length(22),
        Constraint::Length(8),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(format!(
            " Recommendations  total {}/mo ",
            format_currency(analysis::total_savings(&app.parameters) as f64)
        )));
    frame.render_widget(table, chunks[1]);

    match fixtures::optimization_efficiency() {
        Ok(ds) => chart::render_dataset(frame, chunks[2], "Chiller Efficiency vs Load", &ds, "kW/RT"),
        Err(e) => tracing::error!(error = %e, "efficiency dataset failed to build"),
    }
}
