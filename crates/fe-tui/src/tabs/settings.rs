use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use fe_core::plan::{Feature, PlanLimits, PlanTier};

use crate::app::App;

fn quota(v: Option<u32>) -> String {
    v.map_or_else(|| "unlimited".to_string(), |n| n.to_string())
}

/// Tab 8: plan comparison and the effective configuration.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let current = app.tier();
    let header = Row::new(
        std::iter::once(Cell::from("")).chain(PlanTier::ALL.iter().map(|t| {
            let style = if *t == current {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Cell::from(t.display_label()).style(style)
        })),
    );

    let limits: Vec<PlanLimits> = PlanTier::ALL.iter().map(|t| t.limits()).collect();
    let mut rows = vec![
        Row::new(
            std::iter::once(Cell::from("Sites"))
                .chain(limits.iter().map(|l| Cell::from(quota(l.max_sites)))),
        ),
        Row::new(
            std::iter::once(Cell::from("Devices"))
                .chain(limits.iter().map(|l| Cell::from(quota(l.max_devices)))),
        ),
        Row::new(
            std::iter::once(Cell::from("Retention (days)"))
                .chain(limits.iter().map(|l| Cell::from(quota(l.data_retention_days)))),
        ),
    ];
    for feature in Feature::ALL {
        rows.push(Row::new(
            std::iter::once(Cell::from(feature.as_str())).chain(limits.iter().map(|l| {
                if l.allows(feature) {
                    Cell::from("yes").style(Style::default().fg(Color::Green))
                } else {
                    Cell::from("-").style(Style::default().fg(Color::DarkGray))
                }
            })),
        ));
    }

    let widths = [
        Constraint::Length(20),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(12),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(format!(
            " Plans  current: {} ",
            current.display_label()
        )));
    frame.render_widget(table, chunks[0]);

    let mut lines = vec![
        Line::from(Span::styled(
            "Effective configuration",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(app.config_text.lines().map(|l| Line::from(l.to_string())));
    let config = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Config "));
    frame.render_widget(config, chunks[1]);
}
