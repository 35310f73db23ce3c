use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, GraphType, Paragraph, Wrap};
use ratatui::Frame;

use fe_core::catalog::{ChartBody, ChartKind, PLACEHOLDER_NOTE};
use fe_core::dataset::Dataset;
use fe_core::domain::Domain;
use fe_core::series::ColorToken;

/// Terminal color for a palette slot.
pub fn token_color(token: ColorToken) -> Color {
    match token {
        ColorToken::Chart1 => Color::Cyan,
        ColorToken::Chart2 => Color::Green,
        ColorToken::Chart3 => Color::Yellow,
        ColorToken::Chart4 => Color::Magenta,
        ColorToken::Chart5 => Color::Red,
    }
}

/// One plotted column: `(index, value)` points.
struct Plot {
    name: String,
    color: Color,
    points: Vec<(f64, f64)>,
}

/// Every column of `ds`, indexed by domain position. Missing readings are
/// left out, so a series stops where its data does.
fn plots(ds: &Dataset) -> Vec<Plot> {
    ds.columns()
        .iter()
        .map(|c| Plot {
            name: c.label.clone(),
            color: token_color(c.color),
            points: c
                .values
                .iter()
                .enumerate()
                .filter(|(_, v)| v.is_finite())
                .map(|(i, v)| (i as f64, *v))
                .collect(),
        })
        .collect()
}

/// Render a catalogue chart: its dataset, or the placeholder note.
pub fn render_kind(frame: &mut Frame, area: Rect, kind: ChartKind) {
    match kind.body() {
        Ok(ChartBody::Series(ds)) => render_dataset(frame, area, kind.name(), &ds, kind.y_unit()),
        Ok(ChartBody::Placeholder) => render_placeholder(frame, area, kind.name()),
        Err(e) => {
            tracing::error!(chart = kind.id(), error = %e, "chart dataset failed to build");
            render_message(frame, area, kind.name(), &e.to_string(), Color::Red);
        }
    }
}

pub fn render_dataset(frame: &mut Frame, area: Rect, title: &str, ds: &Dataset, unit: &str) {
    render_plots(frame, area, title, ds.domain(), &plots(ds), ds.bounds(), unit);
}

/// Line chart for continuous domains, bars from zero for categorical ones.
/// `bounds` is the value range of `plots`; `None` means there is nothing to
/// draw.
fn render_plots(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    domain: &Domain,
    plots: &[Plot],
    bounds: Option<(f64, f64)>,
    unit: &str,
) {
    let bars = matches!(domain, Domain::Categories { .. });
    let Some((mut lo, mut hi)) = bounds else {
        render_message(frame, area, title, "No data", Color::DarkGray);
        return;
    };
    if bars {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    let margin = ((hi - lo) * 0.1).max(if hi == lo { 1.0 } else { 0.0 });
    let y_min = if bars && lo >= 0.0 { 0.0 } else { lo - margin };
    let y_max = hi + margin;

    let datasets: Vec<ratatui::widgets::Dataset> = plots
        .iter()
        .map(|p| {
            ratatui::widgets::Dataset::default()
                .name(p.name.clone())
                .marker(if bars { symbols::Marker::HalfBlock } else { symbols::Marker::Braille })
                .graph_type(if bars { GraphType::Bar } else { GraphType::Line })
                .style(Style::default().fg(p.color))
                .data(&p.points)
        })
        .collect();

    let last = domain.len().saturating_sub(1);
    let x_labels: Vec<Span> = if last == 0 {
        vec![Span::raw(domain.label(0))]
    } else {
        vec![
            Span::raw(domain.label(0)),
            Span::raw(domain.label(last / 2)),
            Span::raw(domain.label(last)),
        ]
    };
    let decimals = if y_max - y_min < 5.0 { 2 } else { 0 };

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title)),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([-0.5, last as f64 + 0.5])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(unit.to_string(), Style::default().fg(Color::DarkGray)))
                .style(Style::default().fg(Color::Gray))
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::raw(format!("{:.*}", decimals, y_min)),
                    Span::raw(format!("{:.*}", decimals, y_max)),
                ]),
        );

    frame.render_widget(chart, area);
}

pub fn render_placeholder(frame: &mut Frame, area: Rect, title: &str) {
    render_message(frame, area, title, PLACEHOLDER_NOTE, Color::DarkGray);
}

fn render_message(frame: &mut Frame, area: Rect, title: &str, text: &str, color: Color) {
    let paragraph = Paragraph::new(text.to_string())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title)),
        );
    frame.render_widget(paragraph, area);
}
