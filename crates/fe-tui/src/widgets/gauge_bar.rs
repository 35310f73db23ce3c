use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use fe_core::analysis::{contract_percent, DemandSummary, Utilization};
use fe_core::format::format_number;

pub fn utilization_color(u: Utilization) -> Color {
    match u {
        Utilization::Normal => Color::Green,
        Utilization::Warning => Color::Yellow,
        Utilization::Danger => Color::Red,
    }
}

/// Contract utilization as a horizontal bar.
///
/// Example output: ` Contract [██████████████░░░] 86% 301/350 kW `
///
/// Peaks above the contract fill the whole bar; the percentage keeps the real
/// value.
pub fn render_utilization(frame: &mut Frame, area: Rect, summary: &DemandSummary) {
    let pct = contract_percent(summary.peak_kw, summary.contracted_kw);
    let pct_text = format!(
        " {}% {}/{} kW",
        format_number(pct, 0),
        format_number(summary.peak_kw, 0),
        format_number(summary.contracted_kw, 0)
    );

    let label_display = " Contract".to_string();
    let overhead = label_display.len() + 2 + 1 + pct_text.chars().count();
    let bar_width = (area.width as usize).saturating_sub(overhead);

    if bar_width == 0 || area.height == 0 {
        return;
    }

    let filled_count = ((bar_width as f64) * pct.clamp(0.0, 100.0) / 100.0).round() as usize;
    let empty_count = bar_width.saturating_sub(filled_count);
    let color = utilization_color(summary.utilization);

    let line = Line::from(vec![
        Span::styled(label_display, Style::default().fg(Color::White)),
        Span::raw(" ["),
        Span::styled("\u{2588}".repeat(filled_count), Style::default().fg(color)),
        Span::styled("\u{2591}".repeat(empty_count), Style::default().fg(Color::DarkGray)),
        Span::raw("]"),
        Span::styled(pct_text, Style::default().fg(color)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use fe_core::fixtures;

    fn row(summary: &DemandSummary, width: u16) -> String {
        let backend = ratatui::backend::TestBackend::new(width, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_utilization(frame, frame.area(), summary))
            .unwrap();
        let buf = terminal.backend().buffer().clone();
        (0..width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn demand_profile_gauge_shows_peak_and_contract() {
        let ds = fixtures::demand_profile().unwrap();
        let summary =
            DemandSummary::from_dataset(&ds, "demand", fixtures::CONTRACTED_KW).unwrap();
        let out = row(&summary, 70);
        assert!(out.contains("Contract"));
        assert!(out.contains("/350 kW"));
        assert!(out.contains('\u{2588}'));
    }

    #[test]
    fn over_contract_fills_bar() {
        let ds = fixtures::demand_profile().unwrap();
        let mut summary =
            DemandSummary::from_dataset(&ds, "demand", fixtures::CONTRACTED_KW).unwrap();
        summary.peak_kw = 420.0;
        summary.utilization = Utilization::Danger;
        let out = row(&summary, 60);
        assert!(out.contains("120%"));
        assert!(!out.contains('\u{2591}'));
    }

    #[test]
    fn narrow_area_draws_nothing() {
        let ds = fixtures::demand_profile().unwrap();
        let summary =
            DemandSummary::from_dataset(&ds, "demand", fixtures::CONTRACTED_KW).unwrap();
        let out = row(&summary, 10);
        assert!(!out.contains("Contract"));
    }
}
