use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use fe_core::entitlement::{GateDecision, Gated, Overlay};

/// Draw content through a gate decision. Open content is drawn as is;
/// gated content is drawn, dimmed, and covered by the upgrade prompt.
pub fn render_gated<F>(frame: &mut Frame, area: Rect, gate: &GateDecision, draw: F)
where
    F: FnOnce(&mut Frame, Rect),
{
    match gate.wrap(area) {
        Gated::Open(area) => draw(frame, area),
        Gated::Obscured { content, overlay } => {
            draw(frame, content);
            render(frame, content, &overlay);
        }
    }
}

/// Dim `area` and center the upgrade prompt over it.
pub fn render(frame: &mut Frame, area: Rect, overlay: &Overlay) {
    frame.buffer_mut().set_style(
        area,
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM),
    );

    let width = area.width.saturating_sub(4).min(64);
    let inner_width = width.saturating_sub(4).max(1) as usize;
    let prompt_rows = overlay.prompt_text.len().div_ceil(inner_width) as u16;
    let height = (prompt_rows + 6).min(area.height);
    if width < 10 || height < 3 {
        return;
    }
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from(Span::styled(
            overlay.title.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            overlay.prompt_text.clone(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[u] ", Style::default().fg(Color::Yellow)),
            Span::styled(
                overlay.cta_label,
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Premium ")
                .border_style(Style::default().fg(Color::Yellow)),
        );

    frame.render_widget(paragraph, popup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use fe_core::entitlement::decide;

    fn draw(gate: &GateDecision, width: u16, height: u16) -> (bool, String) {
        let backend = ratatui::backend::TestBackend::new(width, height);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut drawn = false;
        terminal
            .draw(|frame| {
                render_gated(frame, frame.area(), gate, |frame, area| {
                    drawn = true;
                    frame.render_widget(Paragraph::new("secret series"), area);
                })
            })
            .unwrap();
        let buf = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        (drawn, out)
    }

    #[test]
    fn open_gate_draws_content_only() {
        let (drawn, out) = draw(&decide(true, "Demand Analysis", None), 60, 12);
        assert!(drawn);
        assert!(out.contains("secret series"));
        assert!(!out.contains("Upgrade to Pro"));
    }

    #[test]
    fn closed_gate_still_draws_content_under_prompt() {
        let (drawn, out) = draw(&decide(false, "Demand Analysis", None), 70, 14);
        assert!(drawn);
        assert!(out.contains("Demand Analysis"));
        assert!(out.contains("Upgrade to Pro"));
    }

    #[test]
    fn tiny_area_skips_popup() {
        let (drawn, out) = draw(&decide(false, "Demand Analysis", None), 8, 2);
        assert!(drawn);
        assert!(!out.contains("Upgrade"));
    }
}
