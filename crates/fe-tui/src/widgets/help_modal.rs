use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use fe_core::plan::PlanTier;

/// Key bindings grouped by what they act on.
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("1-8", "Jump to tab"),
            ("Tab / Shift-Tab", "Next / previous tab"),
            ("j k / Down Up", "Move selection"),
        ],
    ),
    (
        "Content",
        &[
            ("Space / Enter", "Toggle the highlighted row"),
            ("g", "Chart gallery (Dashboard)"),
            ("f", "Cycle insight filter"),
        ],
    ),
    (
        "Plan",
        &[
            ("p", "Switch plan Free / Pro"),
            ("u", "Upgrade to Pro"),
        ],
    ),
    (
        "General",
        &[
            ("?", "Toggle this help"),
            ("Esc", "Close help / gallery / notice"),
            ("q / Ctrl-c", "Quit"),
        ],
    ),
];

pub fn render(frame: &mut Frame, tier: PlanTier) {
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled(
            " Keybindings",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (section, keys) in SECTIONS {
        lines.push(Line::from(Span::styled(
            format!(" {section}"),
            Style::default().fg(Color::Cyan),
        )));
        lines.extend(keys.iter().map(|(k, desc)| {
            Line::from(vec![
                Span::styled(
                    format!("   {k:<18}"),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
                Span::raw(*desc),
            ])
        }));
    }
    lines.push(Line::from(""));
    let plan_hint = if tier.has_premium_access() {
        " Premium content is open on this plan"
    } else {
        " Pages marked * need a Pro plan"
    };
    lines.push(Line::from(Span::styled(plan_hint, Style::default().fg(Color::DarkGray))));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help  ? / Esc to close ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(paragraph, area);
}

/// Rect of the given percentage size, centered in `parent`.
pub fn centered_rect(percent_x: u16, percent_y: u16, parent: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(parent);
    let [area] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    area
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_inside_parent() {
        let parent = Rect::new(0, 0, 100, 50);
        let r = centered_rect(60, 70, parent);
        assert_eq!(r.width, 60);
        assert_eq!(r.height, 35);
        assert_eq!(r.x, 20);
        assert!(r.y >= 7 && r.y <= 8);
    }
}
