use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Tabs};

use fe_core::catalog::Page;

use crate::app::{App, TAB_NAMES, TAB_PAGES};
use crate::tabs;
use crate::widgets::{help_modal, status_bar};

/// Master render function: header tabs, content area, status bar.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // tab bar
            Constraint::Min(0),   // content
            Constraint::Length(1), // status bar
        ])
        .split(frame.area());

    render_tab_bar(frame, app, chunks[0]);
    render_content(frame, app, chunks[1]);
    status_bar::render(frame, app, chunks[2]);

    if app.show_help {
        help_modal::render(frame, app.tier());
    }
}

fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let tier = app.tier();
    let titles: Vec<Line> = TAB_NAMES
        .iter()
        .zip(TAB_PAGES.iter())
        .enumerate()
        .map(|(i, (name, page))| {
            let mut spans = vec![
                Span::styled(
                    format!("{}", i + 1),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(":"),
                Span::raw(*name),
            ];
            // Locked pages stay reachable but are marked.
            if page.link_for(tier) == "#" {
                spans.push(Span::styled("*", Style::default().fg(Color::Yellow)));
            }
            Line::from(spans)
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .title(format!(" FlowEnergy  {} ", tier.display_label()))
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .select(app.current_tab)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::styled("|", Style::default().fg(Color::DarkGray)));

    frame.render_widget(tabs, area);
}

fn render_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.current_page() {
        Page::Dashboard => tabs::dashboard::render(frame, app, area),
        Page::Prediction => tabs::prediction::render(frame, app, area),
        Page::Optimization => tabs::optimization::render(frame, app, area),
        Page::Demand => tabs::demand::render(frame, app, area),
        Page::Insights => tabs::insights::render(frame, app, area),
        Page::Reports => tabs::reports::render(frame, app, area),
        Page::Settings => tabs::settings::render(frame, app, area),
        Page::DataHub => tabs::datahub::render(frame, app, area),
    }
}
