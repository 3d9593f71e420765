/// UI components for the storm risk dashboard
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::layout::centered_rect;
use super::map::parse_color;
use super::state::{LogLevel, LogMessage, TerminalView};
use crate::models::SummaryStats;
use crate::storm::StormCategory;
use crate::styling::RiskClass;
use crate::utils::format_count;
use crate::view::{DetailPanel, Layer};

/// Render a loading indicator
pub fn render_loading_indicator(f: &mut Frame, area: Rect, message: &str) {
    let popup = centered_rect(50, 3, area);
    let loading = Paragraph::new(message)
        .block(Block::default().borders(Borders::ALL).title("Loading"))
        .style(Style::default().fg(Color::Yellow));

    f.render_widget(Clear, popup);
    f.render_widget(loading, popup);
}

/// Render the load error in place of the loading indicator
pub fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let popup = centered_rect(60, 5, area);
    let error = Paragraph::new(vec![
        Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))),
        Line::from(Span::styled("Press Q to quit", Style::default().fg(Color::Gray))),
    ])
    .block(Block::default().borders(Borders::ALL).title("❌ Error"))
    .wrap(Wrap { trim: true });

    f.render_widget(Clear, popup);
    f.render_widget(error, popup);
}

/// Render the summary statistics header
pub fn render_summary(f: &mut Frame, area: Rect, summary: Option<&SummaryStats>) {
    let stat = |label: &str, value: u64, color: Color| {
        vec![
            Span::styled(format!("{}: ", label), Style::default().fg(Color::Gray)),
            Span::styled(format_count(value as f64), Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::raw("   "),
        ]
    };

    let line = match summary {
        Some(s) => Line::from(
            [
                stat("Sub-districts", s.total_districts, Color::White),
                stat("High Risk", s.high_risk_districts, Color::Red),
                stat("Health Facilities", s.total_health_facilities, Color::LightRed),
                stat("Education Facilities", s.total_education_facilities, Color::LightBlue),
            ]
            .concat(),
        ),
        None => Line::from(Span::styled("Waiting for data...", Style::default().fg(Color::Gray))),
    };

    let paragraph = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL).title("Bangladesh Storm Risk Dashboard"));
    f.render_widget(paragraph, area);
}

/// Render the sub-district list used for hover and selection
pub fn render_district_list(
    f: &mut Frame,
    area: Rect,
    entries: &[(String, RiskClass)],
    state: &mut ListState,
    search: Option<&str>,
) {
    let items: Vec<ListItem> = entries
        .iter()
        .map(|(name, class)| {
            ListItem::new(Line::from(vec![
                Span::styled("■ ", Style::default().fg(parse_color(class.color(), Color::Gray))),
                Span::raw(name.clone()),
            ]))
        })
        .collect();

    let title = match search {
        Some(query) => format!("🔍 /{}", query),
        None => format!("Sub-districts ({})", entries.len()),
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");

    f.render_stateful_widget(list, area, state);
}

/// Render the selected district's details, or the storm timeline if nothing is selected
pub fn render_detail_panel(f: &mut Frame, area: Rect, view: &TerminalView) {
    let paragraph = match &view.detail {
        Some(panel) => detail_paragraph(panel),
        None => track_paragraph(view),
    };
    f.render_widget(paragraph, area);
}

fn detail_paragraph(panel: &DetailPanel) -> Paragraph<'static> {
    let lines: Vec<Line> = panel
        .rows
        .iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{}: ", label), Style::default().fg(Color::Gray)),
                Span::styled(value.clone(), Style::default().fg(Color::White)),
            ])
        })
        .collect();

    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(format!("📍 {}", panel.title)))
        .wrap(Wrap { trim: true })
}

fn track_paragraph(view: &TerminalView) -> Paragraph<'static> {
    let lines: Vec<Line> = view
        .layer_markers(Layer::StormTrack)
        .iter()
        .map(|marker| {
            let mut parts = marker.popup.lines();
            let category = parts.next().unwrap_or_default().to_string();
            let time = parts.next().unwrap_or_default().trim_start_matches("Time: ").to_string();
            Line::from(vec![
                Span::styled(format!("{} ", time), Style::default().fg(Color::Gray)),
                Span::styled(category, Style::default().fg(parse_color(marker.color, Color::White))),
            ])
        })
        .collect();

    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("🌀 Storm Track"))
        .wrap(Wrap { trim: true })
}

/// Render the risk legend, storm categories and layer toggles
pub fn render_legend(f: &mut Frame, area: Rect, view: &TerminalView) {
    let mut lines: Vec<Line> = RiskClass::ALL
        .iter()
        .rev()
        .map(|class| {
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(parse_color(class.color(), Color::Gray))),
                Span::raw(format!("{} {}", class.score(), class.label())),
            ])
        })
        .collect();

    let strongest = [StormCategory::Category5, StormCategory::Category3, StormCategory::TropicalStorm];
    lines.push(Line::from(
        strongest
            .iter()
            .map(|c| Span::styled("● ", Style::default().fg(parse_color(c.color(), Color::White))))
            .chain(std::iter::once(Span::raw("storm category")))
            .collect::<Vec<_>>(),
    ));
    lines.push(Line::from(""));

    for (key, layer) in ["1", "2", "3"].iter().zip(Layer::ALL) {
        let checked = if view.is_layer_visible(layer) { "[x]" } else { "[ ]" };
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", key), Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(format!("{} {}", checked, layer.title())),
        ]));
    }

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Legend"));
    f.render_widget(paragraph, area);
}

/// Render the status bar
pub fn render_status_bar(f: &mut Frame, area: Rect, latest: Option<&LogMessage>) {
    let key = |k: &str, color: Color| Span::styled(k.to_string(), Style::default().fg(color).add_modifier(Modifier::BOLD));
    let hint = |t: &str| Span::styled(t.to_string(), Style::default().fg(Color::Gray));

    let mut spans = vec![
        key("↑↓", Color::Yellow),
        hint(" hover • "),
        key("Enter", Color::Yellow),
        hint(" select • "),
        key("1-3", Color::Yellow),
        hint(" layers • "),
        key("/", Color::Yellow),
        hint(" search • "),
        key("E", Color::Green),
        hint(" export • "),
        key("Q", Color::Red),
        hint(" quit"),
    ];

    if let Some(log) = latest {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            format!("[{}] {}", log.timestamp.format("%H:%M:%S"), log.message),
            Style::default().fg(log_color(log.level)),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn log_color(level: LogLevel) -> Color {
    match level {
        LogLevel::Info => Color::Cyan,
        LogLevel::Success => Color::Green,
        LogLevel::Warning => Color::Yellow,
        LogLevel::Error => Color::Red,
    }
}
