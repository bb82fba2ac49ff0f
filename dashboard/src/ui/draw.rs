//! Draw - Layout and widgets for the terminal dashboard

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use crate::constants;
use crate::logic::connection::Badge;
use crate::logic::engine::PollStats;
use crate::logic::render::{escape_line, DetectionRow, LogRowKind};
use crate::logic::view::DashboardView;

const BAR_WIDTH: usize = 16;

pub fn draw(frame: &mut Frame, view: &DashboardView, stats: &PollStats) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(6)])
        .split(frame.area());

    draw_header(frame, rows[0], view, stats);

    let body = if view.log_tail_enabled {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1])
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(100)])
            .split(rows[1])
    };

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(body[0]);

    draw_detections(frame, panels[0], view);
    draw_guidance(frame, panels[1], view);

    if view.log_tail_enabled {
        draw_log_tail(frame, body[1], view);
    }
}

// ============================================
// Header
// ============================================

fn badge_style(badge: Badge) -> Style {
    let color = match badge {
        Badge::Pending => Color::Yellow,
        Badge::Connected => Color::Green,
        Badge::Error => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn draw_header(frame: &mut Frame, area: Rect, view: &DashboardView, stats: &PollStats) {
    let mut spans = vec![
        Span::styled(
            format!("● {}", escape_line(view.indicator.text())),
            badge_style(view.indicator.badge()),
        ),
        Span::raw("  "),
        Span::styled(view.clock.text().to_string(), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(
            format!(
                "polls {} ok {} failed {}",
                stats.dispatched, stats.succeeded, stats.failed
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if stats.discarded > 0 {
        spans.push(Span::styled(
            format!(" stale {}", stats.discarded),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let title = format!(" {} v{} ", constants::APP_NAME, constants::APP_VERSION);
    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(header, area);
}

// ============================================
// Detections
// ============================================

fn bar(percent: u16) -> String {
    let filled = (usize::from(percent) * BAR_WIDTH + 50) / 100;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn detection_item(row: &DetectionRow) -> ListItem<'static> {
    let label_style = if row.dangerous {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let mut spans = vec![Span::styled(escape_line(&row.label), label_style)];
    if let Some(tag) = row.tag() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("⚠ {}", tag),
            Style::default().fg(Color::Black).bg(Color::Red),
        ));
    }
    if let Some(hint) = &row.hint {
        spans.push(Span::styled(
            format!(" ({})", escape_line(hint)),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let bar_color = if row.dangerous { Color::Red } else { Color::Green };
    let meter = Line::from(vec![
        Span::styled(bar(row.bar.percent()), Style::default().fg(bar_color)),
        Span::raw(" "),
        Span::raw(row.confidence_text.clone()),
    ]);

    ListItem::new(vec![Line::from(spans), meter])
}

fn draw_detections(frame: &mut Frame, area: Rect, view: &DashboardView) {
    let list = &view.detections;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Detections ({}) ", list.count_text()));

    if list.is_placeholder() {
        let placeholder = Paragraph::new(Span::styled(
            list.placeholder_text(),
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = list.rows().iter().map(detection_item).collect();
    frame.render_widget(List::new(items).block(block), area);
}

// ============================================
// Guidance
// ============================================

fn draw_guidance(frame: &mut Frame, area: Rect, view: &DashboardView) {
    let style = if view.guidance.is_placeholder() {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
    } else {
        Style::default()
    };

    let guidance = Paragraph::new(view.guidance.display_text().to_string())
        .style(style)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" AI Guidance "));
    frame.render_widget(guidance, area);
}

// ============================================
// Log tail
// ============================================

fn draw_log_tail(frame: &mut Frame, area: Rect, view: &DashboardView) {
    let block = Block::default().borders(Borders::ALL).title(" Logs ");
    let rows = view.log_tail.rows();

    if rows.is_empty() {
        let placeholder = Paragraph::new(Span::styled(
            constants::LOGS_PLACEHOLDER,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))
        .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    // Keep the newest rows in view
    let visible = usize::from(area.height.saturating_sub(2));
    let start = if view.log_tail.follows_tail() {
        rows.len().saturating_sub(visible)
    } else {
        0
    };

    let items: Vec<ListItem> = rows[start..]
        .iter()
        .map(|row| {
            let style = match row.kind {
                LogRowKind::Remote => Style::default(),
                LogRowKind::Local => Style::default().fg(Color::Cyan),
                LogRowKind::Placeholder => Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            };
            ListItem::new(Span::styled(escape_line(&row.text), style))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
