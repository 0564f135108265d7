use anyhow::Error;
use chrono::{DateTime, Local, Utc};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::badge::{Dot, Rgb, VisualBadge};

pub(crate) fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.0, color.1, color.2)
}

/// Center `text` in a field of `width` columns, truncating when needed.
pub(crate) fn center_text(text: &str, width: usize) -> String {
    let truncated: String = text.chars().take(width).collect();
    let len = truncated.chars().count();
    let left = (width - len) / 2;
    let right = width - len - left;
    format!("{}{}{}", " ".repeat(left), truncated, " ".repeat(right))
}

/// Terminal rendition of a badge: one line per element, painted on the
/// middle colour of the badge theme.
pub(crate) fn badge_preview_lines(badge: &VisualBadge, inner_width: u16) -> Vec<Line<'static>> {
    let width = inner_width as usize;
    if width == 0 {
        return vec![Line::from("")];
    }
    let [top, middle, bottom] = badge.theme.stops;
    let base = Style::default().fg(Color::White).bg(rgb(middle));
    let bold = base.add_modifier(Modifier::BOLD);
    let faded = Style::default().fg(Color::Gray).bg(rgb(middle));
    let row = |text: &str, style: Style| Line::from(Span::styled(center_text(text, width), style));
    let band = |color: Rgb| Line::from(Span::styled(" ".repeat(width), Style::default().bg(rgb(color))));

    let code_line = if badge.code_title.is_empty() {
        badge.code.clone()
    } else {
        format!("{}  |  {}", badge.code, badge.code_title)
    };
    let dots: String = badge
        .dots
        .iter()
        .map(|dot| match dot {
            Dot::Filled => '●',
            Dot::Empty => '○',
        })
        .flat_map(|ch| [ch, ' '])
        .collect();

    vec![
        band(top),
        row(&format!("[ {} ]", badge.icon.glyph()), bold),
        row(badge.group_title, faded),
        row("", base),
        row(&badge.name, bold),
        row(&code_line, base),
        row("", base),
        row("MY TOP INTEREST", faded),
        row(&badge.interest, bold),
        row("", base),
        row(dots.trim_end(), base),
        row("", base),
        row(&badge.footer, faded),
        band(bottom),
    ]
}

/// Short local time for the roster table.
pub(crate) fn format_created(created_at: &DateTime<Utc>) -> String {
    created_at
        .with_timezone(&Local)
        .format("%m/%d %H:%M")
        .to_string()
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}
