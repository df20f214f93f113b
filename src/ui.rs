use ratatui::prelude::*;

use crate::messages::render::NoticeLevel;

const TS_KEYWORDS: [&str; 2] = ["interface", "type"];
const TS_PRIMITIVES: [&str; 4] = ["string", "number", "boolean", "any"];

/// Simple TypeScript declaration highlighting
pub fn highlight_typescript(text: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for line in text.lines() {
        let mut spans = Vec::new();
        let mut current = String::new();

        let flush = |current: &mut String, spans: &mut Vec<Span<'static>>| {
            if current.is_empty() {
                return;
            }
            let word = std::mem::take(current);
            let style = if TS_KEYWORDS.contains(&word.as_str()) {
                Style::default().fg(Color::Magenta).bold()
            } else if TS_PRIMITIVES.contains(&word.as_str()) {
                Style::default().fg(Color::Green)
            } else if word.starts_with(|c: char| c.is_ascii_uppercase()) {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            spans.push(Span::styled(word, style));
        };

        for c in line.chars() {
            match c {
                '{' | '}' | '[' | ']' | '(' | ')' | '|' | ';' | ':' | '?' | '=' => {
                    flush(&mut current, &mut spans);
                    spans.push(Span::styled(c.to_string(), Style::default().fg(Color::Yellow)));
                }
                ' ' => {
                    flush(&mut current, &mut spans);
                    spans.push(Span::raw(" "));
                }
                _ => current.push(c),
            }
        }
        flush(&mut current, &mut spans);

        lines.push(Line::from(spans));
    }

    lines
}

/// Row and column of a byte offset in multi-line text
pub fn cursor_coords(text: &str, cursor: usize) -> (u16, u16) {
    let before = &text[..cursor.min(text.len())];
    let row = before.matches('\n').count();
    let col = before
        .rsplit('\n')
        .next()
        .map(|l| l.chars().count())
        .unwrap_or(0);
    (row as u16, col as u16)
}

/// Notice color
pub fn notice_color(level: NoticeLevel) -> Color {
    match level {
        NoticeLevel::Info => Color::Cyan,
        NoticeLevel::Success => Color::Green,
        NoticeLevel::Error => Color::Red,
    }
}

/// Method color
pub fn method_color(method: &str) -> Color {
    match method {
        "GET" => Color::Green,
        "POST" => Color::Yellow,
        "PUT" => Color::Blue,
        "PATCH" => Color::Cyan,
        "DELETE" => Color::Red,
        _ => Color::White,
    }
}
