//! Markdown rendering for the agent output panel.
//!
//! Converts the agent's markdown to styled ratatui lines. Line-based:
//! headings, lists, quotes, rules and code fences are decided per line, then
//! the remainder goes through a small inline scanner for **bold**, *italic*
//! and `code`. Underscore emphasis is left literal so snake_case survives.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const HEADING_FG: Color = Color::Rgb(97, 175, 239);
const BOLD_FG: Color = Color::Rgb(224, 208, 183);
const ITALIC_FG: Color = Color::Rgb(152, 195, 121);
const CODE_BG: Color = Color::Rgb(40, 44, 52);
const CODE_FG: Color = Color::Rgb(171, 178, 191);
const BULLET_FG: Color = Color::Rgb(198, 120, 221);
const QUOTE_FG: Color = Color::Rgb(128, 128, 128);
const RULE_FG: Color = Color::Rgb(80, 80, 80);

/// Render markdown to styled lines, `width` columns wide for rules and
/// heading underlines.
pub fn render(text: &str, width: usize) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut in_fence = false;

    for raw in text.lines() {
        let trimmed = raw.trim_start();

        if trimmed.starts_with("```") {
            in_fence = !in_fence;
            lines.push(Line::from(Span::styled(
                "─".repeat(width.min(40)),
                Style::default().fg(RULE_FG),
            )));
            continue;
        }
        if in_fence {
            lines.push(Line::from(Span::styled(
                raw.to_string(),
                Style::default().fg(CODE_FG).bg(CODE_BG),
            )));
            continue;
        }

        if raw.trim() == "---" || raw.trim() == "***" || raw.trim() == "___" {
            lines.push(Line::from(Span::styled(
                "─".repeat(width),
                Style::default().fg(RULE_FG),
            )));
            continue;
        }

        if let Some((level, text)) = heading(trimmed) {
            let style = match level {
                1 => Style::default()
                    .fg(HEADING_FG)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                2 => Style::default().fg(HEADING_FG).add_modifier(Modifier::BOLD),
                _ => Style::default()
                    .fg(HEADING_FG)
                    .add_modifier(Modifier::BOLD | Modifier::DIM),
            };
            lines.push(Line::from(Span::styled(text.to_string(), style)));
            continue;
        }

        if let Some(quoted) = trimmed.strip_prefix('>') {
            let mut spans = vec![Span::styled("│ ", Style::default().fg(QUOTE_FG))];
            spans.extend(inline(quoted.trim_start()));
            lines.push(Line::from(spans));
            continue;
        }

        if let Some(item) = list_item(raw) {
            let indent = raw.len() - trimmed.len();
            let mut spans = vec![
                Span::raw(" ".repeat(indent)),
                Span::styled("• ", Style::default().fg(BULLET_FG)),
            ];
            spans.extend(inline(item));
            lines.push(Line::from(spans));
            continue;
        }

        if raw.trim().is_empty() {
            lines.push(Line::from(""));
            continue;
        }

        lines.push(Line::from(inline(raw)));
    }

    lines
}

fn heading(line: &str) -> Option<(u8, &str)> {
    if !line.starts_with('#') {
        return None;
    }
    let level = line.chars().take_while(|c| *c == '#').count();
    if level > 6 {
        return None;
    }
    Some((level as u8, line.trim_start_matches('#').trim()))
}

fn list_item(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    for marker in ["- ", "* ", "+ "] {
        if let Some(rest) = trimmed.strip_prefix(marker) {
            return Some(rest);
        }
    }
    // Ordered lists: "1. text"
    let (num, rest) = trimmed.split_once(". ")?;
    if !num.is_empty() && num.chars().all(|c| c.is_ascii_digit()) {
        return Some(rest);
    }
    None
}

/// Scan one line for inline decorations, longest marker first so `**` is
/// never consumed as two italics.
fn inline(mut rest: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut plain = String::new();

    let flush = |plain: &mut String, spans: &mut Vec<Span<'static>>| {
        if !plain.is_empty() {
            spans.push(Span::raw(std::mem::take(plain)));
        }
    };

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("**") {
            if let Some(end) = after.find("**") {
                flush(&mut plain, &mut spans);
                spans.push(Span::styled(
                    after[..end].to_string(),
                    Style::default().fg(BOLD_FG).add_modifier(Modifier::BOLD),
                ));
                rest = &after[end + 2..];
                continue;
            }
        }
        if let Some(after) = rest.strip_prefix('`') {
            if let Some(end) = after.find('`') {
                flush(&mut plain, &mut spans);
                spans.push(Span::styled(
                    format!(" {} ", &after[..end]),
                    Style::default().fg(CODE_FG).bg(CODE_BG),
                ));
                rest = &after[end + 1..];
                continue;
            }
        }
        if let Some(after) = rest.strip_prefix('*') {
            if let Some(end) = after.find('*') {
                if end > 0 {
                    flush(&mut plain, &mut spans);
                    spans.push(Span::styled(
                        after[..end].to_string(),
                        Style::default().fg(ITALIC_FG).add_modifier(Modifier::ITALIC),
                    ));
                    rest = &after[end + 1..];
                    continue;
                }
            }
        }

        let c = rest.chars().next().unwrap_or_default();
        plain.push(c);
        rest = &rest[c.len_utf8()..];
    }

    flush(&mut plain, &mut spans);
    spans
}
