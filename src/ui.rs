use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::markdown;
use crate::mode::{FieldKind, Mode};
use crate::ui_state::ResultView;

// Copper Sapphire Morning color palette
const BG_DARK: Color = Color::Rgb(12, 12, 16); // Deep background
const BG_PANEL: Color = Color::Rgb(18, 18, 24); // Slightly lighter for panels

// Sapphire blues
const SAPPHIRE: Color = Color::Rgb(101, 150, 243); // #6596F3 - Primary accent
const CYAN_LIGHT: Color = Color::Rgb(178, 220, 226); // #B2DCE2 - Light cyan

// Copper/warm tones
const TAN: Color = Color::Rgb(216, 180, 169); // #D8B4A9 - Tan/beige
const PALE_YELLOW: Color = Color::Rgb(234, 208, 148); // #EAD094 - Pale yellow

// Accent colors
const BURGUNDY: Color = Color::Rgb(204, 92, 68); // #CC5C44 - Warnings/errors
const OLIVE: Color = Color::Rgb(131, 179, 102); // #83B366 - Success/green

// Text colors
const TEXT_PRIMARY: Color = Color::Rgb(240, 240, 245); // Near white
const TEXT_SECONDARY: Color = Color::Rgb(180, 180, 190); // Light gray
const TEXT_MUTED: Color = Color::Rgb(105, 116, 133); // #697485 - Medium gray

// Border colors (subtle)
const BORDER_DIM: Color = Color::Rgb(45, 50, 60); // Dim border
const BORDER_ACCENT: Color = Color::Rgb(70, 85, 110); // Accent border

// Code block colors (for raw markdown view)
const CODE_BG: Color = Color::Rgb(40, 44, 52); // Dark background
const CODE_FG: Color = Color::Rgb(171, 178, 191); // Light gray text

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn draw(frame: &mut Frame, app: &App) {
    // Fill entire background
    let bg = Block::default().style(Style::default().bg(BG_DARK));
    frame.render_widget(bg, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(1), // Mode tabs
            Constraint::Min(8),    // Form + result panels
            Constraint::Length(1), // Status / key hints
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    draw_tabs(frame, app, chunks[1]);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(44), Constraint::Min(30)])
        .split(chunks[2]);

    draw_form(frame, app, panels[0]);
    draw_result(frame, app, panels[1]);
    draw_status(frame, app, chunks[3]);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" ⚡ ", Style::default().fg(PALE_YELLOW)),
        Span::styled(
            "Social Command Center",
            Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  AI Content Strategist", Style::default().fg(TEXT_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(title), area);

    let agent = Paragraph::new(Line::from(Span::styled(
        format!("agent: {} ", app.base_url()),
        Style::default().fg(TEXT_MUTED),
    )))
    .alignment(Alignment::Right);
    frame.render_widget(agent, area);
}

fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for mode in Mode::ALL {
        let label = format!(" {} ", mode.spec().label);
        if mode == app.mode {
            spans.push(Span::styled(
                label,
                Style::default()
                    .fg(BG_DARK)
                    .bg(SAPPHIRE)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(label, Style::default().fg(TEXT_SECONDARY)));
        }
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled("(Tab to switch)", Style::default().fg(TEXT_MUTED)));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_form(frame: &mut Frame, app: &App, area: Rect) {
    let spec = app.mode.spec();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_ACCENT))
        .title(Span::styled(
            format!(" {} ", spec.panel_title),
            Style::default().fg(CYAN_LIGHT).add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(BG_PANEL));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();

    for (i, field) in spec.fields.iter().enumerate() {
        let focused = i == app.focus;
        let marker = if focused { "▸ " } else { "  " };
        let label_style = if focused {
            Style::default().fg(SAPPHIRE).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_SECONDARY)
        };

        let mut label_spans = vec![
            Span::styled(marker, Style::default().fg(SAPPHIRE)),
            Span::styled(field.label, label_style),
        ];
        if field.required {
            label_spans.push(Span::styled(" *", Style::default().fg(BURGUNDY)));
        }
        lines.push(Line::from(label_spans));
        lines.push(field_value_line(app, i, inner.width as usize));
        lines.push(Line::from(""));
    }

    // Submit control
    if app.ui.is_loading() {
        let spinner = SPINNER_FRAMES[(app.animation_tick / 6) as usize % SPINNER_FRAMES.len()];
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(spinner, Style::default().fg(SAPPHIRE)),
            Span::styled(
                format!(" {}", spec.busy_label),
                Style::default().fg(TEXT_SECONDARY).add_modifier(Modifier::ITALIC),
            ),
        ]));
    } else {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!("[ {} ]", spec.submit_label),
                Style::default()
                    .fg(BG_DARK)
                    .bg(OLIVE)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Enter", Style::default().fg(TEXT_MUTED)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  💡 {}", spec.tip),
        Style::default().fg(TEXT_MUTED).add_modifier(Modifier::ITALIC),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// The editable value row for one field. Selects render as `◂ value ▸`,
/// empty text fields show their hint, the focused field gets a block cursor.
fn field_value_line(app: &App, index: usize, width: usize) -> Line<'static> {
    let field = &app.mode.spec().fields[index];
    let focused = index == app.focus;
    let value = app.form.value(field.name);

    match field.kind {
        FieldKind::Select { .. } => {
            let arrows = if focused { SAPPHIRE } else { TEXT_MUTED };
            Line::from(vec![
                Span::raw("    "),
                Span::styled("◂ ", Style::default().fg(arrows)),
                Span::styled(value.to_string(), Style::default().fg(TAN)),
                Span::styled(" ▸", Style::default().fg(arrows)),
            ])
        }
        _ => {
            if value.is_empty() && !field.hint.is_empty() {
                let mut spans = vec![
                    Span::raw("    "),
                    Span::styled(
                        field.hint.to_string(),
                        Style::default().fg(TEXT_MUTED).add_modifier(Modifier::ITALIC),
                    ),
                ];
                if focused {
                    spans.insert(1, Span::styled("█", Style::default().fg(SAPPHIRE)));
                }
                return Line::from(spans);
            }

            // Keep the tail visible when the value outgrows the panel.
            let budget = width.saturating_sub(6);
            let mut shown: String = value.to_string();
            while shown.width() > budget {
                shown.remove(0);
            }
            let mut spans = vec![
                Span::raw("    "),
                Span::styled(shown, Style::default().fg(TEXT_PRIMARY)),
            ];
            if focused {
                spans.push(Span::styled("█", Style::default().fg(SAPPHIRE)));
            }
            Line::from(spans)
        }
    }
}

fn draw_result(frame: &mut Frame, app: &App, area: Rect) {
    match app.ui.result_view() {
        ResultView::Error(message) => draw_error(frame, message, area),
        ResultView::Output(text) => draw_output(frame, app, text, area),
        ResultView::Placeholder => draw_placeholder(frame, app, area),
    }
}

fn draw_error(frame: &mut Frame, message: &str, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BURGUNDY))
        .title(Span::styled(
            " ⚠ Error ",
            Style::default().fg(BURGUNDY).add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(BG_PANEL));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let body = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(BURGUNDY),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(body, inner);
}

fn draw_output(frame: &mut Frame, app: &App, text: &str, area: Rect) {
    let copy_hint = if app.clipboard.copied() {
        Span::styled(" ✓ Copied ", Style::default().fg(OLIVE).add_modifier(Modifier::BOLD))
    } else {
        Span::styled(" Ctrl+Y copy ", Style::default().fg(TEXT_MUTED))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_DIM))
        .title(Span::styled(
            " Result ",
            Style::default().fg(CYAN_LIGHT).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(copy_hint).right_aligned())
        .style(Style::default().bg(BG_PANEL));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = if app.show_raw_markdown {
        text.lines()
            .map(|l| {
                Line::from(Span::styled(
                    l.to_string(),
                    Style::default().fg(CODE_FG).bg(CODE_BG),
                ))
            })
            .collect()
    } else {
        markdown::render(text, inner.width.saturating_sub(2) as usize)
    };

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll_offset, 0));
    frame.render_widget(body, inner);
}

fn draw_placeholder(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_DIM))
        .style(Style::default().bg(BG_PANEL));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from(""); (inner.height / 2).saturating_sub(1) as usize];
    if app.ui.is_loading() {
        let spinner = SPINNER_FRAMES[(app.animation_tick / 6) as usize % SPINNER_FRAMES.len()];
        lines.push(Line::from(Span::styled(
            format!("{spinner} {}", app.mode.spec().busy_label),
            Style::default().fg(SAPPHIRE),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "✨ Ready to Create",
            Style::default().fg(TAN).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Fill the form and press Enter.",
            Style::default().fg(TEXT_MUTED),
        )));
    }

    let body = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(body, inner);
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let line = match &app.status_message {
        Some(message) => Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(PALE_YELLOW),
        )),
        None => Line::from(Span::styled(
            " Tab modes │ ↑↓ fields │ ←→ options │ Enter submit │ Ctrl+Y copy │ F2 raw │ Esc quit",
            Style::default().fg(TEXT_MUTED),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}
