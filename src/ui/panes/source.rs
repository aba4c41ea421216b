//! Source code pane rendering with syntax highlighting
//!
//! Displays the parsed file with line numbers. Type keywords are recognized with
//! the lexer's own keyword table, so highlighting always agrees with parsing.
//! The line of the selected declaration (or of the selected diagnostic) is
//! marked, and kept in view unless the pane itself is being scrolled.

use crate::parser::lexer::TokenKind;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Line to mark in the source pane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub line: usize,
    pub is_error: bool,
}

/// Simple syntax highlighting for one source line
fn highlight_source_line(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let is_func = chars[i..].iter().find(|ch| !ch.is_whitespace()) == Some(&'(');
            let style = word_style(&word, is_func);
            spans.push(Span::styled(word, style));
            continue;
        }

        if c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let number: String = chars[start..i].iter().collect();
            spans.push(Span::styled(number, Style::default().fg(DEFAULT_THEME.number)));
            continue;
        }

        let style = match c {
            '{' | '}' | '(' | ')' => Style::default().fg(DEFAULT_THEME.primary),
            ';' | '=' => Style::default().fg(DEFAULT_THEME.fg),
            c if c.is_whitespace() => Style::default(),
            _ => Style::default().fg(DEFAULT_THEME.error), // Not part of the language
        };
        spans.push(Span::styled(c.to_string(), style));
        i += 1;
    }

    Line::from(spans)
}

fn word_style(word: &str, is_function: bool) -> Style {
    if TokenKind::keyword(word).is_some() {
        Style::default()
            .fg(DEFAULT_THEME.type_name)
            .add_modifier(Modifier::BOLD)
    } else if is_function {
        Style::default().fg(DEFAULT_THEME.function)
    } else {
        Style::default().fg(DEFAULT_THEME.fg)
    }
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    highlight: Option<Highlight>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Source Code ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = source_code.lines().collect();
    let total_lines = lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    // Keep the highlighted line centered while another pane drives the selection
    if let Some(hl) = highlight {
        if !is_focused && hl.line > 0 {
            *scroll_offset = (hl.line - 1).saturating_sub(visible_height / 2);
        }
    }

    if total_lines > visible_height {
        *scroll_offset = (*scroll_offset).min(total_lines - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let marked = highlight.filter(|hl| hl.line == line_num);
            let line_num_str = format!("{:4} ", line_num);

            let (num_style, content_base_style) = match marked {
                Some(Highlight { is_error: true, .. }) => (
                    Style::default()
                        .fg(DEFAULT_THEME.error)
                        .add_modifier(Modifier::BOLD),
                    Style::default()
                        .bg(DEFAULT_THEME.error)
                        .fg(Color::White) // White text on red for visibility
                        .add_modifier(Modifier::BOLD),
                ),
                Some(_) => (
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                    Style::default().bg(DEFAULT_THEME.current_line_bg),
                ),
                None => (Style::default().fg(DEFAULT_THEME.comment), Style::default()),
            };

            let mut content_line = highlight_source_line(line);
            match marked {
                Some(Highlight { is_error: true, .. }) => {
                    for span in &mut content_line.spans {
                        span.style = content_base_style;
                    }
                }
                Some(_) => {
                    for span in &mut content_line.spans {
                        span.style = span.style.patch(content_base_style);
                    }
                }
                None => {}
            }

            let mut final_spans = vec![Span::styled(line_num_str, num_style)];
            final_spans.extend(content_line.spans);

            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
