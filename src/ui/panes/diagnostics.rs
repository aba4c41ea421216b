//! Diagnostics pane: every error collected while parsing

use crate::parser::parse::{ErrorKind, ParseError};
use crate::ui::panes::tree::follow_selection;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the diagnostics list
pub fn render_diagnostics_pane(
    frame: &mut Frame,
    area: Rect,
    diagnostics: &[ParseError],
    selected: usize,
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
        .title(format!(" Diagnostics ({}) ", diagnostics.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    if diagnostics.is_empty() {
        let paragraph = Paragraph::new("(no errors)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.success));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    follow_selection(scroll_offset, selected, visible_height);

    let items: Vec<ListItem> = diagnostics
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, err)| {
            let tag = match err.kind() {
                ErrorKind::Lexical => " LEX ",
                ErrorKind::Syntax => " SYN ",
            };
            let location = err.location();
            let message = match err {
                ParseError::Lexical(inner) => inner.to_string(),
                ParseError::Syntax(inner) => inner.to_string(),
            };
            let line = Line::from(vec![
                Span::styled(
                    tag,
                    Style::default()
                        .bg(DEFAULT_THEME.error)
                        .fg(ratatui::style::Color::Black),
                ),
                Span::styled(
                    format!(" {:>3}:{:<3} ", location.line, location.column),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(message, Style::default().fg(DEFAULT_THEME.fg)),
            ]);

            let item = ListItem::new(line);
            if idx == selected && is_focused {
                item.style(Style::default().bg(DEFAULT_THEME.current_line_bg))
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items).block(block.padding(Padding::new(1, 0, 0, 0)));
    frame.render_widget(list, area);
}
