//! Declaration outline pane

use crate::outline::Outline;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Keep `selected` inside the window starting at `offset`.
pub(crate) fn follow_selection(offset: &mut usize, selected: usize, visible_height: usize) {
    if selected < *offset {
        *offset = selected;
    } else if selected >= *offset + visible_height {
        *offset = selected + 1 - visible_height;
    }
}

/// Render the outline of every declaration, indented by nesting depth
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    outline: Option<&Outline>,
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
        .title(" Declarations ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let outline = match outline {
        Some(outline) if !outline.is_empty() => outline,
        Some(_) => {
            let paragraph = Paragraph::new("(empty program)")
                .block(block)
                .style(Style::default().fg(DEFAULT_THEME.comment));
            frame.render_widget(paragraph, area);
            return;
        }
        None => {
            let paragraph = Paragraph::new("(no tree: see diagnostics)")
                .block(block)
                .style(Style::default().fg(DEFAULT_THEME.error));
            frame.render_widget(paragraph, area);
            return;
        }
    };

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    follow_selection(scroll_offset, selected, visible_height);

    let items: Vec<ListItem> = outline
        .rows()
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|row| {
            let marker = if row.is_function { "ƒ " } else { "• " };
            let label_style = if row.is_function {
                Style::default().fg(DEFAULT_THEME.function)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            let line = Line::from(vec![
                Span::raw("  ".repeat(row.depth)),
                Span::styled(marker, Style::default().fg(DEFAULT_THEME.primary)),
                Span::styled(row.label.clone(), label_style),
                Span::styled(
                    format!("  :{}", row.location.line),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
            ]);

            let item = ListItem::new(line);
            if row.id == selected {
                item.style(
                    Style::default()
                        .bg(DEFAULT_THEME.current_line_bg)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items).block(block.padding(Padding::new(1, 0, 0, 0)));
    frame.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::follow_selection;

    #[test]
    fn test_follow_selection() {
        let mut offset = 0;
        follow_selection(&mut offset, 12, 10);
        assert_eq!(offset, 3);

        follow_selection(&mut offset, 5, 10);
        assert_eq!(offset, 3);

        follow_selection(&mut offset, 1, 10);
        assert_eq!(offset, 1);
    }
}
