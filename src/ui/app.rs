//! Main TUI application state and logic

use crate::outline::Outline;
use crate::parser::ast::Program;
use crate::parser::parse::ParseError;
use crate::ui::panes::{self, Highlight, StatusRenderData};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Tree,
    Source,
    Diagnostics,
}

impl FocusedPane {
    /// Move focus to the next pane (tree -> source -> diagnostics)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Tree => FocusedPane::Source,
            FocusedPane::Source => FocusedPane::Diagnostics,
            FocusedPane::Diagnostics => FocusedPane::Tree,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Tree => FocusedPane::Diagnostics,
            FocusedPane::Source => FocusedPane::Tree,
            FocusedPane::Diagnostics => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    /// Displayed name of the parsed file
    pub file_name: String,

    /// The source code that was parsed
    pub source_code: String,

    /// Outline of the parsed tree; `None` when parsing failed
    pub outline: Option<Outline>,

    /// Every error reported by the parser
    pub diagnostics: Vec<ParseError>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Selected outline row and diagnostic
    pub selected_node: usize,
    pub selected_diagnostic: usize,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub tree_scroll: usize,
    pub diagnostics_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app from the source text and the parse outcome
    pub fn new(
        file_name: impl Into<String>,
        source_code: String,
        parsed: Result<Program, Vec<ParseError>>,
    ) -> Self {
        let (outline, diagnostics, focused_pane, status_message) = match parsed {
            Ok(program) => (
                Some(Outline::build(&program)),
                Vec::new(),
                FocusedPane::Tree,
                String::from("Parsed successfully"),
            ),
            Err(errors) => (
                None,
                errors,
                FocusedPane::Diagnostics,
                String::from("Parsing failed"),
            ),
        };

        App {
            file_name: file_name.into(),
            source_code,
            outline,
            diagnostics,
            focused_pane,
            selected_node: 0,
            selected_diagnostic: 0,
            source_scroll: 0,
            tree_scroll: 0,
            diagnostics_scroll: 0,
            should_quit: false,
            status_message,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Line to mark in the source pane
    pub fn highlight(&self) -> Option<Highlight> {
        let diagnostic = || {
            self.diagnostics.get(self.selected_diagnostic).map(|err| Highlight {
                line: err.location().line,
                is_error: true,
            })
        };

        if self.focused_pane == FocusedPane::Diagnostics {
            if let Some(hl) = diagnostic() {
                return Some(hl);
            }
        }

        self.outline
            .as_ref()
            .and_then(|outline| outline.row(self.selected_node))
            .map(|row| Highlight {
                line: row.location.line,
                is_error: false,
            })
            .or_else(diagnostic)
    }

    /// Render the UI
    pub(crate) fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Left: Source | Right: Declarations over Diagnostics
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[1]);

        let highlight = self.highlight();

        panes::render_source_pane(
            frame,
            columns[0],
            &self.source_code,
            highlight,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_tree_pane(
            frame,
            right_rows[0],
            self.outline.as_ref(),
            self.selected_node,
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        panes::render_diagnostics_pane(
            frame,
            right_rows[1],
            &self.diagnostics,
            self.selected_diagnostic,
            self.focused_pane == FocusedPane::Diagnostics,
            &mut self.diagnostics_scroll,
        );

        let (declarations, functions, variables, max_depth) = self
            .outline
            .as_ref()
            .map(|o| (o.len(), o.function_count(), o.variable_count(), o.max_depth()))
            .unwrap_or((0, 0, 0, 0));

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &StatusRenderData {
                message: &self.status_message,
                file_name: &self.file_name,
                declarations,
                functions,
                variables,
                max_depth,
                error_count: self.diagnostics.len(),
            },
        );
    }

    fn node_count(&self) -> usize {
        self.outline.as_ref().map_or(0, Outline::len)
    }

    /// Handle keyboard events
    pub(crate) fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Tree => {
                    self.selected_node = self.selected_node.saturating_sub(1);
                }
                FocusedPane::Source => {
                    self.source_scroll = self.source_scroll.saturating_sub(1);
                }
                FocusedPane::Diagnostics => {
                    self.selected_diagnostic = self.selected_diagnostic.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Tree => {
                    if self.selected_node + 1 < self.node_count() {
                        self.selected_node += 1;
                    }
                }
                FocusedPane::Source => {
                    // Clamped against the pane height at render time
                    self.source_scroll = self.source_scroll.saturating_add(1);
                }
                FocusedPane::Diagnostics => {
                    if self.selected_diagnostic + 1 < self.diagnostics.len() {
                        self.selected_diagnostic += 1;
                    }
                }
            },
            KeyCode::Home => {
                self.selected_node = 0;
                self.status_message = "First declaration".to_string();
            }
            KeyCode::End => {
                self.selected_node = self.node_count().saturating_sub(1);
                self.status_message = "Last declaration".to_string();
            }
            KeyCode::Left | KeyCode::Char('p') => self.select_parent(),
            KeyCode::Right => self.select_first_child(),
            KeyCode::Char('n') => self.select_next_same_name(),
            KeyCode::Enter => match self.focused_pane {
                FocusedPane::Source => self.select_from_source(),
                _ => self.jump_to_diagnostic(),
            },
            _ => {}
        }
    }

    /// Move the outline selection to the enclosing function
    fn select_parent(&mut self) {
        let Some(outline) = self.outline.as_ref() else {
            return;
        };

        match outline.parent(self.selected_node) {
            Some(parent) => {
                self.selected_node = parent;
                self.status_message = match outline.row(parent) {
                    Some(row) => format!("Parent: {}", row.label),
                    None => "Parent".to_string(),
                };
            }
            None => {
                self.status_message = "Already at top level".to_string();
            }
        }
    }

    fn select_first_child(&mut self) {
        let Some(outline) = self.outline.as_ref() else {
            return;
        };

        match outline.children(self.selected_node).first() {
            Some(&child) => self.selected_node = child,
            None => self.status_message = "No nested declarations".to_string(),
        }
    }

    /// Cycle through every declaration sharing the selected one's name
    fn select_next_same_name(&mut self) {
        let Some(outline) = self.outline.as_ref() else {
            return;
        };
        let Some(row) = outline.row(self.selected_node) else {
            return;
        };

        let same = outline.lookup(&row.name);
        let next = same
            .iter()
            .copied()
            .find(|&id| id > self.selected_node)
            .or_else(|| same.first().copied());

        match next {
            Some(id) if id != self.selected_node => {
                self.status_message = format!("'{}' ({} declarations)", row.name, same.len());
                self.selected_node = id;
            }
            _ => self.status_message = format!("'{}' is declared once", row.name),
        }
    }

    /// Select the first declaration at or below the top visible source line
    fn select_from_source(&mut self) {
        let Some(outline) = self.outline.as_ref() else {
            return;
        };

        let last_line = self.source_code.lines().count();
        let found =
            (self.source_scroll + 1..=last_line).find_map(|line| outline.node_at_line(line));

        match found {
            Some(id) => {
                self.selected_node = id;
                self.focused_pane = FocusedPane::Tree;
                if let Some(row) = outline.row(id) {
                    self.status_message = format!("{} at {}", row.label, row.location);
                }
            }
            None => self.status_message = "No declaration below this line".to_string(),
        }
    }

    fn jump_to_diagnostic(&mut self) {
        if let Some(err) = self.diagnostics.get(self.selected_diagnostic) {
            let location = err.location();
            self.source_scroll = location.line.saturating_sub(1);
            self.focused_pane = FocusedPane::Source;
            self.status_message = format!("Error at {}", location);
        }
    }
}
