//! TUI pane rendering modules
//!
//! - [`source`]: Source code display with syntax highlighting and a marked line
//! - [`tree`]: Outline of every declaration, indented by nesting depth
//! - [`diagnostics`]: Lexical and syntax errors collected while parsing
//! - [`status`]: Status bar with keybindings and parse summary
//!
//! Each pane module exports a primary `render_*` function; panes hold no
//! state of their own beyond the scroll offsets passed in by the app.

pub mod diagnostics;
pub mod source;
pub mod status;
pub mod tree;

// Re-export render functions for convenience
pub use diagnostics::render_diagnostics_pane;
pub use source::{render_source_pane, Highlight};
pub use status::{render_status_bar, StatusRenderData};
pub use tree::render_tree_pane;
