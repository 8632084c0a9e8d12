//! Verse markup: ruby/preface parsing, vertical layout, and terminal grid rendering.

pub mod grid;
pub mod layout;
pub mod parse;

pub use grid::render_grid;
pub use layout::{Column, ColumnRole, LayoutStyle, Run, VerticalLayout, compose};
pub use parse::{ParsedHaiku, RubyScanner, Token, parse, scan_ruby};

/// Parse, lay out and rasterise `raw` in one step.
pub fn render_text(raw: &str, style: &LayoutStyle, rows: usize) -> String {
    let parsed = parse(raw);
    let layout = compose(&parsed, style);
    tracing::trace!(columns = layout.columns.len(), rows, "rendering vertical text");
    render_grid(&layout, rows)
}
