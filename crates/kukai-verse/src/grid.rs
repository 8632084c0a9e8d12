//! Character-grid rendering of a vertical layout for monospace terminals.
//!
//! Each column is broken into lanes: a lane ends at a line break or when it
//! reaches `rows` characters. Lanes print right-to-left, with glosses in a
//! narrow lane immediately to the right of their base. Every cell is two
//! terminal columns wide; half-width characters are padded.

use crate::layout::{Run, VerticalLayout};

const EMPTY_CELL: &str = "  ";

#[derive(Debug, Default)]
struct Lane {
    main: Vec<char>,
    gloss: Vec<Option<char>>,
}

enum Slot<'a> {
    Lane(&'a Lane),
    Gap,
}

/// Render `layout` into at most `rows` lines of text (more when a gloss runs
/// past the end of its lane).
pub fn render_grid(layout: &VerticalLayout, rows: usize) -> String {
    let rows = rows.max(1);
    let columns: Vec<Vec<Lane>> = layout
        .columns
        .iter()
        .map(|c| lanes(&c.runs, rows))
        .collect();

    // Left-to-right print order: last column first, each column's lanes reversed.
    let mut slots = Vec::new();
    for (i, lanes) in columns.iter().rev().enumerate() {
        if i > 0 {
            slots.push(Slot::Gap);
        }
        slots.extend(lanes.iter().rev().map(Slot::Lane));
    }

    let height = columns
        .iter()
        .flatten()
        .map(|l| l.main.len().max(l.gloss.len()))
        .max()
        .unwrap_or(0);

    let mut out = Vec::with_capacity(height);
    for row in 0..height {
        let mut line = String::new();
        for slot in &slots {
            match slot {
                Slot::Gap => line.push_str(EMPTY_CELL),
                Slot::Lane(lane) => {
                    push_cell(&mut line, lane.main.get(row).copied());
                    if !lane.gloss.is_empty() {
                        push_cell(&mut line, lane.gloss.get(row).copied().flatten());
                    }
                }
            }
        }
        out.push(line.trim_end().to_string());
    }
    out.join("\n")
}

fn lanes(runs: &[Run], rows: usize) -> Vec<Lane> {
    let mut lanes = vec![Lane::default()];
    for run in runs {
        match run {
            Run::Plain { text, .. } => {
                for c in text.chars() {
                    push_char(&mut lanes, c, rows);
                }
            }
            Run::Annotated { base, gloss, .. } => {
                let base_len = base.chars().count();
                let filled = lanes.last().map_or(0, |l| l.main.len());
                // Keep a short base in one lane so its gloss stays beside it.
                if filled > 0 && filled + base_len > rows && base_len <= rows {
                    lanes.push(Lane::default());
                }
                let idx = lanes.len() - 1;
                let start = lanes[idx].main.len();
                for c in base.chars() {
                    push_char(&mut lanes, c, rows);
                }
                let lane = &mut lanes[idx];
                let mut row = start.max(lane.gloss.len());
                for g in gloss.chars() {
                    if lane.gloss.len() <= row {
                        lane.gloss.resize(row + 1, None);
                    }
                    lane.gloss[row] = Some(vertical_form(g));
                    row += 1;
                }
            }
        }
    }
    lanes
}

fn push_char(lanes: &mut Vec<Lane>, c: char, rows: usize) {
    if c == '\n' {
        lanes.push(Lane::default());
        return;
    }
    if lanes.last().is_none_or(|l| l.main.len() >= rows) {
        lanes.push(Lane::default());
    }
    if let Some(lane) = lanes.last_mut() {
        lane.main.push(vertical_form(c));
    }
}

fn push_cell(line: &mut String, c: Option<char>) {
    match c {
        None => line.push_str(EMPTY_CELL),
        Some(c) if is_half_width(c) => {
            line.push(c);
            line.push(' ');
        }
        Some(c) => line.push(c),
    }
}

fn is_half_width(c: char) -> bool {
    c.is_ascii() || ('\u{FF61}'..='\u{FF9F}').contains(&c)
}

/// Swap punctuation for its vertical presentation form.
fn vertical_form(c: char) -> char {
    match c {
        '、' => '︑',
        '。' => '︒',
        '（' => '︵',
        '）' => '︶',
        '【' => '︻',
        '】' => '︼',
        '「' => '﹁',
        '」' => '﹂',
        '―' | '—' | 'ー' => '︱',
        other => other,
    }
}
