//! Terminal output for rule sets, voting sheets, and published results.
//!
//! Verses and comment blocks are printed vertically through the verse grid
//! renderer; headings stay horizontal.

use std::fmt::Write;

use kukai_core::{RoundSnapshot, VotingRule, entry_snippet, text::SNIPPET_CHARS};
use kukai_results::Placement;
use kukai_verse::{LayoutStyle, render_text};

const PEN_NAME_NOTICE: &str = "※作者名および選評文は俳号で表示されます。";

/// One line per rule: `特選（最大 1つ / 2点）`.
pub fn rule_table(rules: &[VotingRule]) -> String {
    rules
        .iter()
        .map(|r| format!("{}（最大 {}つ / {}点）", r.label, r.max_picks, r.points))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The anonymised list voters pick from. Authors are never shown.
pub fn voting_sheet(snapshot: &RoundSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "選句：{}", snapshot.title);
    if !snapshot.status.is_empty() {
        let _ = writeln!(out, "状態：{}", snapshot.status);
    }
    if !snapshot.rules.is_empty() {
        let _ = writeln!(out, "\n{}", rule_table(&snapshot.rules));
    }
    out.push('\n');

    let mut entries: Vec<_> = snapshot.entries.iter().collect();
    entries.sort_by_key(|e| e.entry_no);
    for e in entries {
        let snippet = entry_snippet(&e.body, SNIPPET_CHARS);
        if snippet.is_empty() {
            let _ = writeln!(out, "No.{}", e.entry_no);
        } else {
            let _ = writeln!(out, "No.{}　{}", e.entry_no, snippet);
        }
    }
    out
}

/// Full results page: a heading per rank, then each entry's verse and
/// comments in vertical form.
pub fn results_report(
    snapshot: &RoundSnapshot,
    placements: &[Placement],
    style: &LayoutStyle,
    rows: usize,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "結果発表：{}", snapshot.title);
    if !snapshot.status.is_empty() {
        let _ = writeln!(out, "状態：{}", snapshot.status);
    }
    let _ = writeln!(out, "{PEN_NAME_NOTICE}");

    let mut current_rank = None;
    for p in placements {
        if current_rank != Some(p.rank) {
            let _ = writeln!(out, "\n=== 第{}位（合計 {} 点） ===", p.rank, p.score);
            current_rank = Some(p.rank);
        }
        out.push('\n');
        out.push_str(&placement_card(p, style, rows));
    }
    out
}

fn placement_card(p: &Placement, style: &LayoutStyle, rows: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "No.{}", p.entry_no);
    let _ = writeln!(out, "{}", render_text(&p.verse, style, rows));
    if !p.comments.is_empty() {
        let _ = writeln!(out, "\n選評");
        let _ = writeln!(out, "{}", render_text(&p.comments, style, rows));
    }
    out
}
