//! # Rendering Module
//!
//! Turns [`DeckRow`]s into terminal lines. Functions here return strings; printing
//! is left to the command handlers so that layout can be tested without a terminal.
//!
//! ## Row Layout
//!
//! ```text
//! ▸ - Languages                  12    3   20
//!     - Spanish                  10    2   15
//! ```
//!
//! - current marker (2 chars): `▸ ` on the current deck
//! - indent: two spaces per depth level
//! - expander (2 chars): `+`/`-`/blank, omitted entirely when no deck has subdecks
//! - name: truncated to fit
//! - counts (3 × `COL_COUNT`): new, learning, review; zeros are dimmed, blank for
//!   decks that hide their counts
//!
//! Styles come from `console` and are dropped automatically when output is not a
//! terminal or `NO_COLOR` is set.

use console::Style;
use decktree::model::Counts;
use decktree::row::{DeckRow, Expander};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const DEFAULT_LINE_WIDTH: usize = 80;
pub const CURRENT_MARKER: &str = "▸";

const COL_MARKER: usize = 2;
const COL_COUNT: usize = 5;
const INDENT: usize = 2;

/// Terminal width, or [`DEFAULT_LINE_WIDTH`] when not attached to a terminal.
pub fn line_width() -> usize {
    let term = console::Term::stdout();
    if term.is_term() {
        term.size().1 as usize
    } else {
        DEFAULT_LINE_WIDTH
    }
}

pub fn render_rows(rows: &[DeckRow], width: usize) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&render_row(row, width));
        out.push('\n');
    }
    out
}

pub fn render_row(row: &DeckRow, width: usize) -> String {
    let marker = if row.is_current {
        format!("{} ", CURRENT_MARKER)
    } else {
        " ".repeat(COL_MARKER)
    };
    let indent = " ".repeat(row.depth * INDENT);
    let expander = match row.expander {
        Some(Expander::Expand) => "+ ",
        Some(Expander::Collapse) => "- ",
        Some(Expander::Blank) => "  ",
        None => "",
    };

    let counts_width = 3 * COL_COUNT;
    let prefix_width = COL_MARKER + indent.len() + expander.len();
    let name_width = width.saturating_sub(prefix_width + counts_width).max(1);
    let name = truncate_to_width(&row.name, name_width);
    let padding = " ".repeat(name_width.saturating_sub(name.width()));

    let name_style = match (row.is_current, row.filtered) {
        (true, _) => Style::new().bold(),
        (false, true) => Style::new().cyan(),
        (false, false) => Style::new(),
    };

    format!(
        "{}{}{}{}{}{}",
        marker,
        indent,
        expander,
        name_style.apply_to(name),
        padding,
        render_counts(row.counts)
    )
}

fn render_counts(counts: Option<Counts>) -> String {
    let Some(counts) = counts else {
        return String::new();
    };
    [
        (counts.new, Style::new().blue()),
        (counts.learning, Style::new().red()),
        (counts.review, Style::new().green()),
    ]
    .into_iter()
    .map(|(value, style)| {
        let cell = format!("{:>width$}", value, width = COL_COUNT);
        if value == 0 {
            Style::new().dim().apply_to(cell).to_string()
        } else {
            style.apply_to(cell).to_string()
        }
    })
    .collect()
}

pub fn render_totals(due: Option<u32>, eta: Option<u32>) -> String {
    match (due, eta) {
        (Some(0), _) | (None, _) => "Nothing due.".to_string(),
        (Some(due), Some(eta)) => format!("{} due, about {} min.", due, eta),
        (Some(due), None) => format!("{} due.", due),
    }
}

pub fn render_empty(pattern: Option<&str>) -> String {
    match pattern {
        Some(pattern) if !pattern.trim().is_empty() => {
            format!("No decks match \"{}\".", pattern.trim())
        }
        _ => "No decks.".to_string(),
    }
}

/// Cuts `text` to at most `max` display columns, ending in `…` when shortened.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
