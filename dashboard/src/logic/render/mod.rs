//! Renderers - Stateless writers for the dashboard's view regions
//!
//! Each renderer owns the type of its region and fully replaces the
//! region's content when called. Nothing survives a render except what the
//! region itself displays.

pub mod detections;
pub mod guidance;
pub mod log_tail;

pub use detections::{render_detections, DetectionListView, DetectionRow};
pub use guidance::{render_guidance, GuidanceView};
pub use log_tail::{append_local, render_logs, LogRowKind, LogTailView};

/// Neutralize characters that a terminal would interpret as structure.
///
/// Control characters other than newline and tab are replaced by their
/// `\u{..}` escape, so ESC sequences print as text instead of moving the
/// cursor or recoloring the screen. Already-escaped text is unchanged.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_control() && c != '\n' && c != '\t' {
            out.extend(c.escape_unicode());
        } else {
            out.push(c);
        }
    }
    out
}

/// Like `escape_markup`, for text drawn on a single row: line breaks and
/// tabs also show as `\n`, `\r` and `\t`.
pub fn escape_line(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' | '\r' | '\t' => out.extend(c.escape_default()),
            c if c.is_control() => out.extend(c.escape_unicode()),
            c => out.push(c),
        }
    }
    out
}
