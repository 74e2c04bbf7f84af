//! Discord embed size limits and helpers that keep reply text inside them.
//!
//! Discord rejects the whole message when any part of an embed is too long, so
//! every list rendered into an embed goes through [`join_lines`].

/// Maximum characters in an embed title
pub const TITLE_LIMIT: usize = 256;
/// Maximum characters in an embed description
pub const DESCRIPTION_LIMIT: usize = 4096;
/// Maximum characters in an embed field value
pub const FIELD_LIMIT: usize = 1024;

// Room kept free for the trailing "…and N more" line
const MORE_RESERVE: usize = 24;

/// Cuts `text` to at most `limit` characters, marking the cut with "…".
#[must_use]
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(limit.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Joins `lines` with newlines without exceeding `limit` characters.
///
/// Lines that no longer fit are summarized as "…and N more". Returns `empty`
/// when there are no lines at all.
#[must_use]
pub fn join_lines(lines: &[String], limit: usize, empty: &str) -> String {
    if lines.is_empty() {
        return truncate(empty, limit);
    }

    let budget = limit.saturating_sub(MORE_RESERVE);
    let mut out = String::new();
    let mut used = 0;
    for (i, line) in lines.iter().enumerate() {
        let line = truncate(line, budget);
        let cost = line.chars().count() + usize::from(i > 0);
        let allowed = if i + 1 == lines.len() { limit } else { budget };
        if used + cost > allowed {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("…and {} more", lines.len() - i));
            return out;
        }
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&line);
        used += cost;
    }
    out
}
