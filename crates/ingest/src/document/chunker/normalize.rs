//! Whitespace normalization applied before chunking.
//!
//! All chunk offsets are measured against one fixed normalized string, so
//! normalization runs exactly once, up front.

/// Collapse whitespace runs to single spaces, preserving blank lines
/// (two or more newlines in a run) as `"\n\n"` paragraph markers.
/// Leading and trailing whitespace is removed.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_ws = false;
    let mut newlines = 0usize;

    for ch in text.chars() {
        if ch.is_whitespace() {
            in_ws = true;
            if ch == '\n' {
                newlines += 1;
            }
        } else {
            if in_ws && !out.is_empty() {
                if newlines >= 2 {
                    out.push_str("\n\n");
                } else {
                    out.push(' ');
                }
            }
            out.push(ch);
            in_ws = false;
            newlines = 0;
        }
    }

    out
}

/// Fully flattened form: every whitespace run becomes a single space,
/// leading/trailing whitespace removed.
pub fn flatten(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
