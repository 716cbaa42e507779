//! Line-level helpers for the action script section.

/// Marker introducing an outline annotation at the end of an action line.
const OUTLINE_MARKER: &str = ":::";

/// Normalize `\r\n`, `\n\r` and lone `\r` to `\n`.
pub fn normalize_newlines(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                result.push('\n');
            }
            '\n' => {
                if chars.peek() == Some(&'\r') {
                    chars.next();
                }
                result.push('\n');
            }
            _ => result.push(c),
        }
    }

    result
}

/// Split off a trailing ` ::: outline` annotation.
///
/// The marker must be surrounded by whitespace and followed by some text.
/// The leftmost such marker wins. Returns the line without the annotation
/// and the annotation text, if any.
pub fn strip_outline(line: &str) -> (&str, Option<&str>) {
    let mut search_from = 0;

    while let Some(found) = line[search_from..].find(OUTLINE_MARKER) {
        let marker_start = search_from + found;
        let marker_end = marker_start + OUTLINE_MARKER.len();
        search_from = marker_start + 1;

        let before = &line[..marker_start];
        let after = &line[marker_end..];

        let ws_before = before.len() - before.trim_end().len();
        if ws_before == 0 {
            continue;
        }

        let outline = after.trim_start();
        let ws_after = after.len() - outline.len();
        // `\s+` needs at least one whitespace char and `.+` at least one char
        // on the same line
        if ws_after == 0 || outline.is_empty() || outline.contains('\n') {
            continue;
        }

        return (&line[..marker_start - ws_before], Some(outline));
    }

    (line, None)
}

/// Match `identifier <ws>* : <ws>* remainder` against a trimmed line.
///
/// The identifier is one or more ASCII word characters (`[A-Za-z0-9_]`)
/// and the remainder must be non-empty.
pub fn match_command(line: &str) -> Option<(&str, &str)> {
    let name_len = line
        .find(|c: char| !is_word_char(c))
        .unwrap_or(line.len());
    if name_len == 0 {
        return None;
    }

    let (name, rest) = line.split_at(name_len);
    let rest = rest.trim_start().strip_prefix(':')?;
    let remainder = rest.trim_start();

    if remainder.is_empty() {
        return None;
    }

    Some((name, remainder))
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
