//! Greedy word wrapping.
//!
//! Words are never split. A word that is wider than the budget on its own
//! gets a line to itself and overflows.

/// Split a description into words on single spaces.
///
/// Consecutive spaces yield empty words, which keeps their extra spacing
/// when the words are joined back into lines.
pub fn split_words(description: &str) -> Vec<&str> {
    if description.is_empty() {
        return Vec::new();
    }
    description.split(' ').collect()
}

/// Wrap `words` into newline-joined lines no wider than `max_width`.
///
/// Each word is tentatively appended to the current line and the whole line
/// is measured with `width_of`. If it fits the word stays, otherwise the
/// current line is flushed and the word starts the next one. An empty line
/// is never flushed, so an oversized first word does not produce a blank
/// leading line.
pub fn wrap<S, F>(words: &[S], width_of: F, max_width: f32) -> String
where
    S: AsRef<str>,
    F: Fn(&str) -> f32,
{
    let mut lines: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for word in words {
        let word = word.as_ref();
        current.push(word);
        if width_of(&current.join(" ")) <= max_width {
            continue;
        }
        current.pop();
        if !current.is_empty() {
            lines.push(current.join(" "));
            current.clear();
        }
        current.push(word);
    }

    if !current.is_empty() {
        lines.push(current.join(" "));
    }

    lines.join("\n")
}
