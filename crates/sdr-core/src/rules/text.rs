//! String helpers behind the individual rules.

/// Length in bytes of a `DDDD DD DD` date prefix.
const DATE_PREFIX_LEN: usize = 10;

/// Collapses every whitespace run to a single space and trims both ends.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits at the last `.` into `(name, ".ext")`.
///
/// A dot in first position does not start an extension (".bashrc" has none).
pub(crate) fn split_extension(s: &str) -> (&str, &str) {
    match s.rfind('.') {
        Some(idx) if idx > 0 => s.split_at(idx),
        _ => (s, ""),
    }
}

/// Replaces every whitespace run with a single `_`. Ends are not trimmed.
pub(crate) fn underscore_spaces(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push('_');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// Appends `suffix` to the name portion, ahead of any extension.
pub(crate) fn append_to_name(s: &str, suffix: &str) -> String {
    let (name, ext) = split_extension(s);
    format!("{name}{suffix}{ext}")
}

/// Keeps only `[A-Za-z0-9._-]` in the name portion.
pub(crate) fn remove_special(s: &str) -> String {
    let (name, ext) = split_extension(s);
    let mut out: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    out.push_str(ext);
    out
}

/// Title-cases each word of the name portion.
///
/// A word starts at an ASCII word character and runs up to the next
/// whitespace, so "o'neil-smith" becomes "O'neil-smith".
pub(crate) fn title_case(s: &str) -> String {
    let (name, ext) = split_extension(s);
    let mut out = String::with_capacity(s.len());
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        if is_word_char(c) {
            out.extend(c.to_uppercase());
            while let Some(&next) = chars.peek() {
                if next.is_whitespace() {
                    break;
                }
                out.extend(next.to_lowercase());
                chars.next();
            }
        } else {
            out.push(c);
        }
    }
    out.push_str(ext);
    out
}

/// Joins the capitalised fragments of the name portion, split on `-`, `_`
/// and whitespace.
pub(crate) fn camel_case(s: &str) -> String {
    let (name, ext) = split_extension(s);
    let mut out = String::with_capacity(s.len());
    for word in name
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
    {
        out.push_str(&capitalize(word));
    }
    out.push_str(ext);
    out
}

/// Removes `text`, then reinserts it right after a leading `DDDD DD DD` date.
///
/// Returns `None` when `text` is empty or absent from `s`. Without a date
/// prefix the removal still applies, the text is not reinserted.
pub(crate) fn move_after_date(s: &str, text: &str) -> Option<String> {
    if text.is_empty() || !s.contains(text) {
        return None;
    }
    let without = collapse_whitespace(&s.replace(text, ""));
    let moved = if has_date_prefix(&without) {
        let (date, rest) = without.split_at(DATE_PREFIX_LEN);
        let rest = rest.trim();
        if rest.is_empty() {
            format!("{date} {text}")
        } else {
            format!("{date} {text} {rest}")
        }
    } else {
        without
    };
    Some(tidy_before_extension(&moved))
}

/// Drops whitespace left directly in front of the extension separator.
fn tidy_before_extension(s: &str) -> String {
    let (name, ext) = split_extension(s);
    if ext.is_empty() {
        return s.to_string();
    }
    format!("{}{}", name.trim_end(), ext)
}

fn has_date_prefix(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= DATE_PREFIX_LEN
        && b[..4].iter().all(u8::is_ascii_digit)
        && b[4] == b' '
        && b[5..7].iter().all(u8::is_ascii_digit)
        && b[7] == b' '
        && b[8..10].iter().all(u8::is_ascii_digit)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
