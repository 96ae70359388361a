//! Identifier case conversion for template helpers.
//!
//! Keys are split into words on separators (anything not alphanumeric),
//! lower-to-upper transitions, and the end of an uppercase run
//! (`HTTPServer` → `HTTP`, `Server`). Acronyms are treated as ordinary words,
//! so `enableAPI` becomes `EnableApi` in Pascal case.

/// Split an identifier into words.
pub fn words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if let Some(prev) = current.chars().last() {
            let next = chars.get(i + 1).copied();
            let lower_to_upper = (prev.is_lowercase() || prev.is_ascii_digit()) && c.is_uppercase();
            let acronym_end = prev.is_uppercase()
                && c.is_uppercase()
                && next.is_some_and(|n| n.is_lowercase());
            if lower_to_upper || acronym_end {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

pub fn to_pascal(input: &str) -> String {
    words(input).iter().map(|w| capitalize(w)).collect()
}

pub fn to_camel(input: &str) -> String {
    words(input)
        .iter()
        .enumerate()
        .map(|(i, w)| if i == 0 { w.to_lowercase() } else { capitalize(w) })
        .collect()
}

fn join_lower(input: &str, sep: &str) -> String {
    words(input)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(sep)
}

pub fn to_snake(input: &str) -> String {
    join_lower(input, "_")
}

pub fn to_kebab(input: &str) -> String {
    join_lower(input, "-")
}

pub fn to_screaming_snake(input: &str) -> String {
    to_snake(input).to_uppercase()
}

pub fn to_screaming_kebab(input: &str) -> String {
    to_kebab(input).to_uppercase()
}

pub fn to_upper(input: &str) -> String {
    input.to_uppercase()
}

pub fn to_lower(input: &str) -> String {
    input.to_lowercase()
}

/// Capitalize each whitespace-separated word, keeping the separators.
pub fn title(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;
    for c in input.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            at_word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Double-quoted string literal with JSON escaping.
///
/// The result is a valid literal in every target language.
pub fn quote(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 2);
    out.push('"');
    for c in input.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Text as one line that cannot end a `//`, `///` or `/* */` comment.
///
/// Whitespace runs (newlines included) collapse to a single space. `*/` is
/// broken up, and `\u` is escaped so Java does not read a unicode escape.
pub fn comment(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace("\\u", "\\\\u")
        .replace("*/", "*\\/")
}

/// Text as one line safe inside a Python `"""` docstring.
pub fn docstring(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('\\', "\\\\")
        .replace("\"\"\"", "\\\"\\\"\\\"")
}
