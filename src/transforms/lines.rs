//! Stateless line operations.
//!
//! Lines are obtained by splitting on `\n` only: a trailing newline produces a
//! trailing empty line and a `\r` stays part of its line. Every function joins
//! its result back with `\n`.

use std::collections::HashSet;

use crate::constants::transform::CODE_FENCE;

fn map_lines<F>(text: &str, f: F) -> String
where
    F: Fn(&str) -> String,
{
    text.split('\n').map(f).collect::<Vec<String>>().join("\n")
}

/// Trims Unicode white space and the byte order mark from both ends
pub fn trim_whitespace(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

pub fn remove_blank_lines(text: &str) -> String {
    text.split('\n')
        .filter(|line| !trim_whitespace(line).is_empty())
        .collect::<Vec<&str>>()
        .join("\n")
}

pub fn trim_lines(text: &str) -> String {
    map_lines(text, |line| trim_whitespace(line).to_string())
}

pub fn to_uppercase(text: &str) -> String {
    text.to_uppercase()
}

pub fn to_lowercase(text: &str) -> String {
    text.to_lowercase()
}

/// Keeps the first occurrence of every line
pub fn remove_duplicates(text: &str) -> String {
    let mut seen = HashSet::new();
    text.split('\n')
        .filter(|line| seen.insert(*line))
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Sorts lines by code point order
pub fn sort_lines(text: &str) -> String {
    let mut lines: Vec<&str> = text.split('\n').collect();
    lines.sort();
    lines.join("\n")
}

pub fn reverse_lines(text: &str) -> String {
    text.split('\n').rev().collect::<Vec<&str>>().join("\n")
}

/// Wraps the whole text in a fenced code block
///
/// # Examples
/// ```
/// use clipform::transforms::lines::wrap_code_block;
///
/// assert_eq!(wrap_code_block("let x = 1;", "js"), "```js\nlet x = 1;\n```");
/// ```
pub fn wrap_code_block(text: &str, language: &str) -> String {
    format!("{CODE_FENCE}{language}\n{text}\n{CODE_FENCE}")
}

pub fn add_prefix(text: &str, prefix: &str) -> String {
    map_lines(text, |line| format!("{}{}", prefix, line))
}

pub fn add_suffix(text: &str, suffix: &str) -> String {
    map_lines(text, |line| format!("{}{}", line, suffix))
}

/// Prefixes every line with its number, the first line getting `start_from`
pub fn number_lines(text: &str, start_from: i64) -> String {
    text.split('\n')
        .enumerate()
        .map(|(index, line)| format!("{}. {}", start_from.saturating_add(index as i64), line))
        .collect::<Vec<String>>()
        .join("\n")
}

pub fn indent(text: &str, spaces: usize) -> String {
    let indentation = " ".repeat(spaces);
    map_lines(text, |line| format!("{}{}", indentation, line))
}

/// Removes up to `spaces` leading spaces from every line. Tabs and other
/// whitespace are left alone.
pub fn dedent(text: &str, spaces: usize) -> String {
    map_lines(text, |line| {
        let leading = line.bytes().take(spaces).take_while(|b| *b == b' ').count();
        line[leading..].to_string()
    })
}
