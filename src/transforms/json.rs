use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};

use crate::constants::transform::MAX_JSON_INDENT;
use crate::error::Result;
use crate::transforms::lines::trim_whitespace;

/// Pretty-prints every line that holds a JSON object or array.
///
/// Lines whose trimmed form starts with `{` or `[` are parsed and replaced by
/// their pretty-printed form, keeping the original key order. Lines that fail
/// to parse are left untouched. An indent of 0 produces compact output and
/// indents wider than 10 are clamped.
pub fn json_beautify(text: &str, indent: usize) -> String {
    text.split('\n')
        .map(|line| beautify_line(line, indent))
        .collect::<Vec<String>>()
        .join("\n")
}

fn beautify_line(line: &str, indent: usize) -> String {
    let trimmed = trim_whitespace(line);
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return line.to_string();
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => match to_pretty(&value, indent) {
            Ok(pretty) => pretty,
            Err(e) => {
                crate::warn!("Unable to format JSON line: {}", e);
                line.to_string()
            }
        },
        Err(e) => {
            crate::warn!("Skipping line that is not valid JSON ({})", e);
            line.to_string()
        }
    }
}

fn to_pretty(value: &Value, indent: usize) -> Result<String> {
    if indent == 0 {
        return Ok(serde_json::to_string(value)?);
    }
    let indentation = " ".repeat(indent.min(MAX_JSON_INDENT));
    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(indentation.as_bytes()));
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
