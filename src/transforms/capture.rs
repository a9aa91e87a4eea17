//! Operations that read or write the capture context.
//!
//! `capture_first_match` / `capture_last_match` detect a pattern from an
//! example and remember one occurrence under a slot name. `capture_replace`
//! and `insert_captured` reuse what was remembered. Referencing a slot that was
//! never filled is not an error: the text is returned unchanged.

use crate::constants::transform::VALUE_PLACEHOLDER;
use crate::context::TransformContext;
use crate::detector::detect_pattern;
use crate::template::Position;
use crate::transforms::lines::trim_whitespace;
use crate::transforms::replace::{replace_matches, FlaggedRegex};

/// Which occurrence a capture keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    First,
    Last,
}

/// Captures one occurrence of the pattern detected from `example`. The text
/// is never modified.
pub fn capture_match(
    text: &str,
    example: &str,
    slot_name: &str,
    occurrence: Occurrence,
    context: &mut TransformContext,
) {
    let detected = detect_pattern(example);
    let mut matches = detected.pattern.find_iter(text);
    let found = match occurrence {
        Occurrence::First => matches.next(),
        Occurrence::Last => matches.last(),
    };

    match found {
        Some(m) => {
            crate::debug!(
                "Captured \"{}\" into slot \"{}\" ({})",
                m.as_str(),
                slot_name,
                detected.kind
            );
            context.capture(slot_name, m.as_str(), &detected.pattern);
        }
        None => {
            crate::warn!(
                "No {} matching \"{}\" found for slot \"{}\"",
                detected.description,
                trim_whitespace(example),
                slot_name
            );
        }
    }
}

/// Replaces every occurrence of the pattern captured in `slot_name`
pub fn capture_replace(
    text: &str,
    slot_name: &str,
    replacement: &str,
    context: &TransformContext,
) -> String {
    match context.get(slot_name) {
        Some(captured) => {
            let compiled = FlaggedRegex {
                regex: captured.pattern.clone(),
                global: true,
                sticky: false,
            };
            replace_matches(text, &compiled, replacement)
        }
        None => {
            crate::warn!("Capture slot \"{}\" not found, skipping replace", slot_name);
            text.to_string()
        }
    }
}

/// Inserts the value captured in `slot_name` at the start or end of the text.
/// Every `{value}` in `format` is replaced by the captured value.
pub fn insert_captured(
    text: &str,
    slot_name: &str,
    position: Position,
    format: &str,
    context: &TransformContext,
) -> String {
    match context.get(slot_name) {
        Some(captured) => {
            let inserted = format.replace(VALUE_PLACEHOLDER, &captured.value);
            match position {
                Position::Start => format!("{}{}", inserted, text),
                Position::End => format!("{}{}", text, inserted),
            }
        }
        None => {
            crate::warn!("Capture slot \"{}\" not found, skipping insert", slot_name);
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "10:00:01 start id=7\n10:00:02 work id=8\n10:00:03 stop id=9";

    #[test]
    fn test_capture_first_and_last() {
        let mut ctx = TransformContext::new();
        capture_match(LOG, "12:34:56", "first", Occurrence::First, &mut ctx);
        capture_match(LOG, "12:34:56", "last", Occurrence::Last, &mut ctx);

        assert_eq!(ctx.get("first").unwrap().value, "10:00:01");
        assert_eq!(ctx.get("last").unwrap().value, "10:00:03");
    }

    #[test]
    fn test_capture_without_match_leaves_context() {
        let mut ctx = TransformContext::new();
        capture_match(LOG, "a@b.io", "mail", Occurrence::First, &mut ctx);
        assert!(ctx.is_empty());
    }

    #[test]
    fn test_capture_overwrites_previous_value() {
        let mut ctx = TransformContext::new();
        capture_match("x 1 y 2", "5", "n", Occurrence::First, &mut ctx);
        capture_match("x 1 y 2", "5", "n", Occurrence::Last, &mut ctx);
        assert_eq!(ctx.get("n").unwrap().value, "2");
    }

    #[test]
    fn test_capture_replace_all_occurrences() {
        let mut ctx = TransformContext::new();
        capture_match(LOG, "00:00:00", "time", Occurrence::First, &mut ctx);
        let result = capture_replace(LOG, "time", "<T>", &ctx);
        assert_eq!(result, "<T> start id=7\n<T> work id=8\n<T> stop id=9");
    }

    #[test]
    fn test_capture_replace_missing_slot() {
        let ctx = TransformContext::new();
        assert_eq!(capture_replace(LOG, "nonexistent", "X", &ctx), LOG);
    }

    #[test]
    fn test_insert_captured_positions() {
        let mut ctx = TransformContext::new();
        capture_match(LOG, "00:00:00", "time", Occurrence::Last, &mut ctx);

        assert_eq!(
            insert_captured("body", "time", Position::Start, "[{value}] ", &ctx),
            "[10:00:03] body"
        );
        assert_eq!(
            insert_captured("body", "time", Position::End, " {value}/{value}", &ctx),
            "body 10:00:03/10:00:03"
        );
        assert_eq!(
            insert_captured("body", "other", Position::End, "{value}", &ctx),
            "body"
        );
    }
}
