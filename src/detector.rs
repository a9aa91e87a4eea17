//! Auto-detection of common text shapes from a user supplied example.
//!
//! Given a short example such as `2024-01-15T10:30:00Z`, [`detect_pattern`] finds
//! the shape it belongs to and returns an unanchored pattern able to find every
//! occurrence of that shape in a larger text. Matchers are tried from the most
//! specific to the least specific one, since several shapes are subsets of
//! others (every ISO timestamp starts with a date, every integer is a prefix of
//! a decimal).
//!
//! Digit classes are spelled `[0-9]` so only ASCII digits are recognised.

use once_cell::sync::Lazy;
use regex::Regex;
use strum_macros::Display;

use crate::transforms::lines::trim_whitespace;

/// The shapes recognised by the detector
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    #[strum(serialize = "iso_timestamp")]
    IsoTimestamp,
    #[strum(serialize = "grafana_timestamp")]
    GrafanaTimestamp,
    #[strum(serialize = "datetime")]
    Datetime,
    #[strum(serialize = "date")]
    Date,
    #[strum(serialize = "uuid")]
    Uuid,
    #[strum(serialize = "email")]
    Email,
    #[strum(serialize = "url")]
    Url,
    #[strum(serialize = "ipv4")]
    Ipv4,
    #[strum(serialize = "time")]
    Time,
    #[strum(serialize = "integer")]
    Integer,
    #[strum(serialize = "decimal")]
    Decimal,
    #[strum(serialize = "literal")]
    Literal,
}

/// Result of a detection: the find-all pattern, its kind and a description
#[derive(Debug, Clone)]
pub struct DetectedPattern {
    pub pattern: Regex,
    pub kind: PatternKind,
    pub description: String,
}

struct PatternMatcher {
    kind: PatternKind,
    description: &'static str,
    test: Regex,
    pattern: Regex,
}

impl PatternMatcher {
    /// Builds a matcher from the unanchored body of its pattern. The anchored
    /// test is derived from the same body.
    fn new(kind: PatternKind, description: &'static str, body: &str) -> Self {
        PatternMatcher {
            kind,
            description,
            test: Regex::new(&format!("^(?:{})$", body)).unwrap(),
            pattern: Regex::new(body).unwrap(),
        }
    }
}

const OCTET: &str = "(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)";

// Ordered by specificity (most specific first)
static PATTERN_MATCHERS: Lazy<Vec<PatternMatcher>> = Lazy::new(|| {
    vec![
        PatternMatcher::new(
            PatternKind::IsoTimestamp,
            "ISO 8601 timestamp",
            r"[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]{1,3})?Z?",
        ),
        PatternMatcher::new(
            PatternKind::GrafanaTimestamp,
            "Grafana timestamp",
            r"[0-9]{4}-[0-9]{2}-[0-9]{2}\s+[0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]{3}",
        ),
        PatternMatcher::new(
            PatternKind::Datetime,
            "Date and time",
            r"[0-9]{4}-[0-9]{2}-[0-9]{2}\s+[0-9]{2}:[0-9]{2}:[0-9]{2}",
        ),
        PatternMatcher::new(
            PatternKind::Date,
            "Date (YYYY-MM-DD)",
            r"[0-9]{4}-[0-9]{2}-[0-9]{2}",
        ),
        PatternMatcher::new(
            PatternKind::Uuid,
            "UUID",
            r"(?i:[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12})",
        ),
        PatternMatcher::new(
            PatternKind::Email,
            "Email address",
            r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}",
        ),
        PatternMatcher::new(PatternKind::Url, "URL", r"https?://[^\s]+"),
        PatternMatcher::new(
            PatternKind::Ipv4,
            "IPv4 address",
            &format!(r"(?:{OCTET}\.){{3}}{OCTET}"),
        ),
        PatternMatcher::new(
            PatternKind::Time,
            "Time (HH:MM:SS)",
            r"[0-9]{2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]{1,3})?",
        ),
        PatternMatcher::new(PatternKind::Integer, "Integer number", r"-?[0-9]+"),
        PatternMatcher::new(PatternKind::Decimal, "Decimal number", r"-?[0-9]+\.[0-9]+"),
    ]
});

/// Detects the pattern described by the given example.
///
/// # Arguments
/// * `example` - The example to analyze, surrounding whitespace is ignored.
///
/// # Returns
/// The detected pattern. When no known shape matches, the pattern matches the
/// example literally and its kind is [`PatternKind::Literal`].
///
/// # Examples
/// ```
/// use clipform::detector::{detect_pattern, PatternKind};
///
/// let detected = detect_pattern("550e8400-e29b-41d4-a716-446655440000");
/// assert_eq!(detected.kind, PatternKind::Uuid);
/// assert!(detected.pattern.is_match("id=550E8400-E29B-41D4-A716-446655440000"));
/// ```
pub fn detect_pattern(example: &str) -> DetectedPattern {
    let trimmed = trim_whitespace(example);

    PATTERN_MATCHERS
        .iter()
        .find(|matcher| matcher.test.is_match(trimmed))
        .map(|matcher| DetectedPattern {
            pattern: matcher.pattern.clone(),
            kind: matcher.kind,
            description: matcher.description.to_string(),
        })
        .unwrap_or_else(|| literal_pattern(trimmed))
}

/// Builds a pattern matching the given text exactly. Escaping every
/// metacharacter means the pattern always compiles.
fn literal_pattern(text: &str) -> DetectedPattern {
    DetectedPattern {
        pattern: Regex::new(&regex::escape(text)).unwrap(),
        kind: PatternKind::Literal,
        description: "Exact match".to_string(),
    }
}

/// Lists every known pattern kind with its description, in precedence order
pub fn available_pattern_types() -> Vec<(PatternKind, &'static str)> {
    PATTERN_MATCHERS
        .iter()
        .map(|m| (m.kind, m.description))
        .collect()
}
