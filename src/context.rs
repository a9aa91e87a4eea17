use regex::Regex;
use std::collections::HashMap;

/// A value captured by a `capture_first_match` / `capture_last_match` step
#[derive(Debug, Clone)]
pub struct CapturedValue {
    /// The literal text that matched
    pub value: String,
    /// The pattern that matched it, reused by later steps
    pub pattern: Regex,
}

/// Capture slots shared by the steps of a single pipeline run.
///
/// A context is created empty at the start of every run and dropped at its end,
/// so captures never leak from one invocation into another.
#[derive(Debug, Default)]
pub struct TransformContext {
    captures: HashMap<String, CapturedValue>,
}

impl TransformContext {
    pub fn new() -> Self {
        TransformContext {
            captures: HashMap::new(),
        }
    }

    /// Stores a capture under the given slot, replacing any previous value.
    ///
    /// # Arguments
    /// * `slot` - The name of the capture slot.
    /// * `value` - The matched text.
    /// * `pattern` - The pattern that produced the match.
    pub fn capture<S: Into<String>>(&mut self, slot: S, value: &str, pattern: &Regex) {
        self.captures.insert(
            slot.into(),
            CapturedValue {
                value: value.to_string(),
                pattern: pattern.clone(),
            },
        );
    }

    /// Retrieves the capture stored in the given slot (if available)
    pub fn get(&self, slot: &str) -> Option<&CapturedValue> {
        self.captures.get(slot)
    }

    /// Checks whether the given slot has been populated
    pub fn contains(&self, slot: &str) -> bool {
        self.captures.contains_key(slot)
    }

    pub fn len(&self) -> usize {
        self.captures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }

    /// Returns the populated slots sorted by name
    pub fn entries(&self) -> Vec<(&str, &CapturedValue)> {
        let mut entries: Vec<_> = self
            .captures
            .iter()
            .map(|(k, v)| (k.as_str(), v))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_overwrites_slot() {
        let pattern = Regex::new(r"[0-9]+").unwrap();
        let mut ctx = TransformContext::new();
        ctx.capture("n", "1", &pattern);
        ctx.capture("n", "2", &pattern);

        assert_eq!(ctx.len(), 1);
        assert_eq!(ctx.get("n").unwrap().value, "2");
    }

    #[test]
    fn test_missing_slot() {
        let ctx = TransformContext::new();
        assert!(ctx.is_empty());
        assert!(!ctx.contains("ts"));
        assert!(ctx.get("ts").is_none());
    }

    #[test]
    fn test_entries_sorted() {
        let pattern = Regex::new("x").unwrap();
        let mut ctx = TransformContext::new();
        ctx.capture("b", "x", &pattern);
        ctx.capture("a", "x", &pattern);
        let names: Vec<&str> = ctx.entries().iter().map(|(k, _)| *k).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
