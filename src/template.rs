//! Template and transformation model.
//!
//! A [`Transformation`] is one step of a pipeline: the fields shared by every
//! step (`id`, `enabled`, `order`) plus an [`Operation`] discriminated by its
//! `type` tag. A [`Template`] is a named list of transformations with the
//! metadata used to browse and rank templates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::transform::VALUE_PLACEHOLDER;

/// Where `insert_captured` places the formatted value
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Start,
    #[default]
    End,
}

fn default_format() -> String {
    VALUE_PLACEHOLDER.to_string()
}

fn default_enabled() -> bool {
    true
}

/// The operation performed by a transformation, tagged by `type`
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Operation {
    RemoveBlankLines,
    TrimLines,
    ToUppercase,
    ToLowercase,
    RemoveDuplicates,
    SortLines,
    ReverseLines,
    WrapCodeBlock {
        #[serde(default)]
        value: String,
    },
    AddPrefix {
        value: String,
    },
    AddSuffix {
        value: String,
    },
    RegexReplace {
        pattern: String,
        #[serde(default)]
        replacement: String,
        #[serde(default)]
        flags: String,
    },
    NumberLines {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<i64>,
    },
    Indent {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<usize>,
    },
    Dedent {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<usize>,
    },
    CaptureFirstMatch {
        example: String,
        slot_name: String,
    },
    CaptureLastMatch {
        example: String,
        slot_name: String,
    },
    CaptureReplace {
        slot_name: String,
        #[serde(default)]
        replacement: String,
    },
    InsertCaptured {
        slot_name: String,
        #[serde(default)]
        position: Position,
        #[serde(default = "default_format")]
        format: String,
    },
    JsonBeautify {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        indent: Option<usize>,
    },
    /// Any `type` this version does not know about. Kept so that templates
    /// written by newer versions still load; applying it does nothing.
    #[serde(other)]
    Unknown,
}

impl Operation {
    /// Returns the `type` tag of the operation
    pub fn type_name(&self) -> &'static str {
        match self {
            Operation::RemoveBlankLines => "remove_blank_lines",
            Operation::TrimLines => "trim_lines",
            Operation::ToUppercase => "to_uppercase",
            Operation::ToLowercase => "to_lowercase",
            Operation::RemoveDuplicates => "remove_duplicates",
            Operation::SortLines => "sort_lines",
            Operation::ReverseLines => "reverse_lines",
            Operation::WrapCodeBlock { .. } => "wrap_code_block",
            Operation::AddPrefix { .. } => "add_prefix",
            Operation::AddSuffix { .. } => "add_suffix",
            Operation::RegexReplace { .. } => "regex_replace",
            Operation::NumberLines { .. } => "number_lines",
            Operation::Indent { .. } => "indent",
            Operation::Dedent { .. } => "dedent",
            Operation::CaptureFirstMatch { .. } => "capture_first_match",
            Operation::CaptureLastMatch { .. } => "capture_last_match",
            Operation::CaptureReplace { .. } => "capture_replace",
            Operation::InsertCaptured { .. } => "insert_captured",
            Operation::JsonBeautify { .. } => "json_beautify",
            Operation::Unknown => "unknown",
        }
    }

    /// Returns a human-readable name for the operation
    pub fn display_name(&self) -> &'static str {
        match self {
            Operation::RemoveBlankLines => "Remove Blank Lines",
            Operation::TrimLines => "Trim Lines",
            Operation::ToUppercase => "To Uppercase",
            Operation::ToLowercase => "To Lowercase",
            Operation::RemoveDuplicates => "Remove Duplicates",
            Operation::SortLines => "Sort Lines",
            Operation::ReverseLines => "Reverse Lines",
            Operation::WrapCodeBlock { .. } => "Wrap in Code Block",
            Operation::AddPrefix { .. } => "Add Prefix",
            Operation::AddSuffix { .. } => "Add Suffix",
            Operation::RegexReplace { .. } => "Regex Replace",
            Operation::NumberLines { .. } => "Number Lines",
            Operation::Indent { .. } => "Indent",
            Operation::Dedent { .. } => "Dedent",
            Operation::CaptureFirstMatch { .. } => "Capture First Match",
            Operation::CaptureLastMatch { .. } => "Capture Last Match",
            Operation::CaptureReplace { .. } => "Replace Captured Pattern",
            Operation::InsertCaptured { .. } => "Insert Captured Value",
            Operation::JsonBeautify { .. } => "Beautify JSON",
            Operation::Unknown => "Unknown",
        }
    }
}

/// A single step of a pipeline
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Transformation {
    pub id: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub order: i64,
    #[serde(flatten)]
    pub operation: Operation,
}

impl Transformation {
    /// Creates an enabled transformation
    pub fn new<S: Into<String>>(id: S, order: i64, operation: Operation) -> Self {
        Transformation {
            id: id.into(),
            enabled: true,
            order,
            operation,
        }
    }

    /// Returns the same transformation with the given enabled state
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// A named, ordered list of transformations
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub starred: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_text: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub usage_count: u64,
    #[serde(default)]
    pub transformations: Vec<Transformation>,
}

impl Template {
    /// Creates an empty template with fresh timestamps
    pub fn new<I: Into<String>, N: Into<String>>(id: I, name: N) -> Self {
        let now = Utc::now();
        Template {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            starred: false,
            category: None,
            tags: None,
            example_text: None,
            created_at: now,
            updated_at: now,
            usage_count: 0,
            transformations: Vec::new(),
        }
    }

    /// Checks whether the query appears in the name, description or tags (case-insensitive)
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
            || self
                .tags
                .as_ref()
                .is_some_and(|tags| tags.iter().any(|t| t.to_lowercase().contains(&query)))
    }

    /// Marks the template as modified
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_json_transformations() {
        let json = r##"[
            {"id": "1", "type": "remove_blank_lines", "enabled": true, "order": 1},
            {"id": "2", "type": "capture_first_match", "example": "42", "slotName": "n", "enabled": true, "order": 2},
            {"id": "3", "type": "insert_captured", "slotName": "n", "position": "start", "format": "#{value} ", "enabled": false, "order": 3},
            {"id": "4", "type": "regex_replace", "pattern": "a", "replacement": "b", "flags": "gi", "enabled": true, "order": 4},
            {"id": "5", "type": "number_lines", "value": 5, "enabled": true, "order": 5}
        ]"##;
        let parsed: Vec<Transformation> = serde_json::from_str(json).unwrap();

        assert_eq!(parsed[0].operation, Operation::RemoveBlankLines);
        assert_eq!(
            parsed[1].operation,
            Operation::CaptureFirstMatch {
                example: "42".to_string(),
                slot_name: "n".to_string()
            }
        );
        assert!(!parsed[2].enabled);
        assert_eq!(
            parsed[2].operation,
            Operation::InsertCaptured {
                slot_name: "n".to_string(),
                position: Position::Start,
                format: "#{value} ".to_string()
            }
        );
        assert_eq!(parsed[4].operation, Operation::NumberLines { value: Some(5) });
    }

    #[test]
    fn test_unknown_type_deserializes() {
        let json = r#"{"id": "9", "type": "rot13", "enabled": true, "order": 1}"#;
        let parsed: Transformation = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.operation, Operation::Unknown);
    }

    #[test]
    fn test_payload_defaults() {
        let json = r#"[
            {"id": "1", "type": "insert_captured", "slotName": "ts", "order": 1},
            {"id": "2", "type": "capture_replace", "slotName": "ts", "order": 2},
            {"id": "3", "type": "wrap_code_block", "order": 3}
        ]"#;
        let parsed: Vec<Transformation> = serde_json::from_str(json).unwrap();
        assert!(parsed.iter().all(|t| t.enabled));
        assert_eq!(
            parsed[0].operation,
            Operation::InsertCaptured {
                slot_name: "ts".to_string(),
                position: Position::End,
                format: "{value}".to_string()
            }
        );
        assert_eq!(
            parsed[1].operation,
            Operation::CaptureReplace {
                slot_name: "ts".to_string(),
                replacement: String::new()
            }
        );
        assert_eq!(
            parsed[2].operation,
            Operation::WrapCodeBlock {
                value: String::new()
            }
        );
    }

    #[test]
    fn test_serialize_uses_type_tag_and_camel_case() {
        let t = Transformation::new(
            "1",
            1,
            Operation::CaptureLastMatch {
                example: "10:30:00".to_string(),
                slot_name: "time".to_string(),
            },
        );
        let value = serde_json::to_value(&t).unwrap();
        assert_eq!(value["type"], "capture_last_match");
        assert_eq!(value["slotName"], "time");
        assert_eq!(value["enabled"], true);
    }

    #[test]
    fn test_template_from_json_export() {
        let json = r#"{
            "id": "bullet-list",
            "name": "Convert to Bullet List",
            "description": "Add \"- \" prefix to each line",
            "transformations": [{"id": "1", "type": "add_prefix", "value": "- ", "enabled": true, "order": 1}],
            "starred": true,
            "category": "Markdown",
            "tags": ["markdown", "list"],
            "createdAt": "2024-01-15T10:30:00.000Z",
            "updatedAt": "2024-01-15T10:30:00.000Z",
            "usageCount": 3
        }"#;
        let template: Template = serde_json::from_str(json).unwrap();
        assert_eq!(template.usage_count, 3);
        assert_eq!(template.category.as_deref(), Some("Markdown"));
        assert!(template.matches("LIST"));
        assert!(template.matches("prefix"));
        assert!(!template.matches("sql"));
    }

    #[test]
    fn test_names() {
        let op = Operation::WrapCodeBlock {
            value: "js".to_string(),
        };
        assert_eq!(op.type_name(), "wrap_code_block");
        assert_eq!(op.display_name(), "Wrap in Code Block");
        assert_eq!(Operation::Unknown.type_name(), "unknown");
    }
}
