use crate::constants::transform::{DEFAULT_INDENT_WIDTH, DEFAULT_JSON_INDENT, DEFAULT_START_FROM};
use crate::context::TransformContext;
use crate::error::Result;
use crate::template::{Operation, Transformation};

pub mod capture;
pub mod json;
pub mod lines;
pub mod replace;

use capture::Occurrence;
pub use replace::validate_regex;

/// Trait for text transformations in a pipeline
pub trait Transform {
    /// Transforms the input text, reading and writing the run's capture context
    ///
    /// # Arguments
    /// * `text` - The text to transform
    /// * `context` - The capture context of the current run
    ///
    /// # Returns
    /// The transformed text or an error if transformation fails
    fn transform(&self, text: &str, context: &mut TransformContext) -> Result<String>;
}

impl Transform for Transformation {
    fn transform(&self, text: &str, context: &mut TransformContext) -> Result<String> {
        apply_one(text, self, context)
    }
}

/// Zero and missing numeric values fall back to the default
fn or_default<T: Default + PartialEq + Copy>(value: Option<T>, default: T) -> T {
    value.filter(|v| *v != T::default()).unwrap_or(default)
}

/// Applies a single transformation.
///
/// Disabled transformations and unknown operation types return the text
/// unchanged.
///
/// # Errors
/// Fails only for a `regex_replace` whose pattern or flags are invalid.
pub fn apply_one(
    text: &str,
    transformation: &Transformation,
    context: &mut TransformContext,
) -> Result<String> {
    if !transformation.enabled {
        return Ok(text.to_string());
    }

    let result = match &transformation.operation {
        Operation::RemoveBlankLines => lines::remove_blank_lines(text),
        Operation::TrimLines => lines::trim_lines(text),
        Operation::ToUppercase => lines::to_uppercase(text),
        Operation::ToLowercase => lines::to_lowercase(text),
        Operation::RemoveDuplicates => lines::remove_duplicates(text),
        Operation::SortLines => lines::sort_lines(text),
        Operation::ReverseLines => lines::reverse_lines(text),
        Operation::WrapCodeBlock { value } => lines::wrap_code_block(text, value),
        Operation::AddPrefix { value } => lines::add_prefix(text, value),
        Operation::AddSuffix { value } => lines::add_suffix(text, value),
        Operation::RegexReplace {
            pattern,
            replacement,
            flags,
        } => replace::regex_replace(text, pattern, replacement, flags)?,
        Operation::NumberLines { value } => {
            lines::number_lines(text, or_default(*value, DEFAULT_START_FROM))
        }
        Operation::Indent { value } => lines::indent(text, or_default(*value, DEFAULT_INDENT_WIDTH)),
        Operation::Dedent { value } => lines::dedent(text, or_default(*value, DEFAULT_INDENT_WIDTH)),
        Operation::JsonBeautify { indent } => {
            json::json_beautify(text, indent.unwrap_or(DEFAULT_JSON_INDENT))
        }
        Operation::CaptureFirstMatch { example, slot_name } => {
            capture::capture_match(text, example, slot_name, Occurrence::First, context);
            text.to_string()
        }
        Operation::CaptureLastMatch { example, slot_name } => {
            capture::capture_match(text, example, slot_name, Occurrence::Last, context);
            text.to_string()
        }
        Operation::CaptureReplace {
            slot_name,
            replacement,
        } => capture::capture_replace(text, slot_name, replacement, context),
        Operation::InsertCaptured {
            slot_name,
            position,
            format,
        } => capture::insert_captured(text, slot_name, *position, format, context),
        Operation::Unknown => {
            crate::warn!(
                "Unknown transformation type in step \"{}\", skipping",
                transformation.id
            );
            text.to_string()
        }
    };

    Ok(result)
}

/// An ordered run of transformations over a borrowed list
pub struct Pipeline<'a> {
    steps: Vec<&'a Transformation>,
}

impl<'a> Pipeline<'a> {
    /// Keeps the enabled transformations sorted by `order`. The sort is
    /// stable so equal orders keep their list position.
    pub fn new(transformations: &'a [Transformation]) -> Self {
        let mut steps: Vec<&Transformation> =
            transformations.iter().filter(|t| t.enabled).collect();
        steps.sort_by_key(|t| t.order);
        Pipeline { steps }
    }

    /// Process the text through all steps in sequence
    ///
    /// # Arguments
    /// * `text` - The text to process
    ///
    /// # Returns
    /// The processed text after applying all steps or the first error raised
    pub fn run(&self, text: &str) -> Result<String> {
        self.run_with_context(text).map(|(result, _)| result)
    }

    /// Same as [`Pipeline::run`], also returning the captures made during the run
    pub fn run_with_context(&self, text: &str) -> Result<(String, TransformContext)> {
        let mut context = TransformContext::new();
        let result = self.steps.iter().try_fold(text.to_string(), |acc, step| {
            step.transform(&acc, &mut context).map_err(|e| {
                crate::debug!(
                    "Error applying transformation {} ({}): {}",
                    step.operation.type_name(),
                    step.id,
                    e
                );
                e
            })
        })?;
        crate::debug!(
            "Applied {} transformations, {} captures",
            self.steps.len(),
            context.len()
        );
        Ok((result, context))
    }
}

/// Applies the enabled transformations in ascending `order`.
///
/// # Examples
/// ```
/// use clipform::template::{Operation, Transformation};
/// use clipform::transforms::apply_all;
///
/// let steps = vec![
///     Transformation::new("2", 2, Operation::CaptureReplace {
///         slot_name: "ts".to_string(),
///         replacement: "<TS>".to_string(),
///     }),
///     Transformation::new("1", 1, Operation::CaptureFirstMatch {
///         example: "2024-01-15T10:30:00Z".to_string(),
///         slot_name: "ts".to_string(),
///     }),
/// ];
/// let result = apply_all("Error at 2024-01-15T10:30:00Z: failure", &steps).unwrap();
/// assert_eq!(result, "Error at <TS>: failure");
/// ```
pub fn apply_all(text: &str, transformations: &[Transformation]) -> Result<String> {
    Pipeline::new(transformations).run(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::Position;
    use proptest::prelude::*;

    const LOG_LINE: &str = "Error at 2024-01-15T10:30:00Z: failure";

    fn step(id: &str, order: i64, operation: Operation) -> Transformation {
        Transformation::new(id, order, operation)
    }

    fn capture_ts() -> Operation {
        Operation::CaptureFirstMatch {
            example: "2024-01-15T10:30:00Z".to_string(),
            slot_name: "ts".to_string(),
        }
    }

    #[test]
    fn test_identity() {
        assert_eq!(apply_all("  a\n\nb ", &[]).unwrap(), "  a\n\nb ");

        let disabled = vec![
            step("1", 1, Operation::TrimLines).with_enabled(false),
            step("2", 2, Operation::ToUppercase).with_enabled(false),
            step(
                "3",
                3,
                Operation::RegexReplace {
                    pattern: "[".to_string(),
                    replacement: String::new(),
                    flags: "g".to_string(),
                },
            )
            .with_enabled(false),
        ];
        assert_eq!(apply_all("  a\n\nb ", &disabled).unwrap(), "  a\n\nb ");
    }

    #[test]
    fn test_order_field_decides_execution() {
        let prefix = step(
            "p",
            1,
            Operation::AddPrefix {
                value: "- ".to_string(),
            },
        );
        let upper = step("u", 2, Operation::ToUppercase);
        let numbered = step("n", 3, Operation::NumberLines { value: None });

        let a = apply_all("x\ny", &[prefix.clone(), upper.clone(), numbered.clone()]).unwrap();
        let b = apply_all("x\ny", &[numbered, upper, prefix]).unwrap();
        assert_eq!(a, "1. - X\n2. - Y");
        assert_eq!(a, b);
    }

    #[test]
    fn test_equal_orders_keep_list_position() {
        let steps = vec![
            step("a", 5, Operation::AddSuffix { value: "1".to_string() }),
            step("b", 5, Operation::AddSuffix { value: "2".to_string() }),
            step("c", 0, Operation::AddSuffix { value: "0".to_string() }),
        ];
        assert_eq!(apply_all("x", &steps).unwrap(), "x012");
    }

    #[test]
    fn test_capture_round_trip() {
        let steps = vec![
            step("1", 1, capture_ts()),
            step(
                "2",
                2,
                Operation::CaptureReplace {
                    slot_name: "ts".to_string(),
                    replacement: "<TS>".to_string(),
                },
            ),
        ];
        assert_eq!(apply_all(LOG_LINE, &steps).unwrap(), "Error at <TS>: failure");
    }

    #[test]
    fn test_insert_captured_at_end() {
        let steps = vec![
            step("1", 1, capture_ts()),
            step(
                "2",
                2,
                Operation::InsertCaptured {
                    slot_name: "ts".to_string(),
                    position: Position::End,
                    format: "\n\nCaptured: {value}".to_string(),
                },
            ),
        ];
        assert_eq!(
            apply_all(LOG_LINE, &steps).unwrap(),
            format!("{}\n\nCaptured: 2024-01-15T10:30:00Z", LOG_LINE)
        );
    }

    #[test]
    fn test_capture_then_replace_then_insert() {
        let text = "2024-01-15T10:30:00Z start\n2024-01-15T10:31:00Z stop";
        let steps = vec![
            step(
                "1",
                1,
                Operation::CaptureLastMatch {
                    example: "2024-01-15T10:30:00Z".to_string(),
                    slot_name: "ts".to_string(),
                },
            ),
            step(
                "2",
                2,
                Operation::CaptureReplace {
                    slot_name: "ts".to_string(),
                    replacement: String::new(),
                },
            ),
            step("3", 3, Operation::TrimLines),
            step(
                "4",
                4,
                Operation::InsertCaptured {
                    slot_name: "ts".to_string(),
                    position: Position::Start,
                    format: "Until {value}:\n".to_string(),
                },
            ),
        ];
        assert_eq!(
            apply_all(text, &steps).unwrap(),
            "Until 2024-01-15T10:31:00Z:\nstart\nstop"
        );
    }

    #[test]
    fn test_missing_slot_is_noop() {
        let steps = vec![step(
            "1",
            1,
            Operation::CaptureReplace {
                slot_name: "nonexistent".to_string(),
                replacement: "X".to_string(),
            },
        )];
        assert_eq!(apply_all(LOG_LINE, &steps).unwrap(), LOG_LINE);
    }

    #[test]
    fn test_disabled_capture_does_not_fill_context() {
        let steps = vec![
            step("1", 1, capture_ts()).with_enabled(false),
            step(
                "2",
                2,
                Operation::CaptureReplace {
                    slot_name: "ts".to_string(),
                    replacement: "<TS>".to_string(),
                },
            ),
        ];
        let (result, context) = Pipeline::new(&steps).run_with_context(LOG_LINE).unwrap();
        assert_eq!(result, LOG_LINE);
        assert!(context.is_empty());
    }

    #[test]
    fn test_context_is_not_shared_between_runs() {
        let capture = vec![step("1", 1, capture_ts())];
        let replace = vec![step(
            "2",
            1,
            Operation::CaptureReplace {
                slot_name: "ts".to_string(),
                replacement: "<TS>".to_string(),
            },
        )];
        apply_all(LOG_LINE, &capture).unwrap();
        assert_eq!(apply_all(LOG_LINE, &replace).unwrap(), LOG_LINE);
    }

    #[test]
    fn test_invalid_regex_aborts_run() {
        let steps = vec![
            step("1", 1, Operation::ToUppercase),
            step(
                "2",
                2,
                Operation::RegexReplace {
                    pattern: "[".to_string(),
                    replacement: String::new(),
                    flags: "g".to_string(),
                },
            ),
            step("3", 3, Operation::ReverseLines),
        ];
        let err = apply_all("abc", &steps).unwrap_err();
        assert!(err.to_string().contains("["));
    }

    #[test]
    fn test_unknown_type_passes_through() {
        let steps: Vec<Transformation> = serde_json::from_str(
            r#"[{"id": "1", "type": "shuffle_lines", "enabled": true, "order": 1},
                {"id": "2", "type": "to_uppercase", "enabled": true, "order": 2}]"#,
        )
        .unwrap();
        assert_eq!(apply_all("b\na", &steps).unwrap(), "B\nA");
    }

    #[test]
    fn test_numeric_defaults() {
        let numbered = vec![step("1", 1, Operation::NumberLines { value: Some(0) })];
        assert_eq!(apply_all("a", &numbered).unwrap(), "1. a");

        let indented = vec![step("1", 1, Operation::Indent { value: None })];
        assert_eq!(apply_all("a", &indented).unwrap(), "  a");

        let dedented = vec![step("1", 1, Operation::Dedent { value: Some(4) })];
        assert_eq!(apply_all(" a\n      b", &dedented).unwrap(), "a\n  b");

        let beautified = vec![step("1", 1, Operation::JsonBeautify { indent: None })];
        assert_eq!(apply_all("[1]", &beautified).unwrap(), "[\n  1\n]");
    }

    #[test]
    fn test_wrap_code_block_step() {
        let steps = vec![
            step("1", 1, Operation::RemoveBlankLines),
            step("2", 2, Operation::WrapCodeBlock { value: "log".to_string() }),
        ];
        assert_eq!(apply_all("a\n\nb", &steps).unwrap(), "```log\na\nb\n```");
    }

    fn idempotent_operations() -> Vec<Operation> {
        vec![
            Operation::TrimLines,
            Operation::RemoveDuplicates,
            Operation::SortLines,
            Operation::ToUppercase,
            Operation::ToLowercase,
        ]
    }

    proptest! {
        #[test]
        fn prop_idempotent_operations(text in "[a-zA-Z \t\n]{0,60}") {
            for operation in idempotent_operations() {
                let once = vec![step("1", 1, operation.clone())];
                let twice = vec![step("1", 1, operation.clone()), step("2", 2, operation)];
                prop_assert_eq!(apply_all(&text, &once).unwrap(), apply_all(&text, &twice).unwrap());
            }
        }

        #[test]
        fn prop_disabled_steps_are_identity(text in "\\PC{0,60}") {
            let steps: Vec<Transformation> = idempotent_operations()
                .into_iter()
                .enumerate()
                .map(|(i, op)| step(&i.to_string(), i as i64, op).with_enabled(false))
                .collect();
            prop_assert_eq!(apply_all(&text, &steps).unwrap(), text);
        }

        #[test]
        fn prop_list_position_irrelevant(text in "[a-z\n]{0,40}", swap in any::<bool>()) {
            let first = step("p", 1, Operation::AddPrefix { value: "> ".to_string() });
            let second = step("s", 2, Operation::SortLines);
            let steps = if swap { vec![second, first] } else { vec![first, second] };
            let expected = lines::sort_lines(&lines::add_prefix(&text, "> "));
            prop_assert_eq!(apply_all(&text, &steps).unwrap(), expected);
        }
    }
}
