//! Built-in templates available without any template files.

use crate::template::{Operation, Position, Template, Transformation};

fn preset(
    id: &str,
    name: &str,
    description: &str,
    category: &str,
    tags: &[&str],
    starred: bool,
    operations: Vec<Operation>,
) -> Template {
    let mut template = Template::new(id, name);
    template.description = description.to_string();
    template.category = Some(category.to_string());
    template.tags = Some(tags.iter().map(|t| t.to_string()).collect());
    template.starred = starred;
    template.transformations = operations
        .into_iter()
        .enumerate()
        .map(|(i, op)| Transformation::new((i + 1).to_string(), i as i64 + 1, op))
        .collect();
    template
}

fn value(s: &str) -> String {
    s.to_string()
}

/// Returns the default template set
pub fn default_templates() -> Vec<Template> {
    vec![
        preset(
            "remove-blank-lines",
            "Remove Blank Lines",
            "Remove all blank lines from text",
            "Basic",
            &["cleanup"],
            true,
            vec![Operation::RemoveBlankLines],
        ),
        preset(
            "wrap-code",
            "Wrap in Code Block",
            "Wrap text in markdown code block",
            "Markdown",
            &["code", "markdown"],
            true,
            vec![Operation::WrapCodeBlock { value: value("") }],
        ),
        preset(
            "format-grafana-errors",
            "Format Grafana Errors",
            "Clean up Grafana error logs and wrap in code block",
            "Logging",
            &["grafana", "errors", "logs"],
            false,
            vec![
                Operation::RemoveBlankLines,
                Operation::TrimLines,
                Operation::WrapCodeBlock { value: value("log") },
            ],
        ),
        preset(
            "trim-lines",
            "Trim All Lines",
            "Remove leading/trailing whitespace from each line",
            "Basic",
            &["cleanup"],
            false,
            vec![Operation::TrimLines],
        ),
        preset(
            "bullet-list",
            "Convert to Bullet List",
            "Add \"- \" prefix to each line",
            "Markdown",
            &["markdown", "list"],
            true,
            vec![Operation::AddPrefix { value: value("- ") }],
        ),
        preset(
            "numbered-list",
            "Numbered List",
            "Convert lines to numbered list (1. 2. 3.)",
            "Markdown",
            &["markdown", "list", "numbered"],
            false,
            vec![Operation::NumberLines { value: Some(1) }],
        ),
        preset(
            "json-code-block",
            "JSON Code Block",
            "Trim and wrap text in JSON code block",
            "Code",
            &["code", "json", "markdown"],
            false,
            vec![
                Operation::TrimLines,
                Operation::WrapCodeBlock { value: value("json") },
            ],
        ),
        preset(
            "sql-code-block",
            "SQL Code Block",
            "Wrap text in SQL code block",
            "Code",
            &["code", "sql", "markdown", "database"],
            false,
            vec![Operation::WrapCodeBlock { value: value("sql") }],
        ),
        preset(
            "remove-duplicates",
            "Remove Duplicates",
            "Remove duplicate lines, keeping first occurrence",
            "Data",
            &["cleanup", "duplicates", "data"],
            false,
            vec![Operation::RemoveDuplicates],
        ),
        preset(
            "sort-lines",
            "Sort Lines A-Z",
            "Sort lines alphabetically",
            "Data",
            &["sort", "alphabetical", "data"],
            false,
            vec![Operation::SortLines],
        ),
        preset(
            "quote-block",
            "Quote Block",
            "Convert text to Markdown blockquote",
            "Markdown",
            &["markdown", "quote", "blockquote"],
            true,
            vec![Operation::AddPrefix { value: value("> ") }],
        ),
        preset(
            "checkbox-list",
            "Checkbox List",
            "Convert lines to Markdown task list",
            "Markdown",
            &["markdown", "tasks", "todo", "checklist"],
            false,
            vec![Operation::AddPrefix {
                value: value("- [ ] "),
            }],
        ),
        preset(
            "snake-to-title",
            "Snake to Title Case",
            "Convert snake_case to spaced words",
            "Transform",
            &["case", "naming", "convert"],
            false,
            vec![
                Operation::RegexReplace {
                    pattern: value("_"),
                    replacement: value(" "),
                    flags: value("g"),
                },
                Operation::RegexReplace {
                    pattern: value(r"\b\w"),
                    replacement: value("$&"),
                    flags: value("g"),
                },
            ],
        ),
        preset(
            "clean-data-lines",
            "Clean Data Lines",
            "Trim, remove blanks, and deduplicate lines",
            "Data",
            &["cleanup", "data", "csv"],
            false,
            vec![
                Operation::TrimLines,
                Operation::RemoveBlankLines,
                Operation::RemoveDuplicates,
            ],
        ),
        preset(
            "indent-4-spaces",
            "Indent 4 Spaces",
            "Add 4 spaces to the start of each line",
            "Basic",
            &["indent", "whitespace", "code"],
            false,
            vec![Operation::Indent { value: Some(4) }],
        ),
        preset(
            "csv-to-markdown-table",
            "CSV to Markdown Table",
            "Convert CSV rows to Markdown table format (add separator row manually)",
            "Data",
            &["csv", "markdown", "table", "data"],
            false,
            vec![
                Operation::RegexReplace {
                    pattern: value(","),
                    replacement: value(" | "),
                    flags: value("g"),
                },
                Operation::AddPrefix { value: value("| ") },
                Operation::AddSuffix { value: value(" |") },
            ],
        ),
        preset(
            "log-timestamp-summary",
            "Strip Log Timestamps",
            "Remove ISO timestamps from log lines and note the first one at the top",
            "Logging",
            &["logs", "timestamp", "capture"],
            false,
            vec![
                Operation::CaptureFirstMatch {
                    example: value("2024-01-15T10:30:00.000Z"),
                    slot_name: value("timestamp"),
                },
                Operation::CaptureReplace {
                    slot_name: value("timestamp"),
                    replacement: value(""),
                },
                Operation::TrimLines,
                Operation::InsertCaptured {
                    slot_name: value("timestamp"),
                    position: Position::Start,
                    format: value("Since {value}\n\n"),
                },
                Operation::WrapCodeBlock { value: value("log") },
            ],
        ),
        preset(
            "pretty-json-lines",
            "Pretty JSON Lines",
            "Pretty-print every JSON object line and wrap in a JSON code block",
            "Code",
            &["json", "code", "logs"],
            false,
            vec![
                Operation::JsonBeautify { indent: Some(2) },
                Operation::WrapCodeBlock { value: value("json") },
            ],
        ),
    ]
}
