use std::fs;
use std::path::{Path, PathBuf};

use glob::glob;
use nu_ansi_term::Color::Yellow;

use crate::{
    config::parse as config_parse,
    constants::template::{DEFAULT_TEMPLATE_EXT, JSON_TEMPLATE_EXT},
    error::*,
    log,
    template::Template,
};

pub struct TemplateReader {}

/// A JSON export holds either a single template or a list of them
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum JsonExport {
    Many(Vec<Template>),
    One(Box<Template>),
}

impl TemplateReader {
    /// Reads every template file found in the templates directory.
    ///
    /// Files that cannot be parsed are reported and skipped, hidden files
    /// (such as the recent templates list) are ignored. A missing directory
    /// yields no templates.
    ///
    /// # Examples
    /// ```
    /// use std::fs;
    /// use clipform::reader::TemplateReader;
    ///
    /// let temp_dir = tempfile::tempdir().unwrap();
    /// let input_dir = temp_dir.path().to_path_buf();
    /// fs::write(
    ///     input_dir.join("shout.toml"),
    ///     "id = \"shout\"\nname = \"Shout\"\n\n[[transformations]]\nid = \"1\"\ntype = \"to_uppercase\"\norder = 1\n",
    /// )
    /// .unwrap();
    ///
    /// let templates = TemplateReader::read_dir(&input_dir).unwrap();
    /// assert_eq!(templates.len(), 1);
    /// assert_eq!(templates[0].1.name, "Shout");
    /// ```
    pub fn read_dir(input_dir: &PathBuf) -> Result<Vec<(PathBuf, Template)>> {
        if !input_dir.exists() {
            crate::debug!(
                "Templates directory \"{}\" not found",
                input_dir.to_string_lossy()
            );
            return Ok(Vec::new());
        }

        let pattern = format!(
            "{}{}{}",
            input_dir.to_string_lossy(),
            "/**/*",
            DEFAULT_TEMPLATE_EXT
        );
        let paths = glob(&pattern).map_err(|e| Error::TemplateReadError {
            file: pattern.clone(),
            cause: e.to_string(),
        })?;

        let mut templates = Vec::new();
        for path in paths.filter_map(|p| p.ok()).filter(|p| !is_hidden(p)) {
            match Self::read_toml(&path) {
                Ok(template) => templates.push((path, template)),
                Err(e) => crate::warn!("Skipping template file: {}", e),
            }
        }
        templates.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(templates)
    }

    /// Reads the templates held in a file. TOML files hold one template, JSON
    /// files one template or an array of them.
    pub fn read_file(template_file: &PathBuf) -> Result<Vec<Template>> {
        if has_extension(template_file, JSON_TEMPLATE_EXT) {
            Self::read_json(template_file)
        } else {
            Self::read_toml(template_file).map(|t| vec![t])
        }
    }

    fn read_toml(template_path: &PathBuf) -> Result<Template> {
        let toml_data = Self::read_data(template_path)?;

        toml::from_str::<Template>(&toml_data).map_err(|e| Error::SerdeTomlError {
            location: ConfigType::TEMPLATE,
            file: template_path.to_string_lossy().to_string(),
            cause: e.to_string(),
        })
    }

    fn read_json(template_path: &PathBuf) -> Result<Vec<Template>> {
        let json_data = Self::read_data(template_path)?;

        match serde_json::from_str::<JsonExport>(&json_data) {
            Ok(JsonExport::Many(templates)) => Ok(templates),
            Ok(JsonExport::One(template)) => Ok(vec![*template]),
            Err(e) => Err(Error::TemplateReadError {
                file: template_path.to_string_lossy().to_string(),
                cause: e.to_string(),
            }),
        }
    }

    fn read_data(template_path: &PathBuf) -> Result<String> {
        let name = template_path.to_string_lossy().to_string();
        match config_parse(template_path) {
            Ok(data) => Ok(data),
            Err(Error::Io(e)) if e.kind() == ::std::io::ErrorKind::NotFound => {
                Err(Error::TemplateReadError {
                    file: name.clone(),
                    cause: log::debug_message(
                        e.to_string(),
                        Yellow
                            .paint(format!("\n[Template path] {}", name))
                            .to_string(),
                    ),
                })
            }
            Err(Error::Io(e)) => Err(Error::TemplateReadError {
                file: name,
                cause: e.to_string(),
            }),
            Err(e) => Err(e),
        }
    }

    /// Reads the text to transform from a file, or from stdin when no file is given
    pub fn read_input(input: Option<&Path>) -> Result<String> {
        match input {
            Some(path) => Ok(fs::read_to_string(path)?),
            None => Ok(std::io::read_to_string(std::io::stdin())?),
        }
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'))
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.to_string_lossy().to_lowercase().ends_with(ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::Operation;

    const TOML_TEMPLATE: &str = r#"
id = "log-cleanup"
name = "Log Cleanup"
category = "Logging"

[[transformations]]
id = "1"
type = "capture_first_match"
example = "2024-01-15"
slotName = "day"
order = 1

[[transformations]]
id = "2"
type = "insert_captured"
slotName = "day"
position = "start"
format = "Day: {value}\n"
order = 2

[[transformations]]
id = "3"
type = "future_operation"
order = 3
"#;

    #[test]
    fn test_read_toml_template() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let file = temp_dir.path().join("log-cleanup.toml");
        fs::write(&file, TOML_TEMPLATE)?;

        let templates = TemplateReader::read_file(&file)?;
        assert_eq!(templates.len(), 1);
        let template = &templates[0];
        assert_eq!(template.category.as_deref(), Some("Logging"));
        assert_eq!(template.transformations.len(), 3);
        assert_eq!(template.transformations[2].operation, Operation::Unknown);
        assert_eq!(template.usage_count, 0);
        Ok(())
    }

    #[test]
    fn test_read_json_export() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let file = temp_dir.path().join("export.json");
        fs::write(
            &file,
            r#"[{"id": "a", "name": "A", "transformations": []},
                {"id": "b", "name": "B", "transformations": [{"id": "1", "type": "sort_lines", "enabled": true, "order": 1}]}]"#,
        )?;

        let templates = TemplateReader::read_file(&file)?;
        assert_eq!(templates.len(), 2);
        assert_eq!(templates[1].transformations[0].operation, Operation::SortLines);

        let single = temp_dir.path().join("single.json");
        fs::write(&single, r#"{"id": "c", "name": "C"}"#)?;
        assert_eq!(TemplateReader::read_file(&single)?[0].id, "c");
        Ok(())
    }

    #[test]
    fn test_read_dir_skips_broken_files() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let dir = temp_dir.path().to_path_buf();
        fs::write(dir.join("good.toml"), TOML_TEMPLATE)?;
        fs::write(dir.join("broken.toml"), "name = ")?;
        fs::write(dir.join("notes.txt"), "ignored")?;
        fs::write(dir.join(".recent.toml"), "[[recent]]\ntemplateId = \"x\"\n")?;

        let templates = TemplateReader::read_dir(&dir)?;
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].1.id, "log-cleanup");
        Ok(())
    }

    #[test]
    fn test_missing_dir_and_file() {
        let missing = PathBuf::from("/nonexistent/clipform/templates");
        assert!(TemplateReader::read_dir(&missing).unwrap().is_empty());
        assert!(matches!(
            TemplateReader::read_file(&missing.join("x.toml")),
            Err(Error::TemplateReadError { .. })
        ));
    }
}
