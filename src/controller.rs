use std::io::Write;
use std::path::{Path, PathBuf};

use nu_ansi_term::Color::{Cyan, Green, Yellow};

use crate::{
    catalog::{Source, TemplateCatalog},
    config::MainConfig,
    constants::template::RECENT_FILE,
    context::TransformContext,
    detector::{available_pattern_types, detect_pattern},
    error::*,
    reader::TemplateReader,
    recent::RecentTemplates,
    template::Template,
    transforms::Pipeline,
    writer::TemplateWriter,
};

/// Filters applied when listing templates
#[derive(Debug, Default)]
pub struct ListFilter {
    pub category: Option<String>,
    pub search: Option<String>,
    pub starred: bool,
}

pub struct TemplatesController<'a> {
    pub input_dir: PathBuf,
    pub config: &'a MainConfig,
    catalog: TemplateCatalog,
    recent: RecentTemplates,
}

/// Provides the operations involving templates: applying them to text, and
/// managing the templates directory (list, show, create, edit, remove,
/// duplicate, star, import, recent, reset).
impl<'a> TemplatesController<'a> {
    pub fn new(input_dir: PathBuf, config: &'a MainConfig) -> Result<Self> {
        let catalog = TemplateCatalog::load(&input_dir)?;
        let recent = RecentTemplates::load(&input_dir.join(RECENT_FILE))?;
        Ok(Self {
            input_dir,
            config,
            catalog,
            recent,
        })
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn recent_templates(&self) -> &RecentTemplates {
        &self.recent
    }

    fn save_recent(&self) -> Result<()> {
        self.recent.save(&self.input_dir.join(RECENT_FILE))
    }

    fn find(&self, key: &str) -> Result<&Template> {
        self.catalog
            .find(key)
            .map(|e| &e.template)
            .ok_or_else(|| Error::TemplateNotFound(key.to_string()))
    }

    /// Applies the template to the text and returns the result along with
    /// the captures made during the run.
    pub fn transform(&self, template_key: &str, text: &str) -> Result<(String, TransformContext)> {
        let template = self.find(template_key)?;
        crate::debug!(
            "Applying template \"{}\" ({} transformations)",
            template.name,
            template.transformations.len()
        );
        Pipeline::new(&template.transformations).run_with_context(text)
    }

    /// Applies the template to the input (file or stdin), writes the result to
    /// `output` and records the usage of the template.
    pub fn apply(
        &mut self,
        template_key: &str,
        input: Option<&Path>,
        output: &mut dyn Write,
        newline: bool,
        show_captures: bool,
    ) -> Result<bool> {
        let text = TemplateReader::read_input(input)?;
        let id = self.find(template_key)?.id.clone();
        let (result, context) = self.transform(&id, &text)?;

        write!(output, "{}", result)?;
        if newline {
            writeln!(output)?;
        }
        output.flush()?;

        if show_captures || self.config.defaults.show_captures {
            for (slot, captured) in context.entries() {
                eprintln!("{} {} = {}", Cyan.paint("[capture]"), slot, captured.value);
            }
        }

        self.record_usage(&id)?;
        Ok(true)
    }

    /// Increments the usage count, persisting it for templates stored on disk,
    /// and moves the template to the front of the recent list
    fn record_usage(&mut self, id: &str) -> Result<()> {
        self.catalog.increment_usage_count(id)?;
        if let (Some(Source::File(path)), Some(template)) =
            (self.catalog.source(id), self.catalog.get_by_id(id))
        {
            TemplateWriter::save_to(path, template)?;
        }
        self.recent.record(id, self.config.defaults.max_recent);
        self.save_recent()
    }

    /// Prints the pattern detected for the example
    pub fn detect(&self, example: &str) -> Result<bool> {
        let detected = detect_pattern(example);
        println!(
            "{} ({})\n{}",
            Green.paint(detected.kind.to_string()),
            detected.description,
            detected.pattern.as_str()
        );
        Ok(true)
    }

    /// Prints every known pattern type in precedence order
    pub fn list_pattern_types(&self) -> Result<bool> {
        for (kind, description) in available_pattern_types() {
            println!("{} {}", Green.paint(format!("{:<18}", kind.to_string())), description);
        }
        Ok(true)
    }

    /// Returns the templates selected by the filter
    pub fn filtered(&self, filter: &ListFilter) -> Vec<&Template> {
        let candidates = if filter.starred {
            self.catalog.starred()
        } else {
            self.catalog.templates().collect()
        };
        candidates
            .into_iter()
            .filter(|t| {
                filter
                    .category
                    .as_deref()
                    .map_or(true, |c| t.category.as_deref() == Some(c))
            })
            .filter(|t| filter.search.as_deref().map_or(true, |q| t.matches(q)))
            .collect()
    }

    /// Lists the templates selected by the filter
    pub fn list(&self, filter: &ListFilter) -> Result<bool> {
        let templates = self.filtered(filter);
        if templates.is_empty() {
            println!("{}", Yellow.paint("No templates found"));
            return Ok(false);
        }
        for template in templates {
            let star = if template.starred { "*" } else { " " };
            println!(
                "{} {} {:<10} {}",
                Yellow.paint(star),
                Green.paint(format!("{:<24}", template.id)),
                template.category.as_deref().unwrap_or("-"),
                template.name
            );
        }
        Ok(true)
    }

    pub fn categories(&self) -> Result<bool> {
        for category in self.catalog.categories() {
            println!("{}", category);
        }
        Ok(true)
    }

    /// Summarizes the steps of a template in execution order, disabled ones last
    pub fn describe(template: &Template) -> String {
        let mut steps: Vec<_> = template.transformations.iter().collect();
        steps.sort_by_key(|t| (!t.enabled, t.order));
        steps
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let state = if t.enabled { "" } else { " (disabled)" };
                format!("{}. {}{}", i + 1, t.operation.display_name(), state)
            })
            .collect::<Vec<String>>()
            .join("\n")
    }

    /// Displays the step summary of the template followed by its TOML form
    pub fn show(&self, key: &str) -> Result<bool> {
        let template = self.find(key)?;
        let data = toml::to_string_pretty(template)
            .map_err(|e| Error::TemplateWriteError(e.to_string()))?;
        println!("{}\n{}\n", Green.paint(&template.name), Self::describe(template));
        println!("{}", data);
        Ok(true)
    }

    /// Creates a new template file, opening it in the editor unless `no_edit`
    pub fn create(&self, name: &str, no_edit: bool) -> Result<bool> {
        let (path, created) = TemplateWriter::create_new_template(
            name,
            &self.config.defaults.category,
            &self.input_dir,
        )?;
        if created {
            println!("New template \"{}\" created", Green.paint(name));
            if !no_edit {
                return self.open_in_editor(&path);
            }
        } else {
            println!("{}", Yellow.paint(format!("Template \"{}\" already exists", name)));
        }
        Ok(created)
    }

    /// Opens a template in the editor. Built-in templates are first saved to
    /// the templates directory so the edit overrides them.
    pub fn edit(&self, key: &str) -> Result<bool> {
        let entry = self
            .catalog
            .find(key)
            .ok_or_else(|| Error::TemplateNotFound(key.to_string()))?;
        let path = match &entry.source {
            Source::File(path) => path.clone(),
            Source::BuiltIn | Source::Unsaved => {
                TemplateWriter::save(&self.input_dir, &entry.template)?
            }
        };
        self.open_in_editor(&path)
    }

    fn open_in_editor(&self, path: &Path) -> Result<bool> {
        edit::edit_file(path).map_err(|e| Error::TemplateReadError {
            file: path.to_string_lossy().to_string(),
            cause: e.to_string(),
        })?;
        Ok(true)
    }

    /// Removes a template from the templates directory
    pub fn remove(&mut self, key: &str) -> Result<bool> {
        let entry = self
            .catalog
            .find(key)
            .ok_or_else(|| Error::TemplateNotFound(key.to_string()))?;

        match entry.source.clone() {
            Source::File(path) => {
                let id = entry.template.id.clone();
                TemplateWriter::remove(&path)?;
                self.catalog.remove(&id);
                self.recent.forget(&id);
                self.save_recent()?;
                println!("Template \"{}\" removed", Green.paint(key));
                Ok(true)
            }
            Source::BuiltIn | Source::Unsaved => {
                println!(
                    "{}",
                    Yellow.paint(format!("Template \"{}\" is built-in and cannot be removed", key))
                );
                Ok(false)
            }
        }
    }

    /// Saves a copy of a template under a new id
    pub fn duplicate(&mut self, key: &str) -> Result<bool> {
        let id = self.find(key)?.id.clone();
        let new_id = self.catalog.duplicate(&id)?;
        self.persist(&new_id)?;
        println!("Template \"{}\" duplicated as \"{}\"", key, Green.paint(&new_id));
        Ok(true)
    }

    /// Toggles the starred flag of a template
    pub fn star(&mut self, key: &str) -> Result<bool> {
        let id = self.find(key)?.id.clone();
        let starred = self.catalog.toggle_star(&id)?;
        self.persist(&id)?;
        println!(
            "Template \"{}\" {}",
            Green.paint(&id),
            if starred { "starred" } else { "unstarred" }
        );
        Ok(true)
    }

    /// Imports the templates of a JSON export into the templates directory
    pub fn import(&mut self, file: &PathBuf) -> Result<bool> {
        let templates = TemplateReader::read_file(file)?;
        let count = templates.len();
        for template in templates {
            let path = TemplateWriter::save(&self.input_dir, &template)?;
            self.catalog.insert(template, Source::File(path));
        }
        println!("{} template(s) imported", Green.paint(count.to_string()));
        Ok(count > 0)
    }

    /// Lists the recently used templates, newest first, or forgets them all
    /// when `clear` is set
    pub fn recent(&mut self, clear: bool) -> Result<bool> {
        if clear {
            self.recent.clear();
            self.save_recent()?;
            println!("Recent templates cleared");
            return Ok(true);
        }

        let recent: Vec<_> = self
            .recent
            .entries()
            .iter()
            .filter_map(|e| self.catalog.get_by_id(&e.template_id).map(|t| (e, t)))
            .collect();
        if recent.is_empty() {
            println!("{}", Yellow.paint("No recent templates"));
            return Ok(false);
        }
        for (entry, template) in recent {
            println!(
                "{} {} {}",
                Green.paint(format!("{:<24}", template.id)),
                entry.used_at.format("%Y-%m-%d %H:%M"),
                template.name
            );
        }
        Ok(true)
    }

    /// Restores the built-in templates, deleting every template file of the
    /// templates directory
    pub fn reset(&mut self) -> Result<bool> {
        let removed = self.catalog.reset();
        let mut count = 0;
        for entry in removed {
            if let Source::File(path) = entry.source {
                TemplateWriter::remove(&path)?;
                count += 1;
            }
        }
        let catalog = &self.catalog;
        let stale: Vec<String> = self
            .recent
            .entries()
            .iter()
            .filter(|e| catalog.get_by_id(&e.template_id).is_none())
            .map(|e| e.template_id.clone())
            .collect();
        for id in stale {
            self.recent.forget(&id);
        }
        self.save_recent()?;
        println!(
            "Default templates restored ({} file(s) removed)",
            Green.paint(count.to_string())
        );
        Ok(true)
    }

    /// Writes the template to disk, to its own file when it has one
    fn persist(&mut self, id: &str) -> Result<()> {
        let template = self
            .catalog
            .get_by_id(id)
            .cloned()
            .ok_or_else(|| Error::TemplateNotFound(id.to_string()))?;
        let path = match self.catalog.source(id) {
            Some(Source::File(path)) => {
                TemplateWriter::save_to(path, &template)?;
                path.clone()
            }
            _ => TemplateWriter::save(&self.input_dir, &template)?,
        };
        self.catalog.insert(template, Source::File(path));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn controller<'a>(dir: &Path, config: &'a MainConfig) -> TemplatesController<'a> {
        TemplatesController::new(dir.to_path_buf(), config).unwrap()
    }

    #[test]
    fn test_transform_with_builtin_template() {
        let config = MainConfig::new();
        let temp_dir = tempfile::tempdir().unwrap();
        let ctrl = controller(temp_dir.path(), &config);
        let (result, context) = ctrl.transform("bullet-list", "a\nb").unwrap();
        assert_eq!(result, "- a\n- b");
        assert!(context.is_empty());
        assert!(matches!(
            ctrl.transform("missing", "a"),
            Err(Error::TemplateNotFound(_))
        ));
    }

    #[test]
    fn test_apply_records_usage_on_disk() -> Result<()> {
        let config = MainConfig::new();
        let temp_dir = tempfile::tempdir()?;
        let input = temp_dir.path().join("input.txt");
        fs::write(&input, "b\na\nb")?;

        let templates_dir = temp_dir.path().join("templates");
        let mut template = Template::new("dedupe", "Dedupe");
        template.transformations = vec![crate::template::Transformation::new(
            "1",
            1,
            crate::template::Operation::RemoveDuplicates,
        )];
        TemplateWriter::save(&templates_dir, &template)?;

        let mut ctrl = controller(&templates_dir, &config);
        let mut output = Vec::new();
        ctrl.apply("dedupe", Some(input.as_path()), &mut output, false, false)?;
        assert_eq!(String::from_utf8(output).unwrap(), "b\na");

        let stored = TemplateReader::read_file(&templates_dir.join("dedupe.toml"))?.remove(0);
        assert_eq!(stored.usage_count, 1);
        Ok(())
    }

    #[test]
    fn test_filtered() {
        let config = MainConfig::new();
        let temp_dir = tempfile::tempdir().unwrap();
        let ctrl = controller(temp_dir.path(), &config);
        let filter = ListFilter {
            category: Some("Markdown".to_string()),
            search: Some("list".to_string()),
            starred: true,
        };
        let ids: Vec<&str> = ctrl.filtered(&filter).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["bullet-list"]);
    }

    #[test]
    fn test_duplicate_star_import_remove() -> Result<()> {
        let config = MainConfig::new();
        let temp_dir = tempfile::tempdir()?;
        let templates_dir = temp_dir.path().join("templates");
        let mut ctrl = controller(&templates_dir, &config);

        ctrl.duplicate("trim-lines")?;
        let copy_id = ctrl
            .catalog()
            .templates()
            .find(|t| t.name == "Trim All Lines (Copy)")
            .map(|t| t.id.clone())
            .unwrap();
        assert!(templates_dir
            .join(TemplateWriter::get_template_file(&copy_id))
            .exists());

        ctrl.star("trim-lines")?;
        let starred = TemplateReader::read_file(&templates_dir.join("trim-lines.toml"))?.remove(0);
        assert!(starred.starred);

        let export = temp_dir.path().join("export.json");
        fs::write(&export, r#"[{"id": "imported", "name": "Imported"}]"#)?;
        assert!(ctrl.import(&export)?);
        assert!(ctrl.catalog().get_by_id("imported").is_some());

        assert!(ctrl.remove("imported")?);
        assert!(!templates_dir.join("imported.toml").exists());
        assert!(!ctrl.remove("wrap-code")?);
        Ok(())
    }

    #[test]
    fn test_apply_updates_recent_list() -> Result<()> {
        let mut config = MainConfig::new();
        config.defaults.max_recent = 2;
        let temp_dir = tempfile::tempdir()?;
        let input = temp_dir.path().join("input.txt");
        fs::write(&input, "a")?;
        let templates_dir = temp_dir.path().join("templates");

        let mut ctrl = controller(&templates_dir, &config);
        for key in ["bullet-list", "quote-block", "bullet-list", "trim-lines"] {
            ctrl.apply(key, Some(input.as_path()), &mut Vec::<u8>::new(), true, false)?;
        }
        let ids: Vec<&str> = ctrl
            .recent_templates()
            .entries()
            .iter()
            .map(|e| e.template_id.as_str())
            .collect();
        assert_eq!(ids, vec!["trim-lines", "bullet-list"]);

        // the list survives a new controller
        let reloaded = controller(&templates_dir, &config);
        assert_eq!(reloaded.recent_templates(), ctrl.recent_templates());

        assert!(ctrl.recent(true)?);
        assert!(controller(&templates_dir, &config).recent_templates().is_empty());
        Ok(())
    }

    #[test]
    fn test_reset_removes_template_files() -> Result<()> {
        let config = MainConfig::new();
        let temp_dir = tempfile::tempdir()?;
        let templates_dir = temp_dir.path().join("templates");
        let input = temp_dir.path().join("input.txt");
        fs::write(&input, "a")?;

        let mut ctrl = controller(&templates_dir, &config);
        ctrl.star("trim-lines")?;
        ctrl.duplicate("wrap-code")?;
        ctrl.apply("trim-lines", Some(input.as_path()), &mut Vec::<u8>::new(), true, false)?;
        ctrl.apply("Wrap in Code Block (Copy)", Some(input.as_path()), &mut Vec::<u8>::new(), true, false)?;

        assert!(ctrl.reset()?);
        assert!(!templates_dir.join("trim-lines.toml").exists());
        assert!(TemplateReader::read_dir(&templates_dir)?.is_empty());
        assert!(!ctrl.catalog().get_by_id("trim-lines").unwrap().starred);

        let recent: Vec<&str> = ctrl
            .recent_templates()
            .entries()
            .iter()
            .map(|e| e.template_id.as_str())
            .collect();
        assert_eq!(recent, vec!["trim-lines"]);
        Ok(())
    }

    #[test]
    fn test_describe_lists_steps_in_order() {
        use crate::template::{Operation, Transformation};

        let mut template = Template::new("t", "T");
        template.transformations = vec![
            Transformation::new("a", 2, Operation::SortLines),
            Transformation::new("b", 3, Operation::TrimLines).with_enabled(false),
            Transformation::new("c", 1, Operation::JsonBeautify { indent: None }),
        ];
        assert_eq!(
            TemplatesController::describe(&template),
            "1. Beautify JSON\n2. Sort Lines\n3. Trim Lines (disabled)"
        );
    }
}
