use std::path::PathBuf;

use uuid::Uuid;

use crate::constants::template::COPY_SUFFIX;
use crate::error::*;
use crate::presets::default_templates;
use crate::reader::TemplateReader;
use crate::template::Template;

/// Where a catalog entry comes from
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    BuiltIn,
    File(PathBuf),
    Unsaved,
}

#[derive(Debug, Clone)]
pub struct Entry {
    pub template: Template,
    pub source: Source,
}

/// The templates known to the application: the built-in set, overridden by
/// the templates found in the user's templates directory.
#[derive(Debug, Default)]
pub struct TemplateCatalog {
    entries: Vec<Entry>,
}

/// Generates a fresh template identifier
pub fn new_template_id() -> String {
    format!("template-{}", Uuid::new_v4().simple())
}

/// Normalizes a template name into the form used for ids and file names
pub fn slugify(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<&str>>()
        .join("-")
}

impl TemplateCatalog {
    pub fn new() -> Self {
        TemplateCatalog {
            entries: Vec::new(),
        }
    }

    /// Creates a catalog holding only the built-in templates
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        for template in default_templates() {
            catalog.insert(template, Source::BuiltIn);
        }
        catalog
    }

    /// Loads the built-in templates and then every template file in the given
    /// directory. A user template with the id of a built-in one replaces it.
    pub fn load(input_dir: &PathBuf) -> Result<Self> {
        let mut catalog = Self::with_defaults();
        for (path, template) in TemplateReader::read_dir(input_dir)? {
            catalog.insert(template, Source::File(path));
        }
        Ok(catalog)
    }

    /// Adds a template, replacing any entry with the same id
    pub fn insert(&mut self, template: Template, source: Source) {
        match self.entries.iter_mut().find(|e| e.template.id == template.id) {
            Some(entry) => *entry = Entry { template, source },
            None => self.entries.push(Entry { template, source }),
        }
    }

    /// Removes the template with the given id, returning its entry
    pub fn remove(&mut self, id: &str) -> Option<Entry> {
        let index = self.entries.iter().position(|e| e.template.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn templates(&self) -> impl Iterator<Item = &Template> {
        self.entries.iter().map(|e| &e.template)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds an entry by id, or by name when no id matches (case-insensitive)
    pub fn find(&self, key: &str) -> Option<&Entry> {
        let slug = slugify(key);
        self.entries
            .iter()
            .find(|e| e.template.id == key)
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|e| e.template.name.eq_ignore_ascii_case(key.trim()))
            })
            .or_else(|| self.entries.iter().find(|e| e.template.id == slug))
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Template> {
        self.entries
            .iter()
            .find(|e| e.template.id == id)
            .map(|e| &e.template)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Template> {
        self.entries
            .iter_mut()
            .find(|e| e.template.id == id)
            .map(|e| &mut e.template)
            .ok_or_else(|| Error::TemplateNotFound(id.to_string()))
    }

    /// Searches templates by name, description or tag. An empty query
    /// returns every template.
    pub fn search(&self, query: &str) -> Vec<&Template> {
        if query.trim().is_empty() {
            return self.templates().collect();
        }
        self.templates().filter(|t| t.matches(query)).collect()
    }

    /// Returns the templates of the given category. An empty category
    /// returns every template.
    pub fn filter_by_category(&self, category: &str) -> Vec<&Template> {
        if category.is_empty() {
            return self.templates().collect();
        }
        self.templates()
            .filter(|t| t.category.as_deref() == Some(category))
            .collect()
    }

    /// Returns the distinct categories, sorted
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self
            .templates()
            .filter_map(|t| t.category.clone())
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// Returns the starred templates, most used first
    pub fn starred(&self) -> Vec<&Template> {
        let mut starred: Vec<&Template> = self.templates().filter(|t| t.starred).collect();
        starred.sort_by(|a, b| b.usage_count.cmp(&a.usage_count));
        starred
    }

    /// Copies the template under a new id and a "(Copy)" name. The copy is not
    /// starred and has no usage. Returns the new id.
    pub fn duplicate(&mut self, id: &str) -> Result<String> {
        let original = self
            .get_by_id(id)
            .ok_or_else(|| Error::TemplateNotFound(id.to_string()))?;

        let mut copy = Template::new(new_template_id(), format!("{}{}", original.name, COPY_SUFFIX));
        copy.description = original.description.clone();
        copy.category = original.category.clone();
        copy.tags = original.tags.clone();
        copy.example_text = original.example_text.clone();
        copy.transformations = original.transformations.clone();

        let new_id = copy.id.clone();
        self.insert(copy, Source::Unsaved);
        Ok(new_id)
    }

    /// Flips the starred flag of the template, returning the new state
    pub fn toggle_star(&mut self, id: &str) -> Result<bool> {
        let template = self.get_mut(id)?;
        template.starred = !template.starred;
        template.touch();
        Ok(template.starred)
    }

    /// Records one more use of the template
    pub fn increment_usage_count(&mut self, id: &str) -> Result<u64> {
        let template = self.get_mut(id)?;
        template.usage_count += 1;
        Ok(template.usage_count)
    }

    /// Restores the built-in templates. Returns the entries that are not
    /// built-in, so their files can be deleted.
    pub fn reset(&mut self) -> Vec<Entry> {
        let entries = std::mem::take(&mut self.entries);
        *self = Self::with_defaults();
        entries
            .into_iter()
            .filter(|e| e.source != Source::BuiltIn)
            .collect()
    }

    /// Returns where the template with the given id was loaded from
    pub fn source(&self, id: &str) -> Option<&Source> {
        self.entries
            .iter()
            .find(|e| e.template.id == id)
            .map(|e| &e.source)
    }
}
