use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    catalog::TemplateCatalog,
    config::parse as config_parse,
    error::*,
    template::Template,
};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecentEntry {
    pub template_id: String,
    pub used_at: DateTime<Utc>,
}

/// The most recently used templates, newest first
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
pub struct RecentTemplates {
    #[serde(default)]
    recent: Vec<RecentEntry>,
}

impl RecentTemplates {
    pub fn new() -> Self {
        RecentTemplates { recent: Vec::new() }
    }

    /// Reads the list from its file. A missing file yields an empty list.
    pub fn load(file_path: &Path) -> Result<Self> {
        let data = match config_parse(&file_path.to_path_buf()) {
            Ok(data) => data,
            Err(Error::Io(e)) if e.kind() == ::std::io::ErrorKind::NotFound => {
                return Ok(Self::new())
            }
            Err(e) => return Err(e),
        };
        toml::from_str(&data).map_err(|e| Error::SerdeTomlError {
            location: ConfigType::RECENT,
            file: file_path.to_string_lossy().to_string(),
            cause: e.to_string(),
        })
    }

    /// Writes the list to its file, creating the parent directory if needed
    pub fn save(&self, file_path: &Path) -> Result<()> {
        let data = toml::to_string_pretty(self)
            .map_err(|e| Error::TemplateWriteError(e.to_string()))?;
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(file_path, data)?;
        Ok(())
    }

    /// Moves the template to the front of the list, keeping at most `max` entries
    pub fn record(&mut self, template_id: &str, max: usize) {
        self.recent.retain(|e| e.template_id != template_id);
        self.recent.insert(
            0,
            RecentEntry {
                template_id: template_id.to_string(),
                used_at: Utc::now(),
            },
        );
        self.recent.truncate(max);
    }

    pub fn forget(&mut self, template_id: &str) {
        self.recent.retain(|e| e.template_id != template_id);
    }

    pub fn clear(&mut self) {
        self.recent.clear();
    }

    pub fn entries(&self) -> &[RecentEntry] {
        &self.recent
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }

    /// Resolves the entries against the catalog, skipping templates that no
    /// longer exist
    pub fn templates<'c>(&self, catalog: &'c TemplateCatalog) -> Vec<&'c Template> {
        self.recent
            .iter()
            .filter_map(|e| catalog.get_by_id(&e.template_id))
            .collect()
    }
}
