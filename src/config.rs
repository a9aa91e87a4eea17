use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::template::{DEFAULT_CATEGORY, DEFAULT_TEMPLATE_NAME, MAX_RECENT_TEMPLATES};
use crate::error::*;

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct MainConfig {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub templates: Templates,
}

#[derive(Deserialize, Serialize, Debug)]
#[serde(default)]
pub struct Defaults {
    /// Template applied when none is given on the command line
    pub template: String,
    /// Category assigned to newly created templates
    pub category: String,
    /// Whether to report the captured values after applying a template
    pub show_captures: bool,
    /// Number of recently used templates to remember
    pub max_recent: usize,
}

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct Templates {
    pub directory: Option<String>,
}

impl Default for Defaults {
    fn default() -> Defaults {
        Defaults {
            template: DEFAULT_TEMPLATE_NAME.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            show_captures: false,
            max_recent: MAX_RECENT_TEMPLATES,
        }
    }
}

impl MainConfig {
    pub fn new() -> Self {
        MainConfig {
            ..Default::default()
        }
    }

    /// Parses the configuration from its TOML representation
    ///
    /// # Examples
    /// ```
    /// use clipform::config::MainConfig;
    ///
    /// let config = MainConfig::from_toml("[defaults]\ntemplate = \"wrap-code\"\n").unwrap();
    /// assert_eq!(config.defaults.template, "wrap-code");
    /// assert_eq!(config.defaults.category, "General");
    /// assert!(config.templates.directory.is_none());
    /// ```
    pub fn from_toml(data: &str) -> Result<Self> {
        toml::from_str(data).map_err(|e| Error::SerdeTomlError {
            location: ConfigType::MAIN,
            file: String::from("config"),
            cause: e.to_string(),
        })
    }
}

pub fn parse(file_path: &PathBuf) -> Result<String> {
    let mut config_content = String::new();
    File::open(file_path)?.read_to_string(&mut config_content)?;
    Ok(config_content)
}
