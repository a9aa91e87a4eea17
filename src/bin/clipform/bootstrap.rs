use chrono::prelude::*;
use std::io::prelude::*;
use std::path::PathBuf;
use std::{env, fs::File};

use clipform::constants::template::{DEFAULT_CATEGORY, DEFAULT_TEMPLATE_NAME, MAX_RECENT_TEMPLATES};
pub use clipform::{
    config::{parse as config_parse, MainConfig},
    error::*,
};

use crate::directories::PROJECT_DIRS;

static DEFAULT_CONF: &str = "# File automatically generated on ${date}\n\
                            [defaults]\n\
                            template      = \"${default_template_name}\"\n\
                            category      = \"${default_category}\"\n\
                            show_captures = false\n\
                            max_recent    = ${max_recent}\n\n\
                            [templates]\n\
                            directory     = \"${templates_dir}\"\n";

const DEFAULT_CONF_FILE: &str = "clipform.toml";

#[derive(Debug)]
pub struct BootStrap {
    config: MainConfig,
}

impl BootStrap {
    pub fn new() -> Result<Self> {
        Ok(BootStrap {
            config: parse_main_config()?,
        })
    }

    /// Retrieves the templates directory using the following order :
    ///
    /// - The directory path specified by the environment variable CLIPFORM_TEMPLATES_DIR
    /// - The directory path specified in the main configuration file
    /// - The default directory from PROJECT_DIRS
    ///
    /// # Returns
    /// The path to the templates directory
    ///
    /// # Errors
    /// Returns an error if the directory path cannot be interpolated
    pub fn template_dir(&self) -> Result<PathBuf> {
        let templates_dir_path = env::var_os("CLIPFORM_TEMPLATES_DIR")
            .map_or(self.config.templates.directory.clone(), |dir| {
                Some(dir.to_string_lossy().to_string())
            });

        let templates_dir = match templates_dir_path {
            Some(dir) => dir,
            None => PROJECT_DIRS.templates_dir().to_string_lossy().to_string(),
        };

        let template_dir = match shellexpand::env(&templates_dir) {
            Ok(dir) => dir.to_string(),
            Err(e) => {
                return Err(Error::InterpolationError {
                    location: ConfigType::MAIN,
                    cause: e.to_string(),
                });
            }
        };

        Ok(PathBuf::from(template_dir))
    }

    pub fn get_config(&self) -> &MainConfig {
        &self.config
    }
}

/// Creates the default main configuration file in the config directory
///
/// # Returns
/// A `Result` containing the configuration data as a `String`
///
/// # Errors
/// * `ConfigError` - If the configuration file has no parent directory
/// * `IoError` - If an I/O error occurs while creating the configuration file
fn create_default_config(config_file: &PathBuf) -> Result<String> {
    let parent_dir = config_file
        .parent()
        .ok_or_else(|| Error::ConfigError(config_file.to_string_lossy().into_owned()))?;
    std::fs::create_dir_all(parent_dir)?;
    let templates_dir = parent_dir.join("templates").to_string_lossy().into_owned();
    let current_date: DateTime<Local> = Local::now();
    let config_data = DEFAULT_CONF
        .replacen("${templates_dir}", &templates_dir, 1)
        .replacen("${date}", &current_date.to_string(), 1)
        .replacen("${default_template_name}", DEFAULT_TEMPLATE_NAME, 1)
        .replacen("${default_category}", DEFAULT_CATEGORY, 1)
        .replacen("${max_recent}", &MAX_RECENT_TEMPLATES.to_string(), 1);

    File::create(config_file)?.write_all(config_data.as_bytes())?;
    Ok(config_data)
}

/// Processes the main configuration file retrieving the associated `MainConfig` structure
///
/// If the file does not exist, a default configuration file is created first.
///
/// # Errors
///
/// This function returns an error if the configuration file cannot be read or parsed.
pub fn parse_main_config() -> Result<MainConfig> {
    let conf_file = &PROJECT_DIRS.config_dir().join(DEFAULT_CONF_FILE);
    let toml_data = match config_parse(conf_file) {
        Ok(data) => data,
        Err(Error::Io(e)) if e.kind() == ::std::io::ErrorKind::NotFound => {
            create_default_config(conf_file)?
        }
        Err(Error::Io(e)) => {
            return Err(Error::ConfigReadError {
                file: String::from(DEFAULT_CONF_FILE),
                cause: e.to_string(),
            });
        }
        Err(e) => return Err(e),
    };

    MainConfig::from_toml(&toml_data).map_err(|e| match e {
        Error::SerdeTomlError {
            location, cause, ..
        } => Error::SerdeTomlError {
            location,
            file: String::from(DEFAULT_CONF_FILE),
            cause,
        },
        e => e,
    })
}
