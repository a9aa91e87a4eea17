use std::{
    fs::create_dir_all,
    path::{Path, PathBuf},
};

use crate::{
    catalog::slugify,
    constants::template::{DEFAULT_TEMPLATE_EXT, NEW_TEMPLATE},
    error::*,
    template::Template,
};

pub struct TemplateWriter {}

impl TemplateWriter {
    /// Retrieves the template file name (with extension) for the given id
    pub fn get_template_file(id: &str) -> String {
        let file_name = slugify(id.trim_end_matches(DEFAULT_TEMPLATE_EXT));
        file_name + DEFAULT_TEMPLATE_EXT
    }

    /// Writes the template into the templates directory, replacing any file
    /// with the same name.
    ///
    /// # Returns
    /// The path of the written file.
    pub fn save(input_dir: &Path, template: &Template) -> Result<PathBuf> {
        let data = toml::to_string_pretty(template).map_err(|e| {
            Error::TemplateWriteError(format!("Cannot serialize template {} -> {}", template.id, e))
        })?;
        let file_path = input_dir.join(Self::get_template_file(&template.id));
        Self::write(&file_path, &data)?;
        Ok(file_path)
    }

    /// Writes the template back to the file it was loaded from
    pub fn save_to(file_path: &Path, template: &Template) -> Result<()> {
        let data = toml::to_string_pretty(template).map_err(|e| {
            Error::TemplateWriteError(format!("Cannot serialize template {} -> {}", template.id, e))
        })?;
        Self::write(file_path, &data)
    }

    /// Writes a new template skeleton for the given name, unless a file for it
    /// already exists.
    ///
    /// # Returns
    /// The path of the template file and whether it was created.
    pub fn create_new_template(
        name: &str,
        category: &str,
        input_dir: &Path,
    ) -> Result<(PathBuf, bool)> {
        let id = slugify(name);
        if id.is_empty() {
            return Err(Error::CommandError(format!(
                "Invalid template name \"{}\"",
                name
            )));
        }
        let file_path = input_dir.join(Self::get_template_file(&id));
        if file_path.exists() {
            return Ok((file_path, false));
        }

        let template = NEW_TEMPLATE
            .replacen("@id", &id, 1)
            .replacen("@name", &name.replace('"', "\\\""), 1)
            .replacen("@category", category, 1);
        Self::write(&file_path, &template)?;
        Ok((file_path, true))
    }

    /// Deletes a template file
    pub fn remove(file_path: &Path) -> Result<()> {
        std::fs::remove_file(file_path).map_err(|e| {
            Error::TemplateWriteError(format!(
                "Cannot remove file {} -> {}",
                file_path.to_string_lossy(),
                e
            ))
        })
    }

    fn write(file_path: &Path, data: &str) -> Result<()> {
        match file_path.parent() {
            Some(parent) => {
                create_dir_all(parent)?;
                std::fs::write(file_path, data).map_err(|e| {
                    Error::TemplateWriteError(format!(
                        "Cannot write file {} -> {}",
                        file_path.to_string_lossy(),
                        e
                    ))
                })
            }
            None => Err(Error::TemplateWriteError(format!(
                "Cannot create directory for file {}",
                file_path.to_string_lossy()
            ))),
        }
    }
}
