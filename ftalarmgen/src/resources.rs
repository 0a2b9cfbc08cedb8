// SPDX-License-Identifier: GPL-3.0-or-later

//! Handles loading resources needed for generating alarms.

use resource::resource_str;
use tracing::{event, warn, Level};

use std::{fs, path::PathBuf, str};

use crate::config::{MissingOption, NamingConfig, PartialNamingConfig};

/// Errors that may occur when loading resources.
#[derive(thiserror::Error, Debug)]
pub enum ResourceError {
    /// Occurs when loading an override file fails.
    #[error("failed to read override file for resource: {0}")]
    Override(String),

    /// Occurs when parsing a resource fails.
    #[error("failed to parse resource: {0}")]
    Parse(String),

    /// Occurs when encoding a resource to UTF-8 fails.
    #[error("UTF-8 conversion failed for resource: {0}")]
    Utf8(String),

    /// Occurs when the configuration lacks a required option.
    #[error(transparent)]
    MissingOption(#[from] MissingOption),
}

/// Contains paths to resource files.
#[derive(Debug, Clone, Default)]
pub struct Resources {
    /// Naming configuration path. Built-in defaults are used if unset or missing.
    pub config: Option<PathBuf>,

    /// Report section template path.
    pub template: Option<PathBuf>,
}

impl Resources {
    /// Loads the naming configuration.
    ///
    /// A configured path that does not exist is not an error: a warning is logged and the built-in
    /// defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or parsing the [`NamingConfig`] fails, or if a required option
    /// is missing.
    pub fn config(&self) -> Result<NamingConfig, ResourceError> {
        let src = match &self.config {
            Some(file) if file.exists() => {
                let src = load_override("config".into(), file)?;
                event!(Level::INFO, path = %file.display(), "loaded config");
                src
            }
            Some(file) => {
                warn!(
                    path = %file.display(),
                    "config file does not exist, continuing with built-in defaults"
                );
                builtin_config()
            }
            None => builtin_config(),
        };
        let partial = serde_any::from_str_any::<PartialNamingConfig>(src.as_str())
            .map_err(|_| ResourceError::Parse("config".into()))?;
        let config = partial.resolve()?;
        event!(Level::DEBUG, "parsed config");
        Ok(config)
    }

    /// Loads the report section template.
    ///
    /// # Errors
    ///
    /// Returns an error if loading the file fails.
    pub fn template(&self) -> Result<String, ResourceError> {
        match &self.template {
            Some(file) => load_override("template".into(), file),
            None => Ok(resource_str!("res/report.txt").to_string()),
        }
    }
}

/// The built-in naming configuration source.
fn builtin_config() -> String {
    resource_str!("res/config.json").to_string()
}

/// Attempts to encode the provided bytes to UTF-8.
fn utf8(v: Vec<u8>, resource_name: String) -> Result<String, ResourceError> {
    Ok(str::from_utf8(v.as_slice())
        .map_err(|_| ResourceError::Utf8(resource_name))?
        .to_string())
}

/// Attempts to load an override file.
fn load_override(resource_name: String, file: &PathBuf) -> Result<String, ResourceError> {
    let src = fs::read(file).map_err(|_| ResourceError::Override(resource_name.clone()))?;
    utf8(src, resource_name)
}
