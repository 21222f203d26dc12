use std::{fs, path::Path};

use anyhow::{Context, Result};
use log::info;
use serde::Deserialize;

use crate::{
    common::project_config_dir,
    tui::{
        ChooserConfig, InputConfig, StyleAttr, Styler, Styles,
        components::{DEFAULT_CURSOR, DEFAULT_PAGE_SIZE},
    },
};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Process-wide prompt settings, read from `config.json`.
///
/// Every field is optional in the file; missing ones take the defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Options shown per chooser page
    pub page_size: usize,
    /// Chooser cursor glyph
    pub cursor: String,
    pub styles: StyleSettings,
}

/// Attribute lists for each style class.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleSettings {
    pub cursor: Vec<StyleAttr>,
    pub item: Vec<StyleAttr>,
    pub selected_item: Vec<StyleAttr>,
    /// Applied to the character under the text input's edit position
    pub input_cursor: Vec<StyleAttr>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            cursor: DEFAULT_CURSOR.to_owned(),
            styles: StyleSettings::default(),
        }
    }
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            cursor: Vec::new(),
            item: Vec::new(),
            selected_item: Vec::new(),
            input_cursor: vec![StyleAttr::Reversed],
        }
    }
}

impl Settings {
    /// Loads settings from the project config directory.
    pub fn load() -> Result<Self> {
        let config_file = project_config_dir()?.join(CONFIG_FILE_NAME);
        Self::load_from(&config_file)
    }

    /// Loads settings from `config_file`, falling back to defaults when the
    /// file does not exist.
    pub fn load_from(config_file: &Path) -> Result<Self> {
        if !config_file.exists() {
            info!(
                "no settings at {}, using defaults",
                config_file.display()
            );
            return Ok(Self::default());
        }

        let config_string = fs::read_to_string(config_file)
            .with_context(|| format!("Unable to read {}", config_file.display()))?;

        let settings: Settings = serde_json::from_str(&config_string)
            .with_context(|| format!("Unable to parse {}", config_file.display()))?;

        info!("settings loaded from {}", config_file.display());
        Ok(settings)
    }

    /// Chooser configuration described by these settings.
    ///
    /// The page size is not checked here; the chooser rejects invalid values
    /// when it is constructed.
    #[must_use]
    pub fn chooser_config(&self) -> ChooserConfig {
        ChooserConfig::builder()
            .page_size(self.page_size)
            .cursor(self.cursor.clone())
            .styles(Styles {
                cursor: Styler::from_attrs(&self.styles.cursor),
                item: Styler::from_attrs(&self.styles.item),
                selected_item: Styler::from_attrs(&self.styles.selected_item),
            })
            .build()
    }

    #[must_use]
    pub fn input_config(&self, prompt: impl Into<String>) -> InputConfig {
        InputConfig::builder()
            .prompt(prompt)
            .cursor_style(Styler::from_attrs(&self.styles.input_cursor))
            .build()
    }
}
