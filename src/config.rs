//! Application configuration management.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use color_eyre::Result;
use serde::{Deserialize, Serialize};

use crate::icon::{Icon, IconSet};
use crate::model::{ActionDescriptor, ActionId};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// UI configuration
    #[serde(default)]
    pub ui: UiConfig,

    /// Global actions shown in the page header
    #[serde(default = "default_header_actions")]
    pub header_actions: Vec<HeaderActionConfig>,

    /// Actions offered for a single item
    #[serde(default = "default_item_actions")]
    pub item_actions: Vec<ItemActionConfig>,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Page title shown in the header
    #[serde(default = "default_title")]
    pub title: String,

    /// Number of grid columns (1 to [`MAX_COLUMNS`])
    #[serde(default = "default_columns")]
    pub columns: usize,

    /// Show cover artwork (requires sixel/kitty/iterm2 support)
    #[serde(default = "default_true")]
    pub show_artwork: bool,

    /// Glyph family for icons
    #[serde(default)]
    pub icons: IconSet,
}

/// A global header action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderActionConfig {
    pub id: String,
    pub icon: String,
}

/// A per-item action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemActionConfig {
    pub id: String,
    pub icon: String,
    pub label: String,
}

/// A header action resolved for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderAction {
    pub id: ActionId,
    pub icon: Icon,
}

/// Upper bound on the configured grid column count.
pub const MAX_COLUMNS: usize = 16;

fn default_title() -> String {
    String::from("Library")
}

fn default_columns() -> usize {
    2
}

fn default_true() -> bool {
    true
}

fn default_header_actions() -> Vec<HeaderActionConfig> {
    [("add", "plus-circle"), ("search", "search")]
        .into_iter()
        .map(|(id, icon)| HeaderActionConfig {
            id: id.to_string(),
            icon: icon.to_string(),
        })
        .collect()
}

fn default_item_actions() -> Vec<ItemActionConfig> {
    [
        ("tag", "tag", "Tags"),
        ("play-next", "corner-up-right", "Play Next"),
        ("add-to-queue", "plus-square", "Add to Queue"),
        ("share", "link", "Share"),
        ("download", "download", "Download"),
        ("delete", "trash", "Delete"),
    ]
    .into_iter()
    .map(|(id, icon, label)| ItemActionConfig {
        id: id.to_string(),
        icon: icon.to_string(),
        label: label.to_string(),
    })
    .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ui: UiConfig::default(),
            header_actions: default_header_actions(),
            item_actions: default_item_actions(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            columns: default_columns(),
            show_artwork: true,
            icons: IconSet::default(),
        }
    }
}

impl Config {
    /// Get the default configuration file path.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| color_eyre::eyre::eyre!("Could not determine config directory"))?;

        Ok(config_dir.join("bap-tui").join("config.toml"))
    }

    /// Load configuration from the default path.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a file; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(contents)?;

        config.ui.columns = config.ui.columns.clamp(1, MAX_COLUMNS);

        Ok(config)
    }

    /// Resolve header actions, dropping repeated ids.
    pub fn header_actions(&self) -> Vec<HeaderAction> {
        let mut seen = HashSet::new();
        self.header_actions
            .iter()
            .filter(|a| {
                let fresh = seen.insert(a.id.as_str());
                if !fresh {
                    tracing::warn!("Ignoring repeated header action {:?}", a.id);
                }
                fresh
            })
            .map(|a| HeaderAction {
                id: ActionId::new(a.id.clone()),
                icon: Icon::from_name_or_generic(&a.icon),
            })
            .collect()
    }

    /// Resolve item actions, dropping entries whose label repeats.
    pub fn item_actions(&self) -> Vec<ActionDescriptor> {
        let mut seen = HashSet::new();
        self.item_actions
            .iter()
            .filter(|a| {
                let fresh = seen.insert(a.label.as_str());
                if !fresh {
                    tracing::warn!("Ignoring repeated item action label {:?}", a.label);
                }
                fresh
            })
            .map(|a| {
                ActionDescriptor::new(
                    a.id.clone(),
                    Icon::from_name_or_generic(&a.icon),
                    a.label.clone(),
                )
            })
            .collect()
    }
}
