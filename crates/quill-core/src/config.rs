//! Editor configuration

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Editor theme applied to every tab
    pub theme: String,
    /// Name used for tabs opened without one
    pub default_tab_name: String,
    /// Log filter used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Open a tab on startup so the strip is never empty
    pub open_initial_tab: bool,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.theme.trim().is_empty() {
            return Err(CoreError::Config("theme cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
            default_tab_name: quill_tabs::DEFAULT_TAB_NAME.to_string(),
            log_filter: "info".to_string(),
            open_initial_tab: true,
        }
    }
}
