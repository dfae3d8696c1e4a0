//! Scene configuration, loadable from TOML.
//!
//! ```toml
//! visibility_lead_seconds = 1.0
//! visibility_tail_seconds = 5.0
//! ```

use crate::{Error, Result};
use jamstage_instruments::VisibilityWindow;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Seconds an instrument appears before its next note.
    pub visibility_lead_seconds: f64,
    /// Seconds an instrument lingers after its last note.
    pub visibility_tail_seconds: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let window = VisibilityWindow::default();
        Self {
            visibility_lead_seconds: window.lead,
            visibility_tail_seconds: window.tail,
        }
    }
}

impl SceneConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("visibility_lead_seconds", self.visibility_lead_seconds),
            ("visibility_tail_seconds", self.visibility_tail_seconds),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn window(&self) -> VisibilityWindow {
        VisibilityWindow {
            lead: self.visibility_lead_seconds,
            tail: self.visibility_tail_seconds,
        }
    }
}
