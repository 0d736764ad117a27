use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_TRIGGER: char = '/';
pub const DEFAULT_MENU_GAP: f32 = 30.0;
pub const DEFAULT_PLACEHOLDER: &str = "Type / for blocks, @ to link docs or people";
pub const DEFAULT_MENU_TITLE: &str = "Add blocks";
pub const DEFAULT_MENU_HINT: &str = "Keep typing to filter, or escape to exit";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub trigger: char,
    /// Vertical distance between the caret line and the palette's top edge.
    pub menu_gap: f32,
    pub placeholder: String,
    pub menu_title: String,
    pub menu_hint: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            trigger: DEFAULT_TRIGGER,
            menu_gap: DEFAULT_MENU_GAP,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            menu_title: DEFAULT_MENU_TITLE.to_string(),
            menu_hint: DEFAULT_MENU_HINT.to_string(),
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trigger.is_whitespace() || self.trigger.is_control() {
            return Err(ConfigError::InvalidTrigger(self.trigger));
        }
        if self.trigger.is_ascii_digit() {
            return Err(ConfigError::DigitTrigger(self.trigger));
        }
        if !self.menu_gap.is_finite() {
            return Err(ConfigError::InvalidMenuGap(self.menu_gap));
        }
        Ok(())
    }
}
