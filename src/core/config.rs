use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;
use std::time::Duration;

use crate::core::state::AnimationType;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ClientConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default)]
    pub default_animation: AnimationType,

    #[serde(default)]
    pub wheel: WheelConfig,

    #[serde(default)]
    pub card: CardConfig,

    #[serde(default = "default_entrance_ms")]
    pub entrance_ms: u64,

    #[serde(default = "default_hover_scale")]
    pub hover_scale: f64,

    #[serde(default = "default_hover_ms")]
    pub hover_ms: u64,

    #[serde(default = "default_easter_egg_clicks")]
    pub easter_egg_clicks: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WheelConfig {
    #[serde(default = "default_min_turns")]
    pub min_turns: f64,
    #[serde(default = "default_max_turns")]
    pub max_turns: f64,
    #[serde(default = "default_spin_ms")]
    pub spin_ms: u64,
    #[serde(default = "default_wheel_easing")]
    pub easing: String,
    /// Park the angle modulo 360 once a spin has settled.
    #[serde(default = "default_true")]
    pub normalize: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CardConfig {
    #[serde(default = "default_flip_ms")]
    pub flip_ms: u64,
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,
    #[serde(default = "default_card_easing")]
    pub easing: String,
}

fn default_endpoint() -> String {
    "/generate".to_string()
}
fn default_entrance_ms() -> u64 {
    600
}
fn default_hover_scale() -> f64 {
    1.05
}
fn default_hover_ms() -> u64 {
    200
}
fn default_easter_egg_clicks() -> u32 {
    5
}
fn default_min_turns() -> f64 {
    3.0
}
fn default_max_turns() -> f64 {
    6.0
}
fn default_spin_ms() -> u64 {
    3000
}
fn default_wheel_easing() -> String {
    "cubic-bezier(0.25, 0.1, 0.25, 1)".to_string()
}
fn default_true() -> bool {
    true
}
fn default_flip_ms() -> u64 {
    1500
}
fn default_pause_ms() -> u64 {
    200
}
fn default_card_easing() -> String {
    // easeInOutQuart
    "cubic-bezier(0.77, 0, 0.175, 1)".to_string()
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            min_turns: default_min_turns(),
            max_turns: default_max_turns(),
            spin_ms: default_spin_ms(),
            easing: default_wheel_easing(),
            normalize: default_true(),
        }
    }
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            flip_ms: default_flip_ms(),
            pause_ms: default_pause_ms(),
            easing: default_card_easing(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            default_animation: AnimationType::default(),
            wheel: WheelConfig::default(),
            card: CardConfig::default(),
            entrance_ms: default_entrance_ms(),
            hover_scale: default_hover_scale(),
            hover_ms: default_hover_ms(),
            easter_egg_clicks: default_easter_egg_clicks(),
        }
    }
}

impl ClientConfig {
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: ClientConfig =
            serde_yaml_ng::from_str(content).context("Failed to parse client config")?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            bail!("endpoint must not be empty");
        }
        if !(self.wheel.min_turns >= 0.0 && self.wheel.max_turns >= self.wheel.min_turns) {
            bail!(
                "wheel turns out of order: min {} max {}",
                self.wheel.min_turns,
                self.wheel.max_turns
            );
        }
        if self.easter_egg_clicks == 0 {
            bail!("easter_egg_clicks must be at least 1");
        }
        Ok(())
    }

    pub fn entrance(&self) -> Duration {
        Duration::from_millis(self.entrance_ms)
    }

    pub fn hover_transition(&self) -> String {
        format!("transform {}ms ease-out", self.hover_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_uses_defaults() -> Result<()> {
        let config = ClientConfig::from_yaml("{}")?;
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.endpoint, "/generate");
        assert_eq!(config.wheel.spin_ms, 3000);
        assert_eq!(config.card.flip_ms, 1500);
        assert_eq!(config.card.pause_ms, 200);
        assert_eq!(config.entrance_ms, 600);
        assert_eq!(config.easter_egg_clicks, 5);
        assert_eq!(config.default_animation, AnimationType::Wheel);
        Ok(())
    }

    #[test]
    fn test_partial_override() -> Result<()> {
        let yaml = r#"
default_animation: card
wheel:
  spin_ms: 1000
card:
  pause_ms: 0
"#;
        let config = ClientConfig::from_yaml(yaml)?;
        assert_eq!(config.default_animation, AnimationType::Card);
        assert_eq!(config.wheel.spin_ms, 1000);
        assert_eq!(config.wheel.min_turns, 3.0);
        assert_eq!(config.card.pause_ms, 0);
        assert_eq!(config.card.flip_ms, 1500);
        Ok(())
    }

    #[test]
    fn test_rejects_inverted_turns() {
        let yaml = "wheel:\n  min_turns: 6\n  max_turns: 3\n";
        assert!(ClientConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_rejects_zero_click_threshold() {
        assert!(ClientConfig::from_yaml("easter_egg_clicks: 0").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = ClientConfig::load("definitely/not/here.yml").unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
