use anyhow::{anyhow, Error};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Truth,
    Dare,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Truth => "truth",
            Mode::Dare => "dare",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "truth" => Ok(Mode::Truth),
            "dare" => Ok(Mode::Dare),
            other => Err(anyhow!("Unknown mode: {}", other)),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnimationType {
    #[default]
    Wheel,
    Card,
}

impl AnimationType {
    pub fn toggled(self) -> Self {
        match self {
            AnimationType::Wheel => AnimationType::Card,
            AnimationType::Card => AnimationType::Wheel,
        }
    }
}

/// Page-lifetime state owned by the controller.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub is_animating: bool,
    pub animation_type: AnimationType,
    pub click_count: u32,
    /// Identifies the current workflow; bumped on every reset.
    pub generation: u64,
}

impl SessionState {
    pub fn new(animation_type: AnimationType) -> Self {
        Self {
            animation_type,
            ..Default::default()
        }
    }

    /// Counts a click on the wheel region. Returns true when `threshold`
    /// is reached, in which case the animation type has been toggled and
    /// the counter cleared.
    pub fn register_click(&mut self, threshold: u32) -> bool {
        self.click_count += 1;
        if self.click_count >= threshold {
            self.animation_type = self.animation_type.toggled();
            self.click_count = 0;
            true
        } else {
            false
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GenerateRequest {
    pub mode: Mode,
    pub scene: String,
}

impl GenerateRequest {
    pub fn new(mode: Mode, scene: &str) -> Self {
        Self {
            mode,
            scene: scene.trim().to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GenerateResult {
    pub mode: Mode,
    pub question: String,
    pub scene: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("truth".parse::<Mode>().unwrap(), Mode::Truth);
        assert_eq!(" Dare ".parse::<Mode>().unwrap(), Mode::Dare);
        assert!("mixed".parse::<Mode>().is_err());
        assert!("".parse::<Mode>().is_err());
    }

    #[test]
    fn test_request_serializes_lowercase_and_trims_scene() {
        let request = GenerateRequest::new(Mode::Dare, "  beach \n");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({ "mode": "dare", "scene": "beach" }));
    }

    #[test]
    fn test_easter_egg_threshold() {
        let mut state = SessionState::new(AnimationType::Wheel);
        for _ in 0..4 {
            assert!(!state.register_click(5));
        }
        assert_eq!(state.click_count, 4);
        assert_eq!(state.animation_type, AnimationType::Wheel);

        assert!(state.register_click(5));
        assert_eq!(state.click_count, 0);
        assert_eq!(state.animation_type, AnimationType::Card);

        for _ in 0..5 {
            state.register_click(5);
        }
        assert_eq!(state.animation_type, AnimationType::Wheel);
    }
}
