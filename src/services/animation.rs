use crate::core::config::{CardConfig, ClientConfig, WheelConfig};
use crate::core::page::{CardPose, PageModel, WheelPose};
use crate::core::state::AnimationType;
use std::time::Duration;

/// Absolute wheel rotation in degrees for two draws in `[0, 1)`: a whole
/// number of turns between `min_turns` and `max_turns` plus an offset.
pub fn wheel_target(wheel: &WheelConfig, turns_draw: f64, offset_draw: f64) -> f64 {
    let turns = wheel.min_turns + turns_draw * (wheel.max_turns - wheel.min_turns);
    turns * 360.0 + offset_draw * 360.0
}

#[derive(Clone, Debug, PartialEq)]
pub enum Pose {
    Wheel(WheelPose),
    Card(CardPose),
}

impl Pose {
    pub fn apply(&self, page: &mut PageModel) {
        match self {
            Pose::Wheel(pose) => page.wheel = pose.clone(),
            Pose::Card(pose) => page.card = pose.clone(),
        }
    }
}

/// One step of a timeline: optionally apply a pose, then hold.
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframe {
    pub pose: Option<Pose>,
    pub hold: Duration,
}

impl Keyframe {
    fn pose(pose: Pose, hold: Duration) -> Self {
        Self {
            pose: Some(pose),
            hold,
        }
    }

    fn pause(hold: Duration) -> Self {
        Self { pose: None, hold }
    }
}

fn transform_transition(duration: Duration, easing: &str) -> String {
    format!("transform {}ms {}", duration.as_millis(), easing)
}

pub fn wheel_timeline(wheel: &WheelConfig, target_deg: f64) -> Vec<Keyframe> {
    let spin = Duration::from_millis(wheel.spin_ms);
    let settled = if wheel.normalize {
        target_deg.rem_euclid(360.0)
    } else {
        target_deg
    };

    vec![
        Keyframe::pose(
            Pose::Wheel(WheelPose {
                rotation_deg: target_deg,
                transition: Some(transform_transition(spin, &wheel.easing)),
            }),
            spin,
        ),
        // Without a transition the change of angle below is invisible.
        Keyframe::pose(
            Pose::Wheel(WheelPose {
                rotation_deg: settled,
                transition: None,
            }),
            Duration::ZERO,
        ),
    ]
}

pub fn card_timeline(card: &CardConfig) -> Vec<Keyframe> {
    let flip = Duration::from_millis(card.flip_ms);
    let flip_to = |deg: f64| {
        Keyframe::pose(
            Pose::Card(CardPose {
                rotate_y_deg: deg,
                transition: Some(transform_transition(flip, &card.easing)),
            }),
            flip,
        )
    };

    vec![
        flip_to(180.0),
        Keyframe::pause(Duration::from_millis(card.pause_ms)),
        flip_to(360.0),
        Keyframe::pose(Pose::Card(CardPose::default()), Duration::ZERO),
    ]
}

impl AnimationType {
    /// Builds the timeline for this animation. Only the wheel consumes the
    /// random draws.
    pub fn timeline(self, config: &ClientConfig, turns_draw: f64, offset_draw: f64) -> Vec<Keyframe> {
        match self {
            AnimationType::Wheel => {
                let target = wheel_target(&config.wheel, turns_draw, offset_draw);
                wheel_timeline(&config.wheel, target)
            }
            AnimationType::Card => card_timeline(&config.card),
        }
    }
}

pub fn total_duration(timeline: &[Keyframe]) -> Duration {
    timeline.iter().map(|k| k.hold).sum()
}
