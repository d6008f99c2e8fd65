use crate::core::state::{AnimationType, GenerateResult, Mode};
use crate::core::text;

#[derive(Clone, Debug, PartialEq, Default)]
pub struct WheelPose {
    pub rotation_deg: f64,
    pub transition: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct CardPose {
    pub rotate_y_deg: f64,
    pub transition: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct ButtonState {
    pub disabled: bool,
    pub loading: bool,
    pub hovered: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResultCard {
    pub mode: Mode,
    pub label: &'static str,
    pub question: String,
    /// `None` hides the scene line entirely.
    pub scene_line: Option<String>,
    pub entering: bool,
}

impl ResultCard {
    pub fn from_result(result: GenerateResult) -> Self {
        Self {
            mode: result.mode,
            label: text::mode_label(result.mode),
            question: result.question,
            scene_line: result.scene.as_deref().map(text::scene_line),
            entering: true,
        }
    }

    pub fn type_class(&self) -> String {
        format!("result-type {}", self.mode)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ErrorCard {
    pub message: String,
    pub entering: bool,
}

/// Everything the page shows, as last published by the controller.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct PageModel {
    pub wheel_visible: bool,
    pub card_visible: bool,
    pub wheel: WheelPose,
    pub card: CardPose,
    pub button: ButtonState,
    pub retry_visible: bool,
    pub result: Option<ResultCard>,
    pub error: Option<ErrorCard>,
}

impl PageModel {
    pub fn show_stage(&mut self, animation_type: AnimationType) {
        self.wheel_visible = animation_type == AnimationType::Wheel;
        self.card_visible = animation_type == AnimationType::Card;
    }

    pub fn set_loading(&mut self) {
        self.button.disabled = true;
        self.button.loading = true;
        self.button.hovered = false;
    }

    pub fn set_ready(&mut self) {
        self.button.disabled = false;
        self.button.loading = false;
    }

    pub fn hide_outcome(&mut self) {
        self.result = None;
        self.error = None;
        self.retry_visible = false;
    }

    pub fn reset_poses(&mut self) {
        self.wheel = WheelPose::default();
        self.card = CardPose::default();
    }

    pub fn show_result(&mut self, result: GenerateResult) {
        self.error = None;
        self.result = Some(ResultCard::from_result(result));
        self.retry_visible = true;
    }

    pub fn show_error(&mut self, message: String) {
        self.result = None;
        self.retry_visible = false;
        self.error = Some(ErrorCard {
            message,
            entering: true,
        });
    }

    pub fn finish_entrance(&mut self) {
        if let Some(result) = self.result.as_mut() {
            result.entering = false;
        }
        if let Some(error) = self.error.as_mut() {
            error.entering = false;
        }
    }

    pub fn is_entering(&self) -> bool {
        self.result.as_ref().is_some_and(|r| r.entering)
            || self.error.as_ref().is_some_and(|e| e.entering)
    }
}
