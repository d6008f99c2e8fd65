use crate::core::config::ClientConfig;
use crate::core::page::PageModel;
use crate::core::state::{GenerateRequest, GenerateResult, SessionState};
use crate::services::animation::Keyframe;
use crate::services::api::{GenerateApi, GenerateError};
use crate::utils::timer;
use log::{debug, info, warn};
use std::cell::RefCell;

/// Receives every page snapshot the controller publishes.
pub trait PageSink {
    fn publish(&self, page: &PageModel);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    Generate,
    Reset,
}

enum Outcome {
    Rendered(Result<GenerateResult, GenerateError>),
    Cancelled,
}

pub struct ViewController {
    config: ClientConfig,
    api: Box<dyn GenerateApi>,
    sink: Box<dyn PageSink>,
    session: RefCell<SessionState>,
    page: RefCell<PageModel>,
}

impl ViewController {
    pub fn new(config: ClientConfig, api: Box<dyn GenerateApi>, sink: Box<dyn PageSink>) -> Self {
        let session = SessionState::new(config.default_animation);
        Self {
            config,
            api,
            sink,
            session: RefCell::new(session),
            page: RefCell::new(PageModel::default()),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn page(&self) -> PageModel {
        self.page.borrow().clone()
    }

    pub fn session(&self) -> SessionState {
        self.session.borrow().clone()
    }

    pub fn is_animating(&self) -> bool {
        self.session.borrow().is_animating
    }

    fn update(&self, f: impl FnOnce(&mut PageModel)) {
        let snapshot = {
            let mut page = self.page.borrow_mut();
            f(&mut page);
            page.clone()
        };
        self.sink.publish(&snapshot);
    }

    fn is_current(&self, generation: u64) -> bool {
        self.session.borrow().generation == generation
    }

    /// Returns the page to its ready state and abandons any workflow in
    /// flight.
    pub fn reset_to_initial_state(&self) {
        let animation_type = {
            let mut session = self.session.borrow_mut();
            if session.is_animating {
                debug!("Reset cancels workflow {}", session.generation);
            }
            session.generation += 1;
            session.is_animating = false;
            session.animation_type
        };

        self.update(|page| {
            page.hide_outcome();
            page.show_stage(animation_type);
            page.set_ready();
            page.reset_poses();
        });
    }

    pub fn handle_retry(&self) {
        self.reset_to_initial_state();
    }

    pub fn handle_stage_click(&self) {
        let toggled = self
            .session
            .borrow_mut()
            .register_click(self.config.easter_egg_clicks);
        if toggled {
            info!("Animation switched to {:?}", self.session.borrow().animation_type);
            self.reset_to_initial_state();
        }
    }

    pub fn handle_hover(&self, entered: bool) {
        if self.is_animating() {
            return;
        }
        self.update(|page| page.button.hovered = entered);
    }

    /// Clears the transient entrance marker on the result and error panels.
    pub fn finish_entrance(&self) {
        if !self.page.borrow().is_entering() {
            return;
        }
        self.update(PageModel::finish_entrance);
    }

    pub fn shortcut_for(&self, code: &str) -> Option<Shortcut> {
        match code {
            "Space" if !self.is_animating() => Some(Shortcut::Generate),
            "Escape" => Some(Shortcut::Reset),
            _ => None,
        }
    }

    pub fn submits_on_enter(&self, key: &str) -> bool {
        key == "Enter" && !self.is_animating()
    }

    pub async fn handle_generate(&self, request: GenerateRequest) {
        let (generation, animation_type) = {
            let mut session = self.session.borrow_mut();
            if session.is_animating {
                debug!("Generate ignored: workflow {} in progress", session.generation);
                return;
            }
            session.is_animating = true;
            (session.generation, session.animation_type)
        };

        debug!(
            "Workflow {} started: mode={} scene={:?} animation={:?}",
            generation, request.mode, request.scene, animation_type
        );

        self.update(|page| {
            page.set_loading();
            page.hide_outcome();
        });

        let timeline = animation_type.timeline(&self.config, rand::random(), rand::random());

        match self.run_workflow(generation, &timeline, &request).await {
            Outcome::Rendered(Ok(result)) => {
                debug!("Workflow {} rendered result", generation);
                self.update(|page| page.show_result(result));
            }
            Outcome::Rendered(Err(e)) => {
                match &e {
                    GenerateError::Transport { detail } => warn!("Generate failed: {}", detail),
                    other => warn!("Generate failed: {:?}", other),
                }
                self.update(|page| page.show_error(e.to_string()));
            }
            Outcome::Cancelled => {
                debug!("Workflow {} was cancelled", generation);
                return;
            }
        }

        self.session.borrow_mut().is_animating = false;
        self.update(PageModel::set_ready);
    }

    async fn run_workflow(
        &self,
        generation: u64,
        timeline: &[Keyframe],
        request: &GenerateRequest,
    ) -> Outcome {
        if !self.play(generation, timeline).await {
            return Outcome::Cancelled;
        }

        let result = self.api.generate(request).await;
        if !self.is_current(generation) {
            return Outcome::Cancelled;
        }
        Outcome::Rendered(result)
    }

    /// Plays `timeline` keyframe by keyframe. Returns false if the workflow
    /// was cancelled along the way.
    async fn play(&self, generation: u64, timeline: &[Keyframe]) -> bool {
        for keyframe in timeline {
            if !self.is_current(generation) {
                return false;
            }
            if let Some(pose) = &keyframe.pose {
                self.update(|page| pose.apply(page));
            }
            timer::sleep(keyframe.hold).await;
        }
        self.is_current(generation)
    }
}
