use crate::core::config::ClientConfig;
use crate::core::page::PageModel;
use crate::core::state::{GenerateRequest, Mode};
use crate::core::text;
use crate::services::api::HttpGenerateApi;
use crate::services::controller::{PageSink, Shortcut, ViewController};
use leptos::*;
use std::rc::Rc;

const HINT_STYLE: &str = "position: fixed; bottom: 20px; right: 20px; \
    background: rgba(0,0,0,0.7); color: white; padding: 8px 12px; \
    border-radius: 8px; font-size: 0.8rem; z-index: 1000; opacity: 0.7;";

struct SignalSink(WriteSignal<PageModel>);

impl PageSink for SignalSink {
    fn publish(&self, page: &PageModel) {
        self.0.set(page.clone());
    }
}

fn display(visible: bool, shown: &'static str) -> &'static str {
    if visible {
        shown
    } else {
        "none"
    }
}

#[component]
pub fn App(config: ClientConfig) -> impl IntoView {
    match HttpGenerateApi::for_window(&config.endpoint) {
        Ok(api) => {
            log::debug!("Generate endpoint: {}", api.url());
            let (page, set_page) = create_signal(PageModel::default());
            let controller = Rc::new(ViewController::new(
                config,
                Box::new(api),
                Box::new(SignalSink(set_page)),
            ));
            controller.reset_to_initial_state();
            view! { <Game controller=controller page=page/> }.into_view()
        }
        Err(e) => {
            log::error!("Failed to set up generate client: {:?}", e);
            view! { <p class="fatal">"Error: " {e.to_string()}</p> }.into_view()
        }
    }
}

#[component]
fn Game(controller: Rc<ViewController>, page: ReadSignal<PageModel>) -> impl IntoView {
    let (mode, set_mode) = create_signal(Mode::Truth);
    let (scene, set_scene) = create_signal(String::new());

    let generate = {
        let controller = controller.clone();
        move || {
            let controller = controller.clone();
            let request = GenerateRequest::new(mode.get_untracked(), &scene.get_untracked());
            spawn_local(async move { controller.handle_generate(request).await });
        }
    };

    // Space and Escape are page-wide.
    {
        let controller = controller.clone();
        let generate = generate.clone();
        let handle = window_event_listener(ev::keydown, move |ev| {
            match controller.shortcut_for(&ev.code()) {
                Some(Shortcut::Generate) => {
                    ev.prevent_default();
                    generate();
                }
                Some(Shortcut::Reset) => controller.handle_retry(),
                None => {}
            }
        });
        on_cleanup(move || handle.remove());
    }

    {
        let controller = controller.clone();
        let entrance = controller.config().entrance();
        create_effect(move |_| {
            if page.with(PageModel::is_entering) {
                let controller = controller.clone();
                set_timeout(move || controller.finish_entrance(), entrance);
            }
        });
    }

    let hover_scale = controller.config().hover_scale;
    let hover_transition = controller.config().hover_transition();

    let enter_controller = controller.clone();
    let leave_controller = controller.clone();
    let keypress_controller = controller.clone();
    let stage_controller = controller.clone();
    let retry_controller = controller.clone();
    let retry_error_controller = controller;
    let click_generate = generate.clone();
    let keypress_generate = generate;

    let result_view = move || {
        page.with(|p| p.result.clone()).map(|result| {
            let type_class = result.type_class();
            let scene_display = display(result.scene_line.is_some(), "block");
            let scene_line = result.scene_line.unwrap_or_default();
            view! {
                <div id="result-type" class=type_class>{result.label}</div>
                <p id="result-text" class="result-text">{result.question}</p>
                <p id="result-scene" class="result-scene" style:display=scene_display>
                    {scene_line}
                </p>
            }
        })
    };

    view! {
        <div class="container">
            <header class="header">
                <h1>{text::TRUTH_LABEL} " · " {text::DARE_LABEL}</h1>
            </header>

            <div class="controls">
                <select
                    id="mode-select"
                    prop:value=move || mode.get().as_str().to_string()
                    on:change=move |ev| match event_target_value(&ev).parse::<Mode>() {
                        Ok(m) => set_mode.set(m),
                        Err(e) => log::warn!("{}", e),
                    }
                >
                    <option value="truth">{text::TRUTH_LABEL}</option>
                    <option value="dare">{text::DARE_LABEL}</option>
                </select>
                <input
                    id="scene-input"
                    type="text"
                    placeholder=text::SCENE_PLACEHOLDER
                    prop:value=move || scene.get()
                    on:input=move |ev| set_scene.set(event_target_value(&ev))
                    on:keypress=move |ev| {
                        if keypress_controller.submits_on_enter(&ev.key()) {
                            keypress_generate();
                        }
                    }
                />
                <button
                    id="generate-btn"
                    class="generate-btn"
                    prop:disabled=move || page.with(|p| p.button.disabled)
                    style:transform=move || {
                        if page.with(|p| p.button.hovered) {
                            format!("scale({})", hover_scale)
                        } else {
                            "scale(1)".to_string()
                        }
                    }
                    style:transition=hover_transition
                    on:click=move |_| click_generate()
                    on:mouseenter=move |_| enter_controller.handle_hover(true)
                    on:mouseleave=move |_| leave_controller.handle_hover(false)
                >
                    <span
                        class="btn-text"
                        style:display=move || display(!page.with(|p| p.button.loading), "inline")
                    >
                        {text::GENERATE_LABEL}
                    </span>
                    <span
                        class="btn-loader"
                        style:display=move || display(page.with(|p| p.button.loading), "flex")
                    >
                        <span class="spinner"></span>
                    </span>
                </button>
            </div>

            <div
                id="wheel-container"
                class="wheel-container"
                style:display=move || display(page.with(|p| p.wheel_visible), "block")
                on:click=move |_| stage_controller.handle_stage_click()
            >
                <div class="wheel-pointer"></div>
                <div
                    id="wheel"
                    class="wheel"
                    style:transform=move || page.with(|p| format!("rotate({}deg)", p.wheel.rotation_deg))
                    style:transition=move || {
                        page.with(|p| p.wheel.transition.clone().unwrap_or_else(|| "none".to_string()))
                    }
                >
                    <div class="wheel-label truth">{text::TRUTH_LABEL}</div>
                    <div class="wheel-label dare">{text::DARE_LABEL}</div>
                </div>
            </div>

            <div
                id="card-container"
                class="card-container"
                style:display=move || display(page.with(|p| p.card_visible), "block")
            >
                <div class="card-stack">
                    <div class="card"></div>
                    <div
                        id="top-card"
                        class="card top-card"
                        style:transform=move || page.with(|p| format!("rotateY({}deg)", p.card.rotate_y_deg))
                        style:transition=move || {
                            page.with(|p| p.card.transition.clone().unwrap_or_else(|| "none".to_string()))
                        }
                    ></div>
                </div>
            </div>

            <div
                id="result-container"
                class="result-container"
                class:slide-up=move || page.with(|p| p.result.as_ref().is_some_and(|r| r.entering))
                style:display=move || display(page.with(|p| p.result.is_some()), "block")
            >
                {result_view}
            </div>

            <div
                id="error-container"
                class="error-container"
                class:slide-up=move || page.with(|p| p.error.as_ref().is_some_and(|e| e.entering))
                style:display=move || display(page.with(|p| p.error.is_some()), "block")
            >
                <p id="error-message" class="error-message">
                    {move || page.with(|p| p.error.as_ref().map(|e| e.message.clone()).unwrap_or_default())}
                </p>
                <button
                    id="retry-error-btn"
                    class="retry-btn"
                    on:click=move |_| retry_error_controller.handle_retry()
                >
                    {text::RETRY_LABEL}
                </button>
            </div>

            <button
                id="retry-btn"
                class="retry-btn"
                style:display=move || display(page.with(|p| p.retry_visible), "inline-block")
                on:click=move |_| retry_controller.handle_retry()
            >
                {text::RETRY_LABEL}
            </button>
        </div>
        <div class="keyboard-hint" style=HINT_STYLE>{text::KEYBOARD_HINT}</div>
    }
}
