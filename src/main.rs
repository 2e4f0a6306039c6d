//! Main module for the dye-to-water ratio calculator using Yew.
//! Wires UI components, state hooks, and side-effect logic.

use std::collections::HashMap;

use dye_water_ratio::{recompute_all, GroupDefinition, Mode};
use web_sys::HtmlInputElement;
use yew::prelude::*;

mod components;
mod config;
mod loader;

use components::{render_status, GroupCard, ModeToggle};
use config::{DATA_URL, FETCH_FAILURE_MESSAGE};
use loader::fetch_group_definitions;

/// Report a fatal-to-the-data load failure with a blocking alert.
///
/// The session itself keeps running with an empty group list.
fn report_load_failure(detail: &str) {
    log::warn!("configuration load failed: {}", detail);
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(&format!("{}\n({})", FETCH_FAILURE_MESSAGE, detail));
    }
}

/// Primary application component wiring state, effects, and UI elements.
///
/// Session state is the mode flag plus one `group id -> quantity text`
/// map; the result column is recomputed from those on every render
/// rather than read back out of the DOM.
#[function_component(Main)]
fn main_component() -> Html {
    let groups = use_state(Vec::<GroupDefinition>::new);
    let loading = use_state(|| true);
    let mode = use_state(Mode::default);
    let quantities = use_state(HashMap::<String, String>::new);

    // Fetch the configuration once on mount. On failure the group list
    // stays empty and rendering yields no fields.
    {
        let groups = groups.clone();
        let loading = loading.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match fetch_group_definitions(DATA_URL).await {
                    Ok(defs) => groups.set(defs),
                    Err(e) => report_load_failure(&e.to_string()),
                }
                loading.set(false);
            });
        });
    }

    let on_mode_select = {
        let mode = mode.clone();
        Callback::from(move |selected: Mode| mode.set(selected))
    };

    // Clear resets every quantity; the projection below then yields no
    // results, so nothing is recomputed.
    let on_clear = {
        let quantities = quantities.clone();
        Callback::from(move |_: MouseEvent| quantities.set(HashMap::new()))
    };

    // Pure projection of the result column for the current state. Mode
    // toggles and input events land here through the state they set.
    let results = recompute_all(&groups, &quantities, *mode);

    html! {
        <div class="container">
            <h1>{ "Dye-to-Water Ratio Calculator" }</h1>

            <div class="top-controls">
                <ModeToggle mode={*mode} on_select={on_mode_select} />
                <button class="btn-secondary" onclick={on_clear}>
                    { "Clear" }
                </button>
            </div>

            <div class="group-list">
                { render_status(*loading, groups.len()) }
                { groups.iter().map(|def| {
                    let quantity = quantities
                        .get(&def.group)
                        .cloned()
                        .unwrap_or_default();
                    let result = results
                        .get(&def.group)
                        .cloned()
                        .unwrap_or_default();
                    let oninput = {
                        let quantities = quantities.clone();
                        let group_id = def.group.clone();
                        Callback::from(move |e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            // Empty input (including backspace-to-empty)
                            // lands in the map as "" and projects to an
                            // empty result field.
                            let mut next = (*quantities).clone();
                            next.insert(group_id.clone(), input.value());
                            quantities.set(next);
                        })
                    };
                    html! {
                        <GroupCard
                            key={def.group.clone()}
                            definition={def.clone()}
                            {quantity}
                            {result}
                            {oninput}
                        />
                    }
                }).collect::<Html>() }
            </div>
        </div>
    }
}

/// App wrapper for the Main component.
#[function_component]
pub fn App() -> Html {
    html! {
        <Main />
    }
}

/// Entry point: installs the panic hook and starts the Yew renderer.
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
