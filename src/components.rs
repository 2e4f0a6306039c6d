//! Pure Yew view components for the water-ratio UI.
//!
//! This module contains stateless components that render based on props,
//! making them easy to test and reuse.

use dye_water_ratio::{CalcType, GroupDefinition, Mode};
use yew::prelude::*;

use crate::config::QUANTITY_PLACEHOLDER;

fn calc_type_label(calc_type: CalcType) -> &'static str {
    match calc_type {
        CalcType::A => "A",
        CalcType::B => "B",
    }
}

/// Mode selector with two mutually exclusive buttons.
#[derive(Properties, PartialEq)]
pub struct ModeToggleProps {
    pub mode: Mode,
    pub on_select: Callback<Mode>,
}

#[function_component(ModeToggle)]
pub fn mode_toggle(props: &ModeToggleProps) -> Html {
    let button_class = |active: bool| {
        if active {
            "btn-mode active"
        } else {
            "btn-mode"
        }
    };
    let select = |mode: Mode| {
        let on_select = props.on_select.clone();
        Callback::from(move |_: MouseEvent| on_select.emit(mode))
    };

    html! {
        <div class="mode-toggle">
            <button
                class={button_class(props.mode == Mode::Fixed)}
                onclick={select(Mode::Fixed)}
            >
                { "Fixed" }
            </button>
            <button
                class={button_class(props.mode == Mode::NonFixed)}
                onclick={select(Mode::NonFixed)}
            >
                { "Non-fixed" }
            </button>
        </div>
    }
}

/// One group card: header, quantity input and read-only result field.
///
/// The quantity and result values come in as props; the card never owns
/// state of its own, so the result column stays a pure projection of
/// the session state held by the parent.
#[derive(Properties, PartialEq)]
pub struct GroupCardProps {
    pub definition: GroupDefinition,
    /// Current raw quantity text for this group ("" when unset).
    pub quantity: String,
    /// Formatted ratio to display ("" when the quantity is empty or invalid).
    pub result: String,
    pub oninput: Callback<InputEvent>,
}

#[function_component(GroupCard)]
pub fn group_card(props: &GroupCardProps) -> Html {
    let def = &props.definition;

    html! {
        <div class="group-card">
            <div class="group-card-header">
                <h3>{ format!("{} - {}", def.group, def.description) }</h3>
                <span class="calc-type-tag">
                    { format!("calc type: {}", calc_type_label(def.calc_type)) }
                </span>
            </div>
            <div class="group-card-fields">
                <div class="form-group">
                    <label for={format!("quantity-{}", def.group)}>{ "Quantity" }</label>
                    <input
                        type="number"
                        id={format!("quantity-{}", def.group)}
                        min="1"
                        step="1"
                        placeholder={QUANTITY_PLACEHOLDER}
                        value={props.quantity.clone()}
                        oninput={props.oninput.clone()}
                    />
                </div>
                <div class="form-group">
                    <label for={format!("ratio-{}", def.group)}>{ "Water ratio" }</label>
                    <input
                        type="text"
                        id={format!("ratio-{}", def.group)}
                        class="result-field"
                        value={props.result.clone()}
                        readonly=true
                    />
                </div>
            </div>
        </div>
    }
}

/// Status line shown before the configuration has resolved, or when it
/// resolved to an empty list.
pub fn render_status(loading: bool, group_count: usize) -> Html {
    if loading {
        html! {
            <div class="status-message">
                <p>{ "Loading group configuration…" }</p>
            </div>
        }
    } else if group_count == 0 {
        html! {
            <div class="status-message">
                <p>{ "No groups configured." }</p>
            </div>
        }
    } else {
        html! {}
    }
}
