//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, FetchState, Focus, UnitPreference};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== City actions =====
        Action::CityInputChange(text) => {
            if text == state.city_input {
                return DispatchResult::unchanged();
            }
            state.city_input = text;
            DispatchResult::changed()
        }

        Action::CitySubmit(text) => {
            let city = text.trim();
            if city.is_empty() || !state.form_armed() {
                return DispatchResult::unchanged();
            }
            if state.city.as_deref() == Some(city) {
                return DispatchResult::unchanged();
            }

            let city = city.to_string();
            state.request_id = state.request_id.wrapping_add(1);
            state.city = Some(city.clone());
            state.fetch = FetchState::Pending;
            state.focus = Focus::Controls;
            state.tick_count = 0;
            DispatchResult::changed_with(Effect::FetchTemperature {
                city,
                request_id: state.request_id,
            })
        }

        Action::CityReset => {
            if state.fetch.is_idle() && state.city.is_none() && state.city_input.is_empty() {
                return DispatchResult::unchanged();
            }
            state.city = None;
            state.city_input.clear();
            state.fetch = FetchState::Idle;
            state.focus = Focus::Form;
            DispatchResult::changed()
        }

        // ===== Temperature actions =====
        Action::TemperatureDidLoad {
            request_id,
            reading,
        } => {
            if !is_current_request(state, request_id) {
                return DispatchResult::unchanged();
            }
            state.fetch = FetchState::Resolved(reading);
            DispatchResult::changed()
        }

        Action::TemperatureDidError {
            request_id,
            message,
        } => {
            if !is_current_request(state, request_id) {
                return DispatchResult::unchanged();
            }
            state.fetch = FetchState::Rejected(message);
            state.focus = Focus::Controls;
            DispatchResult::changed()
        }

        // ===== Unit actions =====
        Action::UnitSelectCelsius => select_unit(state, UnitPreference::Celsius),
        Action::UnitSelectKelvin => select_unit(state, UnitPreference::Kelvin),

        // ===== UI actions =====
        Action::UiFocusForm => set_focus(state, Focus::Form),
        Action::UiFocusControls => set_focus(state, Focus::Controls),

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            if !state.fetch.is_pending() {
                return DispatchResult::unchanged();
            }
            state.tick_count = state.tick_count.wrapping_add(1);
            DispatchResult::changed()
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Only the outcome of the latest issued lookup is applied, and only while
/// that lookup is still pending (a reset in between discards it).
fn is_current_request(state: &AppState, request_id: u64) -> bool {
    request_id == state.request_id && state.fetch.is_pending()
}

fn select_unit(state: &mut AppState, unit: UnitPreference) -> DispatchResult<Effect> {
    if state.unit == unit {
        return DispatchResult::unchanged();
    }
    state.unit = unit;
    DispatchResult::changed()
}

fn set_focus(state: &mut AppState, focus: Focus) -> DispatchResult<Effect> {
    if state.focus == focus {
        return DispatchResult::unchanged();
    }
    state.focus = focus;
    DispatchResult::changed()
}
