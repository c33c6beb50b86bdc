//! Actions for the city form, the temperature lookup and the unit controls

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::TemperatureReading;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== City category =====
    /// City field text changed
    CityInputChange(String),

    /// Submit the city field (triggers async fetch when valid and new)
    CitySubmit(String),

    /// Clear the current city and any error, re-arming the form
    CityReset,

    // ===== Temperature category =====
    /// Result: lookup for request `request_id` succeeded
    TemperatureDidLoad {
        request_id: u64,
        reading: TemperatureReading,
    },

    /// Result: lookup for request `request_id` failed
    TemperatureDidError { request_id: u64, message: String },

    // ===== Unit category =====
    UnitSelectCelsius,
    UnitSelectKelvin,

    // ===== UI category =====
    /// Move key focus to the city field
    UiFocusForm,

    /// Move key focus to the unit/retry controls
    UiFocusControls,

    /// Force a re-render (for cursor movement, etc.)
    Render,

    // ===== Uncategorized (global) =====
    /// Periodic tick for loading animation
    Tick,

    /// Exit the application
    Quit,
}
