//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Offset between the Kelvin and Celsius scales
pub const KELVIN_OFFSET: f64 = 273.15;

/// Result of a successful temperature lookup
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TemperatureReading {
    /// Raw value reported by the API
    pub kelvin: f64,
    /// Derived from `kelvin` when the reading is created
    pub celsius: i32,
}

impl TemperatureReading {
    /// Build a reading from a Kelvin value, rounding Celsius half-up.
    pub fn from_kelvin(kelvin: f64) -> Self {
        let celsius = (kelvin - KELVIN_OFFSET + 0.5).floor() as i32;
        Self { kelvin, celsius }
    }
}

/// Temperature unit preference
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum UnitPreference {
    #[default]
    Celsius,
    Kelvin,
}

impl UnitPreference {
    pub fn label(&self) -> &'static str {
        match self {
            UnitPreference::Celsius => "Celsius",
            UnitPreference::Kelvin => "Kelvin",
        }
    }

    /// Compact form used for the large temperature art
    pub fn format(&self, reading: &TemperatureReading) -> String {
        match self {
            UnitPreference::Celsius => format!("{}°C", reading.celsius),
            UnitPreference::Kelvin => format!("{}K", reading.kelvin),
        }
    }

    /// Plain caption shown under the temperature art
    pub fn caption(&self, reading: &TemperatureReading) -> String {
        match self {
            UnitPreference::Celsius => format!("{} degrees Celsius", reading.celsius),
            UnitPreference::Kelvin => format!("{} Kelvin", reading.kelvin),
        }
    }
}

/// Lifecycle of the lookup for the current city
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum FetchState {
    /// No city submitted yet
    #[default]
    Idle,
    /// Request in flight for the current city
    Pending,
    Resolved(TemperatureReading),
    /// Failure message, either from the API or the transport
    Rejected(String),
}

impl FetchState {
    pub fn is_idle(&self) -> bool {
        matches!(self, FetchState::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, FetchState::Pending)
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, FetchState::Resolved(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, FetchState::Rejected(_))
    }

    pub fn reading(&self) -> Option<&TemperatureReading> {
        match self {
            FetchState::Resolved(reading) => Some(reading),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Rejected(message) => Some(message),
            _ => None,
        }
    }
}

/// Which part of the widget receives key events
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum Focus {
    #[default]
    Form,
    Controls,
}

/// Interval between ticks while a lookup is pending
pub const SPINNER_TICK_MS: u64 = 15;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Last submitted city; `None` until the first valid submission
    #[debug(section = "City", label = "Query", debug_fmt)]
    pub city: Option<String>,

    /// Idle → Pending → Resolved/Rejected
    #[debug(section = "Fetch", label = "State", debug_fmt)]
    pub fetch: FetchState,

    /// Generation of the latest issued request; older results are dropped
    #[debug(section = "Fetch", label = "Request")]
    pub request_id: u64,

    #[debug(section = "Unit", label = "Unit", debug_fmt)]
    pub unit: UnitPreference,

    // --- Form (skipped) ---
    /// Text currently typed into the city field
    #[debug(skip)]
    pub city_input: String,

    #[debug(skip)]
    pub focus: Focus,

    /// Spinner frame counter, advanced only while pending
    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            city: None,
            fetch: FetchState::Idle,
            request_id: 0,
            unit: UnitPreference::default(),
            city_input: String::new(),
            focus: Focus::Form,
            tick_count: 0,
        }
    }

    /// The form accepts submissions everywhere except the error state,
    /// which has to be cleared with a retry first.
    pub fn form_armed(&self) -> bool {
        !self.fetch.is_rejected()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_celsius_rounds_half_up() {
        assert_eq!(TemperatureReading::from_kelvin(300.0).celsius, 27);
        assert_eq!(TemperatureReading::from_kelvin(273.15).celsius, 0);
        assert_eq!(TemperatureReading::from_kelvin(263.0).celsius, -10);
    }

    #[test]
    fn test_unit_format() {
        let reading = TemperatureReading::from_kelvin(300.0);
        assert_eq!(UnitPreference::Celsius.format(&reading), "27°C");
        assert_eq!(UnitPreference::Kelvin.format(&reading), "300K");
        assert_eq!(
            UnitPreference::Kelvin.caption(&TemperatureReading::from_kelvin(281.4)),
            "281.4 Kelvin"
        );
    }
}
