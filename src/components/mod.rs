pub mod city_form;
pub mod temperature_body;
pub mod title_header;
pub mod weather_widget;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use city_form::{CityForm, CityFormProps};
pub use temperature_body::{TemperatureBody, TemperatureBodyProps};
pub use title_header::{TitleHeader, TitleHeaderProps};
pub use weather_widget::{ERROR_ICON, WeatherWidget, WeatherWidgetProps};
