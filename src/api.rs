//! OpenWeatherMap current-weather client

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::action::Action;
use crate::config::Config;
use crate::state::TemperatureReading;

/// Application-level success code reported in the response body
const SUCCESS_CODE: i64 = 200;

/// Current-weather response body. Only the fields the widget reads.
#[derive(Debug, Deserialize)]
struct WeatherResponse {
    cod: StatusCode,
    message: Option<String>,
    main: Option<MainBlock>,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
}

/// `cod` is a number on success but a string (e.g. `"404"`) on errors.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StatusCode {
    Number(i64),
    Text(String),
}

impl StatusCode {
    fn is_success(&self) -> bool {
        matches!(self, StatusCode::Number(SUCCESS_CODE))
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusCode::Number(code) => write!(f, "{}", code),
            StatusCode::Text(code) => f.write_str(code),
        }
    }
}

/// Lookup failure. `Display` is what the error view shows.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),
    #[error("{message}")]
    Api { code: String, message: String },
    #[error("{0}")]
    Parse(String),
}

#[derive(Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for WeatherClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl WeatherClient {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::new(
            config.api_url.clone(),
            config.api_key.clone(),
            config.timeout,
        )
    }

    /// GET for `city`; `q` and `appid` are appended to any query the
    /// endpoint already carries.
    fn request(&self, city: &str) -> reqwest::RequestBuilder {
        self.http
            .get(&self.base_url)
            .query(&[("q", city), ("appid", self.api_key.as_str())])
    }

    /// Fetch the current temperature for `city`.
    ///
    /// The HTTP status line is not consulted; the body's `cod` decides
    /// between success and an API error.
    pub async fn fetch_temperature(&self, city: &str) -> Result<TemperatureReading, FetchError> {
        tracing::debug!(city, "requesting current weather");

        // Strip the URL from transport errors: it carries the API key
        let response = self
            .request(city)
            .send()
            .await
            .map_err(|e| FetchError::Request(e.without_url()))?;
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Request(e.without_url()))?;
        let data: WeatherResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))?;

        if !data.cod.is_success() {
            let code = data.cod.to_string();
            let message = data
                .message
                .unwrap_or_else(|| format!("request failed with code {}", code));
            tracing::warn!(city, %code, %message, "weather API returned an error");
            return Err(FetchError::Api { code, message });
        }

        let kelvin = data
            .main
            .map(|main| main.temp)
            .ok_or_else(|| FetchError::Parse("response is missing main.temp".into()))?;

        let reading = TemperatureReading::from_kelvin(kelvin);
        tracing::info!(city, kelvin, celsius = reading.celsius, "weather loaded");
        Ok(reading)
    }
}

/// Run a lookup and turn its outcome into the result action for
/// `request_id`. The error's `Display` becomes the message shown to the user.
pub async fn lookup_action(client: &WeatherClient, city: &str, request_id: u64) -> Action {
    match client.fetch_temperature(city).await {
        Ok(reading) => Action::TemperatureDidLoad {
            request_id,
            reading,
        },
        Err(e) => {
            tracing::warn!(city, request_id, error = %e, "weather lookup failed");
            Action::TemperatureDidError {
                request_id,
                message: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> WeatherClient {
        WeatherClient::new(
            "https://example.test/weather".into(),
            "k&y".into(),
            Duration::from_secs(1),
        )
        .expect("client")
    }

    fn request_url(client: &WeatherClient, city: &str) -> String {
        let request = client.request(city).build().expect("request");
        request.url().to_string()
    }

    #[test]
    fn test_request_url_encodes_query() {
        assert_eq!(
            request_url(&client(), "São Paulo"),
            "https://example.test/weather?q=S%C3%A3o+Paulo&appid=k%26y"
        );
    }

    #[test]
    fn test_request_url_keeps_existing_query() {
        let client = WeatherClient::new(
            "https://example.test/weather?units=standard".into(),
            "k&y".into(),
            Duration::from_secs(1),
        )
        .expect("client");

        assert_eq!(
            request_url(&client, "London"),
            "https://example.test/weather?units=standard&q=London&appid=k%26y"
        );
    }

    #[test]
    fn test_status_code_accepts_number_and_string() {
        let ok: WeatherResponse =
            serde_json::from_str(r#"{"cod":200,"main":{"temp":300.0}}"#).unwrap();
        assert!(ok.cod.is_success());

        let missing: WeatherResponse =
            serde_json::from_str(r#"{"cod":"404","message":"city not found"}"#).unwrap();
        assert!(!missing.cod.is_success());
        assert_eq!(missing.cod.to_string(), "404");
    }

    #[test]
    fn test_debug_hides_api_key() {
        let rendered = format!("{:?}", client());
        assert!(!rendered.contains("k&y"));
    }
}
