use std::time::Duration;

use crate::error::AppError;

const DEFAULT_MENU_PAGE_URL: &str =
    "https://www.betriebsrestaurants-migros.ch/landingpages/six/info-menuplan";
const DEFAULT_BASE_URL: &str = "https://www.betriebsrestaurants-migros.ch";

/// Service configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub port: u16,
    /// Page that links the current menu PDFs.
    pub menu_page_url: String,
    /// Base for relative PDF links found on the menu page.
    pub base_url: String,
    pub refresh_interval: Duration,
    /// Upper bound for fetching and extracting one restaurant's PDF.
    pub update_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: 3000,
            menu_page_url: DEFAULT_MENU_PAGE_URL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            refresh_interval: Duration::from_secs(60 * 60),
            update_timeout: Duration::from_secs(120),
        }
    }
}

impl Config {
    /// Load configuration from environment variables. All are optional:
    ///
    /// - `BIND_ADDR`, `PORT`
    /// - `MENU_PAGE_URL`, `MENU_BASE_URL`
    /// - `REFRESH_INTERVAL_SECS`, `UPDATE_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(value) => parse_number::<u16>("PORT", &value)?,
            None => defaults.port,
        };
        let refresh_interval = match lookup("REFRESH_INTERVAL_SECS") {
            Some(value) => Duration::from_secs(parse_number("REFRESH_INTERVAL_SECS", &value)?),
            None => defaults.refresh_interval,
        };
        let update_timeout = match lookup("UPDATE_TIMEOUT_SECS") {
            Some(value) => Duration::from_secs(parse_number("UPDATE_TIMEOUT_SECS", &value)?),
            None => defaults.update_timeout,
        };
        if refresh_interval.is_zero() {
            return Err(AppError::Config(
                "REFRESH_INTERVAL_SECS must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port,
            menu_page_url: lookup("MENU_PAGE_URL").unwrap_or(defaults.menu_page_url),
            base_url: lookup("MENU_BASE_URL").unwrap_or(defaults.base_url),
            refresh_interval,
            update_timeout,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, AppError> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::Config(format!("{key} must be a number, got {value:?}")))
}
