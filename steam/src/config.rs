use crate::error::Error;
use crate::retry::RetryPolicy;
use crate::Result;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_CURRENCY: u32 = 1; // USD, see https://partner.steamgames.com/doc/store/pricing/currencies
const DEFAULT_LANGUAGE: &str = "english";
const DEFAULT_THROTTLE_SECS: u64 = 10;

/// Run parameters for one tracked catalog.
#[derive(Clone, Debug)]
pub struct Config {
    pub app_id: u32,
    pub currency: u32,
    pub language: String,
    /// SteamID64 of the inventory holder. Inventory valuation is skipped without it.
    pub steam_id: Option<String>,
    pub data_dir: PathBuf,
    /// Pause after every listing page lookup
    pub throttle: Duration,
    pub retry: RetryPolicy,
}

impl Config {
    pub fn new(app_id: u32) -> Self {
        Self {
            app_id,
            currency: DEFAULT_CURRENCY,
            language: DEFAULT_LANGUAGE.to_string(),
            steam_id: None,
            data_dir: PathBuf::from("."),
            throttle: Duration::from_secs(DEFAULT_THROTTLE_SECS),
            retry: RetryPolicy::default(),
        }
    }

    /// Reads the configuration from `STEAM_*` and related environment variables.
    /// Only `STEAM_APP_ID` is required.
    pub fn from_env() -> Result<Self> {
        let app_id = env::var("STEAM_APP_ID")
            .map_err(|_| Error::Config("STEAM_APP_ID not found in environment".into()))?;
        let mut config = Self::new(parse_var("STEAM_APP_ID", &app_id)?);

        if let Some(currency) = optional_var("STEAM_CURRENCY")? {
            config.currency = currency;
        }
        if let Ok(language) = env::var("STEAM_LANGUAGE") {
            config.language = language;
        }
        config.steam_id = env::var("STEAM_ID").ok().filter(|id| !id.is_empty());
        if let Ok(dir) = env::var("DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(secs) = optional_var("THROTTLE_SECS")? {
            config.throttle = Duration::from_secs(secs);
        }
        if let Some(secs) = optional_var("RETRY_DELAY_SECS")? {
            config.retry.delay = Duration::from_secs(secs);
        }
        config.retry.max_attempts = optional_var("RETRY_MAX_ATTEMPTS")?;

        Ok(config)
    }

    pub fn with_steam_id(mut self, steam_id: impl Into<String>) -> Self {
        self.steam_id = Some(steam_id.into());
        self
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }
}

fn parse_var<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{name} has an invalid value: {value}")))
}

fn optional_var<T: FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(value) => parse_var(name, &value).map(Some),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
