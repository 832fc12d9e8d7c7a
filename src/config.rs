use std::env::{self, VarError};

use crate::error::{EnvVarError, Error};

pub const BASE_URL_VAR: &str = "SCRAPER_BASE_URL";

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Scheme, host and port of the scraping backend, without a trailing slash.
    pub base_url: String,
}

impl Config {
    // reads SCRAPER_BASE_URL, falling back to the local backend
    // can use dotenv
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|var| env::var(var))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let base_url = match lookup(BASE_URL_VAR) {
            Ok(url) => url,
            Err(VarError::NotPresent) => DEFAULT_BASE_URL.into(),
            Err(e) => return Err(EnvVarError::new(BASE_URL_VAR, e).into()),
        };

        Self::with_base_url(&base_url)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        let base_url = base_url.trim().trim_end_matches('/');
        reqwest::Url::parse(base_url).map_err(|e| Error::BaseUrl {
            url: base_url.into(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            base_url: base_url.into(),
        })
    }
}
