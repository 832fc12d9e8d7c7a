use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use tracing::debug;

use crate::client::Client;
use crate::config::Config;
use crate::error::Error;
use crate::types::*;

const ANALYST_JOB_PATH: &str = "/api/scraping/theanalyst-tottenham";
const FORMATTED_JOB_PATH: &str = "/api/scraping/tottenham-formatted";
const HEALTH_PATH: &str = "/health";

/// Scraping jobs the backend exposes for the team.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum StatsJob {
    /// Full scrape result, formatted stats nested under `formatted_data`
    #[default]
    Analyst,
    /// Formatted stats only
    Formatted,
}

impl StatsJob {
    fn path(self) -> &'static str {
        match self {
            StatsJob::Analyst => ANALYST_JOB_PATH,
            StatsJob::Formatted => FORMATTED_JOB_PATH,
        }
    }
}

pub struct ScraperApiClient {
    client: reqwest::Client,
    base_url: String,
    job: StatsJob,
}

impl ScraperApiClient {
    pub fn new(config: &Config, job: StatsJob) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Ok(Self {
            client: reqwest::Client::builder()
                .default_headers(headers)
                .build()?,
            base_url: config.base_url.clone(),
            job,
        })
    }

    async fn post_job(&self) -> Result<Value, Error> {
        let url = format!("{}{}", self.base_url, self.job.path());
        debug!(%url, "triggering scraping job");

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Transport {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(Error::MalformedResponse)
    }
}

#[async_trait]
impl Client for ScraperApiClient {
    async fn fetch_team_stats(&self) -> Result<StatsResponse, Error> {
        let raw = self.post_job().await?;
        debug!(raw = %raw, "raw reply");

        let reply = RawReply::from_value(raw);
        debug!(enveloped = reply.is_enveloped(), "resolved reply shape");

        let stats = decode_stats(reply.into_payload(), TEAM)?;
        debug!(
            success = stats.success,
            team = %stats.team,
            total_players = stats.total_players,
            "final payload"
        );

        Ok(stats)
    }

    async fn health(&self) -> Result<HealthStatus, Error> {
        let url = format!("{}{}", self.base_url, HEALTH_PATH);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Transport {
                status: status.as_u16(),
            });
        }

        Ok(response.json::<HealthStatus>().await?)
    }
}
