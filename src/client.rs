use async_trait::async_trait;

use crate::error::Error;
use crate::types::{HealthStatus, StatsResponse};

#[async_trait]
pub trait Client {
    async fn fetch_team_stats(&self) -> Result<StatsResponse, Error>;
    async fn health(&self) -> Result<HealthStatus, Error>;
}
