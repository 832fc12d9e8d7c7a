use tokio::sync::watch;
use tracing::{info, warn};

use crate::client::Client;
use crate::types::StatsResponse;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ControllerState {
    pub loading: bool,
    pub result: Option<StatsResponse>,
}

pub struct FetchController<C> {
    client: C,
    team: String,
    state: watch::Sender<ControllerState>,
}

/// Clears `loading` if the fetch future is dropped before it settles.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<ControllerState>,
    settled: bool,
}

impl<'a> LoadingGuard<'a> {
    fn new(state: &'a watch::Sender<ControllerState>) -> Self {
        state.send_modify(|state| state.loading = true);
        Self {
            state,
            settled: false,
        }
    }

    // result and loading go out in one update
    fn settle(mut self, result: StatsResponse) {
        self.state.send_modify(|state| {
            state.result = Some(result);
            state.loading = false;
        });
        self.settled = true;
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.state.send_modify(|state| state.loading = false);
        }
    }
}

impl<C: Client> FetchController<C> {
    pub fn new(client: C, team: impl Into<String>) -> Self {
        let (state, _) = watch::channel(ControllerState::default());
        Self {
            client,
            team: team.into(),
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ControllerState> {
        self.state.subscribe()
    }

    pub fn loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn result(&self) -> Option<StatsResponse> {
        self.state.borrow().result.clone()
    }

    /// Runs the scraping job and publishes its outcome.
    ///
    /// Every failure is folded into a synthesized failure response, so this
    /// never errors. Concurrent calls are allowed; the last one to settle
    /// owns `result`.
    pub async fn trigger_fetch(&self) {
        let loading = LoadingGuard::new(&self.state);
        // let the presentation layer render the loading state even when the
        // client settles without suspending
        tokio::task::yield_now().await;

        let result = match self.client.fetch_team_stats().await {
            Ok(stats) => {
                info!(
                    success = stats.success,
                    total_players = stats.total_players,
                    "fetch settled"
                );
                stats
            }
            Err(e) => {
                warn!(kind = ?e.kind(), error = %e, "fetch failed");
                StatsResponse::failure(&self.team, e.to_string())
            }
        };

        loading.settle(result);
    }
}
