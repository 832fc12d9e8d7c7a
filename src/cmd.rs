use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tokio::sync::watch;

use crate::api_client::{ScraperApiClient, StatsJob};
use crate::client::Client;
use crate::config::Config;
use crate::controller::{ControllerState, FetchController};
use crate::ranking::{Ranking, SortKey};
use crate::render;
use crate::types::{StatsResponse, TEAM};

#[derive(Parser, Debug)]
#[command(version, about = "Trigger the Tottenham stats scraping job and report on it")]
pub enum Cmd {
    /// Run the scraping job and print a one-line summary
    Fetch {
        #[arg(long, value_enum, default_value_t)]
        job: StatsJob,
        /// Print the published result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the scraping job and print a ranked player table
    Players {
        #[arg(long, value_enum, default_value_t)]
        job: StatsJob,
        #[arg(long, value_enum, default_value_t = SortKey::Goals)]
        sort: SortKey,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Check that the scraping backend is up
    Health,
}

// Mirrors the loading flag onto `out` until the fetch settles. The current
// value is read before waiting, so a fetch that settles fast is still shown.
async fn show_loading(mut rx: watch::Receiver<ControllerState>, out: &mut impl Write) {
    let mut shown = false;
    loop {
        let (loading, settled) = {
            let state = rx.borrow_and_update();
            (state.loading, !state.loading && state.result.is_some())
        };
        if loading && !shown {
            let _ = writeln!(out, "{}", render::LOADING);
            shown = true;
        }
        if settled || rx.changed().await.is_err() {
            break;
        }
    }
}

async fn fetch(
    config: &Config,
    job: StatsJob,
    out: &mut impl Write,
) -> anyhow::Result<StatsResponse> {
    let client = ScraperApiClient::new(config, job)?;
    let controller = FetchController::new(client, TEAM);

    // the fetch is polled first so `loading` is already set when the
    // presenter takes its first look
    tokio::join!(
        controller.trigger_fetch(),
        show_loading(controller.subscribe(), out)
    );

    debug_assert!(!controller.loading());
    controller
        .result()
        .context("fetch settled without publishing a result")
}

fn exit_status(result: &StatsResponse) -> u8 {
    if result.success {
        0
    } else {
        1
    }
}

impl Cmd {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let config = Config::from_env()?;

        match self {
            Cmd::Fetch { job, json } => {
                let result = fetch(&config, job, &mut io::stderr()).await?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                } else {
                    println!("{}", render::summary(&result));
                }
                Ok(ExitCode::from(exit_status(&result)))
            }
            Cmd::Players { job, sort, limit } => {
                let result = fetch(&config, job, &mut io::stderr()).await?;
                println!("{}", render::summary(&result));
                if result.success {
                    let top = Ranking::new(result.players.clone()).by(sort, limit);
                    print!("{}", render::player_table(top, sort));
                }
                Ok(ExitCode::from(exit_status(&result)))
            }
            Cmd::Health => {
                let client = ScraperApiClient::new(&config, StatsJob::default())?;
                let health = client.health().await?;
                println!("{}: {}", health.status, health.message);
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}
