use std::fmt::Write;

use crate::ranking::SortKey;
use crate::types::{PlayerStat, StatsResponse};

pub const LOADING: &str = "Fetching Tottenham data...";

/// The one-line result panel.
pub fn summary(response: &StatsResponse) -> String {
    if response.success {
        format!(
            "✅ Success: {} players fetched for {}",
            response.total_players, response.team
        )
    } else {
        format!(
            "❌ Error: {}",
            response.error.as_deref().unwrap_or("Unknown error")
        )
    }
}

pub fn player_table(players: impl Iterator<Item = PlayerStat>, key: SortKey) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} | Goals | xG | Conv% | Player Name", key.label());
    for player in players {
        let _ = writeln!(
            out,
            " {} | {} | {:.2} | {} | {}",
            key.value(&player),
            player.goals,
            player.xg,
            player.conv_percent,
            player.name
        );
    }
    out
}
