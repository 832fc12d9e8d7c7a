use std::cmp::Ordering;

use crate::types::PlayerStat;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum SortKey {
    Goals,
    Xg,
    Apps,
    Mins,
    Shots,
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Goals => "Goals",
            SortKey::Xg => "xG",
            SortKey::Apps => "Apps",
            SortKey::Mins => "Mins",
            SortKey::Shots => "Shots",
        }
    }

    pub fn value(self, player: &PlayerStat) -> String {
        match self {
            SortKey::Goals => player.goals.to_string(),
            SortKey::Xg => format!("{:.2}", player.xg),
            SortKey::Apps => player.apps.to_string(),
            SortKey::Mins => player.mins.to_string(),
            SortKey::Shots => player.shots.to_string(),
        }
    }

    fn compare(self, a: &PlayerStat, b: &PlayerStat) -> Ordering {
        match self {
            SortKey::Goals => a.goals.cmp(&b.goals),
            SortKey::Xg => a.xg.total_cmp(&b.xg),
            SortKey::Apps => a.apps.cmp(&b.apps),
            SortKey::Mins => a.mins.cmp(&b.mins),
            SortKey::Shots => a.shots.cmp(&b.shots),
        }
    }
}

pub struct Ranking(Vec<PlayerStat>);

impl Ranking {
    pub fn new(players: Vec<PlayerStat>) -> Self {
        Self(players)
    }

    /// Highest first; ties keep the order the backend sent them in.
    pub fn by(mut self, key: SortKey, limit: usize) -> impl Iterator<Item = PlayerStat> {
        self.0.sort_by(|a, b| key.compare(b, a));
        self.0.into_iter().take(limit)
    }
}
