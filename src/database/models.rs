use chrono::NaiveDateTime;

use crate::rating::Record;

#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub id: i64,
    pub winner_id: i64,
    pub loser_id: i64,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub player_id: i64,
    pub rating: i64,
    pub wins: i64,
    pub losses: i64,
}

impl Stat {
    /// Baseline row for a player's first recorded match.
    pub fn new(player_id: i64, initial_rating: i64) -> Self {
        Self {
            player_id,
            rating: initial_rating,
            wins: 0,
            losses: 0,
        }
    }

    pub fn record(&self) -> Record {
        Record::new(self.rating, self.wins, self.losses)
    }

    pub fn with_record(&self, record: Record) -> Self {
        Self {
            player_id: self.player_id,
            rating: record.rating,
            wins: record.wins,
            losses: record.losses,
        }
    }

    pub fn games_played(&self) -> i64 {
        self.wins + self.losses
    }
}
