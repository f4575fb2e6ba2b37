use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::database::{Match, Stat};
use crate::services::leaderboard::LeaderboardEntry;

#[derive(Debug, Deserialize)]
pub struct MatchCreate {
    pub winner_id: i64,
    pub loser_id: i64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MatchResponse {
    pub id: i64,
    pub winner_id: i64,
    pub loser_id: i64,
    pub timestamp: NaiveDateTime,
}

impl From<Match> for MatchResponse {
    fn from(m: Match) -> Self {
        Self {
            id: m.id,
            winner_id: m.winner_id,
            loser_id: m.loser_id,
            timestamp: m.timestamp,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LeaderboardItem {
    pub rank: usize,
    pub player_id: i64,
    pub rating: i64,
    pub wins: i64,
    pub losses: i64,
}

impl From<LeaderboardEntry> for LeaderboardItem {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            rank: entry.rank,
            player_id: entry.player_id,
            rating: entry.rating,
            wins: entry.wins,
            losses: entry.losses,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PlayerStats {
    pub player_id: i64,
    pub rating: i64,
    pub wins: i64,
    pub losses: i64,
}

impl From<Stat> for PlayerStats {
    fn from(stat: Stat) -> Self {
        Self {
            player_id: stat.player_id,
            rating: stat.rating,
            wins: stat.wins,
            losses: stat.losses,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MatchParams {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    pub limit: Option<u32>,
}
