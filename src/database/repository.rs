use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{Connection, TransactionBehavior};

use super::models::{Match, Stat};
use super::{matches, stats};

/// Storage capabilities the match and leaderboard services rely on.
pub trait Repository {
    fn get_stat(&self, player_id: i64) -> Result<Option<Stat>>;

    fn upsert_stat(&self, stat: &Stat) -> Result<()>;

    fn insert_match(&self, winner_id: i64, loser_id: i64, timestamp: NaiveDateTime) -> Result<Match>;

    fn list_matches(&self, offset: u32, limit: u32) -> Result<Vec<Match>>;

    fn list_stats_ordered_by_rating(&self, limit: u32) -> Result<Vec<Stat>>;

    /// Runs `work` as one write transaction. Nothing `work` wrote survives
    /// unless it returns `Ok`, and concurrent callers are serialized for the
    /// whole closure, reads included.
    fn atomically<T, E, F>(&mut self, work: F) -> Result<T, E>
    where
        F: FnOnce(&Self) -> Result<T, E>,
        E: From<anyhow::Error>;
}

impl Repository for Connection {
    fn get_stat(&self, player_id: i64) -> Result<Option<Stat>> {
        stats::find_by_player(self, player_id)
    }

    fn upsert_stat(&self, stat: &Stat) -> Result<()> {
        stats::upsert_stat(self, stat)
    }

    fn insert_match(&self, winner_id: i64, loser_id: i64, timestamp: NaiveDateTime) -> Result<Match> {
        matches::insert_match(self, winner_id, loser_id, timestamp)
    }

    fn list_matches(&self, offset: u32, limit: u32) -> Result<Vec<Match>> {
        matches::list_recent(self, offset, limit)
    }

    fn list_stats_ordered_by_rating(&self, limit: u32) -> Result<Vec<Stat>> {
        stats::list_ordered_by_rating(self, limit)
    }

    fn atomically<T, E, F>(&mut self, work: F) -> Result<T, E>
    where
        F: FnOnce(&Self) -> Result<T, E>,
        E: From<anyhow::Error>,
    {
        // IMMEDIATE takes the write lock up front so stat reads cannot go stale
        let tx = self
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .context("Failed to begin transaction")?;
        let output = work(&tx)?;
        tx.commit().context("Failed to commit transaction")?;
        Ok(output)
    }
}
