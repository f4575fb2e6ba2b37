use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{Connection, params};

use super::models::Match;

pub fn insert_match(
    conn: &Connection,
    winner_id: i64,
    loser_id: i64,
    timestamp: NaiveDateTime,
) -> Result<Match> {
    let sql = "INSERT INTO matches (winner_id, loser_id, timestamp) VALUES (?1, ?2, ?3) RETURNING id, winner_id, loser_id, timestamp";

    conn.query_row(sql, params![winner_id, loser_id, timestamp], parse_match_row)
        .context("Failed to insert match")
}

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<Match> {
    Ok(Match {
        id: row.get(0)?,
        winner_id: row.get(1)?,
        loser_id: row.get(2)?,
        timestamp: row.get(3)?,
    })
}

/// Most recent first; matches recorded within the same instant fall back to
/// insertion order.
pub fn list_recent(conn: &Connection, offset: u32, limit: u32) -> Result<Vec<Match>> {
    let sql = "SELECT id, winner_id, loser_id, timestamp FROM matches ORDER BY timestamp DESC, id DESC LIMIT ?1 OFFSET ?2";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![limit, offset], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list matches")?;

    Ok(rows)
}
