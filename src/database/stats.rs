use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};

use super::models::Stat;

pub fn find_by_player(conn: &Connection, player_id: i64) -> Result<Option<Stat>> {
    let sql = "SELECT player_id, rating, wins, losses FROM stats WHERE player_id = ?1";

    conn.query_row(sql, params![player_id], parse_stat_row)
        .optional()
        .context("Failed to query stats by player_id")
}

pub fn upsert_stat(conn: &Connection, stat: &Stat) -> Result<()> {
    let sql = "INSERT INTO stats (player_id, rating, wins, losses) VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT (player_id) DO UPDATE SET rating = excluded.rating, wins = excluded.wins, losses = excluded.losses";

    conn.execute(sql, params![stat.player_id, stat.rating, stat.wins, stat.losses])
        .with_context(|| format!("Failed to upsert stats for player {}", stat.player_id))
        .map(|_| ())
}

fn parse_stat_row(row: &rusqlite::Row) -> rusqlite::Result<Stat> {
    Ok(Stat {
        player_id: row.get(0)?,
        rating: row.get(1)?,
        wins: row.get(2)?,
        losses: row.get(3)?,
    })
}

/// Highest rating first, then most games played, then lowest player id.
/// Rows without a recorded game are skipped.
pub fn list_ordered_by_rating(conn: &Connection, limit: u32) -> Result<Vec<Stat>> {
    let sql = "SELECT player_id, rating, wins, losses FROM stats
        WHERE wins + losses > 0
        ORDER BY rating DESC, wins + losses DESC, player_id ASC
        LIMIT ?1";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![limit], parse_stat_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list stats by rating")?;

    Ok(rows)
}
