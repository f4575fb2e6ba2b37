use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, TransactionBehavior, params};

/// Versioned schema changes, applied in order and recorded in
/// `schema_migrations`. Never edit an entry once released; append a new one.
const MIGRATIONS: &[(i64, &str, &str)] = &[(
    1,
    "create matches and stats",
    include_str!("migrations/0001_create_matches_and_stats.sql"),
)];

/// Applies every migration newer than the recorded schema version.
/// Returns how many were applied.
pub fn run_migrations(conn: &mut Connection) -> Result<usize> {
    ensure_migrations_table(conn)?;
    let current = current_version(conn)?;

    let mut applied = 0;
    for (version, description, sql) in MIGRATIONS.iter().filter(|(v, _, _)| *v > current) {
        apply_migration(conn, *version, sql)
            .with_context(|| format!("Failed to apply migration {} ({})", version, description))?;
        log::info!("Applied migration {}: {}", version, description);
        applied += 1;
    }

    if applied == 0 {
        log::debug!("Database schema is up to date at version {}", current);
    }
    Ok(applied)
}

pub fn latest_version() -> i64 {
    MIGRATIONS.last().map(|(v, _, _)| *v).unwrap_or(0)
}

pub fn current_version(conn: &Connection) -> Result<i64> {
    let version = conn
        .query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
            row.get::<_, Option<i64>>(0)
        })
        .context("Failed to read schema version")?;
    Ok(version.unwrap_or(0))
}

fn ensure_migrations_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (version INTEGER PRIMARY KEY, applied_at TEXT NOT NULL)",
        [],
    )
    .context("Failed to create schema_migrations table")
    .map(|_| ())
}

fn apply_migration(conn: &mut Connection, version: i64, sql: &str) -> Result<()> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    tx.execute_batch(sql)?;
    tx.execute(
        "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)",
        params![version, Utc::now().naive_utc()],
    )?;
    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_apply_once() {
        let mut conn = Connection::open_in_memory().unwrap();

        assert_eq!(run_migrations(&mut conn).unwrap(), MIGRATIONS.len());
        assert_eq!(run_migrations(&mut conn).unwrap(), 0);
        assert_eq!(current_version(&conn).unwrap(), latest_version());
    }

    #[test]
    fn test_schema_rejects_self_play_rows() {
        let mut conn = Connection::open_in_memory().unwrap();
        run_migrations(&mut conn).unwrap();

        let result = conn.execute(
            "INSERT INTO matches (winner_id, loser_id, timestamp) VALUES (3, 3, '2024-01-01 00:00:00')",
            [],
        );

        assert!(result.is_err());
    }
}
