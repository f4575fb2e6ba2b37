use chrono::Utc;
use log::info;

use crate::config::settings::RatingSettings;
use crate::database::{Match, Repository, Stat};
use crate::errors::{ServiceError, ServiceResult};
use crate::rating::compute_update;

pub const DEFAULT_PAGE_SIZE: u32 = 5;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Records `winner_id` beating `loser_id` and updates both players' stats.
///
/// The match row and both stat rows are written in one transaction; if any
/// write fails none of them are kept. Players without a stat row start from
/// `settings.initial_rating`.
pub fn submit_match<R: Repository>(
    repo: &mut R,
    settings: &RatingSettings,
    winner_id: i64,
    loser_id: i64,
) -> ServiceResult<Match> {
    validate_participants(winner_id, loser_id)?;

    let (recorded, before, after) = repo.atomically(|store| -> ServiceResult<_> {
        let winner = load_or_default(store, winner_id, settings)?;
        let loser = load_or_default(store, loser_id, settings)?;

        let update = compute_update(winner.record(), loser.record(), settings);

        let recorded = store.insert_match(winner_id, loser_id, Utc::now().naive_utc())?;
        store.upsert_stat(&winner.with_record(update.winner))?;
        store.upsert_stat(&loser.with_record(update.loser))?;

        Ok((recorded, (winner.rating, loser.rating), update))
    })?;

    info!(
        "Match {}: player {} ({} -> {}) beat player {} ({} -> {})",
        recorded.id,
        winner_id,
        before.0,
        after.winner.rating,
        loser_id,
        before.1,
        after.loser.rating
    );
    Ok(recorded)
}

/// Match history, newest first.
pub fn list_matches<R: Repository>(repo: &R, offset: u32, limit: u32) -> ServiceResult<Vec<Match>> {
    validate_page_size(limit)?;
    Ok(repo.list_matches(offset, limit)?)
}

fn validate_participants(winner_id: i64, loser_id: i64) -> ServiceResult<()> {
    if winner_id == loser_id {
        return Err(ServiceError::invalid_match(format!(
            "player {} cannot play against themselves",
            winner_id
        )));
    }
    if winner_id <= 0 || loser_id <= 0 {
        return Err(ServiceError::invalid_match(format!(
            "player identifiers must be positive, got {} and {}",
            winner_id, loser_id
        )));
    }
    Ok(())
}

pub(crate) fn validate_page_size(limit: u32) -> ServiceResult<()> {
    if (1..=MAX_PAGE_SIZE).contains(&limit) {
        Ok(())
    } else {
        Err(ServiceError::invalid_query(format!(
            "limit must be between 1 and {}, got {}",
            MAX_PAGE_SIZE, limit
        )))
    }
}

fn load_or_default<R: Repository>(
    store: &R,
    player_id: i64,
    settings: &RatingSettings,
) -> ServiceResult<Stat> {
    let existing = store.get_stat(player_id)?;
    Ok(existing.unwrap_or_else(|| Stat::new(player_id, settings.initial_rating)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::DatabaseSettings;
    use crate::database::{self, test_connection};
    use rusqlite::Connection;

    fn stat(conn: &Connection, player_id: i64) -> Stat {
        conn.get_stat(player_id).unwrap().unwrap()
    }

    #[test]
    fn test_first_match_creates_both_stat_rows() {
        let mut conn = test_connection();
        let settings = RatingSettings::default();

        let recorded = submit_match(&mut conn, &settings, 1, 2).unwrap();

        assert_eq!(recorded.winner_id, 1);
        assert_eq!(recorded.loser_id, 2);
        assert!(recorded.id > 0);
        assert_eq!(stat(&conn, 1), Stat { player_id: 1, rating: 1216, wins: 1, losses: 0 });
        assert_eq!(stat(&conn, 2), Stat { player_id: 2, rating: 1184, wins: 0, losses: 1 });
    }

    #[test]
    fn test_self_play_is_rejected() {
        let mut conn = test_connection();

        let result = submit_match(&mut conn, &RatingSettings::default(), 5, 5);

        assert!(matches!(result, Err(ServiceError::InvalidMatch(_))));
        assert!(conn.get_stat(5).unwrap().is_none());
        assert!(conn.list_matches(0, 10).unwrap().is_empty());
    }

    #[test]
    fn test_non_positive_ids_are_rejected() {
        let mut conn = test_connection();

        let result = submit_match(&mut conn, &RatingSettings::default(), 0, 3);

        assert!(matches!(result, Err(ServiceError::InvalidMatch(_))));
    }

    #[test]
    fn test_only_participants_change() {
        let mut conn = test_connection();
        let settings = RatingSettings::default();
        submit_match(&mut conn, &settings, 3, 4).unwrap();
        let before_3 = stat(&conn, 3);
        let before_4 = stat(&conn, 4);

        submit_match(&mut conn, &settings, 1, 2).unwrap();

        assert_eq!(stat(&conn, 3), before_3);
        assert_eq!(stat(&conn, 4), before_4);
        assert_eq!(stat(&conn, 1).wins, 1);
        assert_eq!(stat(&conn, 2).losses, 1);
    }

    #[test]
    fn test_repeated_wins_accumulate() {
        let mut conn = test_connection();
        let settings = RatingSettings::default();

        for _ in 0..3 {
            submit_match(&mut conn, &settings, 10, 20).unwrap();
        }

        let a = stat(&conn, 10);
        let b = stat(&conn, 20);
        assert_eq!((a.wins, a.losses), (3, 0));
        assert_eq!((b.wins, b.losses), (0, 3));
        assert!(a.rating > b.rating);
    }

    #[test]
    fn test_failed_write_rolls_back_everything() {
        let mut conn = test_connection();
        let settings = RatingSettings::default();
        submit_match(&mut conn, &settings, 1, 2).unwrap();
        conn.execute_batch(
            "CREATE TRIGGER reject_player_9 BEFORE INSERT ON stats WHEN NEW.player_id = 9
             BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
        )
        .unwrap();

        let result = submit_match(&mut conn, &settings, 1, 9);

        assert!(matches!(result, Err(ServiceError::StorageUnavailable(_))));
        assert_eq!(stat(&conn, 1).wins, 1);
        assert_eq!(stat(&conn, 1).rating, 1216);
        assert_eq!(conn.list_matches(0, 10).unwrap().len(), 1);
    }

    #[test]
    fn test_list_matches_newest_first() {
        let mut conn = test_connection();
        let settings = RatingSettings::default();
        let mut ids = Vec::new();
        for loser in 2..7 {
            ids.push(submit_match(&mut conn, &settings, 1, loser).unwrap().id);
        }

        let page = list_matches(&conn, 0, 2).unwrap();

        let page_ids: Vec<i64> = page.iter().map(|m| m.id).collect();
        assert_eq!(page_ids, vec![ids[4], ids[3]]);
        assert!(page[0].timestamp >= page[1].timestamp);
    }

    #[test]
    fn test_list_matches_offset_past_end_is_empty() {
        let mut conn = test_connection();
        submit_match(&mut conn, &RatingSettings::default(), 1, 2).unwrap();

        assert!(list_matches(&conn, 50, 5).unwrap().is_empty());
    }

    #[test]
    fn test_list_matches_rejects_bad_limits() {
        let conn = test_connection();

        assert!(matches!(list_matches(&conn, 0, 0), Err(ServiceError::InvalidQuery(_))));
        assert!(matches!(list_matches(&conn, 0, 101), Err(ServiceError::InvalidQuery(_))));
        assert!(list_matches(&conn, 0, 100).is_ok());
    }

    #[test]
    fn test_concurrent_matches_do_not_lose_updates() {
        let dir = tempfile::tempdir().unwrap();
        let db_settings = DatabaseSettings {
            path: dir.path().join("pool.db").to_string_lossy().into_owned(),
            pool_size: 4,
            busy_timeout_ms: 10_000,
        };
        let pool = database::create_pool(&db_settings).unwrap();
        database::run_migrations(&mut database::get_connection(&pool).unwrap()).unwrap();
        let settings = RatingSettings::default();
        const HERO: i64 = 1;
        const PER_THREAD: i64 = 10;

        std::thread::scope(|scope| {
            for opponent in 2..6 {
                let pool = &pool;
                let settings = &settings;
                scope.spawn(move || {
                    for round in 0..PER_THREAD {
                        let mut conn = database::get_connection(pool).unwrap();
                        let (winner, loser) = if round % 2 == 0 { (HERO, opponent) } else { (opponent, HERO) };
                        submit_match(&mut *conn, settings, winner, loser).unwrap();
                    }
                });
            }
        });

        let conn = database::get_connection(&pool).unwrap();
        let hero = conn.get_stat(HERO).unwrap().unwrap();
        assert_eq!(hero.games_played(), 4 * PER_THREAD);
        assert_eq!(hero.wins, 4 * PER_THREAD / 2);

        // every rating change is zero-sum while nobody hits the floor
        let all = conn.list_stats_ordered_by_rating(100).unwrap();
        assert_eq!(all.len(), 5);
        let total: i64 = all.iter().map(|s| s.rating).sum();
        assert_eq!(total, 5 * settings.initial_rating);
        let matches: i64 = conn.query_row("SELECT COUNT(*) FROM matches", [], |r| r.get(0)).unwrap();
        assert_eq!(matches, 4 * PER_THREAD);
    }
}
