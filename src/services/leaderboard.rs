use crate::database::{Repository, Stat};
use crate::errors::{ServiceError, ServiceResult};
use crate::services::matches::validate_page_size;

pub const DEFAULT_LEADERBOARD_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub player_id: i64,
    pub rating: i64,
    pub wins: i64,
    pub losses: i64,
}

/// Top `limit` players by rating. Ties go to the player with more games,
/// then to the lower player id. Players who never played are not listed.
pub fn get_leaderboard<R: Repository>(repo: &R, limit: u32) -> ServiceResult<Vec<LeaderboardEntry>> {
    validate_page_size(limit)?;

    let rows = repo.list_stats_ordered_by_rating(limit)?;
    Ok(rows
        .into_iter()
        .enumerate()
        .map(|(i, stat)| LeaderboardEntry {
            rank: i + 1,
            player_id: stat.player_id,
            rating: stat.rating,
            wins: stat.wins,
            losses: stat.losses,
        })
        .collect())
}

pub fn get_player_stats<R: Repository>(repo: &R, player_id: i64) -> ServiceResult<Stat> {
    repo.get_stat(player_id)?
        .ok_or_else(|| ServiceError::not_found(format!("no recorded matches for player {}", player_id)))
}
