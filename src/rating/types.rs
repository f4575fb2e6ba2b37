pub type RatingValue = i64;

/// A player's competitive record as seen by the rating engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub rating: RatingValue,
    pub wins: i64,
    pub losses: i64,
}

impl Record {
    pub fn new(rating: RatingValue, wins: i64, losses: i64) -> Self {
        Self {
            rating,
            wins,
            losses,
        }
    }
}

/// Both records after one decided game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingUpdate {
    pub winner: Record,
    pub loser: Record,
}
