pub mod elo;
pub mod types;

pub use elo::{compute_update, expected_score};
pub use types::{RatingUpdate, RatingValue, Record};
