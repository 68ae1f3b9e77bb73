use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::engine::turns::Round;
use crate::models::{GameId, PlayerId};

pub const MIN_BOARD_SIZE: i64 = 2;
pub const MAX_BOARD_SIZE: i64 = 26;

#[derive(Deserialize, Serialize, sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct Game {
    pub id: GameId,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub x_size: i64,
    pub y_size: i64,
    pub turn_length: i64,
}

impl Game {
    pub fn has_ended(&self) -> bool {
        self.end_time.is_some()
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        (0..self.x_size).contains(&x) && (0..self.y_size).contains(&y)
    }
}

// The struct used for receiving a new game as json
#[derive(Deserialize, Serialize, Debug)]
pub struct NewGame {
    pub x_size: i64,
    pub y_size: i64,
    pub turn_length: i64,
}

impl NewGame {
    pub fn board_size_is_legal(&self) -> bool {
        let legal = MIN_BOARD_SIZE..=MAX_BOARD_SIZE;
        legal.contains(&self.x_size) && legal.contains(&self.y_size)
    }
}

/// Whether a game still accepts shots, and who won once it doesn't.
///
/// An ended game with `winner: None` is either a draw or a game that was
/// closed by hand while more than one fleet was still afloat.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GameStatus {
    Active { round: Round },
    Ended { winner: Option<PlayerId> },
}
