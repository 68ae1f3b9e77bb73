use serde::{Deserialize, Serialize};

use crate::models::{game::GameStatus, GameId, PlayerId, TurnNumber};

/// One row of the shot ledger.
#[derive(Deserialize, Serialize, sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Shot {
    pub turn: TurnNumber,
    pub player: PlayerId,
    pub game: GameId,
    pub x: i64,
    pub y: i64,
    pub shot_type: String,
}

/// "Player P has acted during turn N of game G."
#[derive(Deserialize, Serialize, sqlx::FromRow, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub turn_number: TurnNumber,
    pub player: PlayerId,
    pub game: GameId,
}

// The struct used for firing a shot as json
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NewShot {
    pub player_id: PlayerId,
    pub x: i64,
    pub y: i64,
    pub shot_type: String,
}

// Response to an accepted shot
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FireReport {
    pub turn_number: TurnNumber,
    pub game: GameStatus,
}
