use serde::{Deserialize, Serialize};

use crate::models::{GameId, PlayerId};

pub const DEFAULT_NICKNAME: &str = "Anonymous landlubber";

#[derive(Deserialize, Serialize, sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub nickname: String,
    pub game: GameId,
}

// The struct used for joining a game as json
#[derive(Deserialize, Serialize, Debug)]
pub struct NewPlayer {
    #[serde(default)]
    pub nickname: String,
}

impl NewPlayer {
    pub fn nickname(&self) -> &str {
        match self.nickname.trim() {
            "" => DEFAULT_NICKNAME,
            nickname => nickname,
        }
    }
}
