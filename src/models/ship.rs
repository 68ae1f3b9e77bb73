use serde::{Deserialize, Serialize};

use crate::engine::fleet::Cell;
use crate::models::{GameId, PlayerId, ShipId};

#[derive(Deserialize, Serialize, sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    pub id: ShipId,
    pub player: PlayerId,
    pub game: GameId,
    pub stern_x: i64,
    pub stern_y: i64,
    pub bow_x: i64,
    pub bow_y: i64,
    pub ship_type: String,
}

impl Ship {
    pub fn stern(&self) -> Cell {
        Cell::new(self.stern_x, self.stern_y)
    }

    pub fn bow(&self) -> Cell {
        Cell::new(self.bow_x, self.bow_y)
    }

    /// Every grid cell between stern and bow, both ends included.
    pub fn cells(&self) -> Vec<Cell> {
        Cell::segment(self.stern(), self.bow())
    }
}

// The struct used for placing a ship as json
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NewShip {
    pub player_id: PlayerId,
    pub stern_x: i64,
    pub stern_y: i64,
    pub bow_x: i64,
    pub bow_y: i64,
    pub ship_type: String,
}

impl NewShip {
    pub fn stern(&self) -> Cell {
        Cell::new(self.stern_x, self.stern_y)
    }

    pub fn bow(&self) -> Cell {
        Cell::new(self.bow_x, self.bow_y)
    }

    pub fn is_axis_aligned(&self) -> bool {
        self.stern_x == self.bow_x || self.stern_y == self.bow_y
    }

    pub fn cells(&self) -> Vec<Cell> {
        Cell::segment(self.stern(), self.bow())
    }
}
