use serde::Serialize;

pub mod game;
pub mod player;
pub mod ship;
pub mod shot;

pub type GameId = i64;
pub type PlayerId = i64;
pub type ShipId = i64;
pub type TurnNumber = i64;

// Envelope used for every collection response
#[derive(Serialize, Debug)]
pub struct Items<T> {
    pub items: Vec<T>,
}

impl<T> From<Vec<T>> for Items<T> {
    fn from(items: Vec<T>) -> Self {
        Items { items }
    }
}
