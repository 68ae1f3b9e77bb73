pub mod game;
pub mod player;
pub mod ship;
pub mod shot;

use sqlx::SqlitePool;

use crate::errors::CustomError;
use crate::models::{game::Game, GameId};
use crate::store::games;

// Fetch a game or bail out with a 404. Nearly every handler starts with this.
pub(crate) async fn find_game(pool: &SqlitePool, game_id: GameId) -> Result<Game, CustomError> {
    games::get_game(pool, game_id)
        .await?
        .ok_or(CustomError::GameNotFound)
}
