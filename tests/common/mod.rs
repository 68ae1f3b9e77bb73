#![allow(dead_code)]

use battleship_api::{
    models::{ship::NewShip, shot::NewShot, GameId, PlayerId},
    store::{self, games, players, ships},
};
use sqlx::SqlitePool;

pub async fn pool() -> SqlitePool {
    let pool = store::connect("sqlite::memory:", 1).await.unwrap();
    store::init_schema(&pool).await.unwrap();
    pool
}

pub async fn game(pool: &SqlitePool) -> GameId {
    games::create_game(pool, 10, 10, 60).await.unwrap()
}

pub async fn player(pool: &SqlitePool, game_id: GameId, nickname: &str) -> PlayerId {
    players::create_player(pool, nickname, game_id).await.unwrap()
}

pub async fn ship(pool: &SqlitePool, game_id: GameId, player_id: PlayerId, stern: (i64, i64), bow: (i64, i64)) {
    let ship = NewShip {
        player_id,
        stern_x: stern.0,
        stern_y: stern.1,
        bow_x: bow.0,
        bow_y: bow.1,
        ship_type: "destroyer".to_string(),
    };
    ships::create_ship(pool, game_id, &ship).await.unwrap();
}

pub fn aim(player_id: PlayerId, x: i64, y: i64) -> NewShot {
    NewShot {
        player_id,
        x,
        y,
        shot_type: "single".to_string(),
    }
}
