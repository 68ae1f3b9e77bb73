use axum::{
    extract::Extension,
    routing::get,
    Router,
};
use sqlx::SqlitePool;

pub mod config;
pub mod controllers;
pub mod engine;
pub mod errors;
pub mod models;
pub mod store;

use crate::engine::GameLocks;

// Shared state handed to every handler
#[derive(Clone, Default)]
pub struct AppState {
    pub locks: GameLocks,
}

/// Builds the router. The pool is passed in explicitly and reaches the
/// handlers as an extension.
pub fn app(pool: SqlitePool) -> Router {
    let state = AppState::default();

    Router::new()
        .route("/battleship/api/games/", get(controllers::game::list_games).post(controllers::game::new_game))
        .route(
            "/battleship/api/games/:game_id/",
            get(controllers::game::get_game)
                .patch(controllers::game::end_game)
                .delete(controllers::game::delete_game),
        )
        .route("/battleship/api/games/:game_id/status/", get(controllers::game::game_status))
        .route("/battleship/api/history/", get(controllers::game::history))
        .route(
            "/battleship/api/games/:game_id/players/",
            get(controllers::player::list_players).post(controllers::player::join_game),
        )
        .route(
            "/battleship/api/games/:game_id/players/:player_id/",
            get(controllers::player::get_player).delete(controllers::player::leave_game),
        )
        .route(
            "/battleship/api/games/:game_id/ships/",
            get(controllers::ship::list_ships).post(controllers::ship::place_ship),
        )
        .route(
            "/battleship/api/games/:game_id/shots/",
            get(controllers::shot::list_shots).post(controllers::shot::fire_shot),
        )
        .with_state(state)
        .layer(Extension(pool))
}
