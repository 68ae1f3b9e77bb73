use axum::{
    Extension, Json, response::IntoResponse,
    extract::{Path, Query, State},
    http::StatusCode,
};
use sqlx::SqlitePool;
use log::info;
use serde::Deserialize;

use crate::models::{shot::*, GameId, TurnNumber, Items};
use crate::engine::referee;
use crate::errors::CustomError;
use crate::store::shots;
use crate::controllers::find_game;
use crate::AppState;

#[derive(Deserialize, Debug, Default)]
pub struct ShotFilter {
    pub turn: Option<TurnNumber>,
}

//handler for reading the shot ledger of a game, optionally a single turn of it
pub async fn list_shots(Path(game_id): Path<GameId>,
                        Query(filter): Query<ShotFilter>,
                        Extension(pool): Extension<SqlitePool>
                        ) -> Result<impl IntoResponse, CustomError> {

    info!("list shots of game {} request", game_id);

    find_game(&pool, game_id).await?;
    let shots = match filter.turn {
        Some(turn) => shots::get_shots_by_turn(&pool, game_id, turn).await?,
        None => shots::get_shots(&pool, game_id).await?,
    };

    Ok((StatusCode::OK, Json(Items::from(shots))))
}

/////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//handler for firing a shot. Turn order and the end of the game are decided by the referee,
//this only translates its verdict.
pub async fn fire_shot( Path(game_id): Path<GameId>,
                        State(state): State<AppState>,
                        Extension(pool): Extension<SqlitePool>,
                        Json(newshot): Json<NewShot>
                        ) -> Result<impl IntoResponse, CustomError> {

    info!("fire shot in game {} by player {} request", game_id, newshot.player_id);

    let report = referee::fire(&pool, &state.locks, game_id, &newshot).await?;

    Ok((StatusCode::CREATED, Json(report)))
}
