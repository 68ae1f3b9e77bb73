use axum::{
    Extension, Json, response::IntoResponse,
    extract::{Path, State},
    http::{StatusCode, header::LOCATION},
};
use sqlx::SqlitePool;
use log::{debug, error, info};

use crate::models::{player::*, GameId, PlayerId, Items};
use crate::engine::referee;
use crate::errors::CustomError;
use crate::store::players;
use crate::controllers::find_game;
use crate::AppState;

//handler for listing the players of a game
pub async fn list_players(  Path(game_id): Path<GameId>,
                            Extension(pool): Extension<SqlitePool>
                            ) -> Result<impl IntoResponse, CustomError> {

    info!("list players of game {} request", game_id);

    find_game(&pool, game_id).await?;
    let players = players::get_players(&pool, game_id).await?;

    Ok((StatusCode::OK, Json(Items::from(players))))
}

/////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//handler for joining an existing game. Players can join as long as the game has not ended,
//a player joining mid-round takes part in the current round.
pub async fn join_game( Path(game_id): Path<GameId>,
                        State(state): State<AppState>,
                        Extension(pool): Extension<SqlitePool>,
                        Json(newplayer): Json<NewPlayer>
                        ) -> Result<impl IntoResponse, CustomError> {

    info!("Join game {} request", game_id);

    let _guard = state.locks.acquire(game_id).await;

    // Check if the game is still running, bail out if not
    let game = find_game(&pool, game_id).await?;
    if game.has_ended() {
        error!("Game {} has ended, cannot join", game_id);
        return Err(CustomError::GameEnded);
    }

    let player_id = players::create_player(&pool, newplayer.nickname(), game_id).await?;
    let player = players::get_player(&pool, game_id, player_id)
        .await?
        .ok_or(CustomError::InternalServerError)?;

    let location = format!("/battleship/api/games/{}/players/{}/", game_id, player_id);
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(player)))
}

//handler for fetching a single player
pub async fn get_player(Path((game_id, player_id)): Path<(GameId, PlayerId)>,
                        Extension(pool): Extension<SqlitePool>
                        ) -> Result<impl IntoResponse, CustomError> {

    info!("get player {} of game {} request", player_id, game_id);

    let player = players::get_player(&pool, game_id, player_id)
        .await?
        .ok_or(CustomError::PlayerNotFound)?;

    Ok((StatusCode::OK, Json(player)))
}

//handler for leaving a game. The player's ships leave with them, the shots they fired stay.
//Leaving can complete the round, so the referee may end the game here.
pub async fn leave_game(Path((game_id, player_id)): Path<(GameId, PlayerId)>,
                        State(state): State<AppState>,
                        Extension(pool): Extension<SqlitePool>
                        ) -> Result<StatusCode, CustomError> {

    info!("player {} leaves game {} request", player_id, game_id);

    let status = referee::leave(&pool, &state.locks, game_id, player_id).await?;
    debug!("game {} after departure: {:?}", game_id, status);

    Ok(StatusCode::NO_CONTENT)
}
