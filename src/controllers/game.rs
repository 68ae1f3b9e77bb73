use axum::{
    Extension, Json, response::IntoResponse,
    extract::{Path, State},
    http::{StatusCode, header::LOCATION},
};
use sqlx::SqlitePool;
use log::{debug, info};
use chrono::Utc;

use crate::models::{game::*, GameId, Items};
use crate::engine::referee;
use crate::errors::CustomError;
use crate::store::games;
use crate::controllers::find_game;
use crate::AppState;

//handler for listing the games that are still being played
pub async fn list_games(Extension(pool): Extension<SqlitePool>) -> Result<impl IntoResponse, CustomError> {

    info!("list games request");

    let games = games::get_games(&pool).await?;
    let active: Vec<Game> = games.into_iter().filter(|game| !game.has_ended()).collect();

    Ok((StatusCode::OK, Json(Items::from(active))))
}

//handler for listing the games that have ended
pub async fn history(Extension(pool): Extension<SqlitePool>) -> Result<impl IntoResponse, CustomError> {

    info!("history request");

    let games = games::get_games(&pool).await?;
    let ended: Vec<Game> = games.into_iter().filter(Game::has_ended).collect();

    Ok((StatusCode::OK, Json(Items::from(ended))))
}

/////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//handler for creating a new game. The start time is the moment of creation, there is no lobby phase.
pub async fn new_game(  Extension(pool): Extension<SqlitePool>,
                        Json(newgame): Json<NewGame>
                        ) -> Result<impl IntoResponse, CustomError> {

    info!("new game request");

    // check if board size is correct
    if !newgame.board_size_is_legal() {
        info!("Illegal boardsize: {} x {}", newgame.x_size, newgame.y_size);
        return Err(CustomError::IllegalBoardSize);
    }

    // turn length is only stored, but a non-positive one makes no sense
    if newgame.turn_length <= 0 {
        info!("Illegal turn length: {}", newgame.turn_length);
        return Err(CustomError::InvalidTurnLength);
    }

    let game_id = games::create_game(&pool, newgame.x_size, newgame.y_size, newgame.turn_length).await?;
    let game = find_game(&pool, game_id).await?;
    debug!("created game {:?}", game);

    let location = format!("/battleship/api/games/{}/", game_id);
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(game)))
}

//handler for fetching a single game
pub async fn get_game(  Path(game_id): Path<GameId>,
                        Extension(pool): Extension<SqlitePool>
                        ) -> Result<impl IntoResponse, CustomError> {

    info!("get game {} request", game_id);

    let game = find_game(&pool, game_id).await?;
    Ok((StatusCode::OK, Json(game)))
}

//handler for ending a game by hand. The end time can only be set once.
pub async fn end_game(  Path(game_id): Path<GameId>,
                        State(state): State<AppState>,
                        Extension(pool): Extension<SqlitePool>
                        ) -> Result<StatusCode, CustomError> {

    info!("end game {} request", game_id);

    let _guard = state.locks.acquire(game_id).await;
    find_game(&pool, game_id).await?;

    if games::end_game(&pool, game_id, Utc::now()).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CustomError::GameEnded)
    }
}

//handler for deleting a game with everything in it
pub async fn delete_game(   Path(game_id): Path<GameId>,
                            State(state): State<AppState>,
                            Extension(pool): Extension<SqlitePool>
                            ) -> Result<StatusCode, CustomError> {

    info!("delete game {} request", game_id);

    let _guard = state.locks.acquire(game_id).await;
    if !games::delete_game(&pool, game_id).await? {
        return Err(CustomError::GameNotFound);
    }

    state.locks.forget(game_id);
    Ok(StatusCode::NO_CONTENT)
}

/////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//handler for the game status: the current round while active, the winner once ended.
pub async fn game_status(   Path(game_id): Path<GameId>,
                            Extension(pool): Extension<SqlitePool>
                            ) -> Result<impl IntoResponse, CustomError> {

    info!("game {} status request", game_id);

    let mut conn = pool.acquire().await?;
    let status = referee::game_status(&mut conn, game_id).await?;

    Ok((StatusCode::OK, Json(status)))
}
