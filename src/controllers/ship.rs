use std::collections::BTreeSet;

use axum::{
    Extension, Json, response::IntoResponse,
    extract::{Path, Query, State},
    http::StatusCode,
};
use sqlx::SqlitePool;
use log::{debug, info};
use serde::Deserialize;

use crate::models::{ship::*, GameId, PlayerId, Items};
use crate::engine::fleet::{self, Cell};
use crate::errors::CustomError;
use crate::store::{players, ships, shots};
use crate::controllers::find_game;
use crate::AppState;

#[derive(Deserialize, Debug, Default)]
pub struct ShipFilter {
    pub player: Option<PlayerId>,
}

//handler for listing the ships of a game, optionally only those of one player
pub async fn list_ships(Path(game_id): Path<GameId>,
                        Query(filter): Query<ShipFilter>,
                        Extension(pool): Extension<SqlitePool>
                        ) -> Result<impl IntoResponse, CustomError> {

    info!("list ships of game {} request", game_id);

    find_game(&pool, game_id).await?;
    let ships = match filter.player {
        Some(player_id) => ships::get_ships_by_player(&pool, game_id, player_id).await?,
        None => ships::get_ships(&pool, game_id).await?,
    };

    Ok((StatusCode::OK, Json(Items::from(ships))))
}

/////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//handler for placing a ship. The ship must lie on one row or column inside the board and must not
//overlap the ships the same player already placed. A fleet that has been sunk stays sunk.
pub async fn place_ship(Path(game_id): Path<GameId>,
                        State(state): State<AppState>,
                        Extension(pool): Extension<SqlitePool>,
                        Json(newship): Json<NewShip>
                        ) -> Result<impl IntoResponse, CustomError> {

    info!("place ship in game {} request", game_id);

    let _guard = state.locks.acquire(game_id).await;

    let game = find_game(&pool, game_id).await?;
    if game.has_ended() {
        return Err(CustomError::GameEnded);
    }

    // Check the player is part of this game
    players::get_player(&pool, game_id, newship.player_id)
        .await?
        .ok_or(CustomError::PlayerNotFound)?;

    let placed = ships::get_ships_by_player(&pool, game_id, newship.player_id).await?;
    let ledger = shots::get_shots(&pool, game_id).await?;
    if fleet::is_player_defeated(&game, &placed, &ledger, newship.player_id) {
        info!("Player {} tried to reinforce a sunk fleet", newship.player_id);
        return Err(CustomError::FleetSunk);
    }

    if !newship.is_axis_aligned() {
        info!("Ship from {:?} to {:?} is diagonal", newship.stern(), newship.bow());
        return Err(CustomError::ShipNotAligned);
    }

    let cells = newship.cells();
    if !cells.iter().all(|cell| game.contains(cell.x, cell.y)) {
        return Err(CustomError::OutOfBounds);
    }

    // Check the ship does not overlap the player's fleet
    let occupied: BTreeSet<Cell> = placed.iter().flat_map(Ship::cells).collect();
    if cells.iter().any(|cell| occupied.contains(cell)) {
        return Err(CustomError::ShipOverlap);
    }

    let ship_id = ships::create_ship(&pool, game_id, &newship).await?;
    let ship = ships::get_ship(&pool, ship_id)
        .await?
        .ok_or(CustomError::InternalServerError)?;
    debug!("placed {:?}", ship);

    Ok((StatusCode::CREATED, Json(ship)))
}
