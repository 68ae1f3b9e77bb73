//! Runs the turn and fleet rules against the store.
//!
//! Accepting a shot is read-check-write: every step happens inside one
//! transaction, under the game's lock. The `(game, turn, player)` key on the
//! turn table stays the final word if two requests still meet.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use log::{debug, info, warn};
use sqlx::{SqliteConnection, SqlitePool};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::engine::fleet::{self, Outcome};
use crate::engine::turns::{Round, TurnViolation};
use crate::models::{
    game::{Game, GameStatus},
    shot::{FireReport, NewShot, Shot},
    GameId, PlayerId, TurnNumber,
};
use crate::store::{games, players, ships, shots};

#[derive(Debug)]
pub enum RefereeError {
    GameNotFound,
    GameEnded,
    PlayerNotFound,
    OutOfBounds,
    NotYourTurn { turn: TurnNumber },
    /// The first shot needs someone to shoot at.
    WaitingForPlayers,
    /// The turn was recorded but its shot was refused.
    Inconsistent,
    Storage(sqlx::Error),
}

impl From<sqlx::Error> for RefereeError {
    fn from(err: sqlx::Error) -> Self {
        RefereeError::Storage(err)
    }
}

/// One async mutex per game, so shots of the same game are decided one at a time.
#[derive(Clone, Default)]
pub struct GameLocks {
    locks: Arc<Mutex<HashMap<GameId, Arc<AsyncMutex<()>>>>>,
}

impl GameLocks {
    pub async fn acquire(&self, game_id: GameId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(game_id).or_default())
        };
        lock.lock_owned().await
    }

    /// Drops the lock of a deleted game.
    pub fn forget(&self, game_id: GameId) {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&game_id);
    }
}

async fn load_game(conn: &mut SqliteConnection, game_id: GameId) -> Result<Game, RefereeError> {
    games::get_game(&mut *conn, game_id)
        .await?
        .ok_or(RefereeError::GameNotFound)
}

async fn roster(conn: &mut SqliteConnection, game_id: GameId) -> Result<BTreeSet<PlayerId>, sqlx::Error> {
    let players = players::get_players(&mut *conn, game_id).await?;
    Ok(players.into_iter().map(|player| player.id).collect())
}

/// The round state of a game, read from its latest turn.
pub async fn current_round(
    conn: &mut SqliteConnection,
    game_id: GameId,
    roster: &BTreeSet<PlayerId>,
) -> Result<Round, sqlx::Error> {
    let latest = shots::get_current_turn(&mut *conn, game_id)
        .await?
        .map(|turn| turn.turn_number);

    let fired = match latest {
        Some(turn) => shots::get_shots_by_turn(&mut *conn, game_id, turn)
            .await?
            .into_iter()
            .map(|shot| shot.player)
            .collect(),
        None => BTreeSet::new(),
    };

    Ok(Round::new(latest, &fired, roster))
}

async fn evaluate(
    conn: &mut SqliteConnection,
    game: &Game,
    roster: &BTreeSet<PlayerId>,
) -> Result<Outcome, sqlx::Error> {
    let ships = ships::get_ships(&mut *conn, game.id).await?;
    let ledger = shots::get_shots(&mut *conn, game.id).await?;
    Ok(fleet::check_game_end(game, roster, &ships, &ledger))
}

/// Ends the game when `round` has just completed with at most one fleet afloat.
async fn decide(
    conn: &mut SqliteConnection,
    game: &Game,
    roster: &BTreeSet<PlayerId>,
    round: Round,
) -> Result<GameStatus, sqlx::Error> {
    if let Round::Complete { .. } = round {
        let outcome = evaluate(&mut *conn, game, roster).await?;
        if outcome.is_over() {
            games::end_game(&mut *conn, game.id, Utc::now()).await?;
            info!("game {} is over: {:?}", game.id, outcome);
            return Ok(GameStatus::Ended { winner: outcome.winner() });
        }
    }
    Ok(GameStatus::Active { round })
}

/// Fires a shot for `request.player_id`, placing it in the turn the round
/// rules allow. When the shot completes its round and at most one fleet is
/// left afloat, the game is ended in the same transaction.
pub async fn fire(
    pool: &SqlitePool,
    locks: &GameLocks,
    game_id: GameId,
    request: &NewShot,
) -> Result<FireReport, RefereeError> {
    let _guard = locks.acquire(game_id).await;
    let mut tx = pool.begin().await?;

    let game = load_game(&mut *tx, game_id).await?;
    if game.has_ended() {
        return Err(RefereeError::GameEnded);
    }
    if players::get_player(&mut *tx, game_id, request.player_id)
        .await?
        .is_none()
    {
        return Err(RefereeError::PlayerNotFound);
    }
    if !game.contains(request.x, request.y) {
        return Err(RefereeError::OutOfBounds);
    }

    let roster = roster(&mut *tx, game_id).await?;
    let round = current_round(&mut *tx, game_id, &roster).await?;
    debug!("game {} round before shot: {:?}", game_id, round);
    if matches!(round, Round::Initial) && roster.len() < 2 {
        return Err(RefereeError::WaitingForPlayers);
    }

    let turn_number = round
        .admit(request.player_id, &roster)
        .map_err(|violation| match violation {
            TurnViolation::NotInGame => RefereeError::PlayerNotFound,
            TurnViolation::AlreadyFired { turn } => {
                warn!("player {} already fired in turn {} of game {}", request.player_id, turn, game_id);
                RefereeError::NotYourTurn { turn }
            }
        })?;

    if !shots::create_turn(&mut *tx, turn_number, request.player_id, game_id).await? {
        warn!("turn {} of game {} was taken concurrently by player {}", turn_number, game_id, request.player_id);
        return Err(RefereeError::NotYourTurn { turn: turn_number });
    }

    let shot = Shot {
        turn: turn_number,
        player: request.player_id,
        game: game_id,
        x: request.x,
        y: request.y,
        shot_type: request.shot_type.clone(),
    };
    // Dropping the transaction rolls the turn back with it.
    if !shots::create_shot(&mut *tx, &shot).await? {
        return Err(RefereeError::Inconsistent);
    }

    // The game is only decided between rounds, so everybody gets their shot
    // in the round their fleet went down.
    let round = current_round(&mut *tx, game_id, &roster).await?;
    let status = decide(&mut *tx, &game, &roster, round).await?;

    tx.commit().await?;

    info!("player {} fired at ({}, {}) in turn {} of game {}", shot.player, shot.x, shot.y, turn_number, game_id);
    Ok(FireReport {
        turn_number,
        game: status,
    })
}

/// Removes `player_id` from the game together with their ships. The shots they
/// fired stay in the ledger. A departure can complete the running round, which
/// is then decided just like a round completed by a shot.
pub async fn leave(
    pool: &SqlitePool,
    locks: &GameLocks,
    game_id: GameId,
    player_id: PlayerId,
) -> Result<GameStatus, RefereeError> {
    let _guard = locks.acquire(game_id).await;
    let mut tx = pool.begin().await?;

    let game = load_game(&mut *tx, game_id).await?;
    if game.has_ended() {
        return Err(RefereeError::GameEnded);
    }
    if !players::delete_player(&mut *tx, game_id, player_id).await? {
        return Err(RefereeError::PlayerNotFound);
    }

    let roster = roster(&mut *tx, game_id).await?;
    let round = current_round(&mut *tx, game_id, &roster).await?;
    let status = decide(&mut *tx, &game, &roster, round).await?;

    tx.commit().await?;

    info!("player {} left game {}", player_id, game_id);
    Ok(status)
}

/// Whether every ship of `player_id` has been sunk by opponents.
pub async fn is_player_defeated(
    conn: &mut SqliteConnection,
    game_id: GameId,
    player_id: PlayerId,
) -> Result<bool, RefereeError> {
    let game = load_game(&mut *conn, game_id).await?;
    if players::get_player(&mut *conn, game_id, player_id).await?.is_none() {
        return Err(RefereeError::PlayerNotFound);
    }

    let fleet = ships::get_ships_by_player(&mut *conn, game_id, player_id).await?;
    let ledger = shots::get_shots(&mut *conn, game_id).await?;
    Ok(fleet::is_player_defeated(&game, &fleet, &ledger, player_id))
}

pub async fn check_game_end(conn: &mut SqliteConnection, game_id: GameId) -> Result<Outcome, RefereeError> {
    let game = load_game(&mut *conn, game_id).await?;
    let roster = roster(&mut *conn, game_id).await?;
    Ok(evaluate(&mut *conn, &game, &roster).await?)
}

pub async fn game_status(conn: &mut SqliteConnection, game_id: GameId) -> Result<GameStatus, RefereeError> {
    let game = load_game(&mut *conn, game_id).await?;
    let roster = roster(&mut *conn, game_id).await?;

    if game.has_ended() {
        let outcome = evaluate(&mut *conn, &game, &roster).await?;
        Ok(GameStatus::Ended { winner: outcome.winner() })
    } else {
        Ok(GameStatus::Active {
            round: current_round(&mut *conn, game_id, &roster).await?,
        })
    }
}
