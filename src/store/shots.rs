//! The shot ledger: turns and shots are only ever appended. They outlive the
//! player who fired them and only go away with their game.

use log::debug;
use sqlx::{Executor, Sqlite};

use crate::models::{
    shot::{Shot, Turn},
    GameId, PlayerId, TurnNumber,
};
use crate::store::is_constraint_violation;

const SHOT_COLUMNS: &str = "SELECT turn, player, game, x, y, shot_type FROM shot";

/// The turn record with the highest turn number, `None` before the first shot.
pub async fn get_current_turn<'e, E>(executor: E, game_id: GameId) -> Result<Option<Turn>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = "SELECT turn_number, player, game FROM turn WHERE game = ? \
               ORDER BY turn_number DESC LIMIT 1";
    sqlx::query_as::<_, Turn>(sql)
        .bind(game_id)
        .fetch_optional(executor)
        .await
}

pub async fn get_turns<'e, E>(executor: E, game_id: GameId) -> Result<Vec<Turn>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = "SELECT turn_number, player, game FROM turn WHERE game = ? ORDER BY turn_number, rowid";
    sqlx::query_as::<_, Turn>(sql)
        .bind(game_id)
        .fetch_all(executor)
        .await
}

/// Records that `player_id` acted during `turn_number`. Returns false if they
/// already did, or if the game is unknown.
pub async fn create_turn<'e, E>(
    executor: E,
    turn_number: TurnNumber,
    player_id: PlayerId,
    game_id: GameId,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("INSERT INTO turn (turn_number, player, game) VALUES (?, ?, ?)")
        .bind(turn_number)
        .bind(player_id)
        .bind(game_id)
        .execute(executor)
        .await;

    match result {
        Ok(_) => Ok(true),
        Err(err) if is_constraint_violation(&err) => {
            debug!("turn {} already taken by player {} in game {}: {}", turn_number, player_id, game_id, err);
            Ok(false)
        }
        Err(err) => Err(err),
    }
}

/// Appends a shot. Returns false when no matching turn record exists or the
/// player already has a shot in that turn.
pub async fn create_shot<'e, E>(executor: E, shot: &Shot) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = "INSERT INTO shot (turn, player, game, x, y, shot_type) VALUES (?, ?, ?, ?, ?, ?)";
    let result = sqlx::query(sql)
        .bind(shot.turn)
        .bind(shot.player)
        .bind(shot.game)
        .bind(shot.x)
        .bind(shot.y)
        .bind(&shot.shot_type)
        .execute(executor)
        .await;

    match result {
        Ok(_) => Ok(true),
        Err(err) if is_constraint_violation(&err) => {
            debug!("shot refused for turn {} of game {}: {}", shot.turn, shot.game, err);
            Ok(false)
        }
        Err(err) => Err(err),
    }
}

/// The whole ledger of a game, by turn number then insertion.
pub async fn get_shots<'e, E>(executor: E, game_id: GameId) -> Result<Vec<Shot>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{SHOT_COLUMNS} WHERE game = ? ORDER BY turn, rowid");
    sqlx::query_as::<_, Shot>(&sql)
        .bind(game_id)
        .fetch_all(executor)
        .await
}

pub async fn get_shots_by_turn<'e, E>(
    executor: E,
    game_id: GameId,
    turn_number: TurnNumber,
) -> Result<Vec<Shot>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{SHOT_COLUMNS} WHERE game = ? AND turn = ? ORDER BY rowid");
    sqlx::query_as::<_, Shot>(&sql)
        .bind(game_id)
        .bind(turn_number)
        .fetch_all(executor)
        .await
}
