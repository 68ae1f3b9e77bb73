use chrono::{DateTime, Utc};
use sqlx::{Executor, Sqlite};

use crate::models::{game::Game, GameId};

const GAME_COLUMNS: &str = "SELECT id, start_time, end_time, x_size, y_size, turn_length FROM game";

pub async fn create_game<'e, E>(
    executor: E,
    x_size: i64,
    y_size: i64,
    turn_length: i64,
) -> Result<GameId, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = "INSERT INTO game (start_time, x_size, y_size, turn_length) VALUES (?, ?, ?, ?)";
    let result = sqlx::query(sql)
        .bind(Utc::now())
        .bind(x_size)
        .bind(y_size)
        .bind(turn_length)
        .execute(executor)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_game<'e, E>(executor: E, game_id: GameId) -> Result<Option<Game>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{GAME_COLUMNS} WHERE id = ?");
    sqlx::query_as::<_, Game>(&sql)
        .bind(game_id)
        .fetch_optional(executor)
        .await
}

pub async fn get_games<'e, E>(executor: E) -> Result<Vec<Game>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{GAME_COLUMNS} ORDER BY id");
    sqlx::query_as::<_, Game>(&sql).fetch_all(executor).await
}

/// Stamps the end time of a running game. Returns false when the game does
/// not exist or has already ended, so the end time is only ever written once.
pub async fn end_game<'e, E>(
    executor: E,
    game_id: GameId,
    at: DateTime<Utc>,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = "UPDATE game SET end_time = ? WHERE id = ? AND end_time IS NULL";
    let result = sqlx::query(sql)
        .bind(at)
        .bind(game_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() == 1)
}

/// Deletes a game together with its players, ships, turns and shots.
pub async fn delete_game<'e, E>(executor: E, game_id: GameId) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM game WHERE id = ?")
        .bind(game_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() == 1)
}
