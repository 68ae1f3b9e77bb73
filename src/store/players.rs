use sqlx::{Executor, Sqlite};

use crate::models::{player::Player, GameId, PlayerId};

pub async fn create_player<'e, E>(
    executor: E,
    nickname: &str,
    game_id: GameId,
) -> Result<PlayerId, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("INSERT INTO player (nickname, game) VALUES (?, ?)")
        .bind(nickname)
        .bind(game_id)
        .execute(executor)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_player<'e, E>(
    executor: E,
    game_id: GameId,
    player_id: PlayerId,
) -> Result<Option<Player>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Player>("SELECT id, nickname, game FROM player WHERE game = ? AND id = ?")
        .bind(game_id)
        .bind(player_id)
        .fetch_optional(executor)
        .await
}

pub async fn get_players<'e, E>(executor: E, game_id: GameId) -> Result<Vec<Player>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Player>("SELECT id, nickname, game FROM player WHERE game = ? ORDER BY id")
        .bind(game_id)
        .fetch_all(executor)
        .await
}

/// Removes a player along with their ships. Their shots stay in the ledger.
pub async fn delete_player<'e, E>(
    executor: E,
    game_id: GameId,
    player_id: PlayerId,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM player WHERE game = ? AND id = ?")
        .bind(game_id)
        .bind(player_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() == 1)
}
