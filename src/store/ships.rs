use sqlx::{Executor, Sqlite};

use crate::models::{
    ship::{NewShip, Ship},
    GameId, PlayerId, ShipId,
};

const SHIP_COLUMNS: &str =
    "SELECT id, player, game, stern_x, stern_y, bow_x, bow_y, ship_type FROM ship";

pub async fn create_ship<'e, E>(
    executor: E,
    game_id: GameId,
    ship: &NewShip,
) -> Result<ShipId, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = "INSERT INTO ship (player, game, stern_x, stern_y, bow_x, bow_y, ship_type) \
               VALUES (?, ?, ?, ?, ?, ?, ?)";
    let result = sqlx::query(sql)
        .bind(ship.player_id)
        .bind(game_id)
        .bind(ship.stern_x)
        .bind(ship.stern_y)
        .bind(ship.bow_x)
        .bind(ship.bow_y)
        .bind(&ship.ship_type)
        .execute(executor)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_ship<'e, E>(executor: E, ship_id: ShipId) -> Result<Option<Ship>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{SHIP_COLUMNS} WHERE id = ?");
    sqlx::query_as::<_, Ship>(&sql)
        .bind(ship_id)
        .fetch_optional(executor)
        .await
}

pub async fn get_ships<'e, E>(executor: E, game_id: GameId) -> Result<Vec<Ship>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{SHIP_COLUMNS} WHERE game = ? ORDER BY id");
    sqlx::query_as::<_, Ship>(&sql)
        .bind(game_id)
        .fetch_all(executor)
        .await
}

pub async fn get_ships_by_player<'e, E>(
    executor: E,
    game_id: GameId,
    player_id: PlayerId,
) -> Result<Vec<Ship>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{SHIP_COLUMNS} WHERE game = ? AND player = ? ORDER BY id");
    sqlx::query_as::<_, Ship>(&sql)
        .bind(game_id)
        .bind(player_id)
        .fetch_all(executor)
        .await
}
