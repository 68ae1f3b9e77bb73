use axum::{http::StatusCode, response::IntoResponse, Json};
use log::error;
use serde_json::json;

use crate::engine::RefereeError;

// Custom Errors used in handlers
#[derive(Debug)]
pub enum CustomError {
    GameNotFound,
    PlayerNotFound,
    GameEnded,
    NotEnoughPlayers,
    FleetSunk,
    IllegalBoardSize,
    InvalidTurnLength,
    OutOfBounds,
    ShipNotAligned,
    ShipOverlap,
    NotYourTurn,
    InternalServerError,
}

impl CustomError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::GameNotFound | Self::PlayerNotFound => StatusCode::NOT_FOUND,
            Self::GameEnded | Self::NotEnoughPlayers | Self::FleetSunk => StatusCode::CONFLICT,
            Self::NotYourTurn => StatusCode::FORBIDDEN,
            Self::IllegalBoardSize
            | Self::InvalidTurnLength
            | Self::OutOfBounds
            | Self::ShipNotAligned
            | Self::ShipOverlap => StatusCode::BAD_REQUEST,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::InternalServerError => "Internal Server Error",
            Self::GameNotFound => "Game not Found",
            Self::PlayerNotFound => "Player not Found",
            Self::GameEnded => "Game has already ended",
            Self::NotEnoughPlayers => "Game needs at least two players to start",
            Self::FleetSunk => "Player's fleet has already been sunk",
            Self::IllegalBoardSize => "Board size must be between 2 and 26",
            Self::InvalidTurnLength => "Turn length must be positive",
            Self::OutOfBounds => "Coordinates are outside the board",
            Self::ShipNotAligned => "Ship must lie on a single row or column",
            Self::ShipOverlap => "Ship overlaps another ship of the same player",
            Self::NotYourTurn => "Not this player's turn",
        }
    }
}

//implementation of custom errors that are used in handlers
impl IntoResponse for CustomError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(json!({"error": self.message()}))).into_response()
    }
}

// Storage failures are logged here and never shown to the client
impl From<sqlx::Error> for CustomError {
    fn from(err: sqlx::Error) -> Self {
        error!("Database error: {:?}", err);
        CustomError::InternalServerError
    }
}

impl From<RefereeError> for CustomError {
    fn from(err: RefereeError) -> Self {
        match err {
            RefereeError::GameNotFound => CustomError::GameNotFound,
            RefereeError::GameEnded => CustomError::GameEnded,
            RefereeError::PlayerNotFound => CustomError::PlayerNotFound,
            RefereeError::OutOfBounds => CustomError::OutOfBounds,
            RefereeError::NotYourTurn { .. } => CustomError::NotYourTurn,
            RefereeError::WaitingForPlayers => CustomError::NotEnoughPlayers,
            RefereeError::Inconsistent => {
                error!("Turn recorded without its shot, transaction rolled back");
                CustomError::InternalServerError
            }
            RefereeError::Storage(err) => err.into(),
        }
    }
}
