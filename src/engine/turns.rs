//! Simultaneous-round turn sequencing.
//!
//! Every player present in a game fires at most once per turn number. A new
//! turn only opens once every current player has fired in the latest one, and
//! then whoever fires first opens it. No ordering among players is imposed
//! inside a round.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{PlayerId, TurnNumber};

/// Where a game stands with respect to its latest turn.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Round {
    /// Nobody has fired yet; the first shot opens turn 0.
    Initial,
    /// Some current players have not fired during `turn` yet.
    Open {
        turn: TurnNumber,
        waiting: BTreeSet<PlayerId>,
    },
    /// Every current player has fired during `turn`; the next shot opens `turn + 1`.
    Complete { turn: TurnNumber },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnViolation {
    /// The shooter is not part of the game's roster.
    NotInGame,
    /// The shooter already fired during `turn` and somebody else still has to.
    AlreadyFired { turn: TurnNumber },
}

impl Round {
    /// Builds the round state from the latest turn number, the players that
    /// fired during it and the players currently in the game.
    ///
    /// Shooters that have since left the game do not count towards completing
    /// the round, and never hold it open either.
    pub fn new(
        latest: Option<TurnNumber>,
        fired: &BTreeSet<PlayerId>,
        roster: &BTreeSet<PlayerId>,
    ) -> Round {
        let Some(turn) = latest else {
            return Round::Initial;
        };
        let waiting: BTreeSet<PlayerId> = roster.difference(fired).copied().collect();
        if waiting.is_empty() {
            Round::Complete { turn }
        } else {
            Round::Open { turn, waiting }
        }
    }

    /// Decides which turn a shot from `shooter` belongs to, or why it has to wait.
    pub fn admit(
        &self,
        shooter: PlayerId,
        roster: &BTreeSet<PlayerId>,
    ) -> Result<TurnNumber, TurnViolation> {
        // Also covers the empty roster: nobody can be admitted into it.
        if !roster.contains(&shooter) {
            return Err(TurnViolation::NotInGame);
        }

        match self {
            Round::Initial => Ok(0),
            Round::Complete { turn } => Ok(turn + 1),
            Round::Open { turn, waiting } if waiting.contains(&shooter) => Ok(*turn),
            Round::Open { turn, .. } => Err(TurnViolation::AlreadyFired { turn: *turn }),
        }
    }

    /// The latest turn number, if any shot was ever fired.
    pub fn turn(&self) -> Option<TurnNumber> {
        match self {
            Round::Initial => None,
            Round::Open { turn, .. } | Round::Complete { turn } => Some(*turn),
        }
    }
}
