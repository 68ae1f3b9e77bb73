//! Fleet evaluation: which players are still afloat and whether the game is over.

use std::collections::BTreeSet;

use bit_vec::BitVec;
use serde::{Deserialize, Serialize};

use crate::models::{game::Game, ship::Ship, shot::Shot, PlayerId};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
}

impl Cell {
    pub const fn new(x: i64, y: i64) -> Self {
        Cell { x, y }
    }

    /// All cells of the rectangle spanned by `a` and `b`, ends included.
    /// For an axis-aligned pair this is the straight segment between them.
    pub fn segment(a: Cell, b: Cell) -> Vec<Cell> {
        let (min_x, max_x) = (a.x.min(b.x), a.x.max(b.x));
        let (min_y, max_y) = (a.y.min(b.y), a.y.max(b.y));
        (min_x..=max_x)
            .flat_map(|x| (min_y..=max_y).map(move |y| Cell::new(x, y)))
            .collect()
    }
}

/// Board-sized bitmap of the cells hit by some shot.
///
/// Cells outside the board are never hit.
#[derive(Debug, Clone)]
pub struct HitMap {
    width: usize,
    height: usize,
    bits: BitVec,
}

impl HitMap {
    pub fn new(width: i64, height: i64) -> Self {
        let width = usize::try_from(width).unwrap_or(0);
        let height = usize::try_from(height).unwrap_or(0);
        HitMap {
            width,
            height,
            bits: BitVec::from_elem(width * height, false),
        }
    }

    /// The cells hit by anybody except `target`.
    pub fn enemy_fire(game: &Game, shots: &[Shot], target: PlayerId) -> Self {
        let mut hits = HitMap::new(game.x_size, game.y_size);
        shots
            .iter()
            .filter(|shot| shot.player != target)
            .for_each(|shot| hits.mark(Cell::new(shot.x, shot.y)));
        hits
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        let x = usize::try_from(cell.x).ok().filter(|x| *x < self.width)?;
        let y = usize::try_from(cell.y).ok().filter(|y| *y < self.height)?;
        Some(y * self.width + x)
    }

    pub fn mark(&mut self, cell: Cell) {
        if let Some(index) = self.index(cell) {
            self.bits.set(index, true);
        }
    }

    pub fn is_hit(&self, cell: Cell) -> bool {
        self.index(cell)
            .and_then(|index| self.bits.get(index))
            .unwrap_or(false)
    }

    pub fn is_sunk(&self, ship: &Ship) -> bool {
        ship.cells().into_iter().all(|cell| self.is_hit(cell))
    }
}

/// True when every cell of every ship `player` owns was hit by an opponent.
///
/// A player without ships has nothing to sink and is not defeated.
pub fn is_player_defeated(game: &Game, ships: &[Ship], shots: &[Shot], player: PlayerId) -> bool {
    let mut fleet = ships.iter().filter(|ship| ship.player == player).peekable();
    if fleet.peek().is_none() {
        return false;
    }

    let hits = HitMap::enemy_fire(game, shots, player);
    fleet.all(|ship| hits.is_sunk(ship))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continues { alive: BTreeSet<PlayerId> },
    Winner(PlayerId),
    /// The last fleets went down together.
    Draw,
}

impl Outcome {
    pub fn is_over(&self) -> bool {
        !matches!(self, Outcome::Continues { .. })
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            Outcome::Winner(player) => Some(*player),
            _ => None,
        }
    }
}

/// Decides whether the game is over given everything fired so far.
///
/// Nothing is decided before the first shot. After that the last fleet afloat
/// wins, also when its rivals have left the game instead of sinking.
pub fn check_game_end(
    game: &Game,
    roster: &BTreeSet<PlayerId>,
    ships: &[Ship],
    shots: &[Shot],
) -> Outcome {
    let alive: BTreeSet<PlayerId> = roster
        .iter()
        .copied()
        .filter(|player| !is_player_defeated(game, ships, shots, *player))
        .collect();

    if shots.is_empty() {
        return Outcome::Continues { alive };
    }

    let mut survivors = alive.iter().copied();
    match (survivors.next(), survivors.next()) {
        (None, _) => Outcome::Draw,
        (Some(winner), None) => Outcome::Winner(winner),
        (Some(_), Some(_)) => Outcome::Continues { alive },
    }
}
