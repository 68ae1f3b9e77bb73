pub mod fleet;
pub mod referee;
pub mod turns;

pub use fleet::Outcome;
pub use referee::{GameLocks, RefereeError};
pub use turns::{Round, TurnViolation};
