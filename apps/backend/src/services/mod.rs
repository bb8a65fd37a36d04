//! Service layer: session ownership, the game engine façade and the
//! statistics hand-off.

pub mod game_engine;
pub mod sessions;
pub mod statistics;

#[cfg(test)]
mod tests_game_engine;

pub use game_engine::{GameEngine, HoldToggled, LowerScored, UpperScored};
pub use sessions::{ConnectionId, GameSession, SessionFactory, SessionRegistry, UserId};
pub use statistics::{CompletedGame, DbStatisticsSink, LogStatisticsSink, StatisticsSink};
