//! Persistence functions over sea-orm connections.

pub mod game_statistics;
