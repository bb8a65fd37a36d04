pub mod game_statistics;

pub use game_statistics::Entity as GameStatistics;
