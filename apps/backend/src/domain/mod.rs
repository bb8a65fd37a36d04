//! Domain layer: pure game rules, no I/O.

pub mod categories;
pub mod combinations;
pub mod dice;
pub mod lower_scoring;
pub mod score_sheet;


// Re-exports for ergonomics
pub use categories::{LowerCategory, UpperCategory};
pub use dice::{DiceCup, Die, DieState, RollOutcome, DICE_PER_CUP, MAX_ROLLS};
pub use score_sheet::ScoreSheet;
