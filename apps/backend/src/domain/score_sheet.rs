//! Per-game score sheet. Every entry is written at most once.

use crate::domain::categories::{LowerCategory, UpperCategory};
use crate::domain::dice::DiceCup;
use crate::domain::lower_scoring::{lower_score, upper_score};

/// Upper section total needed to earn the bonus.
pub const UPPER_BONUS_THRESHOLD: u32 = 63;
pub const UPPER_BONUS: u32 = 35;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreSheet {
    upper: [Option<u32>; 6],
    lower: [Option<u32>; 7],
}

impl ScoreSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upper(&self, category: UpperCategory) -> Option<u32> {
        self.upper[category.index()]
    }

    pub fn lower(&self, category: LowerCategory) -> Option<u32> {
        self.lower[category.index()]
    }

    /// Score `cup` into an upper category.
    ///
    /// Returns the recorded points, or `None` when the cup has not been rolled
    /// or the category is already filled. A filled entry never changes.
    pub fn record_upper(&mut self, category: UpperCategory, cup: &DiceCup) -> Option<u32> {
        let faces = cup.values()?;
        let slot = &mut self.upper[category.index()];
        if slot.is_some() {
            return None;
        }
        let score = upper_score(category, &faces);
        *slot = Some(score);
        Some(score)
    }

    /// Score `cup` into a lower category, with the same guards as `record_upper`.
    pub fn record_lower(&mut self, category: LowerCategory, cup: &DiceCup) -> Option<u32> {
        let faces = cup.values()?;
        let slot = &mut self.lower[category.index()];
        if slot.is_some() {
            return None;
        }
        let score = lower_score(category, &faces);
        *slot = Some(score);
        Some(score)
    }

    pub fn is_upper_section_complete(&self) -> bool {
        self.upper.iter().all(Option::is_some)
    }

    pub fn is_lower_section_complete(&self) -> bool {
        self.lower.iter().all(Option::is_some)
    }

    pub fn is_complete(&self) -> bool {
        self.is_upper_section_complete() && self.is_lower_section_complete()
    }

    pub fn upper_section_total(&self) -> u32 {
        self.upper.iter().flatten().sum()
    }

    pub fn upper_section_bonus(&self) -> u32 {
        if self.upper_section_total() >= UPPER_BONUS_THRESHOLD {
            UPPER_BONUS
        } else {
            0
        }
    }

    pub fn upper_section_total_with_bonus(&self) -> u32 {
        self.upper_section_total() + self.upper_section_bonus()
    }

    pub fn lower_section_total(&self) -> u32 {
        self.lower.iter().flatten().sum()
    }

    pub fn grand_total(&self) -> u32 {
        self.upper_section_total_with_bonus() + self.lower_section_total()
    }
}
