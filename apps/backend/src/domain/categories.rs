//! Scoring categories for both halves of the score sheet.
//!
//! Both categories arrive from clients as untyped input (an index for the
//! upper section, a name for the lower section) and are validated here before
//! they can reach the scoring dispatch.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpperCategory {
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
}

impl UpperCategory {
    pub const ALL: [UpperCategory; 6] = [
        UpperCategory::Ones,
        UpperCategory::Twos,
        UpperCategory::Threes,
        UpperCategory::Fours,
        UpperCategory::Fives,
        UpperCategory::Sixes,
    ];

    /// Die face this category counts.
    pub fn face(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Position on the sheet, 0 for Ones through 5 for Sixes.
    pub fn index(self) -> usize {
        match self {
            UpperCategory::Ones => 0,
            UpperCategory::Twos => 1,
            UpperCategory::Threes => 2,
            UpperCategory::Fours => 3,
            UpperCategory::Fives => 4,
            UpperCategory::Sixes => 5,
        }
    }
}

impl TryFrom<u8> for UpperCategory {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        UpperCategory::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| {
                DomainError::validation(format!("upper category out of range: {value}"))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LowerCategory {
    ThreeOfAKind,
    FourOfAKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    Chance,
    Yahtzee,
}

impl LowerCategory {
    pub const ALL: [LowerCategory; 7] = [
        LowerCategory::ThreeOfAKind,
        LowerCategory::FourOfAKind,
        LowerCategory::FullHouse,
        LowerCategory::SmallStraight,
        LowerCategory::LargeStraight,
        LowerCategory::Chance,
        LowerCategory::Yahtzee,
    ];

    /// Wire name, as sent by clients.
    pub fn as_str(self) -> &'static str {
        match self {
            LowerCategory::ThreeOfAKind => "threeOfAKind",
            LowerCategory::FourOfAKind => "fourOfAKind",
            LowerCategory::FullHouse => "fullHouse",
            LowerCategory::SmallStraight => "smallStraight",
            LowerCategory::LargeStraight => "largeStraight",
            LowerCategory::Chance => "chance",
            LowerCategory::Yahtzee => "yahtzee",
        }
    }

    pub fn index(self) -> usize {
        match self {
            LowerCategory::ThreeOfAKind => 0,
            LowerCategory::FourOfAKind => 1,
            LowerCategory::FullHouse => 2,
            LowerCategory::SmallStraight => 3,
            LowerCategory::LargeStraight => 4,
            LowerCategory::Chance => 5,
            LowerCategory::Yahtzee => 6,
        }
    }
}

impl fmt::Display for LowerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LowerCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LowerCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Category, format!("unknown category '{s}'"))
            })
    }
}
