//! Lower section scoring dispatch.
//!
//! Each `LowerCategory` maps to exactly one scorer over the five die faces.
//! The match is exhaustive, so adding a category without a scorer does not
//! compile; unknown client names are rejected earlier by `LowerCategory::from_str`.

use crate::domain::categories::{LowerCategory, UpperCategory};
use crate::domain::combinations::{has_of_a_kind, has_straight, is_full_house, is_yahtzee};
use crate::domain::dice::DICE_PER_CUP;

pub const FULL_HOUSE_SCORE: u32 = 25;
pub const SMALL_STRAIGHT_SCORE: u32 = 30;
pub const LARGE_STRAIGHT_SCORE: u32 = 40;
pub const YAHTZEE_SCORE: u32 = 50;

const SMALL_STRAIGHT_LENGTH: usize = 4;
const LARGE_STRAIGHT_LENGTH: usize = 5;

pub type Faces = [u8; DICE_PER_CUP];

/// Scoring function for one lower category.
pub type LowerScorer = fn(&Faces) -> u32;

fn sum(faces: &Faces) -> u32 {
    faces.iter().map(|&f| f as u32).sum()
}

fn three_of_a_kind(faces: &Faces) -> u32 {
    if has_of_a_kind(faces, 3) {
        sum(faces)
    } else {
        0
    }
}

fn four_of_a_kind(faces: &Faces) -> u32 {
    if has_of_a_kind(faces, 4) {
        sum(faces)
    } else {
        0
    }
}

fn full_house(faces: &Faces) -> u32 {
    if is_full_house(faces) {
        FULL_HOUSE_SCORE
    } else {
        0
    }
}

fn small_straight(faces: &Faces) -> u32 {
    if has_straight(faces, SMALL_STRAIGHT_LENGTH) {
        SMALL_STRAIGHT_SCORE
    } else {
        0
    }
}

fn large_straight(faces: &Faces) -> u32 {
    if has_straight(faces, LARGE_STRAIGHT_LENGTH) {
        LARGE_STRAIGHT_SCORE
    } else {
        0
    }
}

fn yahtzee(faces: &Faces) -> u32 {
    if is_yahtzee(faces) {
        YAHTZEE_SCORE
    } else {
        0
    }
}

/// The scorer registered for `category`.
pub fn scorer_for(category: LowerCategory) -> LowerScorer {
    match category {
        LowerCategory::ThreeOfAKind => three_of_a_kind,
        LowerCategory::FourOfAKind => four_of_a_kind,
        LowerCategory::FullHouse => full_house,
        LowerCategory::SmallStraight => small_straight,
        LowerCategory::LargeStraight => large_straight,
        LowerCategory::Chance => sum,
        LowerCategory::Yahtzee => yahtzee,
    }
}

/// Points `faces` would earn in a lower category.
pub fn lower_score(category: LowerCategory, faces: &Faces) -> u32 {
    scorer_for(category)(faces)
}

/// Points `faces` would earn in an upper category: matching dice times the face.
pub fn upper_score(category: UpperCategory, faces: &Faces) -> u32 {
    let face = category.face();
    faces.iter().filter(|&&f| f == face).count() as u32 * face as u32
}
