//! Dice and the dice cup roll state machine.
//!
//! A cup moves `NotRolled(0) -> Rolled(1) -> Rolled(2) -> Final(3)` and never
//! goes back. Out-of-range hold requests and rolls on a final cup are no-ops
//! that return `None`, so duplicated client messages are harmless.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::domain::DomainError;

/// Number of dice in a cup.
pub const DICE_PER_CUP: usize = 5;

/// Rolls allowed per cup before it becomes final.
pub const MAX_ROLLS: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DieState {
    Free,
    Held,
}

impl DieState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DieState::Free => "Free",
            DieState::Held => "Held",
        }
    }
}

/// A single die. The face is unset until the first roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Die {
    value: Option<u8>,
    state: DieState,
}

impl Die {
    pub fn new() -> Self {
        Self {
            value: None,
            state: DieState::Free,
        }
    }

    pub fn value(&self) -> Option<u8> {
        self.value
    }

    pub fn state(&self) -> DieState {
        self.state
    }

    fn roll<R: Rng>(&mut self, rng: &mut R) {
        // An unset die always gets a face, even if it was held before the first roll.
        if self.state == DieState::Free || self.value.is_none() {
            self.value = Some(rng.random_range(1..=6));
        }
    }
}

impl Default for Die {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a successful roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollOutcome {
    pub dice: [u8; DICE_PER_CUP],
    pub roll_count: u8,
    pub is_final: bool,
}

/// Five dice plus the roll counter for the current turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceCup {
    dice: [Die; DICE_PER_CUP],
    roll_count: u8,
}

impl DiceCup {
    pub fn new() -> Self {
        Self {
            dice: [Die::new(); DICE_PER_CUP],
            roll_count: 0,
        }
    }

    /// Build a cup showing `values`, as if it had been rolled `roll_count` times.
    ///
    /// All dice start Free. Used to resume a known position and by tests.
    pub fn from_values(values: [u8; DICE_PER_CUP], roll_count: u8) -> Result<Self, DomainError> {
        if roll_count == 0 || roll_count > MAX_ROLLS {
            return Err(DomainError::validation(format!(
                "roll count must be within 1..={MAX_ROLLS}, got {roll_count}"
            )));
        }
        if let Some(bad) = values.iter().find(|v| !(1..=6).contains(*v)) {
            return Err(DomainError::validation(format!(
                "die value must be within 1..=6, got {bad}"
            )));
        }

        let dice = values.map(|value| Die {
            value: Some(value),
            state: DieState::Free,
        });
        Ok(Self { dice, roll_count })
    }

    pub fn dice(&self) -> &[Die; DICE_PER_CUP] {
        &self.dice
    }

    pub fn roll_count(&self) -> u8 {
        self.roll_count
    }

    pub fn is_rolled(&self) -> bool {
        self.roll_count > 0
    }

    pub fn is_final(&self) -> bool {
        self.roll_count == MAX_ROLLS
    }

    /// Face values, or `None` before the first roll.
    pub fn values(&self) -> Option<[u8; DICE_PER_CUP]> {
        let mut out = [0u8; DICE_PER_CUP];
        for (slot, die) in out.iter_mut().zip(self.dice.iter()) {
            *slot = die.value?;
        }
        Some(out)
    }

    /// Reroll every Free die. Returns `None` once the cup is final.
    pub fn roll<R: Rng>(&mut self, rng: &mut R) -> Option<RollOutcome> {
        if self.is_final() {
            return None;
        }

        for die in self.dice.iter_mut() {
            die.roll(rng);
        }
        self.roll_count += 1;

        Some(RollOutcome {
            dice: self.values()?,
            roll_count: self.roll_count,
            is_final: self.is_final(),
        })
    }

    /// Hold the die at `index`. Returns the new state, or `None` when out of range.
    pub fn hold(&mut self, index: usize) -> Option<DieState> {
        let die = self.dice.get_mut(index)?;
        die.state = DieState::Held;
        Some(die.state)
    }

    /// Release the die at `index`. Returns the new state, or `None` when out of range.
    pub fn unhold(&mut self, index: usize) -> Option<DieState> {
        let die = self.dice.get_mut(index)?;
        die.state = DieState::Free;
        Some(die.state)
    }

    /// Flip the die at `index` between Held and Free.
    pub fn toggle_hold(&mut self, index: usize) -> Option<DieState> {
        match self.dice.get(index)?.state {
            DieState::Held => self.unhold(index),
            DieState::Free => self.hold(index),
        }
    }
}

impl Default for DiceCup {
    fn default() -> Self {
        Self::new()
    }
}
