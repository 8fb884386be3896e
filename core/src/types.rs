use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::GameError;

/// Board position of a card, stable for the lifetime of a deal.
pub type Pos = u8;

/// Count type used for pairs on a board.
pub type PairCount = u8;

/// Count of completed pair comparisons.
pub type MoveCount = u32;

/// Fixed alphabet every deck draws its symbols from, in draw order.
pub const ALPHABET: [&str; 12] = [
    "🍎", "🍌", "🍒", "🍇", "🍉", "🍋", "🥝", "🍍", "🍑", "🥥", "🍓", "🫐",
];

/// Identity token shared by the two cards of a pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol(u8);

impl Symbol {
    pub const fn nth(index: u8) -> Option<Self> {
        if (index as usize) < ALPHABET.len() {
            Some(Self(index))
        } else {
            None
        }
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    pub const fn glyph(self) -> &'static str {
        ALPHABET[self.0 as usize]
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 2] = [Self::Easy, Self::Hard];

    pub const fn total_pairs(self) -> PairCount {
        match self {
            Self::Easy => 6,
            Self::Hard => 12,
        }
    }

    pub const fn total_cards(self) -> usize {
        2 * self.total_pairs() as usize
    }

    /// The first `total_pairs` symbols of the alphabet.
    pub fn symbols(self) -> impl Iterator<Item = Symbol> {
        (0..self.total_pairs()).map(Symbol)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Hard => "hard",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy (6 pairs)",
            Self::Hard => "Hard (12 pairs)",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or(GameError::UnknownDifficulty)
    }
}
