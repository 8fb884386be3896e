#![no_std]

extern crate alloc;

use alloc::format;
use alloc::string::String;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use card::*;
pub use controller::*;
pub use deck::*;
pub use engine::*;
pub use error::*;
pub use schedule::*;
pub use scores::*;
pub use types::*;

mod board;
mod card;
mod controller;
mod deck;
mod engine;
mod error;
mod schedule;
mod scores;
mod types;

bitflags! {
    /// Which user controls a renderer should offer in the current state.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Controls: u8 {
        const START      = 1;
        const RESTART    = 1 << 1;
        const DIFFICULTY = 1 << 2;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    Ignored,
    Flipped,
    Matched,
    Mismatched(Generation),
    Won,
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        use SelectOutcome::*;
        match self {
            Ignored => false,
            Flipped => true,
            Matched => true,
            Mismatched(_) => true,
            Won => true,
        }
    }
}

/// Formats elapsed seconds as zero-padded `MM:SS`.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
