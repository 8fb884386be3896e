use alloc::vec::Vec;
use core::ops::Index;
use serde::{Deserialize, Serialize};

use crate::*;

/// Ordered cards of a single deal. Positions index into this sequence.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    /// Builds a board from an already ordered symbol list, checking that every
    /// symbol appears exactly twice.
    pub fn from_symbols(symbols: &[Symbol]) -> Result<Self> {
        if symbols.len() > Pos::MAX as usize + 1 {
            return Err(GameError::InvalidBoard);
        }

        let mut counts = [0u8; ALPHABET.len()];
        for symbol in symbols {
            let count = &mut counts[symbol.index() as usize];
            if *count == 2 {
                return Err(GameError::InvalidBoard);
            }
            *count += 1;
        }
        if counts.iter().any(|&count| count == 1) {
            return Err(GameError::InvalidBoard);
        }

        Ok(Self::from_symbols_unchecked(symbols))
    }

    pub(crate) fn from_symbols_unchecked(symbols: &[Symbol]) -> Self {
        Self {
            cards: symbols.iter().copied().map(Card::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn total_pairs(&self) -> PairCount {
        (self.cards.len() / 2) as PairCount
    }

    pub fn validate_pos(&self, pos: Pos) -> Result<Pos> {
        if (pos as usize) < self.cards.len() {
            Ok(pos)
        } else {
            Err(GameError::InvalidPosition)
        }
    }

    pub fn card_at(&self, pos: Pos) -> Option<Card> {
        self.cards.get(pos as usize).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied()
    }

    pub(crate) fn set_face(&mut self, pos: Pos, face: CardFace) {
        self.cards[pos as usize].set_face(face);
    }
}

impl Index<Pos> for Board {
    type Output = Card;

    fn index(&self, pos: Pos) -> &Self::Output {
        &self.cards[pos as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(index: u8) -> Symbol {
        Symbol::nth(index).unwrap()
    }

    #[test]
    fn board_rejects_unpaired_symbols() {
        assert_eq!(
            Board::from_symbols(&[sym(0), sym(1)]),
            Err(GameError::InvalidBoard)
        );
        assert_eq!(
            Board::from_symbols(&[sym(0), sym(0), sym(0)]),
            Err(GameError::InvalidBoard)
        );
    }

    #[test]
    fn board_rejects_many_copies_of_one_symbol() {
        let four = [sym(5); 4];
        assert_eq!(Board::from_symbols(&four), Err(GameError::InvalidBoard));

        let full = alloc::vec![sym(0); Pos::MAX as usize + 1];
        assert_eq!(Board::from_symbols(&full), Err(GameError::InvalidBoard));
    }

    #[test]
    fn board_starts_face_down() {
        let board = Board::from_symbols(&[sym(3), sym(2), sym(3), sym(2)]).unwrap();

        assert_eq!(board.len(), 4);
        assert_eq!(board.total_pairs(), 2);
        assert!(board.iter().all(|card| card.face() == CardFace::Hidden));
        assert_eq!(board[2].symbol(), sym(3));
    }

    #[test]
    fn out_of_range_position_is_invalid() {
        let board = Board::from_symbols(&[sym(0), sym(0)]).unwrap();

        assert_eq!(board.validate_pos(1), Ok(1));
        assert_eq!(board.validate_pos(2), Err(GameError::InvalidPosition));
        assert_eq!(board.card_at(2), None);
    }
}
