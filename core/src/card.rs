use serde::{Deserialize, Serialize};

use crate::Symbol;

/// Face state of a single card on the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    #[default]
    Hidden,
    Shown,
    Matched,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    symbol: Symbol,
    face: CardFace,
}

impl Card {
    pub const fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            face: CardFace::Hidden,
        }
    }

    pub const fn symbol(self) -> Symbol {
        self.symbol
    }

    pub const fn face(self) -> CardFace {
        self.face
    }

    pub(crate) fn set_face(&mut self, face: CardFace) {
        self.face = face;
    }
}

/// What a renderer should draw for a card; the symbol is only exposed face up.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardView {
    Hidden,
    Shown(Symbol),
    Matched(Symbol),
}

impl From<Card> for CardView {
    fn from(card: Card) -> Self {
        match card.face {
            CardFace::Hidden => Self::Hidden,
            CardFace::Shown => Self::Shown(card.symbol),
            CardFace::Matched => Self::Matched(card.symbol),
        }
    }
}
