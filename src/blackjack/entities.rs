//! Cards, the shoe, and hand scoring.

use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Target score; any hand above this is bust.
pub const BLACKJACK_SCORE: u32 = 21;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Self; 4] = [Self::Hearts, Self::Diamonds, Self::Clubs, Self::Spades];
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Hearts => "♥",
            Self::Diamonds => "♦",
            Self::Clubs => "♣",
            Self::Spades => "♠",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Self; 13] = [
        Self::Ace,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
    ];

    /// Numeric value before any soft-ace reduction: aces are 11, face
    /// cards 10, the rest literal.
    #[must_use]
    pub const fn value(self) -> u32 {
        match self {
            Self::Ace => 11,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
            Self::Six => 6,
            Self::Seven => 7,
            Self::Eight => 8,
            Self::Nine => 9,
            Self::Ten | Self::Jack | Self::Queen | Self::King => 10,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Ace => "A",
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
            other => return write!(f, "{}", other.value()),
        };
        write!(f, "{repr}")
    }
}

/// An immutable playing card.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// A 52-card shoe, dealt from the front.
///
/// A single blackjack round cannot come close to exhausting it: two hands
/// capped at 21 together consume well under half the shoe.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: [Card; 52],
    next: usize,
}

impl Deck {
    /// Deal the next card.
    pub fn deal(&mut self) -> Card {
        let card = self.cards[self.next];
        self.next += 1;
        card
    }

    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
        self.next = 0;
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.next
    }
}

impl Default for Deck {
    fn default() -> Self {
        let mut cards = [Card {
            rank: Rank::Ace,
            suit: Suit::Hearts,
        }; 52];
        for (i, rank) in Rank::ALL.into_iter().enumerate() {
            for (j, suit) in Suit::ALL.into_iter().enumerate() {
                cards[4 * i + j] = Card { rank, suit };
            }
        }
        Self { cards, next: 0 }
    }
}

/// One party's cards. Only ever grows; cards are never taken back.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Score under soft-ace rules: aces count 11, then while the total
    /// exceeds 21 each unsoftened ace in turn is reinterpreted as 1.
    #[must_use]
    pub fn score(&self) -> u32 {
        let mut total: u32 = self.cards.iter().map(|card| card.rank.value()).sum();
        let mut soft_aces = self
            .cards
            .iter()
            .filter(|card| card.rank == Rank::Ace)
            .count();
        while total > BLACKJACK_SCORE && soft_aces > 0 {
            total -= 10;
            soft_aces -= 1;
        }
        total
    }

    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.score() > BLACKJACK_SCORE
    }

    /// A two-card 21.
    #[must_use]
    pub fn is_natural(&self) -> bool {
        self.cards.len() == 2 && self.score() == BLACKJACK_SCORE
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}
