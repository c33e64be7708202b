//! Card play: hands dealt from a shuffled deck, with a result recorded for each hand.

use game24_compute::{solve, Expr};
use rand::Rng;
use std::fmt;

/// The number of cards in a deck.
pub const DECK_SIZE: usize = 52;

/// Options for dealing hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayOptions {
    /// The number of cards in a hand.
    pub count: usize,

    /// Whether jacks, queens and kings count as 10 instead of 11, 12 and 13.
    pub face_to_ten: bool,

    /// Whether hands are shown as playing card glyphs instead of numbers.
    pub show_cards: bool,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            count: 4,
            face_to_ten: false,
            show_cards: false,
        }
    }
}

/// The suit of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    const ALL: [Self; 4] = [Self::Spades, Self::Hearts, Self::Diamonds, Self::Clubs];

    /// The code point of the ace of this suit in the Unicode playing cards block.
    fn ace(self) -> u32 {
        match self {
            Self::Spades => 0x1f0a1,
            Self::Hearts => 0x1f0b1,
            Self::Diamonds => 0x1f0c1,
            Self::Clubs => 0x1f0d1,
        }
    }
}

/// A playing card. Aces are rank 1 and kings rank 13.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    rank: u8,
    suit: Suit,
}

impl Card {
    /// The number the card stands for in a hand.
    pub fn value(self, face_to_ten: bool) -> u64 {
        if face_to_ten && self.rank > 10 {
            10
        } else {
            u64::from(self.rank)
        }
    }

    /// The Unicode glyph for the card. The block has a knight between the jack and the queen,
    /// which is skipped.
    fn glyph(self) -> Option<char> {
        let knight = u32::from(self.rank > 11);
        char::from_u32(self.suit.ace() + u32::from(self.rank) - 1 + knight)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.glyph() {
            Some(glyph) => write!(f, "{}", glyph),
            None => write!(f, "{}", self.rank),
        }
    }
}

/// Returns a full deck, ordered by rank.
fn deck() -> Vec<Card> {
    (1..=13)
        .flat_map(|rank| Suit::ALL.map(|suit| Card { rank, suit }))
        .collect()
}

/// How the player did on a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandResult {
    /// Solved without hints.
    Solved,

    /// Solved after asking for a hint.
    Hinted,

    /// Skipped, given up on, or not solved yet.
    Failed,
}

/// A dealt hand and the player's progress on it.
#[derive(Debug)]
pub struct Hand {
    cards: Vec<Card>,
    values: Vec<u64>,
    target: i64,
    answers: Vec<Expr>,
    next_hint: usize,
    hinted: bool,
    result: HandResult,
}

impl Hand {
    fn new(cards: Vec<Card>, face_to_ten: bool, target: i64) -> Self {
        let values = cards.iter().map(|card| card.value(face_to_ten)).collect::<Vec<_>>();
        Self {
            answers: solve(&values, target),
            cards,
            values,
            target,
            next_hint: 0,
            hinted: false,
            result: HandResult::Failed,
        }
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn answers(&self) -> &[Expr] {
        &self.answers
    }

    pub fn result(&self) -> HandResult {
        self.result
    }

    /// Returns the next solution to hint at, cycling through them. Asking marks the hand as
    /// hinted, even if there is nothing to hint at.
    pub fn hint(&mut self) -> Option<&Expr> {
        self.hinted = true;
        if self.answers.is_empty() {
            return None;
        }

        let answer = &self.answers[self.next_hint % self.answers.len()];
        self.next_hint += 1;
        Some(answer)
    }

    /// Records that the player solved the hand.
    pub fn solved(&mut self) {
        self.result = if self.hinted { HandResult::Hinted } else { HandResult::Solved };
    }

    /// The hand as shown to the player, either as card glyphs or as numbers.
    pub fn describe(&self, show_cards: bool) -> String {
        if show_cards {
            self.cards.iter().map(ToString::to_string).collect::<Vec<_>>().join("  ")
        } else {
            self.values.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
        }
    }
}

/// The results of the hands of a set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub solved: usize,
    pub hinted: usize,
    pub failed: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Total {} hands solved", self.solved)?;
        writeln!(f, "Total {} hands solved with hint", self.hinted)?;
        write!(f, "Total {} hands failed to solve", self.failed)
    }
}

/// Hands dealt from one deck at a time. A set ends when the deck has fewer cards left than a hand
/// needs.
#[derive(Debug)]
pub struct Game {
    options: PlayOptions,
    deck: Vec<Card>,
    hands: Vec<Hand>,
    set: usize,
}

impl Game {
    /// Starts the first set. The hand size is clamped to the size of the deck.
    pub fn new(mut options: PlayOptions) -> Self {
        options.count = options.count.clamp(1, DECK_SIZE);
        let mut game = Self {
            options,
            deck: Vec::new(),
            hands: Vec::new(),
            set: 0,
        };
        game.reset();
        game
    }

    /// Starts a new set with a full deck.
    pub fn reset(&mut self) {
        self.deck = deck();
        self.hands.clear();
        self.set += 1;
    }

    pub fn options(&self) -> &PlayOptions {
        &self.options
    }

    /// The number of the current set, starting from 1.
    pub fn set(&self) -> usize {
        self.set
    }

    /// The hands dealt in this set, the current one last.
    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    pub fn is_set_end(&self) -> bool {
        self.deck.len() < self.options.count
    }

    /// Deals a hand of random cards from the deck. Returns [`None`] at the end of the set.
    pub fn deal(&mut self, rng: &mut impl Rng, target: i64) -> Option<&mut Hand> {
        if self.is_set_end() {
            return None;
        }

        let cards = (0..self.options.count)
            .map(|_| {
                let index = rng.gen_range(0..self.deck.len());
                self.deck.swap_remove(index)
            })
            .collect();
        self.hands.push(Hand::new(cards, self.options.face_to_ten, target));
        self.hands.last_mut()
    }

    pub fn current_mut(&mut self) -> Option<&mut Hand> {
        self.hands.last_mut()
    }

    /// Counts the results of the hands dealt in this set.
    pub fn summary(&self) -> Summary {
        self.hands.iter().fold(Summary::default(), |mut summary, hand| {
            match hand.result() {
                HandResult::Solved => summary.solved += 1,
                HandResult::Hinted => summary.hinted += 1,
                HandResult::Failed => summary.failed += 1,
            }
            summary
        })
    }
}
