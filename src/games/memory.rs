//! Memory matching game (Encuentra las parejas).
//!
//! Theme choice builds a doubled, uniformly shuffled 12-card deck. At most
//! two cards may be face-up and unresolved; the second flip starts a short
//! processing lock during which further flips are rejected, after which the
//! pair either locks in as matched or flips back down.

use rand::Rng;
use rand::seq::SliceRandom;

use super::{Celebration, GameEvent};

pub const PROCESS_DELAY_MS: f64 = 800.0;
pub const COMPLETE_DELAY_MS: f64 = 500.0;
pub const PAIRS: usize = 6;

/// Theme catalog: (key, six faces doubled into the deck).
pub const THEMES: &[(&str, [&str; PAIRS])] = &[
    ("cars", ["🚗", "🚕", "🚙", "🚌", "🏎️", "🚓"]),
    ("bikes", ["🚲", "🛵", "🏍️", "🚵", "🚴", "🛴"]),
    ("mixed", ["🚗", "🚲", "🚁", "✈️", "🚤", "🚜"]),
];

/// Glyphs shown on the theme-select buttons, one per entry in [`THEMES`].
pub const THEME_BUTTONS: [&str; 3] = ["🏎️", "🏍️", "🚦"];

#[derive(Clone, Debug)]
pub struct MemoryCard {
    pub id: usize,
    pub face: &'static str,
    pub flipped: bool,
    pub matched: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FlipOutcome {
    Flipped,
    Ignored,
}

pub struct MemoryState {
    theme: Option<usize>,
    cards: Vec<MemoryCard>,
    // Indices of face-up unresolved cards; never more than two.
    flipped: Vec<usize>,
    matched_pairs: usize,
    resolve_at: Option<f64>,
    complete_at: Option<f64>,
    completed: bool,
}

impl MemoryState {
    /// Starts in the theme-select phase with no deck.
    pub fn new() -> Self {
        Self {
            theme: None,
            cards: Vec::new(),
            flipped: Vec::new(),
            matched_pairs: 0,
            resolve_at: None,
            complete_at: None,
            completed: false,
        }
    }

    pub fn is_choosing_theme(&self) -> bool {
        self.theme.is_none()
    }

    pub fn cards(&self) -> &[MemoryCard] {
        &self.cards
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    /// Build and shuffle the doubled deck for the chosen theme.
    pub fn start(&mut self, theme_idx: usize, rng: &mut impl Rng) {
        let Some(&(_, faces)) = THEMES.get(theme_idx) else {
            return;
        };
        let mut deck: Vec<&'static str> = Vec::with_capacity(PAIRS * 2);
        deck.extend_from_slice(&faces);
        deck.extend_from_slice(&faces);
        deck.shuffle(rng);

        self.theme = Some(theme_idx);
        self.cards = deck
            .into_iter()
            .enumerate()
            .map(|(id, face)| MemoryCard {
                id,
                face,
                flipped: false,
                matched: false,
            })
            .collect();
        self.flipped.clear();
        self.matched_pairs = 0;
        self.resolve_at = None;
        self.complete_at = None;
        self.completed = false;
    }

    /// Flip a card face-up. Rejected (not queued) while the processing lock
    /// is held, while two cards are already pending, and on face-up or
    /// matched cards.
    pub fn flip(&mut self, index: usize, now: f64) -> FlipOutcome {
        if self.resolve_at.is_some() || self.flipped.len() >= 2 {
            return FlipOutcome::Ignored;
        }
        let Some(card) = self.cards.get_mut(index) else {
            return FlipOutcome::Ignored;
        };
        if card.flipped || card.matched {
            return FlipOutcome::Ignored;
        }
        card.flipped = true;
        self.flipped.push(index);
        if self.flipped.len() == 2 {
            self.resolve_at = Some(now + PROCESS_DELAY_MS);
        }
        FlipOutcome::Flipped
    }

    pub fn tick(&mut self, now: f64) -> Option<GameEvent> {
        if let Some(at) = self.resolve_at {
            if now >= at {
                self.resolve_at = None;
                return self.resolve_pair(now);
            }
        }
        if let Some(at) = self.complete_at {
            if now >= at && !self.completed {
                self.completed = true;
                return Some(GameEvent::Completed);
            }
        }
        None
    }

    fn resolve_pair(&mut self, now: f64) -> Option<GameEvent> {
        let &[a, b] = self.flipped.as_slice() else {
            self.flipped.clear();
            return None;
        };
        self.flipped.clear();
        if self.cards[a].face == self.cards[b].face {
            self.cards[a].matched = true;
            self.cards[b].matched = true;
            self.matched_pairs += 1;
            if self.matched_pairs == PAIRS {
                self.complete_at = Some(now + COMPLETE_DELAY_MS);
            }
            Some(GameEvent::Celebrate(Celebration {
                particle_count: 30,
                spread: 40.0,
                origin_y: 0.6,
            }))
        } else {
            self.cards[a].flipped = false;
            self.cards[b].flipped = false;
            None
        }
    }
}
