//! Odd-one-out quiz (Encuentra el Intruso).
//!
//! Fixed level sequence of four options each; picking the designated odd
//! option advances, the wrong one shakes briefly. Clearing the last level
//! completes the game and rewinds to level 0 for the next session.

use super::{Celebration, GameEvent};

pub const SHAKE_MS: f64 = 500.0;
pub const ADVANCE_DELAY_MS: f64 = 1000.0;
pub const COMPLETE_DELAY_MS: f64 = 500.0;

pub struct OddLevel {
    pub items: [&'static str; 4],
    pub correct: usize,
    pub question: &'static str,
}

pub const LEVELS: &[OddLevel] = &[
    OddLevel {
        items: ["🍎", "🍌", "👟", "🍇"],
        correct: 2,
        question: "¿Cuál NO es una fruta?",
    },
    OddLevel {
        items: ["🐱", "🐶", "🐮", "🚗"],
        correct: 3,
        question: "¿Cuál NO es un animal?",
    },
    OddLevel {
        items: ["🍕", "🚲", "🛹", "🛴"],
        correct: 0,
        question: "¿Cuál NO sirve para moverse?",
    },
    OddLevel {
        items: ["⚽", "🍔", "🏀", "🎾"],
        correct: 1,
        question: "¿Cuál NO es un deporte?",
    },
    OddLevel {
        items: ["🌞", "🌙", "⭐", "🍎"],
        correct: 3,
        question: "¿Cuál NO está en el cielo?",
    },
];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AnswerOutcome {
    Correct,
    Wrong,
    Ignored,
}

pub struct OddOneOutState {
    level: usize,
    shake: Option<(usize, f64)>,
    advance_at: Option<f64>,
    complete_at: Option<f64>,
    completed: bool,
}

impl OddOneOutState {
    pub fn new() -> Self {
        Self {
            level: 0,
            shake: None,
            advance_at: None,
            complete_at: None,
            completed: false,
        }
    }

    pub fn level_index(&self) -> usize {
        self.level
    }

    pub fn current(&self) -> &'static OddLevel {
        &LEVELS[self.level]
    }

    /// Option currently shaking from a wrong answer, if any.
    pub fn shake_index(&self) -> Option<usize> {
        self.shake.map(|(i, _)| i)
    }

    /// A correct pick also yields the celebration to fire.
    pub fn answer(&mut self, idx: usize, now: f64) -> (AnswerOutcome, Option<Celebration>) {
        if idx >= 4 || self.advance_at.is_some() || self.complete_at.is_some() {
            return (AnswerOutcome::Ignored, None);
        }
        if idx == self.current().correct {
            if self.level + 1 < LEVELS.len() {
                self.advance_at = Some(now + ADVANCE_DELAY_MS);
            } else {
                self.complete_at = Some(now + COMPLETE_DELAY_MS);
            }
            (
                AnswerOutcome::Correct,
                Some(Celebration {
                    particle_count: 100,
                    spread: 70.0,
                    origin_y: 0.6,
                }),
            )
        } else {
            self.shake = Some((idx, now + SHAKE_MS));
            (AnswerOutcome::Wrong, None)
        }
    }

    pub fn tick(&mut self, now: f64) -> Option<GameEvent> {
        if let Some((_, until)) = self.shake {
            if now >= until {
                self.shake = None;
            }
        }
        if let Some(at) = self.advance_at {
            if now >= at {
                self.advance_at = None;
                self.level += 1;
            }
        }
        if let Some(at) = self.complete_at {
            if now >= at && !self.completed {
                self.completed = true;
                // Rewind for replayability.
                self.level = 0;
                return Some(GameEvent::Completed);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_data_is_well_formed() {
        assert_eq!(LEVELS.len(), 5);
        for lvl in LEVELS {
            assert!(lvl.correct < lvl.items.len());
            assert!(!lvl.question.is_empty());
        }
    }

    #[test]
    fn wrong_answer_only_shakes() {
        let mut st = OddOneOutState::new();
        let wrong = (st.current().correct + 1) % 4;
        let (out, fx) = st.answer(wrong, 0.0);
        assert_eq!(out, AnswerOutcome::Wrong);
        assert!(fx.is_none());
        assert_eq!(st.shake_index(), Some(wrong));
        assert_eq!(st.level_index(), 0);
        st.tick(SHAKE_MS);
        assert_eq!(st.shake_index(), None);
        assert_eq!(st.level_index(), 0);
    }

    #[test]
    fn correct_answer_advances_by_exactly_one() {
        let mut st = OddOneOutState::new();
        let (out, fx) = st.answer(st.current().correct, 0.0);
        assert_eq!(out, AnswerOutcome::Correct);
        assert!(fx.is_some());
        // Input is ignored while the advance is pending.
        let (blocked, _) = st.answer(st.current().correct, 10.0);
        assert_eq!(blocked, AnswerOutcome::Ignored);
        assert_eq!(st.level_index(), 0);
        st.tick(ADVANCE_DELAY_MS);
        assert_eq!(st.level_index(), 1);
    }

    #[test]
    fn final_level_completes_and_rewinds() {
        let mut st = OddOneOutState::new();
        let mut now = 0.0;
        for _ in 0..LEVELS.len() - 1 {
            let (out, _) = st.answer(st.current().correct, now);
            assert_eq!(out, AnswerOutcome::Correct);
            now += ADVANCE_DELAY_MS;
            st.tick(now);
        }
        assert_eq!(st.level_index(), LEVELS.len() - 1);
        let (out, fx) = st.answer(st.current().correct, now);
        assert_eq!(out, AnswerOutcome::Correct);
        assert!(fx.is_some());
        assert!(st.tick(now).is_none());
        now += COMPLETE_DELAY_MS;
        let done = st.tick(now);
        assert!(matches!(done, Some(GameEvent::Completed)));
        assert_eq!(st.level_index(), 0);
        // One completion per session.
        assert!(st.tick(now + 30_000.0).is_none());
    }
}
