//! 3×3 swap puzzle (Rompecabezas).
//!
//! Free selection-and-swap, no sliding adjacency rules: the first click
//! selects a slot, the second swaps the two slots unconditionally. Solved
//! means the identity permutation (piece i sits in slot i).

use rand::Rng;
use rand::seq::SliceRandom;

use super::GameEvent;

pub const GRID: usize = 3;
pub const CELLS: usize = GRID * GRID;
pub const COMPLETE_DELAY_MS: f64 = 500.0;

pub fn is_solved(pieces: &[usize]) -> bool {
    pieces.iter().enumerate().all(|(slot, &piece)| piece == slot)
}

pub struct PuzzleState {
    pieces: Vec<usize>,
    selected: Option<usize>,
    complete_at: Option<f64>,
    completed: bool,
}

impl PuzzleState {
    /// Shuffled start; reshuffles if the draw happens to be already solved,
    /// so the board never starts in the finished position.
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut pieces: Vec<usize> = (0..CELLS).collect();
        pieces.shuffle(rng);
        while is_solved(&pieces) {
            pieces.shuffle(rng);
        }
        Self {
            pieces,
            selected: None,
            complete_at: None,
            completed: false,
        }
    }

    pub fn pieces(&self) -> &[usize] {
        &self.pieces
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn solved(&self) -> bool {
        is_solved(&self.pieces)
    }

    /// First click selects, second click swaps and clears the selection.
    pub fn handle_click(&mut self, slot: usize, now: f64) {
        if slot >= self.pieces.len() || self.complete_at.is_some() {
            return;
        }
        match self.selected.take() {
            None => self.selected = Some(slot),
            Some(first) => {
                self.pieces.swap(first, slot);
                if self.solved() {
                    self.complete_at = Some(now + COMPLETE_DELAY_MS);
                }
            }
        }
    }

    pub fn tick(&mut self, now: f64) -> Option<GameEvent> {
        if let Some(at) = self.complete_at {
            if now >= at && !self.completed {
                self.completed = true;
                return Some(GameEvent::Completed);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn initial_board_is_never_solved() {
        for seed in 0..1_000 {
            let st = PuzzleState::new(&mut StdRng::seed_from_u64(seed));
            assert!(!st.solved(), "seed {seed} produced a solved board");
        }
    }

    #[test]
    fn click_selects_then_swaps() {
        let mut st = PuzzleState::new(&mut StdRng::seed_from_u64(11));
        let before = st.pieces().to_vec();
        st.handle_click(0, 0.0);
        assert_eq!(st.selected(), Some(0));
        assert_eq!(st.pieces(), &before[..]);
        st.handle_click(5, 1.0);
        assert_eq!(st.selected(), None);
        assert_eq!(st.pieces()[0], before[5]);
        assert_eq!(st.pieces()[5], before[0]);
    }

    #[test]
    fn completion_fires_exactly_when_identity_is_reached() {
        let mut st = PuzzleState::new(&mut StdRng::seed_from_u64(3));
        let mut now = 0.0;
        // Solve with selection sort: put piece i into slot i.
        for slot in 0..CELLS {
            let from = st.pieces().iter().position(|&p| p == slot).unwrap();
            if from != slot {
                st.handle_click(from, now);
                st.handle_click(slot, now);
            }
            if !st.solved() {
                assert!(st.tick(now + 100_000.0).is_none(), "completed early at slot {slot}");
            }
            now += 10.0;
        }
        assert!(st.solved());
        assert!(st.tick(now).is_none());
        let done = st.tick(now + COMPLETE_DELAY_MS);
        assert!(matches!(done, Some(GameEvent::Completed)));
        assert!(st.tick(now + COMPLETE_DELAY_MS + 9_000.0).is_none());
    }

    #[test]
    fn swapping_back_and_forth_stays_unsolved() {
        // Find a board with at least three misplaced pieces, then pick a pair
        // whose swap cannot accidentally reach the identity.
        let (mut st, mis) = (0..100)
            .find_map(|seed| {
                let cand = PuzzleState::new(&mut StdRng::seed_from_u64(seed));
                let mis: Vec<usize> =
                    (0..CELLS).filter(|&i| cand.pieces()[i] != i).collect();
                (mis.len() >= 3).then_some((cand, mis))
            })
            .unwrap();
        let a = mis[0];
        let mut b = mis[1];
        if st.pieces()[a] == b && st.pieces()[b] == a {
            b = mis[2];
        }
        let before = st.pieces().to_vec();
        st.handle_click(a, 0.0);
        st.handle_click(b, 0.0);
        st.handle_click(b, 1.0);
        st.handle_click(a, 1.0);
        assert_eq!(st.pieces(), &before[..]);
        assert!(!st.solved());
        assert!(st.tick(50_000.0).is_none());
    }
}
