//! Spot-the-color game (Veo Veo).
//!
//! Each round scatters seven icons at random positions and secretly picks
//! one as the target. Guessing the target's color completes the game; three
//! wrong guesses reveal the answer for a moment, then a whole new round is
//! generated. Running out of attempts never completes the game.

use rand::Rng;

use super::{Celebration, GameEvent};

pub const MAX_ATTEMPTS: u32 = 3;
pub const SHAKE_MS: f64 = 500.0;
pub const COMPLETE_DELAY_MS: f64 = 1000.0;
pub const REVEAL_MS: f64 = 2000.0;

/// Round templates: (icon, color tag). Colors repeat on purpose, a correct
/// guess is judged by color, not by object identity.
pub const TEMPLATES: &[(&str, &str)] = &[
    ("🔴", "rojo"),
    ("🔵", "azul"),
    ("🍃", "verde"),
    ("🌻", "amarillo"),
    ("🚒", "rojo"),
    ("🍇", "morado"),
    ("🍊", "naranja"),
];

#[derive(Clone, Debug)]
pub struct SpyObject {
    pub id: usize,
    pub icon: &'static str,
    pub color: &'static str,
    /// Position as a percentage of the play field, both in 10..=70.
    pub top_pct: f64,
    pub left_pct: f64,
    /// Bob animation period in seconds, 2..3.
    pub duration_s: f64,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SpyOutcome {
    Correct,
    Wrong,
    Ignored,
}

pub struct ISpyState {
    objects: Vec<SpyObject>,
    target: usize,
    attempts: u32,
    shake: Option<(usize, f64)>,
    reveal_until: Option<f64>,
    complete_at: Option<f64>,
    completed: bool,
}

impl ISpyState {
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut st = Self {
            objects: Vec::new(),
            target: 0,
            attempts: 0,
            shake: None,
            reveal_until: None,
            complete_at: None,
            completed: false,
        };
        st.new_round(rng);
        st
    }

    /// Regenerate every object and draw a fresh target; attempts reset.
    fn new_round(&mut self, rng: &mut impl Rng) {
        self.objects = TEMPLATES
            .iter()
            .enumerate()
            .map(|(id, &(icon, color))| SpyObject {
                id,
                icon,
                color,
                top_pct: rng.gen_range(10..=70) as f64,
                left_pct: rng.gen_range(10..=70) as f64,
                duration_s: rng.gen_range(2.0..3.0),
            })
            .collect();
        self.target = rng.gen_range(0..self.objects.len());
        self.attempts = 0;
        self.shake = None;
        self.reveal_until = None;
    }

    pub fn objects(&self) -> &[SpyObject] {
        &self.objects
    }

    pub fn target(&self) -> Option<&SpyObject> {
        self.objects.get(self.target)
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn attempts_left(&self) -> u32 {
        MAX_ATTEMPTS.saturating_sub(self.attempts)
    }

    /// True while the answer is being revealed after exhausted attempts.
    pub fn revealing(&self) -> bool {
        self.reveal_until.is_some()
    }

    pub fn shake_id(&self) -> Option<usize> {
        self.shake.map(|(i, _)| i)
    }

    /// A correct pick also yields the celebration to fire.
    pub fn handle_click(&mut self, id: usize, now: f64) -> (SpyOutcome, Option<Celebration>) {
        if self.reveal_until.is_some() || self.complete_at.is_some() {
            return (SpyOutcome::Ignored, None);
        }
        let Some(target) = self.target() else {
            return (SpyOutcome::Ignored, None);
        };
        let Some(clicked) = self.objects.iter().find(|o| o.id == id) else {
            return (SpyOutcome::Ignored, None);
        };
        if clicked.color == target.color {
            self.complete_at = Some(now + COMPLETE_DELAY_MS);
            (
                SpyOutcome::Correct,
                Some(Celebration {
                    particle_count: 100,
                    spread: 70.0,
                    origin_y: 0.6,
                }),
            )
        } else {
            self.shake = Some((id, now + SHAKE_MS));
            self.attempts += 1;
            if self.attempts >= MAX_ATTEMPTS {
                self.reveal_until = Some(now + REVEAL_MS);
            }
            (SpyOutcome::Wrong, None)
        }
    }

    /// Needs an RNG because an expired reveal rolls the next round.
    pub fn tick(&mut self, now: f64, rng: &mut impl Rng) -> Option<GameEvent> {
        if let Some((_, until)) = self.shake {
            if now >= until {
                self.shake = None;
            }
        }
        if let Some(until) = self.reveal_until {
            if now >= until {
                self.new_round(rng);
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn wrong_id(st: &ISpyState) -> usize {
        let target_color = st.target().unwrap().color;
        st.objects()
            .iter()
            .find(|o| o.color != target_color)
            .unwrap()
            .id
    }

    #[test]
    fn round_objects_are_in_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let st = ISpyState::new(&mut rng);
        assert_eq!(st.objects().len(), TEMPLATES.len());
        for obj in st.objects() {
            assert!((10.0..=70.0).contains(&obj.top_pct));
            assert!((10.0..=70.0).contains(&obj.left_pct));
            assert!((2.0..3.0).contains(&obj.duration_s));
        }
        assert!(st.target().is_some());
    }

    #[test]
    fn wrong_click_shakes_and_counts() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut st = ISpyState::new(&mut rng);
        let id = wrong_id(&st);
        let (out, fx) = st.handle_click(id, 0.0);
        assert_eq!(out, SpyOutcome::Wrong);
        assert!(fx.is_none());
        assert_eq!(st.attempts(), 1);
        assert_eq!(st.attempts_left(), MAX_ATTEMPTS - 1);
        assert_eq!(st.shake_id(), Some(id));
        st.tick(SHAKE_MS, &mut rng);
        assert_eq!(st.shake_id(), None);
    }

    #[test]
    fn correct_click_completes_once() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut st = ISpyState::new(&mut rng);
        let target_id = st.target().unwrap().id;
        let (out, fx) = st.handle_click(target_id, 0.0);
        assert_eq!(out, SpyOutcome::Correct);
        assert!(fx.is_some());
        // Clicks are dead while completion is pending.
        let (blocked, _) = st.handle_click(target_id, 10.0);
        assert_eq!(blocked, SpyOutcome::Ignored);
        assert!(st.tick(COMPLETE_DELAY_MS - 1.0, &mut rng).is_none());
        let done = st.tick(COMPLETE_DELAY_MS, &mut rng);
        assert!(matches!(done, Some(GameEvent::Completed)));
        assert!(st.tick(COMPLETE_DELAY_MS + 50_000.0, &mut rng).is_none());
    }

    #[test]
    fn matching_color_on_a_different_object_also_wins() {
        // Seeds are deterministic: hunt for one whose target color appears twice.
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut st = ISpyState::new(&mut rng);
            let target = st.target().unwrap();
            let twin = st
                .objects()
                .iter()
                .find(|o| o.id != target.id && o.color == target.color)
                .map(|o| o.id);
            if let Some(twin_id) = twin {
                let (out, _) = st.handle_click(twin_id, 0.0);
                assert_eq!(out, SpyOutcome::Correct);
                return;
            }
        }
        panic!("no seed produced a duplicated target color");
    }

    #[test]
    fn exhausted_attempts_reveal_then_regenerate() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut st = ISpyState::new(&mut rng);
        let mut now = 0.0;
        for n in 1..=MAX_ATTEMPTS {
            let id = wrong_id(&st);
            let (out, _) = st.handle_click(id, now);
            assert_eq!(out, SpyOutcome::Wrong);
            assert_eq!(st.attempts(), n);
            now += 100.0;
        }
        assert!(st.revealing());
        // Input is dead during the reveal, and nothing completes.
        let target_id = st.target().unwrap().id;
        let (blocked, _) = st.handle_click(target_id, now);
        assert_eq!(blocked, SpyOutcome::Ignored);
        assert!(st.tick(now, &mut rng).is_none());

        let old_positions: Vec<(f64, f64)> = st
            .objects()
            .iter()
            .map(|o| (o.top_pct, o.left_pct))
            .collect();
        now += REVEAL_MS;
        assert!(st.tick(now, &mut rng).is_none());
        assert!(!st.revealing());
        assert_eq!(st.attempts(), 0);
        let new_positions: Vec<(f64, f64)> = st
            .objects()
            .iter()
            .map(|o| (o.top_pct, o.left_pct))
            .collect();
        // 14 integer draws in 10..=70 landing identically is as good as impossible.
        assert_ne!(old_positions, new_positions);
    }
}
