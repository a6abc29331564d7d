// Integration tests (native) for the `aventura-kids` crate.
// These tests avoid wasm-specific functionality and exercise the pure game
// state machines so they can run under `cargo test` on the host.

use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use aventura_kids::games::GameEvent;
use aventura_kids::games::PlacementOutcome;
use aventura_kids::games::classification::{self, ClassificationState};
use aventura_kids::games::i_spy::{self, ISpyState, SpyOutcome};
use aventura_kids::games::memory::MemoryState;

// Spec scenario: three red and three yellow items, placed correctly in an
// arbitrary order, complete exactly once, after the sixth placement.
#[test]
fn classification_session_completes_once_after_sixth_placement() {
    let mut st = ClassificationState::new();
    let mut now = 0.0;
    let mut completions = 0;
    let order = [5usize, 0, 3, 2, 4, 1];
    for (n, &id) in order.iter().enumerate() {
        let zone = classification::ITEMS[id].1;
        let out = st.attempt_placement(id, zone, now);
        assert!(matches!(out, PlacementOutcome::Placed(_)));
        // Drive time well past every deadline between placements.
        now += 10_000.0;
        if st.tick(now) == Some(GameEvent::Completed) {
            completions += 1;
            assert_eq!(n, order.len() - 1, "completed before the sixth placement");
        }
    }
    assert_eq!(completions, 1);
    assert!(st.tick(now + 100_000.0).is_none());
}

// Spec scenario: exhausting the three attempts reveals the answer, then a
// brand-new round begins with its own independently drawn target.
#[test]
fn spy_round_regenerates_after_three_misses() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut st = ISpyState::new(&mut rng);
    let mut now = 0.0;
    for _ in 0..i_spy::MAX_ATTEMPTS {
        let target_color = st.target().unwrap().color;
        let wrong = st
            .objects()
            .iter()
            .find(|o| o.color != target_color)
            .unwrap()
            .id;
        let (out, fx) = st.handle_click(wrong, now);
        assert_eq!(out, SpyOutcome::Wrong);
        assert!(fx.is_none());
        now += 600.0;
        assert!(st.tick(now, &mut rng).is_none(), "misses must never complete");
    }
    assert!(st.revealing());
    now += i_spy::REVEAL_MS;
    assert!(st.tick(now, &mut rng).is_none());
    assert!(!st.revealing());
    assert_eq!(st.attempts(), 0);
    // The fresh round is playable: a correct guess still completes.
    let target_id = st.target().unwrap().id;
    let (out, fx) = st.handle_click(target_id, now);
    assert_eq!(out, SpyOutcome::Correct);
    assert!(fx.is_some());
    now += i_spy::COMPLETE_DELAY_MS;
    assert_eq!(st.tick(now, &mut rng), Some(GameEvent::Completed));
}

// Shuffle fairness: a chi-square goodness-of-fit over all 720 permutations
// of a 6-element set, 10 000 draws. For df = 719 the statistic concentrates
// around 719 with sigma ~38; 900 is far beyond any plausible fair outcome
// drifting, and the seeded RNG keeps the test deterministic.
#[test]
fn shuffle_is_uniform_over_six_element_permutations() {
    const DRAWS: usize = 10_000;
    const CELLS: f64 = 720.0;
    let mut rng = StdRng::seed_from_u64(2024);
    let mut counts: HashMap<[u8; 6], u32> = HashMap::new();
    for _ in 0..DRAWS {
        let mut perm = [0u8, 1, 2, 3, 4, 5];
        perm.shuffle(&mut rng);
        *counts.entry(perm).or_insert(0) += 1;
    }
    let expected = DRAWS as f64 / CELLS;
    let mut chi2 = 0.0;
    for &obs in counts.values() {
        let d = obs as f64 - expected;
        chi2 += d * d / expected;
    }
    chi2 += (CELLS - counts.len() as f64) * expected;
    assert!(
        chi2 < 900.0,
        "chi-square statistic {chi2:.1} is implausibly large for a uniform shuffle"
    );
}

// Distinct RNG streams must not deal the same deck.
#[test]
fn different_seeds_deal_different_decks() {
    let mut a = MemoryState::new();
    let mut b = MemoryState::new();
    a.start(0, &mut StdRng::seed_from_u64(1));
    b.start(0, &mut StdRng::seed_from_u64(2));
    let faces_a: Vec<&str> = a.cards().iter().map(|c| c.face).collect();
    let faces_b: Vec<&str> = b.cards().iter().map(|c| c.face).collect();
    assert_ne!(faces_a, faces_b);
}
