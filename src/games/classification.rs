//! Color classification game (Agrupa los colores).
//!
//! Six items, half red and half yellow, dragged into the two color zones.
//! Both the native drag path and the touch path funnel into
//! [`ClassificationState::attempt_placement`], the single place that decides
//! validity and checks the win condition.

use super::{Celebration, GameEvent, PlacementOutcome};

pub const ERROR_FLASH_MS: f64 = 500.0;
pub const COMPLETE_DELAY_MS: f64 = 500.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ColorZone {
    Rojo,
    Amarillo,
}

impl ColorZone {
    pub fn index(self) -> usize {
        match self {
            ColorZone::Rojo => 0,
            ColorZone::Amarillo => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColorZone::Rojo => "Rojo",
            ColorZone::Amarillo => "Amarillo",
        }
    }
}

pub const ZONES: [ColorZone; 2] = [ColorZone::Rojo, ColorZone::Amarillo];

/// Seed catalog: (icon, matching zone).
pub const ITEMS: &[(&str, ColorZone)] = &[
    ("🍎", ColorZone::Rojo),
    ("🍌", ColorZone::Amarillo),
    ("🍓", ColorZone::Rojo),
    ("🍋", ColorZone::Amarillo),
    ("🚘", ColorZone::Rojo),
    ("☀️", ColorZone::Amarillo),
];

#[derive(Clone, Debug)]
pub struct ClassifyItem {
    pub id: usize,
    pub icon: &'static str,
    pub zone: ColorZone,
    pub placed: bool,
}

/// Runtime state for one play session.
pub struct ClassificationState {
    items: Vec<ClassifyItem>,
    // Item ids per zone, in placement order (drives the in-zone display).
    zone_items: [Vec<usize>; 2],
    error_flash: Option<(ColorZone, f64)>,
    complete_at: Option<f64>,
    completed: bool,
}

impl ClassificationState {
    pub fn new() -> Self {
        let items = ITEMS
            .iter()
            .enumerate()
            .map(|(id, &(icon, zone))| ClassifyItem {
                id,
                icon,
                zone,
                placed: false,
            })
            .collect();
        Self {
            items,
            zone_items: [Vec::new(), Vec::new()],
            error_flash: None,
            complete_at: None,
            completed: false,
        }
    }

    pub fn items(&self) -> &[ClassifyItem] {
        &self.items
    }

    pub fn pending(&self) -> impl Iterator<Item = &ClassifyItem> {
        self.items.iter().filter(|i| !i.placed)
    }

    pub fn placed_in(&self, zone: ColorZone) -> &[usize] {
        &self.zone_items[zone.index()]
    }

    pub fn icon_of(&self, id: usize) -> Option<&'static str> {
        self.items.iter().find(|i| i.id == id).map(|i| i.icon)
    }

    /// Zone currently flashing its error style, if any.
    pub fn error_zone(&self) -> Option<ColorZone> {
        self.error_flash.map(|(z, _)| z)
    }

    pub fn all_placed(&self) -> bool {
        self.items.iter().all(|i| i.placed)
    }

    /// Sole mutation entry point for a drop, regardless of input modality.
    pub fn attempt_placement(
        &mut self,
        item_id: usize,
        zone: ColorZone,
        now: f64,
    ) -> PlacementOutcome {
        let Some(pos) = self
            .items
            .iter()
            .position(|i| i.id == item_id && !i.placed)
        else {
            return PlacementOutcome::Ignored;
        };
        if self.items[pos].zone != zone {
            self.error_flash = Some((zone, now + ERROR_FLASH_MS));
            return PlacementOutcome::Rejected;
        }
        self.items[pos].placed = true;
        self.zone_items[zone.index()].push(item_id);
        if self.all_placed() && self.complete_at.is_none() {
            self.complete_at = Some(now + COMPLETE_DELAY_MS);
        }
        PlacementOutcome::Placed(Celebration {
            particle_count: 20,
            spread: 40.0,
            origin_y: 0.6,
        })
    }

    /// Resolve expired deadlines. Emits `Completed` exactly once.
    pub fn tick(&mut self, now: f64) -> Option<GameEvent> {
        if let Some((_, until)) = self.error_flash {
            if now >= until {
                self.error_flash = None;
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

    #[test]
    fn wrong_zone_leaves_state_unchanged_except_flash() {
        let mut st = ClassificationState::new();
        // Item 0 is red; drop it on the yellow zone.
        let out = st.attempt_placement(0, ColorZone::Amarillo, 1_000.0);
        assert!(matches!(out, PlacementOutcome::Rejected));
        assert_eq!(st.pending().count(), ITEMS.len());
        assert_eq!(st.error_zone(), Some(ColorZone::Amarillo));
        assert!(st.placed_in(ColorZone::Amarillo).is_empty());
        // Flash clears after its deadline, nothing else happens.
        assert!(st.tick(1_000.0 + ERROR_FLASH_MS).is_none());
        assert_eq!(st.error_zone(), None);
    }

    #[test]
    fn correct_zone_places_and_celebrates() {
        let mut st = ClassificationState::new();
        let out = st.attempt_placement(0, ColorZone::Rojo, 0.0);
        assert!(matches!(out, PlacementOutcome::Placed(_)));
        assert_eq!(st.placed_in(ColorZone::Rojo), &[0]);
        assert_eq!(st.pending().count(), ITEMS.len() - 1);
        // Re-dropping a placed item is a no-op.
        let again = st.attempt_placement(0, ColorZone::Rojo, 1.0);
        assert!(matches!(again, PlacementOutcome::Ignored));
        assert_eq!(st.placed_in(ColorZone::Rojo), &[0]);
    }

    #[test]
    fn completion_fires_once_after_last_placement() {
        let mut st = ClassificationState::new();
        let mut now = 0.0;
        // Place in a scrambled order; completion must wait for the sixth.
        for &id in &[3usize, 0, 5, 2, 1, 4] {
            assert!(st.tick(now).is_none());
            let zone = ITEMS[id].1;
            let out = st.attempt_placement(id, zone, now);
            assert!(matches!(out, PlacementOutcome::Placed(_)));
            now += 100.0;
        }
        assert!(st.all_placed());
        // Not yet: the delay has not elapsed.
        assert!(st.tick(now).is_none());
        let fired = st.tick(now + COMPLETE_DELAY_MS);
        assert!(matches!(fired, Some(GameEvent::Completed)));
        // Never again.
        assert!(st.tick(now + COMPLETE_DELAY_MS + 10_000.0).is_none());
    }

    #[test]
    fn mismatch_never_schedules_completion() {
        let mut st = ClassificationState::new();
        for &id in &[0usize, 2, 4] {
            st.attempt_placement(id, ColorZone::Rojo, 0.0);
        }
        // Three yellows dropped on red: rejected, still three pending.
        for &id in &[1usize, 3, 5] {
            let out = st.attempt_placement(id, ColorZone::Rojo, 0.0);
            assert!(matches!(out, PlacementOutcome::Rejected));
        }
        assert_eq!(st.pending().count(), 3);
        assert!(st.tick(100_000.0).is_none());
    }
}
