//! Tidy-up game (¡A Ordenar el Cuarto!).
//!
//! Same placement shape as the color classification game, with richer
//! feedback: per-zone glow while a drag hovers, a progress percentage, and a
//! bigger two-stage celebration when the room is fully tidied. The win check
//! runs against the post-placement set, so the final item always completes.

use super::{Celebration, GameEvent, PlacementOutcome};

pub const ERROR_FLASH_MS: f64 = 500.0;
pub const BURST_DELAY_MS: f64 = 400.0;
pub const COMPLETE_DELAY_MS: f64 = 900.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TidyZone {
    Ropa,
    Juguete,
}

impl TidyZone {
    pub fn index(self) -> usize {
        match self {
            TidyZone::Ropa => 0,
            TidyZone::Juguete => 1,
        }
    }
}

pub const ZONES: [TidyZone; 2] = [TidyZone::Ropa, TidyZone::Juguete];

/// Seed catalog: (icon, label, matching zone).
pub const ITEMS: &[(&str, &str, TidyZone)] = &[
    ("👕", "Camiseta", TidyZone::Ropa),
    ("🚂", "Tren", TidyZone::Juguete),
    ("👖", "Pantalón", TidyZone::Ropa),
    ("🧸", "Oso", TidyZone::Juguete),
    ("🧦", "Calcetines", TidyZone::Ropa),
    ("🚗", "Carrito", TidyZone::Juguete),
    ("🧤", "Guantes", TidyZone::Ropa),
    ("🎯", "Diana", TidyZone::Juguete),
    ("🏀", "Balon", TidyZone::Juguete),
    ("🪀", "Yoyo", TidyZone::Juguete),
];

#[derive(Clone, Debug)]
pub struct TidyItem {
    pub id: usize,
    pub icon: &'static str,
    pub label: &'static str,
    pub zone: TidyZone,
    pub placed: bool,
}

pub struct TidyUpState {
    items: Vec<TidyItem>,
    zone_items: [Vec<usize>; 2],
    glow: [bool; 2],
    error_flash: Option<(TidyZone, f64)>,
    // Two-stage finish: big burst first, completion a beat later.
    burst_at: Option<f64>,
    complete_at: Option<f64>,
    completed: bool,
}

impl TidyUpState {
    pub fn new() -> Self {
        let items = ITEMS
            .iter()
            .enumerate()
            .map(|(id, &(icon, label, zone))| TidyItem {
                id,
                icon,
                label,
                zone,
                placed: false,
            })
            .collect();
        Self {
            items,
            zone_items: [Vec::new(), Vec::new()],
            glow: [false, false],
            error_flash: None,
            burst_at: None,
            complete_at: None,
            completed: false,
        }
    }

    pub fn items(&self) -> &[TidyItem] {
        &self.items
    }

    pub fn pending(&self) -> impl Iterator<Item = &TidyItem> {
        self.items.iter().filter(|i| !i.placed)
    }

    pub fn placed_in(&self, zone: TidyZone) -> &[usize] {
        &self.zone_items[zone.index()]
    }

    pub fn icon_of(&self, id: usize) -> Option<&'static str> {
        self.items.iter().find(|i| i.id == id).map(|i| i.icon)
    }

    /// Placed count and percentage for the progress bar.
    pub fn progress(&self) -> (usize, usize, u32) {
        let total = self.items.len();
        let placed = total - self.pending().count();
        let pct = ((placed as f64 / total as f64) * 100.0).round() as u32;
        (placed, total, pct)
    }

    pub fn glowing(&self, zone: TidyZone) -> bool {
        self.glow[zone.index()]
    }

    /// Hover feedback, entered and left independently per zone.
    pub fn set_glow(&mut self, zone: TidyZone, on: bool) {
        self.glow[zone.index()] = on;
    }

    pub fn clear_glow(&mut self) {
        self.glow = [false, false];
    }

    pub fn error_zone(&self) -> Option<TidyZone> {
        self.error_flash.map(|(z, _)| z)
    }

    pub fn attempt_placement(
        &mut self,
        item_id: usize,
        zone: TidyZone,
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
        // The item above is already marked, so this sees the prospective set.
        if self.items.iter().all(|i| i.placed) && self.burst_at.is_none() {
            self.burst_at = Some(now + BURST_DELAY_MS);
        }
        PlacementOutcome::Placed(Celebration {
            particle_count: 25,
            spread: 50.0,
            origin_y: 0.55,
        })
    }

    pub fn tick(&mut self, now: f64) -> Option<GameEvent> {
        if let Some((_, until)) = self.error_flash {
            if now >= until {
                self.error_flash = None;
            }
        }
        if let Some(at) = self.burst_at {
            if now >= at {
                self.burst_at = None;
                self.complete_at = Some(now + COMPLETE_DELAY_MS);
                return Some(GameEvent::Celebrate(Celebration {
                    particle_count: 180,
                    spread: 100.0,
                    origin_y: 0.5,
                }));
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
