//! The pond: a fixed set of fish created once per session.

use rand::Rng;

use crate::config::{FISH_TYPES, GameConfig};
use crate::fish::{Fish, HomeRegion};
use crate::geometry::{Point, Size};

/// A touch hits a fish when it lands closer than `width * HIT_FACTOR` to its centre.
pub const HIT_FACTOR: f64 = 0.8;

#[derive(Clone, Debug, Default)]
pub struct Pond {
    fishes: Vec<Fish>,
}

impl Pond {
    /// Populate the pond for the given surface. Each slot picks a fish type
    /// uniformly at random; all fish share the same home region.
    pub fn new<R: Rng + ?Sized>(config: &GameConfig, surface: Size, rng: &mut R) -> Self {
        let home = HomeRegion::for_surface(surface, config.top_offset);
        let fishes = (0..config.fish_count)
            .map(|_| {
                let kind = &FISH_TYPES[rng.gen_range(0..FISH_TYPES.len())];
                Fish::spawn(kind, home, rng)
            })
            .collect();
        Self { fishes }
    }

    pub fn fishes(&self) -> &[Fish] {
        &self.fishes
    }

    pub fn fish(&self, index: usize) -> Option<&Fish> {
        self.fishes.get(index)
    }

    pub fn fish_mut(&mut self, index: usize) -> Option<&mut Fish> {
        self.fishes.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.fishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fishes.is_empty()
    }

    pub fn update<R: Rng + ?Sized>(&mut self, step_ms: f64, rng: &mut R) {
        for fish in &mut self.fishes {
            fish.update(step_ms, rng);
        }
    }

    /// Index of the first fish (in pond order) under `p`.
    pub fn hit_test(&self, p: Point) -> Option<usize> {
        self.fishes
            .iter()
            .position(|f| p.distance(f.pos) < f.width * HIT_FACTOR)
    }
}
