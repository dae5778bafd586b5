#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for emitting organism spawn
//! commands on a fixed cadence.
//!
//! The system accumulates simulated time from [`Event::TimeAdvanced`] and
//! attempts one spawn per elapsed interval. An attempt is suppressed while
//! the active set sits at the level-scaled capacity; suppressed attempts are
//! consumed, not banked, mirroring a wall-clock interval timer. Species are
//! chosen by a weighted draw over the catalog's rarity table and positions
//! are placed so the organism footprint fits fully inside the layout bounds.

use std::time::Duration;

use nameko_log_core::{Catalog, Command, Event, LayoutBounds, OrganismFootprint, SpawnPosition};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Cadence at which the log attempts to sprout a new organism.
pub const DEFAULT_SPAWN_INTERVAL: Duration = Duration::from_secs(3);

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    spawn_interval: Duration,
    rng_seed: u64,
    bounds: LayoutBounds,
}

impl Config {
    /// Creates a new configuration using the provided cadence, seed, and
    /// play-area bounds.
    #[must_use]
    pub const fn new(spawn_interval: Duration, rng_seed: u64, bounds: LayoutBounds) -> Self {
        Self {
            spawn_interval,
            rng_seed,
            bounds,
        }
    }
}

/// Pure system that deterministically emits spawn commands.
#[derive(Debug)]
pub struct Spawning {
    spawn_interval: Duration,
    accumulator: Duration,
    bounds: LayoutBounds,
    footprint: OrganismFootprint,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            spawn_interval: config.spawn_interval,
            accumulator: Duration::ZERO,
            bounds: config.bounds,
            footprint: OrganismFootprint::STANDARD,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes events and immutable views to emit spawn commands.
    ///
    /// `active_count` and `capacity` reflect the world at the time of the
    /// call; commands emitted here are re-checked by the world on apply, so
    /// a stale view can never push the active set over capacity.
    pub fn handle(
        &mut self,
        events: &[Event],
        catalog: &Catalog,
        active_count: usize,
        capacity: usize,
        out: &mut Vec<Command>,
    ) {
        if self.spawn_interval.is_zero() || catalog.is_empty() {
            return;
        }

        let mut accumulated = Duration::ZERO;
        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                accumulated = accumulated.saturating_add(*dt);
            }
        }

        if accumulated.is_zero() {
            return;
        }

        self.accumulator = self.accumulator.saturating_add(accumulated);
        let spawn_attempts = self.resolve_spawn_attempts();
        let free_slots = capacity.saturating_sub(active_count);

        for attempt in 0..spawn_attempts {
            if attempt >= free_slots {
                break;
            }
            let draw: f64 = self.rng.gen();
            let species = catalog.species_for_draw(draw).id();
            let position = self.select_position();
            out.push(Command::SpawnOrganism { species, position });
        }
    }

    fn resolve_spawn_attempts(&mut self) -> usize {
        if self.spawn_interval.is_zero() {
            return 0;
        }

        let mut attempts = 0;
        while self.accumulator >= self.spawn_interval {
            self.accumulator -= self.spawn_interval;
            attempts += 1;
        }
        attempts
    }

    fn select_position(&mut self) -> SpawnPosition {
        let x = self.sample_axis(self.bounds.width() - self.footprint.width());
        let y = self.sample_axis(self.bounds.height() - self.footprint.height());
        SpawnPosition::new(x, y)
    }

    fn sample_axis(&mut self, span: f32) -> f32 {
        if span <= 0.0 {
            return 0.0;
        }
        self.rng.gen_range(0.0..span)
    }
}
