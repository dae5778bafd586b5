#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic growth system that advances organisms through their stages.
//!
//! Each tracked organism owns at most one pending stage transition. The
//! entry is created when the organism spawns, replaced whenever a new
//! transition is scheduled, and removed on harvest, on reset, or once the
//! final growth duration has elapsed. Removing the entry is the cancellation
//! point: a timer that no longer exists can never fire, so no stale
//! transition can reach an organism that was harvested or reset away. The
//! world independently ignores stale [`Command::AdvanceStage`] values, which
//! keeps the pair safe even if an adapter replays stale events.

use std::{collections::BTreeMap, time::Duration};

use nameko_log_core::{Catalog, Command, Event, InstanceId, SpeciesId};

/// Pure system that schedules and fires per-organism growth transitions.
#[derive(Debug, Default)]
pub struct Growth {
    tracked: BTreeMap<InstanceId, Tracked>,
}

impl Growth {
    /// Creates a new growth system with no tracked organisms.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes world events and emits stage-advance commands for every
    /// growth timer that elapsed within the batch.
    pub fn handle(&mut self, events: &[Event], catalog: &Catalog, out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::OrganismSpawned {
                    instance, species, ..
                } => self.schedule_from_stage(*instance, *species, 0, catalog),
                Event::StageAdvanced { instance, stage } => {
                    if let Some(tracked) = self.tracked.get(instance) {
                        let species = tracked.species;
                        self.schedule_from_stage(*instance, species, *stage, catalog);
                    }
                }
                Event::OrganismHarvested { instance, .. } => {
                    let _ = self.tracked.remove(instance);
                }
                Event::ProgressReset => self.tracked.clear(),
                Event::TimeAdvanced { dt } => self.advance_timers(*dt, out),
                _ => {}
            }
        }
    }

    /// Number of organisms currently holding a pending growth timer.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.tracked
            .values()
            .filter(|tracked| tracked.pending.is_some())
            .count()
    }

    /// Reports whether the provided organism holds a pending growth timer.
    #[must_use]
    pub fn has_pending(&self, instance: InstanceId) -> bool {
        self.tracked
            .get(&instance)
            .map_or(false, |tracked| tracked.pending.is_some())
    }

    fn schedule_from_stage(
        &mut self,
        instance: InstanceId,
        species: SpeciesId,
        stage: u32,
        catalog: &Catalog,
    ) {
        let duration = catalog
            .get(species)
            .and_then(|def| def.growth_time_for_stage(stage));
        match duration {
            // Inserting replaces any previous entry, so a re-scheduled
            // instance never carries two overlapping timers.
            Some(remaining) => {
                let _ = self.tracked.insert(
                    instance,
                    Tracked {
                        species,
                        pending: Some(Pending { remaining }),
                    },
                );
            }
            // No duration remains: the organism rests at its maximum stage
            // until harvested.
            None => {
                let _ = self.tracked.remove(&instance);
            }
        }
    }

    fn advance_timers(&mut self, dt: Duration, out: &mut Vec<Command>) {
        for (instance, tracked) in &mut self.tracked {
            let Some(pending) = tracked.pending.as_mut() else {
                continue;
            };
            pending.remaining = pending.remaining.saturating_sub(dt);
            if pending.remaining.is_zero() {
                tracked.pending = None;
                out.push(Command::AdvanceStage {
                    instance: *instance,
                });
            }
        }
    }
}

#[derive(Debug)]
struct Tracked {
    species: SpeciesId,
    pending: Option<Pending>,
}

#[derive(Debug)]
struct Pending {
    remaining: Duration,
}
