#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game-state management for the Nameko Log.
//!
//! The [`World`] owns every mutable piece of session state: progression,
//! collection flags, audio preferences, the active organism set, and the
//! fade-out queue for harvested visuals. All mutation flows through
//! [`apply`], which executes synchronously and reports what happened via
//! [`Event`] values. Pending growth timers are not stored here; they are
//! owned by the growth system, which reacts to the events this crate emits.

use std::time::Duration;

use nameko_log_core::{
    is_harvestable, Catalog, Command, Event, HarvestError, InstanceId, SaveRecord, SpawnPosition,
    SpeciesId, VolumeChannel, DEFAULT_LEVEL_THRESHOLDS, WELCOME_BANNER,
};

/// Number of concurrently active organisms permitted per log level.
pub const CAPACITY_PER_LEVEL: usize = 8;

/// Time a harvested organism stays visible while shrinking away.
pub const FADE_OUT_DURATION: Duration = Duration::from_millis(300);

const STARTING_LOG_LEVEL: u32 = 1;
const DEFAULT_VOLUME: f32 = 0.5;

/// Represents the authoritative Nameko Log session state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    catalog: Catalog,
    score: u64,
    log_level: u32,
    current_exp: u64,
    thresholds: Vec<u64>,
    discovered: Vec<bool>,
    bgm_volume: f32,
    sfx_volume: f32,
    organisms: Vec<Organism>,
    fading: Vec<FadingEntry>,
    next_instance: u32,
}

impl World {
    /// Creates a new session using the standard species catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(Catalog::standard())
    }

    /// Creates a new session using the provided species catalog.
    #[must_use]
    pub fn with_catalog(catalog: Catalog) -> Self {
        let discovered = vec![false; catalog.len()];
        Self {
            banner: WELCOME_BANNER,
            catalog,
            score: 0,
            log_level: STARTING_LOG_LEVEL,
            current_exp: 0,
            thresholds: DEFAULT_LEVEL_THRESHOLDS.to_vec(),
            discovered,
            bgm_volume: DEFAULT_VOLUME,
            sfx_volume: DEFAULT_VOLUME,
            organisms: Vec::new(),
            fading: Vec::new(),
            next_instance: 0,
        }
    }

    fn capacity(&self) -> usize {
        CAPACITY_PER_LEVEL.saturating_mul(self.log_level as usize)
    }

    fn organism_index(&self, instance: InstanceId) -> Option<usize> {
        self.organisms
            .iter()
            .position(|organism| organism.id == instance)
    }

    fn species_index(&self, species: SpeciesId) -> Option<usize> {
        self.catalog
            .iter()
            .position(|candidate| candidate.id() == species)
    }

    fn allocate_instance(&mut self) -> InstanceId {
        let id = InstanceId::new(self.next_instance);
        self.next_instance = self.next_instance.wrapping_add(1);
        id
    }

    fn run_level_checks(&mut self, out_events: &mut Vec<Event>) {
        // One harvest can cross several thresholds, so the check loops until
        // the remaining exp sits below the next requirement.
        while let Some(required) = self
            .thresholds
            .get(self.log_level as usize)
            .copied()
            .filter(|required| self.current_exp >= *required)
        {
            self.log_level = self.log_level.saturating_add(1);
            self.current_exp -= required;
            out_events.push(Event::LevelAdvanced {
                level: self.log_level,
            });
        }
    }

    fn expire_fading(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        for entry in &mut self.fading {
            entry.remaining = entry.remaining.saturating_sub(dt);
        }
        let mut index = 0;
        while index < self.fading.len() {
            if self.fading[index].remaining.is_zero() {
                let entry = self.fading.remove(index);
                out_events.push(Event::VisualFaded {
                    instance: entry.instance,
                });
            } else {
                index += 1;
            }
        }
    }

    fn merge_record(&mut self, record: SaveRecord) {
        if let Some(score) = record.score {
            self.score = score;
        }
        if let Some(level) = record.log_level {
            self.log_level = level.max(STARTING_LOG_LEVEL);
        }
        if let Some(exp) = record.current_exp {
            self.current_exp = exp;
        }
        if let Some(table) = record.exp_for_next_level {
            self.thresholds = table;
        }
        // Legacy saves may lack a usable table entirely; replace it wholesale.
        if self.thresholds.len() < 2 {
            self.thresholds = DEFAULT_LEVEL_THRESHOLDS.to_vec();
        }
        if let Some(zukan) = record.zukan {
            // Species added to the catalog after the record was written start
            // undiscovered; unknown record entries are dropped.
            self.discovered = self
                .catalog
                .iter()
                .map(|species| {
                    zukan
                        .get(species.id().as_str())
                        .copied()
                        .unwrap_or(false)
                })
                .collect();
        }
        if let Some(volume) = record.bgm_volume {
            self.bgm_volume = volume.clamp(0.0, 1.0);
        }
        if let Some(volume) = record.sfx_volume {
            self.sfx_volume = volume.clamp(0.0, 1.0);
        }
    }

    fn reset_progress(&mut self) {
        self.score = 0;
        self.log_level = STARTING_LOG_LEVEL;
        self.current_exp = 0;
        self.thresholds = DEFAULT_LEVEL_THRESHOLDS.to_vec();
        self.discovered = vec![false; self.catalog.len()];
        self.organisms.clear();
        self.fading.clear();
        // Audio preferences deliberately survive a data reset.
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            out_events.push(Event::TimeAdvanced { dt });
            world.expire_fading(dt, out_events);
        }
        Command::SpawnOrganism { species, position } => {
            if world.organisms.len() >= world.capacity() {
                return;
            }
            if world.catalog.get(species).is_none() {
                return;
            }
            let instance = world.allocate_instance();
            world.organisms.push(Organism {
                id: instance,
                species,
                stage: 0,
                position,
            });
            out_events.push(Event::OrganismSpawned {
                instance,
                species,
                position,
            });
        }
        Command::AdvanceStage { instance } => {
            // Stale timers for harvested or reset instances land here; they
            // must not mutate anything.
            let Some(index) = world.organism_index(instance) else {
                return;
            };
            let species = world.organisms[index].species;
            let Some(max_stage) = world.catalog.get(species).map(|def| def.max_stage()) else {
                return;
            };
            let organism = &mut world.organisms[index];
            if organism.stage >= max_stage {
                return;
            }
            organism.stage += 1;
            out_events.push(Event::StageAdvanced {
                instance,
                stage: organism.stage,
            });
        }
        Command::Harvest { instance } => {
            let Some(index) = world.organism_index(instance) else {
                out_events.push(Event::HarvestRejected {
                    instance,
                    reason: HarvestError::MissingInstance,
                });
                return;
            };
            let organism = world.organisms[index];
            if !is_harvestable(organism.stage) {
                out_events.push(Event::HarvestRejected {
                    instance,
                    reason: HarvestError::Immature {
                        stage: organism.stage,
                    },
                });
                return;
            }
            let Some(def) = world.catalog.get(organism.species) else {
                return;
            };
            let gained = def.score();
            let cue = def.cue();

            world.score = world.score.saturating_add(gained);
            world.current_exp = world.current_exp.saturating_add(gained);

            if let Some(species_index) = world.species_index(organism.species) {
                if !world.discovered[species_index] {
                    world.discovered[species_index] = true;
                    out_events.push(Event::SpeciesDiscovered {
                        species: organism.species,
                    });
                }
            }

            // Capacity frees immediately; only the visual lingers.
            let removed = world.organisms.remove(index);
            world.fading.push(FadingEntry {
                instance: removed.id,
                species: removed.species,
                position: removed.position,
                remaining: FADE_OUT_DURATION,
            });

            out_events.push(Event::OrganismHarvested {
                instance,
                species: organism.species,
                score: gained,
                cue,
            });

            world.run_level_checks(out_events);
        }
        Command::SetVolume { channel, value } => {
            let value = value.clamp(0.0, 1.0);
            match channel {
                VolumeChannel::Music => world.bgm_volume = value,
                VolumeChannel::Effects => world.sfx_volume = value,
            }
            out_events.push(Event::VolumeChanged { channel, value });
        }
        Command::RestoreProgress { record } => {
            world.merge_record(record);
            out_events.push(Event::ProgressRestored);
        }
        Command::ResetProgress => {
            world.reset_progress();
            out_events.push(Event::ProgressReset);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use nameko_log_core::{
        is_harvestable, Catalog, CollectionEntry, CollectionView, ExpToNext, FadingVisual,
        OrganismSnapshot, OrganismView, SaveRecord,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the species catalog.
    #[must_use]
    pub fn catalog(world: &World) -> &Catalog {
        &world.catalog
    }

    /// Total score accumulated across all harvests.
    #[must_use]
    pub fn score(world: &World) -> u64 {
        world.score
    }

    /// Level the log currently occupies.
    #[must_use]
    pub fn log_level(world: &World) -> u32 {
        world.log_level
    }

    /// Experience accumulated toward the next level.
    #[must_use]
    pub fn current_exp(world: &World) -> u64 {
        world.current_exp
    }

    /// Experience still required before the next level, or the max sentinel.
    #[must_use]
    pub fn exp_to_next_level(world: &World) -> ExpToNext {
        match world.thresholds.get(world.log_level as usize) {
            Some(required) => ExpToNext::Remaining(required.saturating_sub(world.current_exp)),
            None => ExpToNext::AtMaxLevel,
        }
    }

    /// Maximum number of organisms the log sustains at its current level.
    #[must_use]
    pub fn capacity(world: &World) -> usize {
        world.capacity()
    }

    /// Number of organisms currently active on the log.
    #[must_use]
    pub fn active_count(world: &World) -> usize {
        world.organisms.len()
    }

    /// Background music volume preference.
    #[must_use]
    pub fn bgm_volume(world: &World) -> f32 {
        world.bgm_volume
    }

    /// Sound effect volume preference.
    #[must_use]
    pub fn sfx_volume(world: &World) -> f32 {
        world.sfx_volume
    }

    /// Captures a read-only view of the organisms active on the log.
    #[must_use]
    pub fn organism_view(world: &World) -> OrganismView {
        OrganismView::from_snapshots(
            world
                .organisms
                .iter()
                .map(|organism| OrganismSnapshot {
                    id: organism.id,
                    species: organism.species,
                    stage: organism.stage,
                    position: organism.position,
                    harvestable: is_harvestable(organism.stage),
                })
                .collect(),
        )
    }

    /// Harvested organisms still inside their fade-out window.
    #[must_use]
    pub fn fading_visuals(world: &World) -> Vec<FadingVisual> {
        world
            .fading
            .iter()
            .map(|entry| FadingVisual {
                instance: entry.instance,
                species: entry.species,
                position: entry.position,
                remaining: entry.remaining,
            })
            .collect()
    }

    /// Captures collection progress across the catalog in declaration order.
    #[must_use]
    pub fn collection_view(world: &World) -> CollectionView {
        CollectionView::from_entries(
            world
                .catalog
                .iter()
                .zip(world.discovered.iter())
                .map(|(species, discovered)| CollectionEntry {
                    species: species.id(),
                    display_name: species.display_name(),
                    score: species.score(),
                    discovered: *discovered,
                })
                .collect(),
        )
    }

    /// Builds the complete persisted record for the current session.
    #[must_use]
    pub fn save_record(world: &World) -> SaveRecord {
        SaveRecord {
            score: Some(world.score),
            log_level: Some(world.log_level),
            current_exp: Some(world.current_exp),
            exp_for_next_level: Some(world.thresholds.clone()),
            zukan: Some(
                world
                    .catalog
                    .iter()
                    .zip(world.discovered.iter())
                    .map(|(species, discovered)| (species.id().as_str().to_owned(), *discovered))
                    .collect(),
            ),
            bgm_volume: Some(world.bgm_volume),
            sfx_volume: Some(world.sfx_volume),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Organism {
    id: InstanceId,
    species: SpeciesId,
    stage: u32,
    position: SpawnPosition,
}

#[derive(Clone, Copy, Debug)]
struct FadingEntry {
    instance: InstanceId,
    species: SpeciesId,
    position: SpawnPosition,
    remaining: Duration,
}

#[cfg(test)]
mod tests {
    use super::{apply, query, World, CAPACITY_PER_LEVEL, FADE_OUT_DURATION};
    use nameko_log_core::{
        Catalog, Command, Event, ExpToNext, HarvestCue, HarvestError, InstanceId, SaveRecord,
        SpawnPosition, SpeciesDef, SpeciesId, VolumeChannel,
    };
    use std::time::Duration;

    const ORIGIN: SpawnPosition = SpawnPosition::new(0.0, 0.0);

    fn spawn(world: &mut World, species: SpeciesId) -> Option<InstanceId> {
        let mut events = Vec::new();
        apply(
            world,
            Command::SpawnOrganism {
                species,
                position: ORIGIN,
            },
            &mut events,
        );
        events.iter().find_map(|event| match event {
            Event::OrganismSpawned { instance, .. } => Some(*instance),
            _ => None,
        })
    }

    fn grow_to_harvestable(world: &mut World, instance: InstanceId) {
        let mut events = Vec::new();
        apply(world, Command::AdvanceStage { instance }, &mut events);
        apply(world, Command::AdvanceStage { instance }, &mut events);
    }

    fn single_species_catalog(score: u64) -> Catalog {
        Catalog::from_species(vec![SpeciesDef::new(
            SpeciesId::new("only"),
            "Only",
            score,
            1.0,
            vec![Duration::from_secs(1), Duration::from_secs(1)],
            HarvestCue::Standard,
        )])
        .expect("one species")
    }

    #[test]
    fn immature_harvest_is_rejected_without_state_change() {
        let mut world = World::new();
        let instance = spawn(&mut world, SpeciesId::new("normal")).expect("spawned");

        let mut events = Vec::new();
        apply(&mut world, Command::Harvest { instance }, &mut events);

        assert_eq!(
            events,
            vec![Event::HarvestRejected {
                instance,
                reason: HarvestError::Immature { stage: 0 },
            }]
        );
        assert_eq!(query::score(&world), 0);
        assert_eq!(query::current_exp(&world), 0);
        assert_eq!(query::collection_view(&world).discovered_count(), 0);
        assert_eq!(query::active_count(&world), 1);
    }

    #[test]
    fn missing_instance_harvest_is_rejected() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Harvest {
                instance: InstanceId::new(99),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::HarvestRejected {
                instance: InstanceId::new(99),
                reason: HarvestError::MissingInstance,
            }]
        );
    }

    #[test]
    fn harvest_grants_score_and_discovers_species() {
        let mut world = World::new();
        let instance = spawn(&mut world, SpeciesId::new("white")).expect("spawned");
        grow_to_harvestable(&mut world, instance);

        let mut events = Vec::new();
        apply(&mut world, Command::Harvest { instance }, &mut events);

        assert_eq!(query::score(&world), 30);
        assert_eq!(query::current_exp(&world), 30);
        assert_eq!(query::active_count(&world), 0);
        assert!(events.contains(&Event::SpeciesDiscovered {
            species: SpeciesId::new("white"),
        }));
        assert!(events.contains(&Event::OrganismHarvested {
            instance,
            species: SpeciesId::new("white"),
            score: 30,
            cue: HarvestCue::Standard,
        }));

        let collection = query::collection_view(&world);
        assert_eq!(collection.discovered_count(), 1);
    }

    #[test]
    fn second_harvest_of_a_species_does_not_rediscover_it() {
        let mut world = World::new();
        let mut discoveries = 0;
        for _ in 0..2 {
            let instance = spawn(&mut world, SpeciesId::new("normal")).expect("spawned");
            grow_to_harvestable(&mut world, instance);
            let mut events = Vec::new();
            apply(&mut world, Command::Harvest { instance }, &mut events);
            discoveries += events
                .iter()
                .filter(|event| matches!(event, Event::SpeciesDiscovered { .. }))
                .count();
        }
        assert_eq!(discoveries, 1);
    }

    #[test]
    fn rare_harvest_at_ninety_exp_levels_up_once_with_carry_over() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::RestoreProgress {
                record: SaveRecord {
                    current_exp: Some(90),
                    ..SaveRecord::default()
                },
            },
            &mut events,
        );

        let instance = spawn(&mut world, SpeciesId::new("rare")).expect("spawned");
        grow_to_harvestable(&mut world, instance);

        events.clear();
        apply(&mut world, Command::Harvest { instance }, &mut events);

        let level_ups: Vec<&Event> = events
            .iter()
            .filter(|event| matches!(event, Event::LevelAdvanced { .. }))
            .collect();
        assert_eq!(level_ups, vec![&Event::LevelAdvanced { level: 2 }]);
        assert_eq!(query::log_level(&world), 2);
        assert_eq!(query::current_exp(&world), 90);
    }

    #[test]
    fn one_harvest_can_cross_multiple_levels() {
        let mut world = World::with_catalog(single_species_catalog(25));
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::RestoreProgress {
                record: SaveRecord {
                    exp_for_next_level: Some(vec![0, 10, 10]),
                    ..SaveRecord::default()
                },
            },
            &mut events,
        );

        let instance = spawn(&mut world, SpeciesId::new("only")).expect("spawned");
        grow_to_harvestable(&mut world, instance);

        events.clear();
        apply(&mut world, Command::Harvest { instance }, &mut events);

        assert_eq!(query::log_level(&world), 3);
        assert_eq!(query::current_exp(&world), 5);
        let level_ups = events
            .iter()
            .filter(|event| matches!(event, Event::LevelAdvanced { .. }))
            .count();
        assert_eq!(level_ups, 2);
        assert_eq!(query::exp_to_next_level(&world), ExpToNext::AtMaxLevel);
    }

    #[test]
    fn spawns_are_dropped_at_capacity_and_resume_after_harvest() {
        let mut world = World::new();
        for _ in 0..CAPACITY_PER_LEVEL {
            assert!(spawn(&mut world, SpeciesId::new("normal")).is_some());
        }
        assert_eq!(query::active_count(&world), CAPACITY_PER_LEVEL);
        assert!(
            spawn(&mut world, SpeciesId::new("normal")).is_none(),
            "spawn beyond capacity must be suppressed"
        );

        let victim = query::organism_view(&world)
            .iter()
            .next()
            .map(|snapshot| snapshot.id)
            .expect("an organism exists");
        grow_to_harvestable(&mut world, victim);
        let mut events = Vec::new();
        apply(&mut world, Command::Harvest { instance: victim }, &mut events);

        assert_eq!(query::active_count(&world), CAPACITY_PER_LEVEL - 1);
        assert!(
            spawn(&mut world, SpeciesId::new("normal")).is_some(),
            "freed slot must accept a spawn before the fade-out finishes"
        );
    }

    #[test]
    fn unknown_species_spawn_is_ignored() {
        let mut world = World::new();
        assert!(spawn(&mut world, SpeciesId::new("unknown")).is_none());
        assert_eq!(query::active_count(&world), 0);
    }

    #[test]
    fn stale_stage_advance_after_harvest_is_ignored() {
        let mut world = World::new();
        let instance = spawn(&mut world, SpeciesId::new("normal")).expect("spawned");
        grow_to_harvestable(&mut world, instance);
        let mut events = Vec::new();
        apply(&mut world, Command::Harvest { instance }, &mut events);

        events.clear();
        apply(&mut world, Command::AdvanceStage { instance }, &mut events);
        assert!(events.is_empty(), "stale growth timers must not mutate");
    }

    #[test]
    fn stage_never_advances_past_the_final_duration() {
        let mut world = World::new();
        let instance = spawn(&mut world, SpeciesId::new("normal")).expect("spawned");
        let mut events = Vec::new();
        for _ in 0..5 {
            apply(&mut world, Command::AdvanceStage { instance }, &mut events);
        }
        let stages: Vec<u32> = events
            .iter()
            .filter_map(|event| match event {
                Event::StageAdvanced { stage, .. } => Some(*stage),
                _ => None,
            })
            .collect();
        assert_eq!(stages, vec![1, 2, 3]);
    }

    #[test]
    fn harvested_visual_fades_after_its_window() {
        let mut world = World::new();
        let instance = spawn(&mut world, SpeciesId::new("normal")).expect("spawned");
        grow_to_harvestable(&mut world, instance);
        let mut events = Vec::new();
        apply(&mut world, Command::Harvest { instance }, &mut events);
        assert_eq!(query::fading_visuals(&world).len(), 1);

        events.clear();
        apply(
            &mut world,
            Command::Tick {
                dt: FADE_OUT_DURATION,
            },
            &mut events,
        );
        assert!(events.contains(&Event::VisualFaded { instance }));
        assert!(query::fading_visuals(&world).is_empty());
    }

    #[test]
    fn volume_changes_clamp_and_survive_reset() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SetVolume {
                channel: VolumeChannel::Music,
                value: 1.7,
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::SetVolume {
                channel: VolumeChannel::Effects,
                value: 0.2,
            },
            &mut events,
        );
        assert_eq!(query::bgm_volume(&world), 1.0);
        assert_eq!(query::sfx_volume(&world), 0.2);

        let instance = spawn(&mut world, SpeciesId::new("normal")).expect("spawned");
        grow_to_harvestable(&mut world, instance);
        apply(&mut world, Command::Harvest { instance }, &mut events);

        events.clear();
        apply(&mut world, Command::ResetProgress, &mut events);

        assert_eq!(events, vec![Event::ProgressReset]);
        assert_eq!(query::score(&world), 0);
        assert_eq!(query::log_level(&world), 1);
        assert_eq!(query::current_exp(&world), 0);
        assert_eq!(query::collection_view(&world).discovered_count(), 0);
        assert_eq!(query::active_count(&world), 0);
        assert!(query::fading_visuals(&world).is_empty());
        assert_eq!(query::bgm_volume(&world), 1.0);
        assert_eq!(query::sfx_volume(&world), 0.2);
    }

    #[test]
    fn restoring_a_short_threshold_table_heals_it() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::RestoreProgress {
                record: SaveRecord {
                    exp_for_next_level: Some(vec![0]),
                    ..SaveRecord::default()
                },
            },
            &mut events,
        );

        assert_eq!(query::exp_to_next_level(&world), ExpToNext::Remaining(100));
    }

    #[test]
    fn restoring_a_record_backfills_newly_added_species() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::RestoreProgress {
                record: SaveRecord {
                    zukan: Some(
                        [
                            ("normal".to_owned(), true),
                            ("retired-species".to_owned(), true),
                        ]
                        .into_iter()
                        .collect(),
                    ),
                    ..SaveRecord::default()
                },
            },
            &mut events,
        );

        let collection = query::collection_view(&world);
        assert_eq!(collection.discovered_count(), 1);
        let entries: Vec<(&str, bool)> = collection
            .iter()
            .map(|entry| (entry.species.as_str(), entry.discovered))
            .collect();
        assert_eq!(
            entries,
            vec![("normal", true), ("white", false), ("rare", false)]
        );
    }

    #[test]
    fn save_then_restore_reproduces_the_same_state() {
        let mut world = World::new();
        let mut events = Vec::new();
        for species in ["normal", "white", "rare"] {
            let instance = spawn(&mut world, SpeciesId::new(species)).expect("spawned");
            grow_to_harvestable(&mut world, instance);
            apply(&mut world, Command::Harvest { instance }, &mut events);
        }
        apply(
            &mut world,
            Command::RestoreProgress {
                record: SaveRecord {
                    exp_for_next_level: Some(vec![0, 50, 60, 70]),
                    ..SaveRecord::default()
                },
            },
            &mut events,
        );

        let record = query::save_record(&world);
        let mut restored = World::new();
        apply(
            &mut restored,
            Command::RestoreProgress {
                record: record.clone(),
            },
            &mut events,
        );

        assert_eq!(query::score(&restored), query::score(&world));
        assert_eq!(query::log_level(&restored), query::log_level(&world));
        assert_eq!(query::current_exp(&restored), query::current_exp(&world));
        assert_eq!(
            query::collection_view(&restored).discovered_count(),
            query::collection_view(&world).discovered_count()
        );
        assert_eq!(query::save_record(&restored), record);
    }
}
