#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Nameko Log engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::{collections::BTreeMap, error::Error, fmt, time::Duration};

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to the Nameko Log.";

/// Stage index at which an organism becomes eligible for harvest.
pub const HARVESTABLE_STAGE: u32 = 2;

/// Threshold table applied when no persisted table exists or a persisted
/// table is too short to be trusted.
pub const DEFAULT_LEVEL_THRESHOLDS: [u64; 5] = [0, 100, 250, 500, 1000];

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that a new organism sprout on the log.
    SpawnOrganism {
        /// Species selected for the new organism.
        species: SpeciesId,
        /// Position assigned to the organism within the layout bounds.
        position: SpawnPosition,
    },
    /// Requests that an organism advance a single growth stage.
    AdvanceStage {
        /// Identifier of the organism whose growth timer elapsed.
        instance: InstanceId,
    },
    /// Requests that an organism be harvested.
    Harvest {
        /// Identifier of the organism targeted for harvest.
        instance: InstanceId,
    },
    /// Updates a user audio preference.
    SetVolume {
        /// Audio channel the preference applies to.
        channel: VolumeChannel,
        /// Requested volume, clamped to the range 0.0..=1.0 on apply.
        value: f32,
    },
    /// Merges a persisted record into the world's progression state.
    RestoreProgress {
        /// Record loaded from durable storage, possibly partial.
        record: SaveRecord,
    },
    /// Clears all progression state while preserving audio preferences.
    ResetProgress,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a new organism sprouted on the log.
    OrganismSpawned {
        /// Identifier assigned to the organism by the world.
        instance: InstanceId,
        /// Species of the spawned organism.
        species: SpeciesId,
        /// Position the organism occupies within the layout bounds.
        position: SpawnPosition,
    },
    /// Confirms that an organism advanced to a new growth stage.
    StageAdvanced {
        /// Identifier of the organism that grew.
        instance: InstanceId,
        /// Stage index the organism now occupies.
        stage: u32,
    },
    /// Announces that a species entered the collection for the first time.
    SpeciesDiscovered {
        /// Species recorded as discovered.
        species: SpeciesId,
    },
    /// Confirms that an organism was harvested.
    OrganismHarvested {
        /// Identifier of the harvested organism.
        instance: InstanceId,
        /// Species of the harvested organism.
        species: SpeciesId,
        /// Score granted to both the total score and experience.
        score: u64,
        /// Audio cue adapters should play for the harvest.
        cue: HarvestCue,
    },
    /// Reports that a harvest request was rejected.
    HarvestRejected {
        /// Identifier provided in the harvest request.
        instance: InstanceId,
        /// Specific reason the harvest failed.
        reason: HarvestError,
    },
    /// Announces that the log reached a new level.
    LevelAdvanced {
        /// Level the log now occupies.
        level: u32,
    },
    /// Confirms that an audio preference changed.
    VolumeChanged {
        /// Audio channel the preference applies to.
        channel: VolumeChannel,
        /// Volume stored after clamping.
        value: f32,
    },
    /// Reports that a harvested organism finished its fade-out window.
    VisualFaded {
        /// Identifier of the organism whose visual expired.
        instance: InstanceId,
    },
    /// Confirms that persisted progress was merged into the world.
    ProgressRestored,
    /// Confirms that all progression state was cleared.
    ProgressReset,
}

/// Unique identifier assigned to a spawned organism.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(u32);

impl InstanceId {
    /// Creates a new organism identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Stable identifier naming a species in the catalog and in saved records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpeciesId(&'static str);

impl SpeciesId {
    /// Creates a new species identifier from a static string.
    #[must_use]
    pub const fn new(value: &'static str) -> Self {
        Self(value)
    }

    /// Retrieves the textual form used in persisted records.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Audio cue adapters play when an organism is harvested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HarvestCue {
    /// Cue shared by common species.
    Standard,
    /// Cue reserved for rare species.
    Rare,
}

/// Audio channels that carry user-adjustable volume preferences.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VolumeChannel {
    /// Background music loop.
    Music,
    /// One-shot sound effects such as harvest cues.
    Effects,
}

/// Visual size class presented for a growth stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StageAppearance {
    /// Freshly sprouted organism at stage zero.
    Small,
    /// Organism at stage one, not yet harvestable.
    Medium,
    /// Organism at stage two or beyond, eligible for harvest.
    Large,
}

impl StageAppearance {
    /// Maps a stage index onto the size class adapters should present.
    #[must_use]
    pub const fn for_stage(stage: u32) -> Self {
        match stage {
            0 => Self::Small,
            1 => Self::Medium,
            _ => Self::Large,
        }
    }
}

/// Reports whether an organism at the provided stage may be harvested.
#[must_use]
pub const fn is_harvestable(stage: u32) -> bool {
    stage >= HARVESTABLE_STAGE
}

/// World-space position assigned to an organism when it sprouts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnPosition {
    x: f32,
    y: f32,
}

impl SpawnPosition {
    /// Creates a new spawn position from world-space coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal offset from the left edge of the play area.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical offset from the top edge of the play area.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }
}

/// Dimensions of the play area organisms must fit inside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutBounds {
    width: f32,
    height: f32,
}

impl LayoutBounds {
    /// Creates a new layout description from world-space dimensions.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width of the play area in world units.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height of the play area in world units.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }
}

/// Footprint an organism occupies within the play area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrganismFootprint {
    width: f32,
    height: f32,
}

impl OrganismFootprint {
    /// Footprint matching the standard organism sprite.
    pub const STANDARD: Self = Self {
        width: 30.0,
        height: 40.0,
    };

    /// Creates a new footprint description.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width of the footprint in world units.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height of the footprint in world units.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }
}

/// Reasons a harvest request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HarvestError {
    /// No organism with the provided identifier exists.
    MissingInstance,
    /// The organism has not yet reached a harvestable stage.
    Immature {
        /// Stage the organism currently occupies.
        stage: u32,
    },
}

impl fmt::Display for HarvestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInstance => f.write_str("no organism with that identifier exists"),
            Self::Immature { stage } => {
                write!(f, "the organism at stage {stage} is not yet harvestable")
            }
        }
    }
}

impl Error for HarvestError {}

/// Immutable definition of an organism species.
#[derive(Clone, Debug, PartialEq)]
pub struct SpeciesDef {
    id: SpeciesId,
    display_name: &'static str,
    score: u64,
    rarity: f64,
    growth_times: Vec<Duration>,
    cue: HarvestCue,
}

impl SpeciesDef {
    /// Creates a new species definition.
    #[must_use]
    pub fn new(
        id: SpeciesId,
        display_name: &'static str,
        score: u64,
        rarity: f64,
        growth_times: Vec<Duration>,
        cue: HarvestCue,
    ) -> Self {
        Self {
            id,
            display_name,
            score,
            rarity,
            growth_times,
            cue,
        }
    }

    /// Stable identifier of the species.
    #[must_use]
    pub const fn id(&self) -> SpeciesId {
        self.id
    }

    /// Human-readable name shown in the collection display.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        self.display_name
    }

    /// Score granted when an organism of this species is harvested.
    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Rarity weight used during weighted spawn selection.
    #[must_use]
    pub const fn rarity(&self) -> f64 {
        self.rarity
    }

    /// Ordered growth durations; the entry at `stage` is the delay before
    /// leaving that stage.
    #[must_use]
    pub fn growth_times(&self) -> &[Duration] {
        &self.growth_times
    }

    /// Delay before an organism leaves the provided stage, when one remains.
    #[must_use]
    pub fn growth_time_for_stage(&self, stage: u32) -> Option<Duration> {
        usize::try_from(stage)
            .ok()
            .and_then(|index| self.growth_times.get(index).copied())
    }

    /// Highest stage index an organism of this species can reach.
    #[must_use]
    pub fn max_stage(&self) -> u32 {
        u32::try_from(self.growth_times.len()).unwrap_or(u32::MAX)
    }

    /// Audio cue adapters play when this species is harvested.
    #[must_use]
    pub const fn cue(&self) -> HarvestCue {
        self.cue
    }
}

/// Read-only registry of species definitions in fixed declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    species: Vec<SpeciesDef>,
}

impl Catalog {
    /// Builds the standard catalog shipped with the game.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            species: vec![
                SpeciesDef::new(
                    SpeciesId::new("normal"),
                    "Common Nameko",
                    10,
                    0.70,
                    vec![
                        Duration::from_millis(2000),
                        Duration::from_millis(3000),
                        Duration::from_millis(4000),
                    ],
                    HarvestCue::Standard,
                ),
                SpeciesDef::new(
                    SpeciesId::new("white"),
                    "White Nameko",
                    30,
                    0.25,
                    vec![
                        Duration::from_millis(2500),
                        Duration::from_millis(3500),
                        Duration::from_millis(4500),
                    ],
                    HarvestCue::Standard,
                ),
                SpeciesDef::new(
                    SpeciesId::new("rare"),
                    "Rare Nameko",
                    100,
                    0.05,
                    vec![
                        Duration::from_millis(4000),
                        Duration::from_millis(5000),
                        Duration::from_millis(7000),
                    ],
                    HarvestCue::Rare,
                ),
            ],
        }
    }

    /// Builds a catalog from explicit definitions, preserving their order.
    ///
    /// Returns an error when no species are provided, because selection and
    /// fallback both require at least one entry.
    pub fn from_species(species: Vec<SpeciesDef>) -> Result<Self, CatalogError> {
        if species.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { species })
    }

    /// Iterates species definitions in fixed declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &SpeciesDef> {
        self.species.iter()
    }

    /// Number of species defined in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.species.len()
    }

    /// Reports whether the catalog defines no species.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Looks up a species definition by identifier.
    #[must_use]
    pub fn get(&self, id: SpeciesId) -> Option<&SpeciesDef> {
        self.species.iter().find(|species| species.id() == id)
    }

    /// Species selected when a draw overruns every cumulative threshold.
    #[must_use]
    pub fn default_species(&self) -> &SpeciesDef {
        &self.species[0]
    }

    /// Selects a species for a uniform draw in `[0, 1)`.
    ///
    /// Walks the catalog in declaration order accumulating rarity weights and
    /// selects the first species whose cumulative weight exceeds the draw.
    /// A draw beyond the final cumulative threshold falls back to the default
    /// species so that under-allocated weight tables never leave an organism
    /// untyped.
    #[must_use]
    pub fn species_for_draw(&self, draw: f64) -> &SpeciesDef {
        let mut cumulative = 0.0;
        for species in &self.species {
            cumulative += species.rarity();
            if draw < cumulative {
                return species;
            }
        }
        self.default_species()
    }
}

/// Errors that can occur when constructing a catalog.
#[derive(Debug, PartialEq, Eq)]
pub enum CatalogError {
    /// A catalog must define at least one species.
    Empty,
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("a catalog requires at least one species"),
        }
    }
}

impl Error for CatalogError {}

/// Immutable representation of a single organism's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrganismSnapshot {
    /// Unique identifier assigned to the organism.
    pub id: InstanceId,
    /// Species of the organism.
    pub species: SpeciesId,
    /// Growth stage the organism currently occupies.
    pub stage: u32,
    /// Position the organism occupies within the layout bounds.
    pub position: SpawnPosition,
    /// Indicates whether the organism may currently be harvested.
    pub harvestable: bool,
}

/// Read-only snapshot describing all organisms active on the log.
#[derive(Clone, Debug, Default)]
pub struct OrganismView {
    snapshots: Vec<OrganismSnapshot>,
}

impl OrganismView {
    /// Creates a new organism view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<OrganismSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &OrganismSnapshot> {
        self.snapshots.iter()
    }

    /// Number of active organisms captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no organisms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<OrganismSnapshot> {
        self.snapshots
    }
}

/// Harvested organism still visible during its fade-out window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadingVisual {
    /// Identifier the organism carried while active.
    pub instance: InstanceId,
    /// Species of the harvested organism.
    pub species: SpeciesId,
    /// Position the visual occupies while fading.
    pub position: SpawnPosition,
    /// Time remaining before the visual is removed.
    pub remaining: Duration,
}

/// Single entry of the collection display, in catalog order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollectionEntry {
    /// Species the entry describes.
    pub species: SpeciesId,
    /// Human-readable species name.
    pub display_name: &'static str,
    /// Score granted per harvest of the species.
    pub score: u64,
    /// Indicates whether the species was ever harvested.
    pub discovered: bool,
}

/// Read-only view of collection progress across the catalog.
#[derive(Clone, Debug, Default)]
pub struct CollectionView {
    entries: Vec<CollectionEntry>,
}

impl CollectionView {
    /// Creates a new collection view preserving catalog order.
    #[must_use]
    pub fn from_entries(entries: Vec<CollectionEntry>) -> Self {
        Self { entries }
    }

    /// Iterator over the entries in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &CollectionEntry> {
        self.entries.iter()
    }

    /// Number of species recorded as discovered.
    #[must_use]
    pub fn discovered_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.discovered).count()
    }

    /// Total number of species tracked by the collection.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.entries.len()
    }
}

/// Experience still required before the log reaches the next level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpToNext {
    /// Experience remaining until the next threshold is met.
    Remaining(u64),
    /// No further threshold exists; the log is at its maximum level.
    AtMaxLevel,
}

impl fmt::Display for ExpToNext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remaining(value) => write!(f, "{value}"),
            Self::AtMaxLevel => f.write_str("MAX"),
        }
    }
}

/// Persisted progression record exchanged with durable storage.
///
/// Every field is optional so that records written by older or newer schema
/// versions merge field-by-field instead of corrupting in-memory defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    /// Total score accumulated across all harvests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u64>,
    /// Level the log occupies.
    #[serde(rename = "logLevel", default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<u32>,
    /// Experience accumulated toward the next level.
    #[serde(
        rename = "currentExp",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub current_exp: Option<u64>,
    /// Level-threshold table indexed by level.
    #[serde(
        rename = "expForNextLevel",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub exp_for_next_level: Option<Vec<u64>>,
    /// Discovery flags keyed by species identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zukan: Option<BTreeMap<String, bool>>,
    /// Background music volume preference.
    #[serde(
        rename = "bgmVolume",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub bgm_volume: Option<f32>,
    /// Sound effect volume preference.
    #[serde(
        rename = "sfxVolume",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sfx_volume: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::{
        is_harvestable, Catalog, CatalogError, HarvestCue, HarvestError, InstanceId, SaveRecord,
        SpeciesDef, SpeciesId, StageAppearance,
    };
    use serde::{de::DeserializeOwned, Serialize};
    use std::time::Duration;

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn instance_id_round_trips_through_bincode() {
        assert_round_trip(&InstanceId::new(42));
    }

    #[test]
    fn harvest_error_round_trips_through_bincode() {
        assert_round_trip(&HarvestError::Immature { stage: 1 });
    }

    #[test]
    fn stage_appearance_matches_size_classes() {
        assert_eq!(StageAppearance::for_stage(0), StageAppearance::Small);
        assert_eq!(StageAppearance::for_stage(1), StageAppearance::Medium);
        assert_eq!(StageAppearance::for_stage(2), StageAppearance::Large);
        assert_eq!(StageAppearance::for_stage(7), StageAppearance::Large);
    }

    #[test]
    fn harvest_eligibility_begins_at_stage_two() {
        assert!(!is_harvestable(0));
        assert!(!is_harvestable(1));
        assert!(is_harvestable(2));
        assert!(is_harvestable(5));
    }

    #[test]
    fn standard_catalog_preserves_declaration_order() {
        let catalog = Catalog::standard();
        let ids: Vec<&str> = catalog
            .iter()
            .map(|species| species.id().as_str())
            .collect();
        assert_eq!(ids, ["normal", "white", "rare"]);
    }

    #[test]
    fn zero_draw_selects_first_species_with_nonzero_weight() {
        let catalog = Catalog::from_species(vec![
            SpeciesDef::new(
                SpeciesId::new("ghost"),
                "Ghost",
                1,
                0.0,
                vec![Duration::from_secs(1)],
                HarvestCue::Standard,
            ),
            SpeciesDef::new(
                SpeciesId::new("solid"),
                "Solid",
                1,
                1.0,
                vec![Duration::from_secs(1)],
                HarvestCue::Standard,
            ),
        ])
        .expect("two species");

        assert_eq!(
            catalog.species_for_draw(0.0).id(),
            SpeciesId::new("solid"),
            "zero-weight species must never win a draw of zero"
        );
    }

    #[test]
    fn draws_walk_cumulative_weights_in_catalog_order() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.species_for_draw(0.0).id(), SpeciesId::new("normal"));
        assert_eq!(
            catalog.species_for_draw(0.699).id(),
            SpeciesId::new("normal")
        );
        assert_eq!(catalog.species_for_draw(0.70).id(), SpeciesId::new("white"));
        assert_eq!(
            catalog.species_for_draw(0.949).id(),
            SpeciesId::new("white")
        );
        assert_eq!(catalog.species_for_draw(0.96).id(), SpeciesId::new("rare"));
    }

    #[test]
    fn overrun_draw_falls_back_to_default_species() {
        let catalog = Catalog::from_species(vec![
            SpeciesDef::new(
                SpeciesId::new("first"),
                "First",
                1,
                0.3,
                vec![Duration::from_secs(1)],
                HarvestCue::Standard,
            ),
            SpeciesDef::new(
                SpeciesId::new("second"),
                "Second",
                1,
                0.3,
                vec![Duration::from_secs(1)],
                HarvestCue::Standard,
            ),
        ])
        .expect("two species");

        assert_eq!(catalog.species_for_draw(0.99).id(), SpeciesId::new("first"));
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert_eq!(Catalog::from_species(Vec::new()), Err(CatalogError::Empty));
    }

    #[test]
    fn save_record_uses_external_field_names() {
        let record = SaveRecord {
            score: Some(120),
            log_level: Some(2),
            current_exp: Some(20),
            exp_for_next_level: Some(vec![0, 100, 250, 500, 1000]),
            zukan: Some(
                [("normal".to_owned(), true), ("rare".to_owned(), false)]
                    .into_iter()
                    .collect(),
            ),
            bgm_volume: Some(0.5),
            sfx_volume: Some(0.25),
        };

        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["score"], 120);
        assert_eq!(json["logLevel"], 2);
        assert_eq!(json["currentExp"], 20);
        assert_eq!(json["expForNextLevel"][1], 100);
        assert_eq!(json["zukan"]["normal"], true);
        assert_eq!(json["bgmVolume"], 0.5);
        assert_eq!(json["sfxVolume"], 0.25);
    }

    #[test]
    fn save_record_tolerates_missing_fields() {
        let record: SaveRecord =
            serde_json::from_str(r#"{"score": 40}"#).expect("partial record parses");
        assert_eq!(record.score, Some(40));
        assert_eq!(record.log_level, None);
        assert_eq!(record.exp_for_next_level, None);
        assert_eq!(record.zukan, None);
    }
}
