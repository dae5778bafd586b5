#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering and audio contracts for Nameko Log adapters.
//!
//! Backends receive declarative [`Scene`] values rebuilt from world queries;
//! they never mutate game state. Playback failures are surfaced through
//! `anyhow` so drivers can log a degraded effect and carry on — audio or
//! visual trouble must never stall a harvest.

use anyhow::Result as AnyResult;
use glam::Vec2;
use nameko_log_core::{
    CollectionView, ExpToNext, FadingVisual, HarvestCue, InstanceId, LayoutBounds, OrganismView,
    SpeciesId, StageAppearance,
};
use std::time::Duration;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns the same color with the provided alpha channel.
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }
}

/// Fill color assigned to a species' cap.
#[must_use]
pub fn species_color(species: SpeciesId) -> Color {
    match species.as_str() {
        "normal" => Color::from_rgb_u8(0xc8, 0x8a, 0x3a),
        "white" => Color::from_rgb_u8(0xf2, 0xee, 0xe2),
        "rare" => Color::from_rgb_u8(0xe8, 0xc5, 0x2e),
        _ => Color::from_rgb_u8(0x8a, 0x8a, 0x8a),
    }
}

/// Single organism drawn within the play area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrganismPresentation {
    /// Identifier of the organism, used for hit-testing harvest clicks.
    pub id: InstanceId,
    /// Upper-left corner of the organism in world units.
    pub position: Vec2,
    /// Size class derived from the organism's growth stage.
    pub appearance: StageAppearance,
    /// Cap fill color for the organism's species.
    pub color: Color,
    /// Indicates whether a click on the organism would harvest it.
    pub harvestable: bool,
}

/// Harvested organism rendered during its shrink/fade-out animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadePresentation {
    /// Identifier the organism carried while active.
    pub instance: InstanceId,
    /// Upper-left corner of the fading visual in world units.
    pub position: Vec2,
    /// Cap fill color, with alpha already reduced by fade progress.
    pub color: Color,
    /// Fade progress from 0.0 (just harvested) to 1.0 (fully gone).
    pub progress: f32,
}

/// Single row of the collection screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollectionRow {
    /// Species the row describes.
    pub species: SpeciesId,
    /// Name shown for the species; placeholder until discovered.
    pub label: &'static str,
    /// Score granted per harvest, shown once discovered.
    pub score: Option<u64>,
    /// Swatch color for the species cap.
    pub color: Color,
}

/// Collection screen contents in catalog order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollectionPresentation {
    /// One row per catalog species.
    pub rows: Vec<CollectionRow>,
}

impl CollectionPresentation {
    /// Label presented for a species that has not been discovered yet.
    pub const UNDISCOVERED_LABEL: &'static str = "???";

    /// Builds the collection screen from the world's collection view.
    ///
    /// Undiscovered species keep their slot but hide the name, score and
    /// color until the first harvest reveals them.
    #[must_use]
    pub fn from_view(view: &CollectionView) -> Self {
        let rows = view
            .iter()
            .map(|entry| {
                if entry.discovered {
                    CollectionRow {
                        species: entry.species,
                        label: entry.display_name,
                        score: Some(entry.score),
                        color: species_color(entry.species),
                    }
                } else {
                    CollectionRow {
                        species: entry.species,
                        label: Self::UNDISCOVERED_LABEL,
                        score: None,
                        color: species_color(entry.species).with_alpha(0.0),
                    }
                }
            })
            .collect();
        Self { rows }
    }
}

/// Heads-up display values shown alongside the play area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudPresentation {
    /// Total score accumulated across all harvests.
    pub score: u64,
    /// Level the log currently occupies.
    pub log_level: u32,
    /// Experience remaining before the next level, or the max sentinel.
    pub exp_to_next: ExpToNext,
    /// Number of species discovered so far.
    pub collected: usize,
    /// Total number of species in the catalog.
    pub collection_total: usize,
}

/// Scene description combining the play area, its inhabitants and the HUD.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Dimensions of the play area.
    pub bounds: LayoutBounds,
    /// Organisms currently active on the log.
    pub organisms: Vec<OrganismPresentation>,
    /// Harvested organisms still inside their fade-out window.
    pub fades: Vec<FadePresentation>,
    /// Collection screen contents.
    pub collection: CollectionPresentation,
    /// Heads-up display values.
    pub hud: HudPresentation,
}

impl Scene {
    /// Composes a scene from read-only world views.
    #[must_use]
    pub fn compose(
        bounds: LayoutBounds,
        organisms: &OrganismView,
        fading: &[FadingVisual],
        collection: &CollectionView,
        hud: HudPresentation,
        fade_window: Duration,
    ) -> Self {
        let organisms = organisms
            .iter()
            .map(|snapshot| OrganismPresentation {
                id: snapshot.id,
                position: Vec2::new(snapshot.position.x(), snapshot.position.y()),
                appearance: StageAppearance::for_stage(snapshot.stage),
                color: species_color(snapshot.species),
                harvestable: snapshot.harvestable,
            })
            .collect();
        let fades = fading
            .iter()
            .map(|visual| {
                let progress = fade_progress(visual.remaining, fade_window);
                FadePresentation {
                    instance: visual.instance,
                    position: Vec2::new(visual.position.x(), visual.position.y()),
                    color: species_color(visual.species).with_alpha(1.0 - progress),
                    progress,
                }
            })
            .collect();
        let hud = HudPresentation {
            collected: collection.discovered_count(),
            collection_total: collection.total_count(),
            ..hud
        };

        Self {
            bounds,
            organisms,
            fades,
            collection: CollectionPresentation::from_view(collection),
            hud,
        }
    }
}

/// Converts remaining fade time into progress from 0.0 to 1.0.
#[must_use]
pub fn fade_progress(remaining: Duration, window: Duration) -> f32 {
    if window.is_zero() {
        return 1.0;
    }
    let ratio = remaining.as_secs_f32() / window.as_secs_f32();
    (1.0 - ratio).clamp(0.0, 1.0)
}

/// Rendering backend capable of presenting Nameko Log scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the simulated frame
    /// delta and may replace the scene contents before each frame, allowing
    /// adapters to present world snapshots deterministically.
    fn run<F>(self, scene: Scene, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, &mut Scene) + 'static;
}

/// Audio backend driven by the core's state transitions.
pub trait AudioBackend {
    /// Plays a one-shot effect for the provided cue.
    fn play_effect(&mut self, cue: HarvestCue, volume: f32) -> AnyResult<()>;

    /// Starts or resumes the background loop at the provided volume.
    fn play_background_loop(&mut self, volume: f32) -> AnyResult<()>;

    /// Stops the background loop.
    fn stop_background_loop(&mut self) -> AnyResult<()>;
}
