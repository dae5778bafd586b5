#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Nameko Log session.
//!
//! The driver owns the command/event loop: each frame it ticks the world,
//! lets the spawning and growth systems react, harvests every organism that
//! reached maturity and persists progress after meaningful transitions.
//! Audio and storage hiccups are reported on stderr and never interrupt
//! the session.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use nameko_log_core::{Command, Event, HarvestCue, LayoutBounds, VolumeChannel};
use nameko_log_persistence::{load, save, FileStore, Store, DEFAULT_SAVE_FILE};
use nameko_log_rendering::{
    AudioBackend, HudPresentation, RenderingBackend, Scene,
};
use nameko_log_system_growth::Growth;
use nameko_log_system_spawning::{Config as SpawnConfig, Spawning, DEFAULT_SPAWN_INTERVAL};
use nameko_log_world::{self as world, query, World, FADE_OUT_DURATION};

/// Play area presented by the headless session, in world units.
const PLAY_AREA: LayoutBounds = LayoutBounds::new(600.0, 400.0);

/// Number of frames between periodic status lines.
const STATUS_EVERY: u32 = 30;

/// Headless Nameko Log session driver.
#[derive(Debug, Parser)]
#[command(name = "nameko-log", about = "Grow, harvest and collect nameko on a log")]
struct Cli {
    /// Number of simulation frames to run.
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Simulated milliseconds advanced per frame.
    #[arg(long = "frame-ms", default_value_t = 100)]
    frame_ms: u64,

    /// Seed for the spawn sequence; drawn from entropy when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Path of the JSON save file.
    #[arg(long, default_value = DEFAULT_SAVE_FILE)]
    save_path: PathBuf,

    /// Erase saved progress before starting.
    #[arg(long)]
    reset: bool,

    /// Background music volume override in the range 0.0..=1.0.
    #[arg(long)]
    bgm_volume: Option<f32>,

    /// Effect volume override in the range 0.0..=1.0.
    #[arg(long)]
    sfx_volume: Option<f32>,
}

/// Entry point for the Nameko Log command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    let store = FileStore::new(&cli.save_path);
    let mut startup_events = Vec::new();
    let mut world = World::new();

    if cli.reset {
        store.erase()?;
    } else if let Some(record) = load(&store)? {
        world::apply(
            &mut world,
            Command::RestoreProgress { record },
            &mut startup_events,
        );
    }

    println!("{}", query::welcome_banner(&world));

    let mut music = ConsoleAudio;
    if let Err(error) = music.play_background_loop(query::bgm_volume(&world)) {
        eprintln!("background music unavailable: {error:#}");
    }

    let seed = cli.seed.unwrap_or_else(rand::random);
    let mut session = Session::new(world, store, seed);
    if let Some(value) = cli.bgm_volume {
        session.dispatch(vec![Command::SetVolume {
            channel: VolumeChannel::Music,
            value,
        }]);
    }
    if let Some(value) = cli.sfx_volume {
        session.dispatch(vec![Command::SetVolume {
            channel: VolumeChannel::Effects,
            value,
        }]);
    }

    let frame_time = Duration::from_millis(cli.frame_ms);
    let scene = session.scene();
    let renderer = ConsoleRenderer::new(cli.frames, frame_time);
    renderer.run(scene, move |dt, scene| {
        session.advance(dt);
        *scene = session.scene();
    })?;

    if let Err(error) = music.stop_background_loop() {
        eprintln!("background music did not stop cleanly: {error:#}");
    }
    Ok(())
}

/// Owns the world, the pure systems and the save store for one run.
struct Session {
    world: World,
    spawning: Spawning,
    growth: Growth,
    store: FileStore,
    audio: ConsoleAudio,
    dirty: bool,
}

impl Session {
    fn new(world: World, store: FileStore, seed: u64) -> Self {
        Self {
            world,
            spawning: Spawning::new(SpawnConfig::new(DEFAULT_SPAWN_INTERVAL, seed, PLAY_AREA)),
            growth: Growth::new(),
            store,
            audio: ConsoleAudio,
            dirty: false,
        }
    }

    /// Advances the simulation by one frame and persists dirty progress.
    fn advance(&mut self, dt: Duration) {
        self.dispatch(vec![Command::Tick { dt }]);
        self.harvest_ready();

        if self.dirty {
            if let Err(error) = save(&self.store, &query::save_record(&self.world)) {
                eprintln!("progress could not be saved: {error:#}");
            }
            self.dirty = false;
        }
    }

    /// Applies commands and feeds resulting events back through the systems
    /// until the loop goes quiescent.
    fn dispatch(&mut self, mut commands: Vec<Command>) {
        let mut events = Vec::new();
        while !commands.is_empty() {
            events.clear();
            for command in commands.drain(..) {
                world::apply(&mut self.world, command, &mut events);
            }
            self.react(&events);

            self.spawning.handle(
                &events,
                query::catalog(&self.world),
                query::active_count(&self.world),
                query::capacity(&self.world),
                &mut commands,
            );
            self.growth
                .handle(&events, query::catalog(&self.world), &mut commands);
        }
    }

    /// Harvests every organism that has reached maturity this frame.
    fn harvest_ready(&mut self) {
        let ready: Vec<Command> = query::organism_view(&self.world)
            .iter()
            .filter(|snapshot| snapshot.harvestable)
            .map(|snapshot| Command::Harvest {
                instance: snapshot.id,
            })
            .collect();
        if !ready.is_empty() {
            self.dispatch(ready);
        }
    }

    /// Narrates events on stdout and marks transitions that warrant a save.
    fn react(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::OrganismSpawned { species, .. } => {
                    println!("a {species} nameko sprouted");
                }
                Event::OrganismHarvested {
                    species, score, cue, ..
                } => {
                    println!("harvested a {species} nameko (+{score})");
                    if let Err(error) = self
                        .audio
                        .play_effect(*cue, query::sfx_volume(&self.world))
                    {
                        eprintln!("harvest effect unavailable: {error:#}");
                    }
                    self.dirty = true;
                }
                Event::SpeciesDiscovered { species } => {
                    println!("new entry in the collection: {species}");
                }
                Event::LevelAdvanced { level } => {
                    println!("the log reached level {level}");
                }
                Event::VolumeChanged { channel, value } => {
                    if *channel == VolumeChannel::Music {
                        if let Err(error) = self.audio.play_background_loop(*value) {
                            eprintln!("background music unavailable: {error:#}");
                        }
                    }
                    self.dirty = true;
                }
                Event::HarvestRejected { instance, reason } => {
                    eprintln!("harvest of {instance:?} rejected: {reason}");
                }
                _ => {}
            }
        }
    }

    /// Rebuilds the presented scene from world queries.
    fn scene(&self) -> Scene {
        let hud = HudPresentation {
            score: query::score(&self.world),
            log_level: query::log_level(&self.world),
            exp_to_next: query::exp_to_next_level(&self.world),
            collected: 0,
            collection_total: 0,
        };
        Scene::compose(
            PLAY_AREA,
            &query::organism_view(&self.world),
            &query::fading_visuals(&self.world),
            &query::collection_view(&self.world),
            hud,
            FADE_OUT_DURATION,
        )
    }
}

/// Frame-stepped renderer that narrates the session on stdout.
struct ConsoleRenderer {
    frames: u32,
    frame_time: Duration,
}

impl ConsoleRenderer {
    fn new(frames: u32, frame_time: Duration) -> Self {
        Self { frames, frame_time }
    }
}

impl RenderingBackend for ConsoleRenderer {
    fn run<F>(self, mut scene: Scene, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, &mut Scene) + 'static,
    {
        for frame in 0..self.frames {
            update_scene(self.frame_time, &mut scene);
            if (frame + 1) % STATUS_EVERY == 0 {
                let elapsed = self.frame_time * (frame + 1);
                println!(
                    "[{:>5.1}s] score {} | level {} | {} on the log",
                    elapsed.as_secs_f32(),
                    scene.hud.score,
                    scene.hud.log_level,
                    scene.organisms.len(),
                );
            }
        }

        println!("--");
        println!("final score: {}", scene.hud.score);
        println!("log level: {}", scene.hud.log_level);
        println!("exp to next level: {}", scene.hud.exp_to_next);
        println!(
            "collection: {}/{} species",
            scene.hud.collected, scene.hud.collection_total
        );
        for row in &scene.collection.rows {
            match row.score {
                Some(score) => println!("  {} (worth {score})", row.label),
                None => println!("  {}", row.label),
            }
        }
        Ok(())
    }
}

/// Audio backend that narrates cues on stdout.
#[derive(Clone, Copy, Debug)]
struct ConsoleAudio;

impl AudioBackend for ConsoleAudio {
    fn play_effect(&mut self, cue: HarvestCue, volume: f32) -> Result<()> {
        if volume <= 0.0 {
            return Ok(());
        }
        match cue {
            HarvestCue::Standard => println!("  * pop"),
            HarvestCue::Rare => println!("  * sparkle!"),
        }
        Ok(())
    }

    fn play_background_loop(&mut self, volume: f32) -> Result<()> {
        println!("  ~ background music at volume {volume:.2}");
        Ok(())
    }

    fn stop_background_loop(&mut self) -> Result<()> {
        println!("  ~ background music stopped");
        Ok(())
    }
}
