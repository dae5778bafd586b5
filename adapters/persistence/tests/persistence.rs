use nameko_log_core::{Command, ExpToNext, SaveRecord, SpawnPosition, SpeciesId};
use nameko_log_persistence::{load, save, MemoryStore, Store};
use nameko_log_world::{self as world, query, World};

fn harvest_species(world: &mut World, species: &'static str) {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::SpawnOrganism {
            species: SpeciesId::new(species),
            position: SpawnPosition::new(0.0, 0.0),
        },
        &mut events,
    );
    let instance = events
        .iter()
        .find_map(|event| match event {
            nameko_log_core::Event::OrganismSpawned { instance, .. } => Some(*instance),
            _ => None,
        })
        .expect("spawned");
    world::apply(world, Command::AdvanceStage { instance }, &mut events);
    world::apply(world, Command::AdvanceStage { instance }, &mut events);
    world::apply(world, Command::Harvest { instance }, &mut events);
}

#[test]
fn save_then_load_round_trips_a_fully_discovered_state() {
    let mut world = World::new();
    let mut events = Vec::new();
    for species in ["normal", "white", "rare"] {
        harvest_species(&mut world, species);
    }
    world::apply(
        &mut world,
        Command::RestoreProgress {
            record: SaveRecord {
                exp_for_next_level: Some(vec![0, 5, 15, 35]),
                ..SaveRecord::default()
            },
        },
        &mut events,
    );

    let store = MemoryStore::new();
    save(&store, &query::save_record(&world)).expect("save");
    let record = load(&store).expect("load").expect("record present");

    let mut restored = World::new();
    world::apply(
        &mut restored,
        Command::RestoreProgress { record },
        &mut events,
    );

    assert_eq!(query::save_record(&restored), query::save_record(&world));
    assert_eq!(
        query::collection_view(&restored).discovered_count(),
        query::collection_view(&restored).total_count(),
        "every species stays discovered through the round trip"
    );
}

#[test]
fn record_without_a_threshold_table_yields_the_default_table() {
    let store = MemoryStore::with_payload(r#"{"score": 40, "logLevel": 1}"#);
    let record = load(&store).expect("load").expect("record present");

    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(&mut world, Command::RestoreProgress { record }, &mut events);

    assert_eq!(query::score(&world), 40);
    // Default table: next requirement at level one is 100 exp.
    assert_eq!(query::exp_to_next_level(&world), ExpToNext::Remaining(100));
}

#[test]
fn reset_erases_storage_but_keeps_audio_preferences() {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::SetVolume {
            channel: nameko_log_core::VolumeChannel::Music,
            value: 0.9,
        },
        &mut events,
    );
    harvest_species(&mut world, "rare");

    let store = MemoryStore::new();
    save(&store, &query::save_record(&world)).expect("save");

    world::apply(&mut world, Command::ResetProgress, &mut events);
    store.erase().expect("erase");

    assert_eq!(load(&store).expect("load"), None);
    assert_eq!(query::score(&world), 0);
    assert_eq!(query::bgm_volume(&world), 0.9);
}
