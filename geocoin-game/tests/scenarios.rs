use geocoin_game::{
    CacheGenerator, Direction, GAME_STATE_KEY, GameConfig, GameSession, GridCell, LatLng,
    MemoryStore, Outcome, PersistedGameState, SessionPhase, StartKind,
};
use std::rc::Rc;

type Scripted = fn(&str) -> f64;

fn scripted_luck(key: &str) -> f64 {
    match key {
        "3,5" => 0.05,
        "3,5,value" => 0.42,
        _ => 0.5,
    }
}

fn scenario_config() -> GameConfig {
    GameConfig {
        tile_size: 1e-4,
        neighborhood_range: 8,
        cache_probability: 0.1,
        start_location: LatLng::new(3.5e-4, 5.5e-4),
        origin: LatLng::new(0.0, 0.0),
    }
}

fn scenario_session(store: &MemoryStore) -> GameSession<Scripted, MemoryStore> {
    GameSession::new(scenario_config(), scripted_luck as Scripted, store.clone())
}

#[test]
fn scenario_a_spawn_and_initial_value() {
    let generator = CacheGenerator::new(scripted_luck as Scripted, 0.1);
    let cell = GridCell::new(3, 5);
    assert!(generator.should_spawn(&cell));
    assert_eq!(generator.initial_value(&cell), 42);
}

#[test]
fn scenario_b_single_collect() {
    let store = MemoryStore::new();
    let mut session = scenario_session(&store);
    session.start().unwrap();
    let cell = GridCell::new(3, 5);
    assert_eq!(session.current_value(&cell), Some(42));

    let outcome = session.collect(&cell).unwrap();
    assert!(matches!(outcome, Outcome::Done(_)));
    assert_eq!(session.current_value(&cell), Some(41));
    assert_eq!(session.player().coins_collected, 1);
    assert_eq!(session.world().mementos().restore(&cell), Some(41));
    let memento = session.world().mementos().get("3,5").unwrap();
    assert_eq!(memento.coin_count, 41);
}

#[test]
fn scenario_c_fresh_process_uses_generated_default() {
    let store = MemoryStore::new();
    let mut session = scenario_session(&store);
    session.start().unwrap();
    let cell = GridCell::new(3, 5);
    assert_eq!(session.world().mementos().restore(&cell), None);
    assert_eq!(session.current_value(&cell), Some(42));
}

#[test]
fn scenario_d_full_reset() {
    let store = MemoryStore::new();
    let mut session = scenario_session(&store);
    session.start().unwrap();
    session.collect(&GridCell::new(3, 5)).unwrap();
    session.step(Direction::North).unwrap();
    session.step(Direction::East).unwrap();
    assert!(store.raw(GAME_STATE_KEY).is_some());

    session.reset().unwrap();
    assert!(session.world().mementos().is_empty());
    assert_eq!(store.raw(GAME_STATE_KEY), None);
    assert_eq!(session.player().position, scenario_config().start_location);
    assert!(session.history().is_empty());
    assert_eq!(session.phase(), SessionPhase::Ready);
}

#[test]
fn scenario_e_invalid_json_starts_fresh() {
    let store = MemoryStore::new();
    geocoin_game::DurableStore::set_item(&store, GAME_STATE_KEY, "{\"position\": nope").unwrap();
    let mut session = scenario_session(&store);
    assert_eq!(session.start().unwrap(), StartKind::Fresh);
    assert_eq!(session.player().position, scenario_config().start_location);
    assert_eq!(session.player().coins_collected, 0);
    assert_eq!(session.current_value(&GridCell::new(3, 5)), Some(42));
}

#[test]
fn jittered_points_share_one_cell_instance() {
    let store = MemoryStore::new();
    let mut session = scenario_session(&store);
    session.start().unwrap();
    let first = session.player_cell();
    session.move_to(LatLng::new(3.000_1e-4, 5.999_9e-4)).unwrap();
    let second = session.player_cell();
    assert!(Rc::ptr_eq(&first, &second));
    let cache = session.cache_at(&GridCell::new(3, 5)).unwrap();
    assert!(Rc::ptr_eq(&cache.cell, &second));
}

#[test]
fn save_written_by_session_deserializes_to_its_snapshot() {
    let store = MemoryStore::new();
    let mut session = scenario_session(&store);
    session.start().unwrap();
    let cell = GridCell::new(3, 5);
    session.collect(&cell).unwrap();
    session.collect(&cell).unwrap();
    session.deposit(&cell).unwrap();
    session.step(Direction::West).unwrap();

    let raw = store.raw(GAME_STATE_KEY).unwrap();
    let loaded = PersistedGameState::deserialize(&raw).unwrap();
    assert_eq!(loaded, session.snapshot());
    assert_eq!(loaded.coins_collected, 1);
    assert_eq!(loaded.inventory.len(), 1);
    assert_eq!(loaded.cache_states.len(), 1);
}

#[test]
fn stale_mementos_are_kept_but_not_applied() {
    let store = MemoryStore::new();
    {
        let mut session = scenario_session(&store);
        session.start().unwrap();
        session.collect(&GridCell::new(3, 5)).unwrap();
    }
    let stricter = scenario_config().with_cache_probability(0.01);
    let mut session = GameSession::new(stricter, scripted_luck as Scripted, store.clone());
    assert_eq!(
        session.start().unwrap(),
        StartKind::Resumed {
            orphaned_mementos: 1
        }
    );
    assert_eq!(session.current_value(&GridCell::new(3, 5)), None);
    assert!(session.cache_at(&GridCell::new(3, 5)).is_none());
    assert_eq!(session.world().mementos().len(), 1);
    assert_eq!(session.player().coins_collected, 1);
}
