use std::sync::Arc;
use std::thread;

use naval_battle::{
    AttackError, AttackRegistry, Fleet, FleetPlan, GameIds, GameOver, GameRegistry, Outcome,
    Position, Registries, RegistryError, ResponseCode, Symbol,
};

fn fleet() -> Fleet {
    Fleet::from_plan(&FleetPlan::from_lines("E3 E4 E5", "B2 C2", "A1")).unwrap()
}

#[test]
fn test_create_and_get() {
    let registry = GameRegistry::new();
    assert!(registry.is_empty());
    registry.create("alpha", fleet()).unwrap();
    assert!(registry.get("alpha").is_some());
    assert!(registry.get("beta").is_none());
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_duplicate_id_is_rejected_and_original_kept() {
    let registry = GameRegistry::new();
    registry.create("alpha", fleet()).unwrap();
    assert_eq!(registry.resolve("alpha", "A1").unwrap(), Outcome::ShipSunk);

    let err = registry.create("alpha", fleet()).unwrap_err();
    assert_eq!(
        err,
        RegistryError::AlreadyExists {
            game_id: "alpha".into()
        }
    );
    // The running game still remembers the earlier attack.
    assert_eq!(registry.resolve("alpha", "A1").unwrap(), Outcome::Invalid);
}

#[test]
fn test_resolve_unknown_game() {
    let registry = GameRegistry::new();
    let err = registry.resolve("ghost", "A1").unwrap_err();
    assert_eq!(
        err,
        AttackError::NotFound {
            game_id: "ghost".into()
        }
    );
}

#[test]
fn test_games_are_independent() {
    let registry = GameRegistry::new();
    registry.create("alpha", fleet()).unwrap();
    registry.create("beta", fleet()).unwrap();
    assert_eq!(registry.resolve("alpha", "E3").unwrap(), Outcome::Hit);
    assert_eq!(registry.resolve("beta", "E3").unwrap(), Outcome::Hit);
    assert_eq!(registry.status("alpha").unwrap().total_attacks, 1);
    assert_eq!(registry.ids(), vec!["alpha".to_string(), "beta".to_string()]);
}

#[test]
fn test_all_destroyed_and_game_over() {
    let registry = GameRegistry::new();
    assert!(!registry.all_destroyed());
    registry.create("alpha", fleet()).unwrap();
    for p in ["E3", "E4", "E5", "B2", "C2"] {
        registry.resolve("alpha", p).unwrap();
    }
    assert!(!registry.all_destroyed());
    assert_eq!(
        registry.resolve("alpha", "A1").unwrap(),
        Outcome::FleetDestroyed
    );
    assert!(registry.all_destroyed());
    assert_eq!(
        registry.resolve("alpha", "D4").unwrap_err(),
        AttackError::GameOver(GameOver {
            game_id: "alpha".into()
        })
    );
}

#[test]
fn test_concurrent_attacks_on_one_game_are_serialized() {
    let registry = Arc::new(GameRegistry::new());
    registry.create("alpha", fleet()).unwrap();
    // Every thread fires at every cell; each cell must be resolved as a
    // fresh attack exactly once across all threads.
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let mut fresh = 0;
                for row in ['A', 'B', 'C', 'D', 'E'] {
                    for col in 1..=5 {
                        let token = format!("{row}{col}");
                        match registry.resolve("alpha", &token) {
                            Ok(Outcome::Invalid) | Err(AttackError::GameOver(_)) => {}
                            Ok(_) => fresh += 1,
                            Err(e) => panic!("unexpected {e:?}"),
                        }
                    }
                }
                fresh
            })
        })
        .collect();
    let fresh: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    let status = registry.status("alpha").unwrap();
    assert!(status.is_game_over);
    assert_eq!(fresh, status.total_attacks);
}

#[test]
fn test_attack_registry_init_and_lookup() {
    let attacks = AttackRegistry::new();
    assert!(attacks.is_empty());
    let tracker = attacks.init("me").unwrap();
    tracker
        .lock()
        .unwrap()
        .record(Position::parse("C3").unwrap(), ResponseCode::Shocked);

    let stats = attacks.stats("me").unwrap();
    assert_eq!(stats.total_attacks, 1);
    assert_eq!(stats.hits, 1);
    assert_eq!(attacks.overlay("me").unwrap()[2][2], Symbol::Hit);
    assert!(attacks.get("me").is_some());
    assert_eq!(attacks.len(), 1);
}

#[test]
fn test_attack_registry_rejects_duplicate_ids() {
    let attacks = AttackRegistry::new();
    let first = attacks.init("me").unwrap();
    first
        .lock()
        .unwrap()
        .record(Position::parse("A1").unwrap(), ResponseCode::Failed);
    assert_eq!(
        attacks.init("me").unwrap_err(),
        RegistryError::AlreadyExists {
            game_id: "me".into()
        }
    );
    // The existing tally survives.
    assert_eq!(attacks.stats("me").unwrap().total_attacks, 1);
}

#[test]
fn test_attack_registry_unknown_id() {
    let attacks = AttackRegistry::new();
    attacks.init("me").unwrap();
    assert!(attacks.get("other").is_none());
    assert!(attacks.stats("other").is_none());
    assert!(attacks.overlay("other").is_none());
}

#[test]
fn test_keyspaces_are_independent() {
    let registries = Registries::new();
    registries.defense.create("alpha", fleet()).unwrap();
    registries.attack.init("alpha").unwrap();
    registries.attack.init("zulu").unwrap();
    assert_eq!(
        registries.ids(),
        GameIds {
            defense_games: vec!["alpha".to_string()],
            attack_games: vec!["alpha".to_string(), "zulu".to_string()],
        }
    );
    assert!(registries.defense.get("zulu").is_none());
}
