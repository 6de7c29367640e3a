use naval_battle::{
    BattleState, BattleStateMachine, Fleet, FleetPlan, GameOver, Outcome, Position, ResponseCode,
    Symbol,
};

fn pos(token: &str) -> Position {
    Position::parse(token).unwrap()
}

fn machine() -> BattleStateMachine {
    let fleet = Fleet::from_plan(&FleetPlan::from_lines("E3 E4 E5", "B2 C2", "A1")).unwrap();
    BattleStateMachine::new("alpha", fleet)
}

fn token(machine: &mut BattleStateMachine, position: &str) -> &'static str {
    machine.resolve(position).unwrap().token()
}

#[test]
fn test_full_game_sequence() {
    let mut m = machine();
    assert_eq!(m.state(), BattleState::Intact);

    assert_eq!(token(&mut m, "E3"), "202-shocked");
    assert_eq!(m.state(), BattleState::Damaged);

    assert_eq!(token(&mut m, "E3"), "404-failed");
    assert_eq!(m.state(), BattleState::Damaged);

    assert_eq!(token(&mut m, "A1"), "200-sunken");
    assert_eq!(m.state(), BattleState::PartiallySunk);

    assert_eq!(token(&mut m, "B2"), "202-shocked");
    assert_eq!(token(&mut m, "C2"), "200-sunken");
    assert_eq!(token(&mut m, "E4"), "202-shocked");
    assert_eq!(m.state(), BattleState::PartiallySunk);

    assert_eq!(token(&mut m, "E5"), "500-sunken");
    assert_eq!(m.state(), BattleState::Destroyed);
    assert!(m.is_game_over());
    assert_eq!(m.total_attacks(), 6);
}

#[test]
fn test_outcomes_map_to_tokens() {
    let mut m = machine();
    assert_eq!(m.resolve("D1").unwrap(), Outcome::Miss);
    assert_eq!(m.resolve("A1").unwrap(), Outcome::ShipSunk);
    assert_eq!(m.resolve("B2").unwrap(), Outcome::Hit);
    assert_eq!(ResponseCode::from(Outcome::Miss), ResponseCode::Failed);
    assert_eq!(ResponseCode::from(Outcome::Invalid), ResponseCode::Failed);
    assert_eq!(Outcome::FleetDestroyed.token(), "500-sunken");
}

#[test]
fn test_malformed_positions_leave_history_untouched() {
    let mut m = machine();
    for bad in ["F6", "A6", "F1", "A10", "", "22", "BB"] {
        assert_eq!(m.resolve(bad).unwrap(), Outcome::Invalid, "{bad:?}");
    }
    assert_eq!(m.total_attacks(), 0);
    assert_eq!(m.state(), BattleState::Intact);
}

#[test]
fn test_positions_are_normalized() {
    let mut m = machine();
    assert_eq!(m.resolve(" e3 ").unwrap(), Outcome::Hit);
    assert!(m.was_attacked(pos("E3")));
    assert_eq!(m.resolve("E3").unwrap(), Outcome::Invalid);
}

#[test]
fn test_miss_is_recorded_once() {
    let mut m = machine();
    assert_eq!(token(&mut m, "D4"), "404-failed");
    assert!(m.was_attacked(pos("D4")));
    assert_eq!(token(&mut m, "D4"), "404-failed");
    assert_eq!(m.total_attacks(), 1);
    assert_eq!(m.state(), BattleState::Intact);
}

#[test]
fn test_attacks_after_destruction_are_refused() {
    let mut m = machine();
    for p in ["E3", "E4", "E5", "B2", "C2", "A1"] {
        m.resolve(p).unwrap();
    }
    assert!(m.is_game_over());
    let err = m.resolve("D4").unwrap_err();
    assert_eq!(
        err,
        GameOver {
            game_id: "alpha".into()
        }
    );
    // Refused before validation, so garbage is refused the same way.
    assert!(m.resolve("zz").is_err());
    assert_eq!(m.total_attacks(), 6);
}

#[test]
fn test_status_snapshot() {
    let mut m = machine();
    m.resolve("A1").unwrap();
    m.resolve("E3").unwrap();
    m.resolve("D4").unwrap();
    let status = m.status();
    assert_eq!(status.game_id, "alpha");
    assert_eq!(status.state, BattleState::PartiallySunk);
    assert_eq!(status.state_code, "q3");
    assert_eq!(status.total_attacks, 3);
    assert_eq!(status.attack_history, vec![pos("A1"), pos("D4"), pos("E3")]);
    assert!(!status.is_game_over);

    let battleship = &status.ships[0];
    assert_eq!(battleship.name, "Battleship");
    assert_eq!(battleship.hit_count, 1);
    assert_eq!(battleship.total_positions, 3);
    assert_eq!(battleship.hits, vec![pos("E3")]);
    assert!(!battleship.is_sunk);
    assert!(status.ships[2].is_sunk);

    assert_eq!(status.grid[0][0], Symbol::Sunk);
    assert_eq!(status.grid[4][2], Symbol::Hit);
    assert_eq!(status.grid[3][3], Symbol::Miss);
    assert_eq!(status.grid[1][1], Symbol::Unknown);
}

#[test]
fn test_state_codes() {
    let codes: Vec<_> = [
        BattleState::Intact,
        BattleState::Damaged,
        BattleState::PartiallySunk,
        BattleState::Destroyed,
    ]
    .iter()
    .map(|s| s.code())
    .collect();
    assert_eq!(codes, vec!["q1", "q2", "q3", "q4"]);
}
