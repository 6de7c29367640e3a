use naval_battle::{Fleet, FleetPlan, Position, PositionError, SetupError};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn cells(line: &str) -> Vec<Position> {
    line.split_whitespace().map(|t| Position::parse(t).unwrap()).collect()
}

#[test]
fn test_valid_plan_builds_ordered_fleet() {
    let fleet = Fleet::from_plan(&FleetPlan::from_lines("E3 E4 E5", "B2 C2", "A1")).unwrap();
    let names: Vec<_> = fleet.ships().iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["Battleship", "Submarine", "Destroyer"]);
    assert_eq!(fleet.occupied().count_ones(), 6);
    assert!(!fleet.all_sunk());
}

#[test]
fn test_find_target() {
    let fleet = Fleet::from_plan(&FleetPlan::from_lines("E3 E4 E5", "B2 C2", "A1")).unwrap();
    let hit = fleet.find_target(Position::parse("C2").unwrap()).unwrap();
    assert_eq!(hit.name(), "Submarine");
    assert!(fleet.find_target(Position::parse("D4").unwrap()).is_none());
}

#[test]
fn test_wrong_group_sizes_are_rejected() {
    let err = Fleet::from_plan(&FleetPlan::from_lines("E3 E4", "B2 C2", "A1")).unwrap_err();
    assert_eq!(
        err,
        SetupError::WrongSize {
            ship: "Battleship",
            expected: 3,
            found: 2
        }
    );
    let err = Fleet::from_plan(&FleetPlan::from_lines("E3 E4 E5", "B2 C2", "")).unwrap_err();
    assert!(matches!(err, SetupError::WrongSize { ship: "Destroyer", .. }));
}

#[test]
fn test_out_of_grid_positions_are_rejected() {
    let err = Fleet::from_plan(&FleetPlan::from_lines("E3 E4 E6", "B2 C2", "A1")).unwrap_err();
    assert_eq!(
        err,
        SetupError::InvalidPosition {
            ship: "Battleship",
            source: PositionError::Column('6')
        }
    );
    let err = Fleet::from_plan(&FleetPlan::from_lines("E3 E4 E5", "F2 C2", "A1")).unwrap_err();
    assert!(matches!(err, SetupError::InvalidPosition { ship: "Submarine", .. }));
}

#[test]
fn test_overlap_reports_the_shared_cell() {
    let err = Fleet::from_plan(&FleetPlan::from_lines("D2 D3 D4", "D4 D5", "A1")).unwrap_err();
    assert_eq!(
        err,
        SetupError::Overlap {
            position: Position::parse("D4").unwrap()
        }
    );
}

#[test]
fn test_overlap_rejected_regardless_of_which_groups_collide() {
    let battleship = cells("C1 C2 C3");
    let submarine = cells("A4 A5");
    let destroyer = cells("E5");
    let base = [battleship.clone(), submarine.clone(), destroyer.clone()];
    // Replace one cell of group `j` with a cell of group `i`, for all i != j.
    for i in 0..3 {
        for j in 0..3 {
            if i == j {
                continue;
            }
            let mut groups = base.clone();
            let shared = groups[i][0];
            groups[j][0] = shared;
            let err = Fleet::from_groups([
                groups[0].as_slice(),
                groups[1].as_slice(),
                groups[2].as_slice(),
            ])
            .unwrap_err();
            assert_eq!(err, SetupError::Overlap { position: shared }, "groups {i} and {j}");
        }
    }
}

#[test]
fn test_duplicate_inside_one_group_is_rejected() {
    let err = Fleet::from_plan(&FleetPlan::from_lines("E3 E3 E5", "B2 C2", "A1")).unwrap_err();
    assert!(matches!(err, SetupError::Overlap { .. }));
}

#[test]
fn test_random_fleets_are_valid() {
    for seed in 0..200 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let fleet = Fleet::random(&mut rng).unwrap();
        assert_eq!(fleet.occupied().count_ones(), 6, "seed {seed}");
        let sizes: Vec<_> = fleet.ships().iter().map(|s| s.size()).collect();
        assert_eq!(sizes, vec![3, 2, 1]);
    }
}
