use naval_battle::{BitBoard, BitBoardError, Grid, Position};

#[test]
fn test_set_and_get() {
    let mut bb: BitBoard<u32, 5> = BitBoard::new();
    assert!(bb.is_empty());
    bb.set(2, 3).unwrap();
    assert!(bb.get(2, 3).unwrap());
    assert!(!bb.get(3, 2).unwrap());
    assert_eq!(bb.count_ones(), 1);
}

#[test]
fn test_out_of_bounds() {
    let mut bb: BitBoard<u32, 5> = BitBoard::new();
    assert_eq!(
        bb.set(5, 0),
        Err(BitBoardError::IndexOutOfBounds { row: 5, col: 0 })
    );
    assert!(bb.get(0, 5).is_err());
}

#[test]
fn test_try_new_checks_capacity() {
    assert!(BitBoard::<u32, 5>::try_new().is_ok());
    assert_eq!(
        BitBoard::<u16, 5>::try_new(),
        Err(BitBoardError::SizeTooLarge { n: 5, capacity: 16 })
    );
}

#[test]
fn test_set_operations() {
    let a = Grid::from_cells([(0, 0), (0, 1), (0, 2)]).unwrap();
    let b = Grid::from_cells([(0, 1)]).unwrap();
    let c = Grid::from_cells([(4, 4)]).unwrap();
    assert!(b.is_subset(&a));
    assert!(!a.is_subset(&b));
    assert!(a.is_disjoint(&c));
    assert_eq!(a & b, b);
    assert_eq!((a | c).count_ones(), 4);
}

#[test]
fn test_grid_positions_in_row_major_order() {
    let grid: Grid = ["E5", "A1", "C3"]
        .iter()
        .map(|t| Position::parse(t).unwrap())
        .collect();
    let tokens: Vec<String> = grid.positions().map(|p| p.to_string()).collect();
    assert_eq!(tokens, vec!["A1", "C3", "E5"]);
}

#[test]
fn test_insert_reports_duplicates() {
    let mut grid = Grid::new();
    let p = Position::parse("B4").unwrap();
    assert!(grid.insert(p));
    assert!(!grid.insert(p));
    assert!(grid.contains(p));
    assert_eq!(grid.count_ones(), 1);
}
