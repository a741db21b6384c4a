use broadside::{BitGrid, Coordinate, GridError};

#[test]
fn test_get_set() {
    let mut grid = BitGrid::new(10);
    assert!(grid.is_empty());
    assert_eq!(grid.capacity(), 100);

    assert!(grid.set(Coordinate::new(9, 9)).unwrap());
    assert!(grid.get(Coordinate::new(9, 9)).unwrap());
    // second set reports the cell was already there
    assert!(!grid.set(Coordinate::new(9, 9)).unwrap());
    assert_eq!(grid.count_ones(), 1);
    assert!(!grid.is_empty());
    assert!(!grid.contains(Coordinate::new(0, 0)));
}

#[test]
fn test_out_of_bounds() {
    let mut grid = BitGrid::new(4);
    let err = grid.set(Coordinate::new(4, 0)).unwrap_err();
    assert!(matches!(err, GridError::IndexOutOfBounds { size: 4, .. }));
    assert!(!grid.contains(Coordinate::new(0, 7)));
}

#[test]
fn test_from_iter_and_iter() {
    let grid = BitGrid::from_iter(4, [Coordinate::new(3, 3), Coordinate::new(0, 1)]).unwrap();
    let set: Vec<_> = grid.iter_set().collect();
    assert_eq!(set, vec![Coordinate::new(0, 1), Coordinate::new(3, 3)]);
    assert_eq!(grid.iter_unset().count(), 14);
}

#[test]
fn test_full() {
    let mut grid = BitGrid::new(3);
    for coord in Coordinate::all(3) {
        grid.set(coord).unwrap();
    }
    assert!(grid.is_full());
    assert_eq!(grid.iter_unset().count(), 0);
}
