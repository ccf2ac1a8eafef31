//! Tests for floor connectivity bucketing

#[cfg(test)]
mod tests {
    use castlegen::algorithm::connectivity::ConnectivityMap;
    use castlegen::spatial::grid::Grid;
    use castlegen::spatial::position::Position;

    // Tests a straight corridor has two dead ends and a corridor body
    // Verified by counting diagonal neighbours
    #[test]
    fn test_corridor() {
        let grid = Grid::from_ascii(&["#######", "#.....#", "#######"]).expect("valid rows");
        let map = ConnectivityMap::analyze(&grid);
        assert_eq!(map.get(1), &[Position::new(1, 1), Position::new(5, 1)]);
        assert_eq!(map.get(2).len(), 3);
        assert!(map.get(3).is_empty());
        assert!(map.get(4).is_empty());
        assert_eq!(map.len(), 5);
    }

    // Tests a plus shape yields one hub and four dead ends
    // Verified by off-by-one bucket indexing
    #[test]
    fn test_plus_shape() {
        let grid = Grid::from_ascii(&["#####", "##.##", "#...#", "##.##", "#####"])
            .expect("valid rows");
        let map = ConnectivityMap::analyze(&grid);
        assert_eq!(map.get(4), &[Position::new(2, 2)]);
        assert_eq!(map.get(1).len(), 4);
        assert!(map.contains(4, Position::new(2, 2)));
        assert!(!map.contains(3, Position::new(2, 2)));
    }

    // Tests a T junction lands in the degree three bucket
    // Verified by treating walls as floor neighbours
    #[test]
    fn test_junction() {
        let grid = Grid::from_ascii(&["#####", "#...#", "##.##", "#####"]).expect("valid rows");
        let map = ConnectivityMap::analyze(&grid);
        assert_eq!(map.get(3), &[Position::new(2, 1)]);
        assert_eq!(
            map.get(1),
            &[Position::new(1, 1), Position::new(3, 1), Position::new(2, 2)]
        );
    }

    // Tests isolated floors and out-of-range degrees are ignored
    // Verified by storing degree zero in the first bucket
    #[test]
    fn test_isolated_and_out_of_range() {
        let grid = Grid::from_ascii(&["###", "#.#", "###"]).expect("valid rows");
        let map = ConnectivityMap::analyze(&grid);
        assert!(map.is_empty());
        assert!(map.get(0).is_empty());
        assert!(map.get(5).is_empty());
    }
}
