//! Tests for section partitioning and floor targets

#[cfg(test)]
mod tests {
    use castlegen::spatial::position::Position;
    use castlegen::spatial::section::{create_sections, target_floor_count};

    // Tests a 1x1 layout covers the whole grid
    // Verified by excluding the last row
    #[test]
    fn test_single_section() {
        let sections = create_sections(10, 10, 1, 1, 30.0);
        assert_eq!(sections.len(), 1);
        let section = sections.first().expect("one section");
        assert_eq!(
            (section.min_x, section.max_x, section.min_y, section.max_y),
            (0, 9, 0, 9)
        );
        assert_eq!(section.target_floor_count, 30);
    }

    // Tests remainder cells are absorbed by the last column and row
    // Verified by dropping remainder cells
    #[test]
    fn test_remainder_absorbed() {
        let sections = create_sections(23, 21, 2, 2, 50.0);
        assert_eq!(sections.len(), 4);

        let bounds: Vec<_> = sections
            .iter()
            .map(|s| (s.min_x, s.max_x, s.min_y, s.max_y))
            .collect();
        assert_eq!(
            bounds,
            vec![(0, 10, 0, 9), (11, 22, 0, 9), (0, 10, 10, 20), (11, 22, 10, 20)]
        );

        let covered: usize = sections.iter().map(|s| s.area()).sum();
        assert_eq!(covered, 23 * 21);
    }

    // Tests sections are ordered left-to-right then top-to-bottom
    // Verified by swapping loop nesting
    #[test]
    fn test_section_order() {
        let sections = create_sections(30, 20, 3, 2, 30.0);
        let ids: Vec<_> = sections.iter().map(|s| (s.column, s.row)).collect();
        assert_eq!(ids, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
        assert_eq!(
            sections.get(4).map(ToString::to_string),
            Some("1,1".to_string())
        );
    }

    // Tests targets are floored per section area
    // Verified by rounding instead of flooring
    #[test]
    fn test_target_floor_count() {
        assert_eq!(target_floor_count(100, 30.0), 30);
        assert_eq!(target_floor_count(121, 30.0), 36);
        assert_eq!(target_floor_count(99, 50.0), 49);
    }

    // Tests inclusive containment and boundary detection
    // Verified by using exclusive upper bounds
    #[test]
    fn test_contains_and_boundary() {
        let sections = create_sections(20, 20, 2, 1, 30.0);
        let left = sections.first().expect("left section");
        assert!(left.contains(Position::new(9, 19)));
        assert!(!left.contains(Position::new(10, 0)));
        assert!(left.is_on_boundary(Position::new(9, 5)));
        assert!(!left.is_on_boundary(Position::new(5, 5)));
        assert!(!left.is_on_boundary(Position::new(12, 0)));
    }
}
