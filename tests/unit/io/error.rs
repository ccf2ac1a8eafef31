//! Tests for error construction, messages and categories

#[cfg(test)]
mod tests {
    use castlegen::io::error::{ErrorKind, GenerationError, file_system, invalid_parameter};
    use castlegen::spatial::position::Position;
    use std::error::Error;

    // Tests invalid parameter errors carry name, value and reason
    // Verified by swapping value and reason in the message
    #[test]
    fn test_invalid_parameter_message() {
        let err = invalid_parameter("width", &3, &"too small");
        assert_eq!(err.to_string(), "Invalid parameter 'width' = '3': too small");
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    // Tests resource and generation errors report their figures
    // Verified by swapping needed and found
    #[test]
    fn test_exhaustion_messages() {
        let floors = GenerationError::InsufficientFloorTiles {
            needed: 7,
            found: 4,
        };
        assert_eq!(
            floors.to_string(),
            "Not enough FLOOR tiles for biome centers. Need 7, found 4"
        );
        let keys = GenerationError::InsufficientKeyTiles {
            placed: 2,
            requested: 5,
        };
        assert_eq!(keys.to_string(), "Could only place 2/5 keys");
        assert_eq!(keys.kind(), ErrorKind::ResourceExhaustion);

        let stuck = GenerationError::NoValidMoves {
            position: Position::new(4, 2),
            floor_count: 10,
            target: 30,
        };
        assert_eq!(
            stuck.to_string(),
            "No valid moves at (4, 2) with 10/30 floor tiles carved"
        );
        assert_eq!(stuck.kind(), ErrorKind::Generation);
    }

    // Tests file system errors keep their source
    // Verified by dropping the source attribute
    #[test]
    fn test_file_system_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = file_system("maps/out.png", "write image", io);
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("maps/out.png"));
        assert!(err.to_string().contains("write image"));
        assert!(err.source().is_some());
    }
}
