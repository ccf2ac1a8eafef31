//! Tests for generation limits, defaults and configuration file loading

#[cfg(test)]
mod tests {
    use castlegen::io::configuration::{
        ALLOWED_MAX_PERCENT, DEFAULT_HEIGHT, DEFAULT_TARGET_PERCENTAGE, DEFAULT_WIDTH,
        MATHEMATICAL_MAX_PERCENT, MATHEMATICAL_MIN_SIZE, MIN_SECTION_SIZE,
        RECOMMENDED_MAX_PERCENT, calculate_max_percentage, load_pipeline_config,
    };
    use castlegen::io::error::ErrorKind;
    use castlegen::algorithm::labeler::ExpansionMode;
    use std::io::Write;

    // Tests the percentage limits are ordered
    // Verified by raising the allowed maximum above the geometric one
    #[test]
    fn test_percentage_limits_ordered() {
        assert!(RECOMMENDED_MAX_PERCENT < ALLOWED_MAX_PERCENT);
        assert!(ALLOWED_MAX_PERCENT < MATHEMATICAL_MAX_PERCENT);
        assert!(DEFAULT_TARGET_PERCENTAGE <= RECOMMENDED_MAX_PERCENT);
        assert!(MATHEMATICAL_MIN_SIZE < MIN_SECTION_SIZE);
        assert_eq!((DEFAULT_WIDTH, DEFAULT_HEIGHT), (60, 60));
    }

    // Tests the densest legal layout bound for small and default grids
    // Verified by counting the border ring as floor
    #[test]
    fn test_calculate_max_percentage() {
        assert!((calculate_max_percentage(10, 10) - 48.0).abs() < 1e-9);
        let default = calculate_max_percentage(60, 60);
        assert!((default - 2523.0 / 3600.0 * 100.0).abs() < 1e-9);
        assert!(calculate_max_percentage(0, 0).abs() < f64::EPSILON);
    }

    // Tests a partial JSON file fills the rest from defaults
    // Verified by removing serde defaults from the stage configs
    #[test]
    fn test_load_partial_config() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{"carver": {{"width": 80, "sections_x": 2}}, "biomes": {{"expansion_mode": "ALL"}}}}"#
        )
        .expect("write config");

        let config = load_pipeline_config(file.path()).expect("loads");
        assert_eq!(config.carver.width, 80);
        assert_eq!(config.carver.sections_x, 2);
        assert_eq!(config.carver.height, DEFAULT_HEIGHT);
        assert_eq!(config.biomes.expansion_mode, ExpansionMode::All);
        assert_eq!(config.biomes.biomes.len(), 7);
        assert_eq!(config.spawns.key_count, 1);
    }

    // Tests unreadable and malformed files surface as I/O errors
    // Verified by falling back to defaults on parse failure
    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("missing.json");
        let err = load_pipeline_config(&missing).expect_err("missing file");
        assert_eq!(err.kind(), ErrorKind::Io);

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").expect("write file");
        let err = load_pipeline_config(&broken).expect_err("malformed file");
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("broken.json"));
    }
}
