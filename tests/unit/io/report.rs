//! Tests for the JSON map report

#[cfg(test)]
mod tests {
    use castlegen::algorithm::pipeline::{PipelineConfig, run_pipeline};
    use castlegen::io::report::MapReport;
    use serde_json::Value;

    fn small() -> PipelineConfig {
        let mut config = PipelineConfig::default().with_seed(42);
        config.carver.width = 10;
        config.carver.height = 10;
        config
    }

    // Tests the report exposes every stage under stable keys
    // Verified by renaming the spawn section
    #[test]
    fn test_report_contents() {
        let config = small();
        let output = run_pipeline(&config).expect("pipeline succeeds");
        let report = MapReport::new(&config, &output);
        assert!(report.violations.is_empty());

        let json = report
            .to_json(std::path::Path::new("map_42.json"))
            .expect("serializable");
        let value: Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["config"]["carver"]["width"], 10);
        assert_eq!(value["carve"]["floor_tiles"], 30);
        assert_eq!(value["biomes"]["total_cycles"], 16);
        assert_eq!(value["entries"][0]["x"], 5);
        assert_eq!(value["entries"][0]["y"], 4);
        assert_eq!(value["keys"].as_array().map(Vec::len), Some(1));
        assert_eq!(value["centers"].as_array().map(Vec::len), Some(7));
    }

    // Tests writing creates parent directories
    // Verified by writing without creating the directory
    #[test]
    fn test_report_write() {
        let config = small();
        let output = run_pipeline(&config).expect("pipeline succeeds");
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("reports").join("map_42.json");

        MapReport::new(&config, &output)
            .write(&path)
            .expect("write succeeds");
        let text = std::fs::read_to_string(&path).expect("readable");
        assert!(text.contains("\"violations\": []"));
    }
}
