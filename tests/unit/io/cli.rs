//! Tests for command-line parsing, configuration overrides and batch runs

#[cfg(test)]
mod tests {
    use castlegen::algorithm::labeler::{BiomeDefinition, ExpansionMode};
    use castlegen::io::cli::{BatchRunner, Cli, parse_biome_definition};
    use castlegen::io::configuration::DEFAULT_SEED;
    use castlegen::spatial::grid::Biome;
    use clap::Parser;
    use std::path::{Path, PathBuf};

    // Tests parsing with no arguments falls back to defaults
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["castlegen"]);
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert_eq!(cli.count, 1);
        assert_eq!(cli.output, PathBuf::from("output"));
        assert!(cli.biomes.is_empty());
        assert!(!cli.png && !cli.report && !cli.quiet);
        assert_eq!(cli.verbose, 0);
    }

    // Tests short flags and repeated biome arguments
    // Verified by changing short flag definitions
    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "castlegen", "-s", "7", "-n", "3", "-W", "80", "-H", "70", "-p", "35", "-b", "ice:2",
            "-b", "Magma", "-vv",
        ]);
        assert_eq!(cli.seed, 7);
        assert_eq!(cli.count, 3);
        assert_eq!(cli.width, Some(80));
        assert_eq!(cli.height, Some(70));
        assert_eq!(cli.percentage, Some(35.0));
        assert_eq!(
            cli.biomes,
            vec![
                BiomeDefinition::new(Biome::Ice, 2),
                BiomeDefinition::new(Biome::Magma, 1)
            ]
        );
        assert_eq!(cli.verbose, 2);
    }

    // Tests biome definitions parse with and without a count
    // Verified by defaulting the count to zero
    #[test]
    fn test_parse_biome_definition() {
        assert_eq!(
            parse_biome_definition("water"),
            Ok(BiomeDefinition::new(Biome::Water, 1))
        );
        assert_eq!(
            parse_biome_definition("DESERT: 4"),
            Ok(BiomeDefinition::new(Biome::Desert, 4))
        );
        assert!(parse_biome_definition("lava").is_err());
        assert!(parse_biome_definition("ice:many").is_err());
    }

    // Tests flags override the corresponding stage parameters
    // Verified by ignoring the expansion flag
    #[test]
    fn test_pipeline_config_overrides() {
        let cli = Cli::parse_from([
            "castlegen",
            "--sections-x",
            "2",
            "--sections-y",
            "3",
            "--no-void",
            "--expansion",
            "all",
            "--entries",
            "2",
            "--exits",
            "3",
            "--keys",
            "4",
            "--biome",
            "swamp",
        ]);
        let config = cli.pipeline_config().expect("no file to read");
        assert_eq!((config.carver.sections_x, config.carver.sections_y), (2, 3));
        assert!(!config.carver.apply_void);
        assert_eq!(config.biomes.expansion_mode, ExpansionMode::All);
        assert_eq!(config.biomes.biomes, vec![BiomeDefinition::new(Biome::Swamp, 1)]);
        assert_eq!(
            (
                config.spawns.entry_count,
                config.spawns.exit_count,
                config.spawns.key_count
            ),
            (2, 3, 4)
        );
    }

    // Tests flags take precedence over the configuration file
    // Verified by applying the file after the flags
    #[test]
    fn test_config_file_then_flags() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("castle.json");
        std::fs::write(&path, r#"{"carver": {"width": 90, "height": 90}}"#).expect("write");

        let cli = Cli::parse_from([
            "castlegen",
            "--config",
            path.to_str().expect("utf-8 path"),
            "-W",
            "70",
        ]);
        let config = cli.pipeline_config().expect("config loads");
        assert_eq!(config.carver.width, 70);
        assert_eq!(config.carver.height, 90);
    }

    // Tests progress display requires a batch and no --quiet
    // Verified by inverting quiet flag logic
    #[test]
    fn test_should_show_progress() {
        assert!(!Cli::parse_from(["castlegen"]).should_show_progress());
        assert!(Cli::parse_from(["castlegen", "-n", "4"]).should_show_progress());
        assert!(!Cli::parse_from(["castlegen", "-n", "4", "-q"]).should_show_progress());
    }

    // Tests output files are named after their seed
    // Verified by dropping the prefix
    #[test]
    fn test_output_path() {
        assert_eq!(
            BatchRunner::output_path(Path::new("out"), 12, "png"),
            PathBuf::from("out/map_12.png")
        );
    }

    // Tests a batch exports one image and report per seed
    // Verified by exporting only the first seed
    #[test]
    fn test_batch_export() {
        let dir = tempfile::tempdir().expect("temp dir");
        let output = dir.path().to_str().expect("utf-8 path").to_string();
        let cli = Cli::parse_from([
            "castlegen", "-s", "3", "-n", "2", "-W", "20", "-H", "20", "-q", "--png", "--report",
            "-o", &output,
        ]);
        let mut runner = BatchRunner::new(cli).expect("runner builds");
        assert_eq!(runner.config().carver.width, 20);

        let summary = runner.run().expect("batch runs");
        assert_eq!(summary.generated, 2);
        assert_eq!(summary.failed, 0);
        for seed in [3, 4] {
            assert!(dir.path().join(format!("map_{seed}.png")).is_file());
            assert!(dir.path().join(format!("map_{seed}.json")).is_file());
        }
    }

    // Tests a failing single-map batch returns its error
    // Verified by counting the failure instead of returning it
    #[test]
    fn test_single_map_error() {
        let cli = Cli::parse_from(["castlegen", "-W", "5", "-q"]);
        let mut runner = BatchRunner::new(cli).expect("runner builds");
        assert!(runner.run().is_err());
    }
}
