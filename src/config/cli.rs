//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use super::Config;

/// Animated solar system.
///
/// CLI values override settings loaded from the config file.
#[derive(Parser, Debug, Default)]
#[command(name = "solar-system", about = "Animated solar system")]
pub struct CliArgs {
    /// Path to a RON config file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for orbital phases and asteroid placement.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop after this many frames.
    #[arg(long)]
    pub steps: Option<u64>,

    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of asteroids in the belt.
    #[arg(long)]
    pub asteroids: Option<usize>,

    /// Font file for planet labels.
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Don't draw planet labels.
    #[arg(long)]
    pub no_labels: bool,

    /// Print the effective config as RON and exit.
    #[arg(long)]
    pub print_config: bool,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.scene.seed = Some(seed);
        }
        if let Some(steps) = args.steps {
            self.run.steps = Some(steps);
        }
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(count) = args.asteroids {
            self.scene.belt.count = count;
        }
        if let Some(ref font) = args.font {
            self.labels.font_path = Some(font.clone());
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if args.no_labels {
            self.labels.enabled = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args = CliArgs::try_parse_from([
            "solar-system",
            "--seed",
            "42",
            "--steps",
            "600",
            "--asteroids",
            "50",
            "--no-labels",
        ])
        .unwrap();

        assert_eq!(args.seed, Some(42));
        assert_eq!(args.steps, Some(600));
        assert_eq!(args.asteroids, Some(50));
        assert!(args.no_labels);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_print_config_flag() {
        let args =
            CliArgs::try_parse_from(["solar-system", "--print-config", "--seed", "9"]).unwrap();
        assert!(args.print_config);

        let config = Config::from_args(&args).unwrap();
        let printed = Config::from_ron(&config.to_ron().unwrap()).unwrap();
        assert_eq!(printed.scene.seed, Some(9));
    }

    #[test]
    fn test_overrides() {
        let args = CliArgs {
            seed: Some(5),
            width: Some(640),
            font: Some(PathBuf::from("label.ttf")),
            log_level: Some(String::from("debug")),
            ..CliArgs::default()
        };

        let mut config = Config::default();
        config.apply_cli_overrides(&args);

        assert_eq!(config.scene.seed, Some(5));
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 800);
        assert_eq!(config.labels.font_path, Some(PathBuf::from("label.ttf")));
        assert_eq!(config.debug.log_level, "debug");
        assert!(config.labels.enabled);
        assert_eq!(config.run.steps, None);
    }

    #[test]
    fn test_no_args_keeps_defaults() {
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, Config::default());
    }
}
