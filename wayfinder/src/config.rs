//! Command-line configuration and logging setup.

use std::error::Error;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use wayfinder_paths::Metric;

use crate::editor::EditorConfig;

/// Heuristic selectable on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum HeuristicKind {
    /// Straight-line distance between cell corners.
    Euclidean,
    /// Orthogonal step count.
    Manhattan,
}

/// Log verbosity selectable on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Interactive A* path finding on a square grid.
#[derive(Parser, Debug, Clone)]
#[command(name = "wayfinder", version, about)]
pub struct Config {
    /// Cells per side of the board.
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(i32).range(2..=200))]
    pub size: i32,

    /// Side of one cell in pixels. Sizes the window and scales the
    /// Euclidean heuristic.
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(2..=100))]
    pub cell_px: u32,

    /// Distance estimate used by the search.
    #[arg(long, value_enum, default_value_t = HeuristicKind::Euclidean)]
    pub heuristic: HeuristicKind,

    /// Pause after every search step, in milliseconds [default: 0 in the
    /// terminal, 5 in the window].
    #[arg(long)]
    pub step_delay_ms: Option<u64>,

    /// Fraction of empty cells turned into walls by `g`.
    #[arg(long, default_value_t = 0.3, value_parser = parse_density)]
    pub obstacle_density: f64,

    /// Seed for the first `g` scatter; later scatters use the following
    /// seeds.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Write the log to this file instead of stderr.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log verbosity [default: info with --log-file, error otherwise].
    /// `RUST_LOG` is honoured when this is not given.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}

fn parse_density(s: &str) -> Result<f64, String> {
    let density: f64 = s.parse().map_err(|e| format!("`{s}` is not a number: {e}"))?;
    if (0.0..=0.9).contains(&density) {
        Ok(density)
    } else {
        Err(format!("density must be between 0 and 0.9, got {density}"))
    }
}

impl Config {
    /// The heuristic for this configuration.
    pub fn metric(&self) -> Metric {
        match self.heuristic {
            HeuristicKind::Euclidean => Metric::euclidean(f64::from(self.cell_px)),
            HeuristicKind::Manhattan => Metric::Manhattan,
        }
    }

    /// The editor settings, with `default_delay_ms` used when no step delay
    /// was given.
    pub fn editor(&self, default_delay_ms: u64) -> EditorConfig {
        EditorConfig {
            size: self.size,
            metric: self.metric(),
            step_delay: Duration::from_millis(self.step_delay_ms.unwrap_or(default_delay_ms)),
            obstacle_density: self.obstacle_density,
            seed: self.seed,
        }
    }

    fn default_filter(&self) -> &'static str {
        if self.log_file.is_some() { "info" } else { "error" }
    }
}

/// Install the global logger described by `config`.
pub fn init_logging(config: &Config) -> Result<(), Box<dyn Error>> {
    let env = env_logger::Env::default().default_filter_or(config.default_filter());
    let mut builder = env_logger::Builder::from_env(env);
    builder.format(|buf, record| {
        writeln!(
            buf,
            "[{} {:<5} {}] {}",
            buf.timestamp_millis(),
            record.level(),
            record.target(),
            record.args()
        )
    });
    if let Some(level) = config.log_level {
        builder.filter_level(level.into());
    }
    if let Some(path) = &config.log_file {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Config, clap::Error> {
        Config::try_parse_from(std::iter::once("wayfinder").chain(args.iter().copied()))
    }

    #[test]
    fn cli_is_well_formed() {
        Config::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cfg = parse(&[]).unwrap();
        assert_eq!(cfg.size, 50);
        assert_eq!(cfg.cell_px, 20);
        assert_eq!(cfg.heuristic, HeuristicKind::Euclidean);
        assert_eq!(cfg.metric(), Metric::euclidean(20.0));
        assert_eq!(cfg.step_delay_ms, None);
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.default_filter(), "error");
    }

    #[test]
    fn step_delay_defaults_per_front_end() {
        let cfg = parse(&[]).unwrap();
        assert_eq!(cfg.editor(5).step_delay, Duration::from_millis(5));
        let cfg = parse(&["--step-delay-ms", "12"]).unwrap();
        assert_eq!(cfg.editor(5).step_delay, Duration::from_millis(12));
    }

    #[test]
    fn manhattan_is_selectable() {
        let cfg = parse(&["--heuristic", "manhattan"]).unwrap();
        assert_eq!(cfg.metric(), Metric::Manhattan);
    }

    #[test]
    fn size_is_range_checked() {
        assert!(parse(&["--size", "1"]).is_err());
        assert!(parse(&["--size", "201"]).is_err());
        assert_eq!(parse(&["--size", "2"]).unwrap().size, 2);
    }

    #[test]
    fn density_is_range_checked() {
        assert!(parse(&["--obstacle-density", "0.95"]).is_err());
        assert!(parse(&["--obstacle-density", "-0.1"]).is_err());
        assert!(parse(&["--obstacle-density", "lots"]).is_err());
        let cfg = parse(&["--obstacle-density", "0.5"]).unwrap();
        assert_eq!(cfg.obstacle_density, 0.5);
    }

    #[test]
    fn log_file_raises_default_level() {
        let cfg = parse(&["--log-file", "wayfinder.log"]).unwrap();
        assert_eq!(cfg.default_filter(), "info");
        let cfg = parse(&["--log-level", "debug"]).unwrap();
        assert_eq!(cfg.log_level.map(LevelFilter::from), Some(LevelFilter::Debug));
    }
}
