use std::path::PathBuf;

use caustic_renderer::Preset;
use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneName {
    #[value(name = "threebody")]
    ThreeBody,
    Saturn,
}

impl From<SceneName> for Preset {
    fn from(name: SceneName) -> Self {
        match name {
            SceneName::ThreeBody => Preset::ThreeBody,
            SceneName::Saturn => Preset::Saturn,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "caustic", version)]
#[command(about = "Progressive Monte Carlo light transport renderer")]
pub struct Cli {
    /// Logging level; RUST_LOG applies when unset (default "info")
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Accumulate passes into a checkpoint until stopped
    Render(RenderArgs),
    /// Write the mean image of a checkpoint as PNG
    Export(ExportArgs),
    /// Convert an 8-bit image into a projector texture file
    ImportTexture(ImportTextureArgs),
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Scene to render
    #[arg(long, value_enum, default_value = "threebody")]
    pub scene: SceneName,

    /// Directory holding the projector textures
    #[arg(long, default_value = ".")]
    pub assets: PathBuf,

    /// Checkpoint to resume from and save to
    #[arg(long, default_value = "out/scene.dat")]
    pub checkpoint: PathBuf,

    /// Image width in pixels (fresh sessions only)
    #[arg(long, default_value_t = 1600, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub width: usize,

    /// Image height in pixels (fresh sessions only)
    #[arg(long, default_value_t = 1200, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub height: usize,

    /// Creating this file ends the session
    #[arg(long, default_value = "stop")]
    pub stop_file: PathBuf,

    /// Passes between stop-file checks
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_stride: u64,

    /// Stop after this many passes
    #[arg(long)]
    pub passes: Option<u64>,

    /// Random seed (defaults to the current time)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Cap on bounces followed per path
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Worker threads (defaults to one per core)
    #[arg(long, short = 'j')]
    pub threads: Option<usize>,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Checkpoint to read
    #[arg(long, default_value = "out/scene.dat")]
    pub checkpoint: PathBuf,

    /// PNG file to write
    #[arg(long, short, default_value = "out/scene.png")]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct ImportTextureArgs {
    /// Source image (any format the image crate reads)
    pub image: PathBuf,

    /// Projector texture file to write
    pub output: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_render_defaults() {
        let cli = Cli::try_parse_from(["caustic", "render"]).unwrap();
        let Command::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.scene, SceneName::ThreeBody);
        assert_eq!((args.width, args.height), (1600, 1200));
        assert_eq!(args.poll_stride, 16);
        assert_eq!(args.checkpoint, PathBuf::from("out/scene.dat"));
        assert!(args.seed.is_none());
        assert!(cli.log_level.is_none());
    }

    #[test]
    fn test_render_flags() {
        let cli = Cli::try_parse_from([
            "caustic",
            "--log-level",
            "debug",
            "render",
            "--scene",
            "saturn",
            "--passes",
            "10",
            "--seed",
            "42",
            "-j",
            "4",
        ])
        .unwrap();
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        let Command::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(Preset::from(args.scene), Preset::Saturn);
        assert_eq!(args.passes, Some(10));
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.threads, Some(4));
    }

    #[test]
    fn test_zero_poll_stride_rejected() {
        assert!(Cli::try_parse_from(["caustic", "render", "--poll-stride", "0"]).is_err());
    }

    #[test]
    fn test_zero_resolution_rejected() {
        assert!(Cli::try_parse_from(["caustic", "render", "--width", "0"]).is_err());
        assert!(Cli::try_parse_from(["caustic", "render", "--height", "0"]).is_err());

        let cli = Cli::try_parse_from(["caustic", "render", "--width", "1", "--height", "1"]).unwrap();
        let Command::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!((args.width, args.height), (1, 1));
    }

    #[test]
    fn test_import_texture_positional() {
        let cli = Cli::try_parse_from(["caustic", "import-texture", "in.png", "out.dat"]).unwrap();
        let Command::ImportTexture(args) = cli.command else {
            panic!("expected import-texture");
        };
        assert_eq!(args.image, PathBuf::from("in.png"));
        assert_eq!(args.output, PathBuf::from("out.dat"));
    }
}
