mod cli;

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use caustic_core::{preview, Checkpoint, Texture};
use caustic_renderer::{session, Preset, RenderConfig};
use clap::Parser;
use log::LevelFilter;

use cli::{Cli, Command, ExportArgs, ImportTextureArgs, RenderArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::new();
    logger.filter_level(LevelFilter::Info).parse_default_env();
    if let Some(level) = cli.log_level {
        logger.filter_level(level.into());
    }
    logger.init();

    match cli.command {
        Command::Render(args) => render(args),
        Command::Export(args) => export(args),
        Command::ImportTexture(args) => import_texture(args),
    }
}

fn render(args: RenderArgs) -> Result<()> {
    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure worker threads")?;
    }
    log::info!("Using {} worker threads", rayon::current_num_threads());

    let preset = Preset::from(args.scene);
    let (mut scene, camera) = preset
        .build(&args.assets)
        .with_context(|| format!("Failed to build scene '{}'", preset.name()))?;
    if let Some(depth) = args.max_depth {
        scene = scene.with_max_depth(depth);
    }

    let seed = args.seed.unwrap_or_else(seed_from_clock);
    let mut config = RenderConfig::default()
        .with_resolution(args.width, args.height)
        .with_checkpoint(&args.checkpoint)
        .with_stop_file(&args.stop_file)
        .with_poll_stride(args.poll_stride)
        .with_seed(seed);
    if let Some(passes) = args.passes {
        config = config.with_max_passes(passes);
    }
    log::info!("Scene '{}', seed {}", preset.name(), seed);

    session::render(&scene, &camera, &config)?;
    Ok(())
}

fn export(args: ExportArgs) -> Result<()> {
    let checkpoint = Checkpoint::load(&args.checkpoint)
        .with_context(|| format!("Failed to read checkpoint {}", args.checkpoint.display()))?;
    preview::save_png(
        &args.output,
        checkpoint.width,
        checkpoint.height,
        &checkpoint.mean(),
    )
    .with_context(|| format!("Failed to write {}", args.output.display()))?;

    log::info!(
        "Exported {} ({} passes) to {}",
        args.checkpoint.display(),
        checkpoint.count,
        args.output.display()
    );
    Ok(())
}

fn import_texture(args: ImportTextureArgs) -> Result<()> {
    let texture = Texture::from_image(&args.image)
        .with_context(|| format!("Failed to read image {}", args.image.display()))?;
    texture
        .save(&args.output)
        .with_context(|| format!("Failed to write texture {}", args.output.display()))?;

    log::info!(
        "Imported {}x{} texture to {}",
        texture.width,
        texture.height,
        args.output.display()
    );
    Ok(())
}

fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
