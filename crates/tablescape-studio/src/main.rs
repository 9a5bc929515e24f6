use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tablescape_engine::device::{Gpu, GpuBackend, GpuInit, GraphicsBackend, RecordingBackend};
use tablescape_engine::logging::{init_logging, LoggingConfig};
use tablescape_engine::scene::{tabletop, FrameReport, PrepareReport, SceneComposer, SceneConfig, StatePolicy};

/// Renders the tabletop scene and prints what every draw sampled.
#[derive(Parser, Debug)]
#[command(name = "tablescape-studio", about = "Prepare and render the tabletop scene")]
struct Cli {
    /// Texture directory.
    #[arg(long, value_name = "DIR", default_value = "textures")]
    textures: PathBuf,

    /// Resolve every draw into a complete state record.
    #[arg(long)]
    explicit: bool,

    /// Upload textures to a headless wgpu device.
    #[arg(long)]
    gpu: bool,

    /// env_logger filter, overrides RUST_LOG.
    #[arg(long, value_name = "FILTER")]
    log: Option<String>,
}

impl Cli {
    fn scene_config(&self) -> SceneConfig {
        SceneConfig {
            texture_root: self.textures.clone(),
            state_policy: if self.explicit {
                StatePolicy::Explicit
            } else {
                StatePolicy::Persistent
            },
            ..SceneConfig::default()
        }
    }

    fn logging_config(&self) -> LoggingConfig {
        match &self.log {
            Some(filter) => LoggingConfig::with_filter(filter.as_str()),
            None => LoggingConfig::default(),
        }
    }
}

fn compose<B: GraphicsBackend>(composer: &mut SceneComposer<B>) -> (PrepareReport, FrameReport) {
    let prepared = composer.prepare(
        &tabletop::textures(),
        &tabletop::materials(),
        &tabletop::lights(),
        &tabletop::meshes(),
    );
    let frame = composer.render(&tabletop::composition());
    (prepared, frame)
}

fn print_report(prepared: &PrepareReport, frame: &FrameReport) {
    println!();
    println!("  textures");
    for (tag, slot) in &prepared.loaded {
        println!("    slot {slot:>2}  {tag}");
    }
    for (tag, err) in &prepared.failed {
        println!("    ----     {tag}: {err}");
    }

    println!();
    println!("  {:<3} {:<18} {:<17} {:>5} {:>5} {:>6}", "#", "object", "primitive", "tex", "lit", "shine");
    for (i, draw) in frame.draws.iter().enumerate() {
        let tex = if draw.state.use_texture != 0 {
            draw.state.texture_slot.to_string()
        } else {
            "-".to_owned()
        };
        let lit = if draw.state.use_lighting != 0 { "yes" } else { "no" };
        println!(
            "  {:<3} {:<18} {:<17} {:>5} {:>5} {:>6.1}",
            i,
            draw.label,
            draw.kind.name(),
            tex,
            lit,
            draw.state.shininess
        );
    }
    println!();
    println!("  {} draws, {} texture failures", frame.draws.len(), prepared.failed.len());
    println!();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let scene = cli.scene_config();

    init_logging(cli.logging_config());
    log::info!(
        "preparing tabletop scene from {} ({:?})",
        scene.texture_root.display(),
        scene.state_policy
    );

    let (prepared, frame) = if cli.gpu {
        let gpu = Gpu::new_blocking(GpuInit::default()).context("headless GPU initialization failed")?;
        let mut composer = SceneComposer::new(GpuBackend::new(gpu), scene);
        let reports = compose(&mut composer);

        let stats = composer.backend_mut().finish_frame();
        log::info!("gpu frame: {} draws, {} uniform bytes", stats.draws, stats.uniform_bytes);
        reports
    } else {
        let mut composer = SceneComposer::new(RecordingBackend::new(), scene);
        compose(&mut composer)
    };

    print_report(&prepared, &frame);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("tablescape-studio").chain(args.iter().copied()))
    }

    #[test]
    fn defaults() {
        let cli = parse(&[]).unwrap();
        let scene = cli.scene_config();
        assert_eq!(scene.state_policy, StatePolicy::Persistent);
        assert_eq!(scene.texture_root, PathBuf::from("textures"));
        assert!(scene.flip_vertically);
        assert!(!cli.gpu);
        assert_eq!(cli.logging_config().env_filter, LoggingConfig::default().env_filter);
    }

    #[test]
    fn flags() {
        let cli = parse(&["--textures", "assets", "--explicit", "--gpu", "--log", "debug"]).unwrap();
        let scene = cli.scene_config();
        assert_eq!(scene.texture_root, PathBuf::from("assets"));
        assert_eq!(scene.state_policy, StatePolicy::Explicit);
        assert!(cli.gpu);
        assert_eq!(cli.logging_config().env_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn help_and_errors() {
        let help = parse(&["--help"]).unwrap_err();
        assert_eq!(help.kind(), clap::error::ErrorKind::DisplayHelp);
        assert!(parse(&["--textures"]).is_err());
        assert!(parse(&["--bogus"]).is_err());
    }
}
