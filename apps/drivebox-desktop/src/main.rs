mod app;
mod keymap;
mod paint;
mod setup;

use anyhow::{Context, Result};
use clap::Parser;
use drivebox_input::InputScript;
use drivebox_kernel::{DEFAULT_TPS, IdleInput, SandboxLoop, SimulationClock};
use drivebox_render::{HeadlessPresenter, RenderConfig};
use glam::UVec2;
use setup::{Mode, WorldOptions, build_world};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

#[derive(Parser)]
#[command(name = "drivebox-desktop", about = "Drive a car or draw a track")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Target ticks per second
    #[arg(long, default_value_t = DEFAULT_TPS)]
    tps: u32,

    /// Run without a window; frames are logged instead
    #[arg(long)]
    headless: bool,

    /// Window size in pixels
    #[arg(long, num_args = 2, value_names = ["W", "H"], default_values_t = [1280, 720])]
    resolution: Vec<u32>,

    /// Drive a car or build a track
    #[arg(long, value_enum, default_value_t = Mode::Drive)]
    mode: Mode,

    /// Track file to drive on, or to edit in build mode
    #[arg(long)]
    track: Option<PathBuf>,

    /// Directory holding default.json when no --track is given
    #[arg(long, default_value = "tracks")]
    save_dir: PathBuf,

    /// YAML file with vehicle tuning
    #[arg(long)]
    vehicle_config: Option<PathBuf>,

    /// Stop after this many ticks
    #[arg(long)]
    ticks: Option<u64>,

    /// Scripted controls for headless runs, e.g. "forward*120, forward+left*30"
    #[arg(long)]
    script: Option<String>,
}

impl Cli {
    fn render_config(&self) -> RenderConfig {
        let resolution = match self.resolution.as_slice() {
            [w, h] => UVec2::new((*w).max(1), (*h).max(1)),
            _ => RenderConfig::default().resolution,
        };
        RenderConfig {
            resolution,
            headless: self.headless,
        }
    }

    fn world_options(&self, render: &RenderConfig) -> WorldOptions {
        WorldOptions {
            mode: self.mode,
            track: self.track.clone(),
            save_dir: self.save_dir.clone(),
            vehicle_config: self.vehicle_config.clone(),
            resolution: render.resolution,
        }
    }
}

/// Clear `running` on Ctrl-C so the loop winds down on its own.
fn install_interrupt(running: Arc<AtomicBool>) -> Result<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .context("installing Ctrl-C handler")
}

fn run_headless(sandbox: &mut SandboxLoop, cli: &Cli, render: &RenderConfig) -> Result<()> {
    let mut presenter = HeadlessPresenter::new(render).with_log_every(u64::from(cli.tps));
    match &cli.script {
        Some(source) => {
            let mut script = InputScript::parse(source).context("parsing --script")?;
            tracing::info!(ticks = script.len(), "running scripted input");
            sandbox.run(&mut script, &mut presenter);
        }
        None => sandbox.run(&mut IdleInput, &mut presenter),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!(mode = ?cli.mode, headless = cli.headless, "drivebox-desktop starting");

    let render = cli.render_config();
    let world = build_world(&cli.world_options(&render))?;
    let mut sandbox = SandboxLoop::new(world, SimulationClock::new(cli.tps));
    if let Some(ticks) = cli.ticks {
        sandbox = sandbox.with_tick_limit(ticks);
    }
    install_interrupt(sandbox.running_flag())?;

    if render.headless {
        return run_headless(&mut sandbox, &cli, &render);
    }
    if cli.script.is_some() {
        tracing::warn!("--script only applies to headless runs; ignoring it");
    }

    let event_loop = EventLoop::new()?;
    let mut app = app::DesktopApp::new(sandbox, cli.mode, render);
    event_loop.run_app(&mut app)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_flags() {
        let cli = Cli::parse_from(["drivebox-desktop"]);
        assert_eq!(cli.tps, 60);
        assert_eq!(cli.mode, Mode::Drive);
        assert_eq!(cli.save_dir, PathBuf::from("tracks"));
        let render = cli.render_config();
        assert_eq!(render.resolution, UVec2::new(1280, 720));
        assert!(!render.headless);
    }

    #[test]
    fn parses_headless_build_run() {
        let cli = Cli::parse_from([
            "drivebox-desktop",
            "--headless",
            "--mode",
            "build",
            "--resolution",
            "1920",
            "1080",
            "--ticks",
            "10",
        ]);
        let render = cli.render_config();
        assert!(render.headless);
        assert_eq!(render.resolution, UVec2::new(1920, 1080));
        assert_eq!(cli.mode, Mode::Build);
        assert_eq!(cli.ticks, Some(10));
    }

    #[test]
    fn headless_scripted_run_stops_at_tick_limit() {
        let dir = tempfile::tempdir().unwrap();
        let save_dir = dir.path().to_string_lossy().into_owned();
        let cli = Cli::parse_from([
            "drivebox-desktop",
            "--headless",
            "--tps",
            "1000",
            "--ticks",
            "5",
            "--save-dir",
            save_dir.as_str(),
            "--script",
            "forward*5",
        ]);
        let render = cli.render_config();
        let world = build_world(&cli.world_options(&render)).unwrap();
        let mut sandbox =
            SandboxLoop::new(world, SimulationClock::new(cli.tps)).with_tick_limit(5);
        run_headless(&mut sandbox, &cli, &render).unwrap();
        assert_eq!(sandbox.world().tick(), 5);
        assert!(!sandbox.is_running());
        let car = sandbox.world().cars().next().unwrap();
        assert!(car.state().rpm > 0.0);
    }
}
