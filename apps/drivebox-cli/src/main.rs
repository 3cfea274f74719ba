use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use drivebox_common::Pose;
use drivebox_input::InputScript;
use drivebox_kernel::{Car, Entity, World};
use drivebox_render::{DebugTextRenderer, RenderView, Renderer};
use drivebox_track::{TrackFile, TrackGeometry};
use drivebox_vehicle::{VehicleModel, VehicleParams};
use glam::Vec2;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "drivebox-cli", about = "CLI tool for drivebox sandboxes")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Drive one car with scripted controls at a fixed timestep
    Simulate {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "120")]
        ticks: u64,
        /// Seconds per tick
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f32,
        /// Control script, e.g. "forward*120, forward+left*30, idle*60"
        #[arg(short, long)]
        script: Option<String>,
        /// Print a trace line every N ticks
        #[arg(short, long, default_value = "10")]
        every: u64,
        /// YAML file with vehicle tuning
        #[arg(long)]
        vehicle_config: Option<PathBuf>,
    },
    /// Summarize a saved track file
    Track {
        /// Path to the track JSON
        path: PathBuf,
    },
}

struct SimulateArgs<'a> {
    ticks: u64,
    dt: f32,
    script: Option<&'a str>,
    every: u64,
    params: VehicleParams,
}

fn simulate(args: &SimulateArgs<'_>, out: &mut impl Write) -> Result<()> {
    let mut script = match args.script {
        Some(source) => InputScript::parse(source).context("parsing --script")?,
        None => InputScript::default(),
    };
    let mut world = World::new();
    world.spawn(Entity::Car(Car::new(
        Pose::new(Vec2::ZERO, 0.0),
        VehicleModel::new(args.params),
    )));

    tracing::info!(ticks = args.ticks, dt = args.dt, "simulation started");
    writeln!(out, "Simulating {} ticks at dt={:.4}s", args.ticks, args.dt)?;
    let every = args.every.max(1);
    // Synthetic time keeps runs reproducible.
    let start = Instant::now();
    for _ in 0..args.ticks {
        let controls = script.next_controls();
        let now = start + Duration::from_secs_f64(world.elapsed() + f64::from(args.dt));
        world.step(&controls, args.dt, now);
        if world.tick() % every == 0 {
            if let Some(car) = world.cars().next() {
                let s = car.state();
                writeln!(
                    out,
                    "tick={:>5} x={:>9.2} y={:>9.2} heading={:>6.1} speed={:>8.2} rpm={:>5.2}",
                    world.tick(),
                    s.position.x,
                    s.position.y,
                    s.heading,
                    s.speed,
                    s.rpm
                )?;
            }
        }
    }

    tracing::info!(
        ticks = world.tick(),
        elapsed = world.elapsed(),
        "simulation finished"
    );
    write!(out, "{}", DebugTextRenderer::new().render(&world, &RenderView::default()))?;
    Ok(())
}

fn summarize_track(path: &Path, out: &mut impl Write) -> Result<()> {
    let file = TrackFile::read(path).with_context(|| format!("reading {}", path.display()))?;
    let mut track = TrackGeometry::from_points(file.to_points());

    writeln!(out, "Track {}", path.display())?;
    writeln!(out, "points: {}", track.len())?;
    writeln!(out, "edges (open): {}", track.edges().len())?;
    writeln!(out, "length (open): {:.1}", track.length())?;
    match track.start_pose() {
        Some(pose) => writeln!(
            out,
            "start: ({:.1}, {:.1}) heading {:.1}",
            pose.position.x, pose.position.y, pose.heading
        )?,
        None => writeln!(out, "start: none")?,
    }
    if track.toggle_finalized(Instant::now()) {
        writeln!(out, "length (closed): {:.1}", track.length())?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("drivebox-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("kernel: {}", drivebox_kernel::crate_info());
            println!("vehicle: {}", drivebox_vehicle::crate_info());
            println!("track: {}", drivebox_track::crate_info());
            println!("input: {}", drivebox_input::crate_info());
            println!("render: {}", drivebox_render::crate_info());
            let params = VehicleParams::default();
            println!(
                "default rpm range: [{}, {}], power gain {}",
                params.rpm_min, params.rpm_max, params.power_gain
            );
        }
        Commands::Simulate {
            ticks,
            dt,
            script,
            every,
            vehicle_config,
        } => {
            let params = match vehicle_config {
                Some(path) => VehicleParams::from_yaml_file(&path)
                    .with_context(|| format!("loading vehicle config {}", path.display()))?,
                None => VehicleParams::default(),
            };
            let args = SimulateArgs {
                ticks,
                dt,
                script: script.as_deref(),
                every,
                params,
            };
            simulate(&args, &mut std::io::stdout().lock())?;
        }
        Commands::Track { path } => {
            summarize_track(&path, &mut std::io::stdout().lock())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_simulate(ticks: u64, dt: f32, script: Option<&str>, every: u64) -> String {
        let args = SimulateArgs {
            ticks,
            dt,
            script,
            every,
            params: VehicleParams::default(),
        };
        let mut out = Vec::new();
        simulate(&args, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn simulate_traces_every_n_ticks() {
        let out = run_simulate(30, 1.0 / 60.0, Some("forward*30"), 10);
        let trace: Vec<_> = out.lines().filter(|l| l.starts_with("tick=")).collect();
        assert_eq!(trace.len(), 3);
        assert!(out.contains("tick=30"));
        assert!(out.contains("Entities: 1"));
    }

    #[test]
    fn simulate_matches_the_worked_example() {
        // rpm 0 -> 3 on the first tick, then 360 px/s on the second.
        let out = run_simulate(2, 1.0, Some("forward*2"), 1);
        let trace: Vec<_> = out.lines().filter(|l| l.starts_with("tick=")).collect();
        assert!(trace[0].contains("speed=    0.00"));
        assert!(trace[0].contains("rpm= 3.00"));
        assert!(trace[1].contains("speed=  360.00"));
        assert!(trace[1].contains("y=  -360.00"));
    }

    #[test]
    fn simulate_without_script_idles() {
        let out = run_simulate(5, 0.1, None, 5);
        assert!(out.contains("x=     0.00 y=     0.00"));
    }

    #[test]
    fn simulate_rejects_bad_script() {
        let args = SimulateArgs {
            ticks: 1,
            dt: 0.1,
            script: Some("warp*3"),
            every: 1,
            params: VehicleParams::default(),
        };
        assert!(simulate(&args, &mut Vec::new()).is_err());
    }

    #[test]
    fn track_summary_reports_open_and_closed_length() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("square.json");
        TrackFile::from_points(&[
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ])
        .write(&path)
        .unwrap();

        let mut out = Vec::new();
        summarize_track(&path, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("points: 4"));
        assert!(out.contains("edges (open): 3"));
        assert!(out.contains("length (open): 30.0"));
        assert!(out.contains("length (closed): 40.0"));
        assert!(out.contains("start: (0.0, 0.0) heading 90.0"));
    }

    #[test]
    fn track_summary_fails_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(summarize_track(&dir.path().join("nope.json"), &mut Vec::new()).is_err());
    }
}
