//! Pocket Table headless runner
//!
//! Runs the simulation against a recording scene with the autoplay driver
//! and logs what happened. Useful for soak-testing tuning files.

use std::path::PathBuf;

use clap::Parser;

use pocket_table::autoplay::AutoPlayer;
use pocket_table::scene::MeshKind;
use pocket_table::sim::SimEvent;
use pocket_table::{RecordingScene, SimulationSession, TableLayout, Tuning};

#[derive(Debug, Parser)]
#[command(name = "pocket-table", about = "Headless billiards table simulation")]
struct Args {
    /// Number of frames to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u32,

    /// Frame timestep in seconds (defaults to 1 / target_fps)
    #[arg(long)]
    dt: Option<f32>,

    /// Autoplay RNG seed
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// JSON tuning file
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Print the final table state as JSON
    #[arg(long)]
    dump_state: bool,
}

#[derive(Debug, Default)]
struct RunStats {
    collisions: u32,
    wall_hits: u32,
    pocketed: u32,
    resets: u32,
}

impl RunStats {
    fn record(&mut self, event: &SimEvent) {
        match event {
            SimEvent::BallsCollided { .. } => self.collisions += 1,
            SimEvent::WallHit { .. } => self.wall_hits += 1,
            SimEvent::BallPocketed { ball, pocket } => {
                self.pocketed += 1;
                log::info!("Ball {ball} dropped into pocket {pocket}");
            }
            SimEvent::PlayerPocketed { pocket } => {
                self.resets += 1;
                log::info!("Scratch in pocket {pocket}, table reset");
            }
            SimEvent::ShotTaken { .. } | SimEvent::TableAtRest => {}
        }
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path),
        None => Tuning::default(),
    };
    let dt = args.dt.unwrap_or(1.0 / tuning.target_fps as f32);
    log::info!("Pocket Table (headless) starting: {} frames, dt={dt:.4}, seed={}", args.frames, args.seed);

    let mut session = SimulationSession::new(RecordingScene::new(), TableLayout::CLASSIC, tuning);
    session.init();

    let mut autoplay = AutoPlayer::new(args.seed);
    let mut stats = RunStats::default();

    for _ in 0..args.frames {
        autoplay.drive(&mut session);
        session.update(dt);
        for event in session.drain_events() {
            stats.record(&event);
        }
    }

    log::info!(
        "Done: {} shots, {} collisions, {} cushion hits, {} pocketed, {} resets, {} balls on table",
        autoplay.shots(),
        stats.collisions,
        stats.wall_hits,
        stats.pocketed,
        stats.resets,
        session.scene().live_count(MeshKind::Ball),
    );

    if args.dump_state {
        match serde_json::to_string_pretty(&session.snapshot()) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Cannot serialize table state: {e}"),
        }
    }

    session.deinit();
}
