//! Robot core: host simulation entry point
//!
//! Runs the control core against the in-memory plant with a scripted
//! operator, at the configured tick period but without sleeping.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                    │
//! │   SimPlant ports            LogEventSink                   │
//! │   (motors, valve, gyro,     (EventSink)                    │
//! │    encoders, pins)                                         │
//! │  ──────────────── Port Trait Boundary ─────────────────    │
//! │  ┌──────────────────────────────────────────────────────┐  │
//! │  │      RobotService: Scheduler · Drive · Climber       │  │
//! │  └──────────────────────────────────────────────────────┘  │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `robot-sim [config.json]`

use anyhow::{Context, Result};
use log::{info, warn};

use robot_core::adapters::log_sink::LogEventSink;
use robot_core::adapters::sim::SimPlant;
use robot_core::app::commands::OperatorRequest;
use robot_core::app::service::RobotService;
use robot_core::config::RobotConfig;

/// Seconds the scripted run lasts.
const RUN_SECS: u32 = 6;

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    tracing_subscriber::fmt::init();

    info!("╔══════════════════════════════════════╗");
    info!("║  robot-sim v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Config (file or defaults) ──────────────────────────
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let bytes = std::fs::read(&path).with_context(|| format!("reading {path}"))?;
            let config = RobotConfig::from_json(&bytes)
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("loading {path}"))?;
            info!("Config loaded from {}", path);
            config
        }
        None => {
            info!("No config given, using defaults");
            RobotConfig::default()
        }
    };

    // ── 3. Plant + service ────────────────────────────────────
    let plant = SimPlant::new();
    let mut svc = RobotService::new(config, plant.ports())?;
    let mut sink = LogEventSink::new();

    let dt = svc.config().tick_period_secs();
    let ticks_per_sec = (1000 / svc.config().tick_period_ms).max(1);
    let total = RUN_SECS * ticks_per_sec;

    // ── 4. Scripted run ───────────────────────────────────────
    for tick in 0..total {
        let t = tick / ticks_per_sec;
        let at_second = tick % ticks_per_sec == 0;

        plant.set_axes(if t < 2 { 0.6 } else { 0.0 }, if t == 1 { 0.3 } else { 0.0 });

        let request = match (t, at_second) {
            (1, true) => Some(OperatorRequest::ToggleGear),
            (2, true) => Some(OperatorRequest::ToggleReverse),
            (3, true) => Some(OperatorRequest::ExtendClimbers),
            _ => None,
        };
        if let Some(request) = request {
            if let Err(e) = svc.handle_request(request, &mut sink) {
                warn!("{:?} refused: {}", request, e);
            }
        }

        svc.tick(&mut sink);
        plant.step(dt);
    }

    // ── 5. Summary ────────────────────────────────────────────
    let snap = svc.robot().drive.snapshot();
    let (left_leg, right_leg) = plant.leg_travel();
    info!(
        "Done after {} ticks: heading={:.1}deg encoders=({:.0}, {:.0}) reversed={} high_gear={}",
        svc.tick_count(),
        snap.heading_deg,
        snap.left_position,
        snap.right_position,
        snap.reversed,
        snap.high_gear,
    );
    info!(
        "Climber legs at ({:.2}, {:.2})m, {} command(s) still scheduled",
        left_leg,
        right_leg,
        svc.scheduler().scheduled_len()
    );
    Ok(())
}
