//! Robot service: the hexagonal core.
//!
//! [`RobotService`] owns the [`Robot`] registry, the command
//! [`Scheduler`] and the validated configuration.  It exposes a small,
//! hardware-agnostic API: one call per tick and one per operator request.
//! All I/O flows through ports bound into the robot at construction and the
//! [`EventSink`] passed at each call site.
//!
//! ```text
//!  OperatorRequest ──▶ ┌─────────────────────────┐ ──▶ EventSink
//!                      │       RobotService       │
//!       tick source ──▶│  Scheduler · Robot       │──▶ ports
//!                      └─────────────────────────┘
//! ```

use log::{info, warn};

use crate::command::{Command, CommandId};
use crate::commands::climbing::{ExtendClimbers, stop_climbers};
use crate::commands::drive::{SetReverse, reset_drive, toggle_gear, toggle_reverse};
use crate::config::RobotConfig;
use crate::error::{Result, ScheduleError};
use crate::robot::{Robot, RobotPorts};
use crate::scheduler::Scheduler;

use super::commands::OperatorRequest;
use super::ports::EventSink;

// ───────────────────────────────────────────────────────────────
// RobotService
// ───────────────────────────────────────────────────────────────

pub struct RobotService {
    robot: Robot,
    scheduler: Scheduler<Robot>,
    config: RobotConfig,
}

impl RobotService {
    /// Validate `config` and bind the robot to `ports`.
    ///
    /// Nothing is scheduled yet; the drive's default command is adopted on
    /// the first [`tick`](Self::tick).
    pub fn new(config: RobotConfig, ports: RobotPorts) -> Result<Self> {
        config.validate()?;
        let robot = Robot::new(&config, ports);
        info!(
            "RobotService ready: tick={}ms, log_every={}",
            config.tick_period_ms, config.execute_log_every
        );
        Ok(Self {
            robot,
            scheduler: Scheduler::new(),
            config,
        })
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// One scheduler pass.  Call once per `tick_period_ms`.
    pub fn tick(&mut self, sink: &mut impl EventSink) {
        self.scheduler.run(&mut self.robot, sink);
    }

    // ── Request handling ──────────────────────────────────────

    /// Act on an operator request.
    ///
    /// Returns the id of the command that was scheduled, `None` for the
    /// cancel requests, or the reason the scheduler refused.
    pub fn handle_request(
        &mut self,
        request: OperatorRequest,
        sink: &mut impl EventSink,
    ) -> core::result::Result<Option<CommandId>, ScheduleError> {
        let command: Box<dyn Command<Robot>> = match request {
            OperatorRequest::ExtendClimbers => {
                Box::new(ExtendClimbers::new(self.config.execute_log_every))
            }
            OperatorRequest::StopClimbers => Box::new(stop_climbers()),
            OperatorRequest::ToggleReverse => Box::new(toggle_reverse()),
            OperatorRequest::SetReverse(reverse) => Box::new(SetReverse::new(reverse)),
            OperatorRequest::ToggleGear => Box::new(toggle_gear()),
            OperatorRequest::ResetDrive => Box::new(reset_drive()),
            OperatorRequest::Cancel(id) => {
                if !self.scheduler.cancel(&mut self.robot, sink, id) {
                    warn!("RobotService: cancel {} ignored, not scheduled", id);
                }
                return Ok(None);
            }
            OperatorRequest::CancelAll => {
                self.scheduler.cancel_all(&mut self.robot, sink);
                return Ok(None);
            }
        };
        self.scheduler
            .schedule(&mut self.robot, sink, command)
            .map(Some)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn robot(&self) -> &Robot {
        &self.robot
    }

    pub fn scheduler(&self) -> &Scheduler<Robot> {
        &self.scheduler
    }

    pub fn config(&self) -> &RobotConfig {
        &self.config
    }

    /// Ticks run since startup.
    pub fn tick_count(&self) -> u64 {
        self.scheduler.tick_count()
    }
}
