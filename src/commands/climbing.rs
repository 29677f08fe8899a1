//! Climber commands.

use log::info;

use crate::command::{Command, CommandContext, InstantCommand};
use crate::robot::{CLIMBER, Robot};
use crate::subsystem::Requirements;

/// Drive both legs out until both limit switches close, then stop them.
///
/// There is no timeout: a switch that never closes keeps the command
/// running until something pre-empts or cancels it.  Pre-emption stops the
/// legs the same way normal completion does.
pub struct ExtendClimbers {
    log_every: u32,
}

impl ExtendClimbers {
    /// `log_every` throttles the per-tick execute log line.
    pub fn new(log_every: u32) -> Self {
        Self { log_every }
    }
}

impl Command<Robot> for ExtendClimbers {
    fn name(&self) -> &'static str {
        "ExtendClimbers"
    }

    fn requirements(&self) -> Requirements {
        Requirements::of(&[CLIMBER])
    }

    fn initialize(&mut self, ctx: &mut CommandContext<'_, Robot>) {
        info!("ExtendClimbers: initialized ({})", ctx.id());
    }

    fn execute(&mut self, ctx: &mut CommandContext<'_, Robot>) {
        ctx.robot.climber.extend();
        let tick = ctx.tick();
        ctx.log_every(self.log_every, format_args!("ExtendClimbers: extending (tick {tick})"));
    }

    fn is_finished(&mut self, ctx: &mut CommandContext<'_, Robot>) -> bool {
        ctx.robot.climber.is_fully_extended()
    }

    fn end(&mut self, ctx: &mut CommandContext<'_, Robot>) {
        ctx.robot.climber.stop();
        info!("ExtendClimbers: ended ({})", ctx.id());
    }
}

/// Halt both legs and release the climber.
pub fn stop_climbers() -> InstantCommand<Robot> {
    InstantCommand::new("StopClimbers", Requirements::of(&[CLIMBER]), |robot| {
        robot.climber.stop()
    })
}
