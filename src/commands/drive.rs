//! Drive commands.
//!
//! [`JoystickDrive`] is the drive's default command; the rest are one-shot
//! actions that briefly take the drive and hand it back.

use log::debug;

use crate::app::ports::DriverInputPort;
use crate::command::{Command, CommandContext, InstantCommand};
use crate::robot::{DRIVE, Robot};
use crate::subsystem::Requirements;

/// Arcade drive from the driver's sticks, every tick, forever.
pub struct JoystickDrive {
    input: Box<dyn DriverInputPort>,
}

impl JoystickDrive {
    pub fn new(input: Box<dyn DriverInputPort>) -> Self {
        Self { input }
    }
}

impl Command<Robot> for JoystickDrive {
    fn name(&self) -> &'static str {
        "JoystickDrive"
    }

    fn requirements(&self) -> Requirements {
        Requirements::of(&[DRIVE])
    }

    fn initialize(&mut self, ctx: &mut CommandContext<'_, Robot>) {
        debug!("JoystickDrive: driver in control ({})", ctx.id());
    }

    fn execute(&mut self, ctx: &mut CommandContext<'_, Robot>) {
        let axes = self.input.axes();
        ctx.robot.drive.arcade_drive(axes.forward, axes.turn);
    }

    fn is_finished(&mut self, _ctx: &mut CommandContext<'_, Robot>) -> bool {
        false
    }

    fn end(&mut self, ctx: &mut CommandContext<'_, Robot>) {
        ctx.robot.drive.stop();
    }
}

/// Set the logical front explicitly.
pub struct SetReverse {
    reverse: bool,
}

impl SetReverse {
    pub fn new(reverse: bool) -> Self {
        Self { reverse }
    }
}

impl Command<Robot> for SetReverse {
    fn name(&self) -> &'static str {
        "SetReverse"
    }

    fn requirements(&self) -> Requirements {
        Requirements::of(&[DRIVE])
    }

    fn initialize(&mut self, ctx: &mut CommandContext<'_, Robot>) {
        ctx.robot.drive.set_reverse(self.reverse);
    }

    fn is_finished(&mut self, _ctx: &mut CommandContext<'_, Robot>) -> bool {
        true
    }
}

pub fn toggle_reverse() -> InstantCommand<Robot> {
    InstantCommand::new("ToggleReverse", Requirements::of(&[DRIVE]), |robot| {
        robot.drive.toggle_reverse()
    })
}

pub fn toggle_gear() -> InstantCommand<Robot> {
    InstantCommand::new("ToggleGear", Requirements::of(&[DRIVE]), |robot| {
        robot.drive.toggle_gear_speed()
    })
}

/// Stop the drive and zero its gyro and encoders.
pub fn reset_drive() -> InstantCommand<Robot> {
    InstantCommand::new("ResetDrive", Requirements::of(&[DRIVE]), |robot| robot.drive.reset())
}
