//! Inbound operator requests.
//!
//! These are what the driver station (buttons, dashboard, a script) asks
//! for.  The [`RobotService`](super::service::RobotService) turns each one
//! into a scheduler call.  Mapping joystick buttons to requests happens
//! outside the core.

use crate::command::CommandId;

/// Requests that an external adapter can send into the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorRequest {
    /// Extend both climber legs until both limit switches close.
    ExtendClimbers,

    /// Halt the climber, pre-empting any climb in progress.
    StopClimbers,

    /// Swap the logical front of the drive.
    ToggleReverse,

    /// Set the logical front explicitly.
    SetReverse(bool),

    /// Flip the gearbox between high and low.
    ToggleGear,

    /// Stop the drive and zero its sensors.
    ResetDrive,

    /// Interrupt one scheduled command.
    Cancel(CommandId),

    /// Interrupt everything.
    CancelAll,
}
