//! The robot registry: exactly one instance of every subsystem.
//!
//! `Robot` is built once at start-up from already-bound ports and then
//! passed by `&mut` to the scheduler, which hands it to every command hook.
//! Because it owns its subsystems by value, there is no way to create a
//! second drive or climber mid-run.

use crate::app::ports::DriverInputPort;
use crate::command::Command;
use crate::commands::drive::JoystickDrive;
use crate::config::RobotConfig;
use crate::subsystem::{Registry, Requirements, Subsystem, SubsystemId};
use crate::subsystems::climber::{Climber, ClimberPorts};
use crate::subsystems::drive::{Drive, DrivePorts};

pub const DRIVE: SubsystemId = SubsystemId::new(0);
pub const CLIMBER: SubsystemId = SubsystemId::new(1);

/// Everything the robot is wired to, bound before start-up.
pub struct RobotPorts {
    pub drive: DrivePorts,
    pub climber: ClimberPorts,
    /// `None` leaves the drive without a default command.
    pub driver_input: Option<Box<dyn DriverInputPort>>,
}

pub struct Robot {
    pub drive: Drive,
    pub climber: Climber,
    /// Handed to the drive's default command when it is first built.
    driver_input: Option<Box<dyn DriverInputPort>>,
}

impl Robot {
    pub fn new(config: &RobotConfig, ports: RobotPorts) -> Self {
        Self {
            drive: Drive::new(ports.drive, config.drive),
            climber: Climber::new(ports.climber, config.climber),
            driver_input: ports.driver_input,
        }
    }
}

impl Registry for Robot {
    fn ids(&self) -> Requirements {
        Requirements::of(&[DRIVE, CLIMBER])
    }

    fn subsystem(&self, id: SubsystemId) -> Option<&dyn Subsystem> {
        match id {
            DRIVE => Some(&self.drive),
            CLIMBER => Some(&self.climber),
            _ => None,
        }
    }

    fn subsystem_mut(&mut self, id: SubsystemId) -> Option<&mut dyn Subsystem> {
        match id {
            DRIVE => Some(&mut self.drive),
            CLIMBER => Some(&mut self.climber),
            _ => None,
        }
    }

    /// The drive defaults to joystick control when a driver input was
    /// supplied.  The climber has no default: it holds still unless told.
    fn init_default_command(&mut self, id: SubsystemId) -> Option<Box<dyn Command<Self>>> {
        match id {
            DRIVE => {
                let input = self.driver_input.take()?;
                Some(Box::new(JoystickDrive::new(input)))
            }
            _ => None,
        }
    }
}
