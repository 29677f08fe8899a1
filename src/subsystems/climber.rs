//! Climbing actuator pair.
//!
//! Two legs, each driven by its own motor and each with a limit switch that
//! closes at full extension.  Commands only ever see the pair: it is fully
//! extended when both switches read true, and there is no partial state.
//!
//! The subsystem is a dumb actuator.  Nothing here stops a leg on its own
//! when its switch trips; the owning command decides when to call
//! [`Climber::stop`].

use log::debug;

use crate::app::ports::{DigitalInputPort, MotorGroupPort};
use crate::config::ClimberConfig;
use crate::subsystem::Subsystem;

pub struct ClimberPorts {
    pub left_leg: Box<dyn MotorGroupPort>,
    pub right_leg: Box<dyn MotorGroupPort>,
    pub left_limit: Box<dyn DigitalInputPort>,
    pub right_limit: Box<dyn DigitalInputPort>,
}

pub struct Climber {
    ports: ClimberPorts,
    extend_speed: f64,
}

impl Climber {
    pub fn new(ports: ClimberPorts, config: ClimberConfig) -> Self {
        Self {
            ports,
            extend_speed: config.extend_speed,
        }
    }

    /// Drive both legs outward.
    pub fn extend(&mut self) {
        self.ports.left_leg.set_speed(self.extend_speed);
        self.ports.right_leg.set_speed(self.extend_speed);
    }

    /// Halt both legs.  Safe to call repeatedly: each call only re-issues
    /// the stop.
    pub fn stop(&mut self) {
        self.ports.left_leg.stop();
        self.ports.right_leg.stop();
    }

    /// Both limit switches closed.
    pub fn is_fully_extended(&mut self) -> bool {
        // Both switches are sampled on every call.
        let left = self.ports.left_limit.get();
        let right = self.ports.right_limit.get();
        if left != right {
            debug!("Climber: legs uneven (left={}, right={})", left, right);
        }
        left && right
    }
}

impl Subsystem for Climber {
    fn name(&self) -> &'static str {
        "climber"
    }
}
