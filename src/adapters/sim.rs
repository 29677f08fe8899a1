//! In-memory plant for running the core off-robot.
//!
//! [`SimPlant`] owns shared cells for every actuator output and sensor
//! reading, and hands out port adapters that read and write those cells.
//! [`SimPlant::step`] advances a crude physical model:
//!
//! - each climber leg travels at `speed × LEG_RATE` until it reaches
//!   `LEG_TRAVEL`, where its limit switch closes;
//! - the encoders integrate their side's wheel speed;
//! - the gyro integrates the speed difference between the sides.
//!
//! Limit switches and the reverse indicator are `embedded-hal` pins, so
//! they reach the subsystems through the blanket digital port impls just
//! like real GPIO would.

use core::cell::{Cell, RefCell};
use core::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use crate::app::ports::{
    DriverAxes, DriverInputPort, HeadingSensorPort, MotorGroupPort, PositionSensorPort,
    TelemetryPort, ValvePort, ValvePosition,
};
use crate::robot::RobotPorts;
use crate::subsystems::climber::ClimberPorts;
use crate::subsystems::drive::DrivePorts;

/// Leg travel from retracted to fully extended (metres).
pub const LEG_TRAVEL: f64 = 0.5;
/// Leg speed at full output (metres per second).
pub const LEG_RATE: f64 = 0.25;
/// Encoder counts per second at full output.
pub const ENCODER_RATE: f64 = 4096.0;
/// Degrees per second with the sides at full and opposite output.
pub const TURN_RATE: f64 = 180.0;

// ───────────────────────────────────────────────────────────────
// Port adapters
// ───────────────────────────────────────────────────────────────

pub struct SimMotor(Rc<Cell<f64>>);

impl MotorGroupPort for SimMotor {
    fn set_speed(&mut self, speed: f64) {
        self.0.set(speed.clamp(-1.0, 1.0));
    }

    fn stop(&mut self) {
        self.0.set(0.0);
    }
}

pub struct SimValve(Rc<Cell<ValvePosition>>);

impl ValvePort for SimValve {
    fn set(&mut self, position: ValvePosition) {
        self.0.set(position);
    }

    fn get(&self) -> ValvePosition {
        self.0.get()
    }
}

pub struct SimGyro(Rc<Cell<f64>>);

impl HeadingSensorPort for SimGyro {
    fn reset(&mut self) {
        self.0.set(0.0);
    }

    fn angle(&self) -> f64 {
        self.0.get()
    }
}

pub struct SimEncoder(Rc<Cell<f64>>);

impl PositionSensorPort for SimEncoder {
    fn reset(&mut self) {
        self.0.set(0.0);
    }

    fn position(&self) -> f64 {
        self.0.get()
    }
}

/// Closes once its leg has travelled the full stroke.  Active-high.
pub struct SimLimitSwitch(Rc<Cell<f64>>);

impl ErrorType for SimLimitSwitch {
    type Error = Infallible;
}

impl InputPin for SimLimitSwitch {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.0.get() >= LEG_TRAVEL)
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        self.is_high().map(|high| !high)
    }
}

pub struct SimIndicator(Rc<Cell<bool>>);

impl ErrorType for SimIndicator {
    type Error = Infallible;
}

impl OutputPin for SimIndicator {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.set(true);
        Ok(())
    }
}

/// Records every reverse-state publication.
pub struct SimTelemetry(Rc<RefCell<Vec<bool>>>);

impl TelemetryPort for SimTelemetry {
    fn publish_reverse_state(&mut self, reversed: bool) {
        self.0.borrow_mut().push(reversed);
    }
}

/// Joystick whose axes are set from the outside.
pub struct ScriptedDriver(Rc<Cell<DriverAxes>>);

impl DriverInputPort for ScriptedDriver {
    fn axes(&mut self) -> DriverAxes {
        self.0.get()
    }
}

// ───────────────────────────────────────────────────────────────
// Plant
// ───────────────────────────────────────────────────────────────

/// Shared state behind every simulated port.
#[derive(Default)]
pub struct SimPlant {
    drive_left: Rc<Cell<f64>>,
    drive_right: Rc<Cell<f64>>,
    shifter: Rc<Cell<ValvePosition>>,
    heading: Rc<Cell<f64>>,
    left_position: Rc<Cell<f64>>,
    right_position: Rc<Cell<f64>>,
    indicator: Rc<Cell<bool>>,
    published: Rc<RefCell<Vec<bool>>>,
    axes: Rc<Cell<DriverAxes>>,
    leg_speed: [Rc<Cell<f64>>; 2],
    leg_travel: [Rc<Cell<f64>>; 2],
}

impl SimPlant {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh set of ports bound to this plant, including a driver input.
    pub fn ports(&self) -> RobotPorts {
        RobotPorts {
            drive: DrivePorts {
                left: Box::new(SimMotor(self.drive_left.clone())),
                right: Box::new(SimMotor(self.drive_right.clone())),
                shifter: Box::new(SimValve(self.shifter.clone())),
                gyro: Box::new(SimGyro(self.heading.clone())),
                left_encoder: Box::new(SimEncoder(self.left_position.clone())),
                right_encoder: Box::new(SimEncoder(self.right_position.clone())),
                indicator: Box::new(SimIndicator(self.indicator.clone())),
                telemetry: Box::new(SimTelemetry(self.published.clone())),
            },
            climber: ClimberPorts {
                left_leg: Box::new(SimMotor(self.leg_speed[0].clone())),
                right_leg: Box::new(SimMotor(self.leg_speed[1].clone())),
                left_limit: Box::new(SimLimitSwitch(self.leg_travel[0].clone())),
                right_limit: Box::new(SimLimitSwitch(self.leg_travel[1].clone())),
            },
            driver_input: Some(Box::new(ScriptedDriver(self.axes.clone()))),
        }
    }

    /// Advance the model by `dt` seconds.
    pub fn step(&self, dt: f64) {
        for (speed, travel) in self.leg_speed.iter().zip(&self.leg_travel) {
            let next = travel.get() + speed.get() * LEG_RATE * dt;
            travel.set(next.clamp(0.0, LEG_TRAVEL));
        }

        // The right group is mounted mirrored: negative output drives it forward.
        let left = self.drive_left.get();
        let right = -self.drive_right.get();
        self.left_position
            .set(self.left_position.get() + left * ENCODER_RATE * dt);
        self.right_position
            .set(self.right_position.get() + right * ENCODER_RATE * dt);
        self.heading
            .set(self.heading.get() + (left - right) * 0.5 * TURN_RATE * dt);
    }

    // ── Inputs ────────────────────────────────────────────────

    pub fn set_axes(&self, forward: f64, turn: f64) {
        self.axes.set(DriverAxes { forward, turn });
    }

    /// Jump both legs to the end (or start) of their stroke.
    pub fn set_legs_extended(&self, extended: bool) {
        let travel = if extended { LEG_TRAVEL } else { 0.0 };
        for leg in &self.leg_travel {
            leg.set(travel);
        }
    }

    // ── Observations ──────────────────────────────────────────

    /// Raw (left, right) drive outputs as last written.
    pub fn drive_outputs(&self) -> (f64, f64) {
        (self.drive_left.get(), self.drive_right.get())
    }

    pub fn leg_speeds(&self) -> (f64, f64) {
        (self.leg_speed[0].get(), self.leg_speed[1].get())
    }

    pub fn leg_travel(&self) -> (f64, f64) {
        (self.leg_travel[0].get(), self.leg_travel[1].get())
    }

    pub fn heading(&self) -> f64 {
        self.heading.get()
    }

    pub fn shifter(&self) -> ValvePosition {
        self.shifter.get()
    }

    pub fn indicator(&self) -> bool {
        self.indicator.get()
    }

    /// Every reverse state published so far, oldest first.
    pub fn published(&self) -> Vec<bool> {
        self.published.borrow().clone()
    }
}
