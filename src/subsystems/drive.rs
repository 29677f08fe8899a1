//! Differential drive subsystem.
//!
//! Left and right motor groups, a two-position gear shifter, a heading
//! gyro, one encoder per side, and an indicator light that shows which end
//! of the robot is currently the front.
//!
//! ## Persistent state
//!
//! Only `reverse` and the shifter valve position survive between calls.
//! Motor outputs are recomputed from (`reverse`, request, mixer config) on
//! every call; nothing about the last output is trusted.
//!
//! ## Reverse
//!
//! Reversing swaps the logical front.  Arcade drive negates only the
//! forward component (turning stays screen-relative to the driver); tank
//! drive negates both sides.

use log::info;

use crate::app::ports::{
    DigitalOutputPort, HeadingSensorPort, MotorGroupPort, PositionSensorPort, TelemetryPort,
    ValvePort, ValvePosition,
};
use crate::config::DriveConfig;
use crate::drivers::differential::{DifferentialDrive, WheelSpeeds};
use crate::subsystem::Subsystem;

/// Hardware the drive owns.
pub struct DrivePorts {
    pub left: Box<dyn MotorGroupPort>,
    pub right: Box<dyn MotorGroupPort>,
    pub shifter: Box<dyn ValvePort>,
    pub gyro: Box<dyn HeadingSensorPort>,
    pub left_encoder: Box<dyn PositionSensorPort>,
    pub right_encoder: Box<dyn PositionSensorPort>,
    pub indicator: Box<dyn DigitalOutputPort>,
    pub telemetry: Box<dyn TelemetryPort>,
}

/// Sensor sample taken by [`Drive::periodic`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DriveSnapshot {
    pub heading_deg: f64,
    pub left_position: f64,
    pub right_position: f64,
    pub reversed: bool,
    pub high_gear: bool,
}

pub struct Drive {
    ports: DrivePorts,
    mixer: DifferentialDrive,
    reverse: bool,
    snapshot: DriveSnapshot,
}

impl Drive {
    pub fn new(ports: DrivePorts, config: DriveConfig) -> Self {
        Self {
            ports,
            mixer: DifferentialDrive::new(config),
            reverse: false,
            snapshot: DriveSnapshot::default(),
        }
    }

    // ── Driving ───────────────────────────────────────────────

    /// Arcade drive, accounting for reverse.  Inputs are not validated.
    pub fn arcade_drive(&mut self, forward: f64, turn: f64) {
        let (forward, turn) = self.arcade_request(forward, turn);
        let speeds = self.mixer.arcade(forward, turn);
        self.apply(speeds);
    }

    /// Tank drive, accounting for reverse.  Inputs are not validated.
    pub fn tank_drive(&mut self, left: f64, right: f64) {
        let (left, right) = self.tank_request(left, right);
        let speeds = self.mixer.tank(left, right);
        self.apply(speeds);
    }

    /// The (forward, turn) pair handed to the mixer for an arcade request.
    pub fn arcade_request(&self, forward: f64, turn: f64) -> (f64, f64) {
        (self.orient(forward), turn)
    }

    /// The (left, right) pair handed to the mixer for a tank request.
    pub fn tank_request(&self, left: f64, right: f64) -> (f64, f64) {
        (self.orient(left), self.orient(right))
    }

    /// Immediately halt both sides.
    pub fn stop(&mut self) {
        self.ports.left.stop();
        self.ports.right.stop();
    }

    // ── Reverse ───────────────────────────────────────────────

    pub fn set_reverse(&mut self, reverse: bool) {
        info!("Drive: swapped face to reverse={}", reverse);
        self.reverse = reverse;
        self.ports.telemetry.publish_reverse_state(reverse);
        self.ports.indicator.set(reverse);
    }

    pub fn toggle_reverse(&mut self) {
        self.set_reverse(!self.reverse);
    }

    pub fn is_reversed(&self) -> bool {
        self.reverse
    }

    // ── Gearbox ───────────────────────────────────────────────

    /// Flip the shifter.  A valve that is off goes to high gear.
    pub fn toggle_gear_speed(&mut self) {
        let next = match self.ports.shifter.get() {
            ValvePosition::Forward => ValvePosition::Reverse,
            ValvePosition::Reverse | ValvePosition::Off => ValvePosition::Forward,
        };
        self.ports.shifter.set(next);
        info!("Drive: shifted to {} gear", if self.is_high_gear() { "high" } else { "low" });
    }

    pub fn is_high_gear(&self) -> bool {
        self.ports.shifter.get() == ValvePosition::Forward
    }

    // ── Sensors ───────────────────────────────────────────────

    /// Stop both sides and zero the gyro and both encoders.  Only sensible
    /// while nothing relies on live position data, so call it from a
    /// command that holds the drive.
    pub fn reset(&mut self) {
        self.stop();
        self.ports.gyro.reset();
        self.ports.left_encoder.reset();
        self.ports.right_encoder.reset();
        info!("Drive: all sensors zeroed");
    }

    pub fn heading(&self) -> f64 {
        self.ports.gyro.angle()
    }

    pub fn left_position(&self) -> f64 {
        self.ports.left_encoder.position()
    }

    pub fn right_position(&self) -> f64 {
        self.ports.right_encoder.position()
    }

    /// Last sample taken by `periodic`.
    pub fn snapshot(&self) -> DriveSnapshot {
        self.snapshot
    }

    // ── Internal ──────────────────────────────────────────────

    fn orient(&self, value: f64) -> f64 {
        if self.reverse { -value } else { value }
    }

    fn apply(&mut self, speeds: WheelSpeeds) {
        self.ports.left.set_speed(speeds.left);
        self.ports.right.set_speed(speeds.right);
    }
}

impl Subsystem for Drive {
    fn name(&self) -> &'static str {
        "drive"
    }

    fn periodic(&mut self) {
        self.snapshot = DriveSnapshot {
            heading_deg: self.heading(),
            left_position: self.left_position(),
            right_position: self.right_position(),
            reversed: self.reverse,
            high_gear: self.is_high_gear(),
        };
    }
}
