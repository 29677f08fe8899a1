//! Port traits: the boundary between the control core and the outside world.
//!
//! ```text
//!   Device driver ──▶ Port trait ──▶ Subsystem (domain)
//! ```
//!
//! Device adapters (motor controllers, solenoids, gyros, encoders, the
//! dashboard) implement these traits.  Subsystems hold them as boxed trait
//! objects, so the core never touches hardware directly and every test can
//! substitute a recording mock.
//!
//! Digital I/O is expressed through `embedded-hal` 1.0: anything that is an
//! [`OutputPin`] is a [`DigitalOutputPort`] and anything that is an
//! [`InputPin`] is a [`DigitalInputPort`].

use embedded_hal::digital::{Error as _, InputPin, OutputPin, PinState};
use log::warn;

use crate::app::events::SchedulerEvent;

// ───────────────────────────────────────────────────────────────
// Motor group port
// ───────────────────────────────────────────────────────────────

/// One or more motor controllers that always move together.
pub trait MotorGroupPort {
    /// Set normalized output in [-1, 1].  Values outside are the caller's
    /// problem; implementations may saturate.
    fn set_speed(&mut self, speed: f64);

    /// Cut output immediately.
    fn stop(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Dual-position valve port
// ───────────────────────────────────────────────────────────────

/// Position of a double-acting solenoid valve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValvePosition {
    /// Neither coil energised.
    #[default]
    Off,
    Forward,
    Reverse,
}

pub trait ValvePort {
    fn set(&mut self, position: ValvePosition);
    fn get(&self) -> ValvePosition;
}

// ───────────────────────────────────────────────────────────────
// Digital I/O ports
// ───────────────────────────────────────────────────────────────

/// Fire-and-forget digital output (indicator lights, relays).
pub trait DigitalOutputPort {
    fn set(&mut self, on: bool);
}

/// Digital input (limit switches).
pub trait DigitalInputPort {
    /// `true` when the line reads high.  A failed read reports `false`.
    fn get(&mut self) -> bool;
}

impl<P: OutputPin> DigitalOutputPort for P {
    fn set(&mut self, on: bool) {
        if let Err(e) = self.set_state(PinState::from(on)) {
            warn!("digital output write failed: {:?}", e.kind());
        }
    }
}

impl<P: InputPin> DigitalInputPort for P {
    fn get(&mut self) -> bool {
        match self.is_high() {
            Ok(high) => high,
            Err(e) => {
                warn!("digital input read failed: {:?}", e.kind());
                false
            }
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Sensor ports
// ───────────────────────────────────────────────────────────────

/// Gyroscope heading.
pub trait HeadingSensorPort {
    /// Zero the accumulated heading.
    fn reset(&mut self);
    /// Heading in degrees since the last reset (continuous, not wrapped).
    fn angle(&self) -> f64;
}

/// Quadrature encoder position.
pub trait PositionSensorPort {
    fn reset(&mut self);
    /// Position in encoder units since the last reset.
    fn position(&self) -> f64;
}

// ───────────────────────────────────────────────────────────────
// Telemetry / vision port
// ───────────────────────────────────────────────────────────────

/// One-way push to the dashboard / vision coprocessor.  No
/// acknowledgement is expected and failures are not retried.
pub trait TelemetryPort {
    fn publish_reverse_state(&mut self, reversed: bool);
}

// ───────────────────────────────────────────────────────────────
// Driver input port
// ───────────────────────────────────────────────────────────────

/// Joystick values, already oriented so that positive `forward` drives
/// ahead and positive `turn` rotates clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DriverAxes {
    pub forward: f64,
    pub turn: f64,
}

/// Source of operator joystick axes.  Polling the physical device is the
/// adapter's job; the core only asks for the latest values.
pub trait DriverInputPort {
    fn axes(&mut self) -> DriverAxes;
}

// ───────────────────────────────────────────────────────────────
// Event sink port
// ───────────────────────────────────────────────────────────────

/// The scheduler emits command lifecycle events through this port.
/// Adapters decide where they go (serial log, dashboard, test recorder).
pub trait EventSink {
    fn emit(&mut self, event: &SchedulerEvent);
}
