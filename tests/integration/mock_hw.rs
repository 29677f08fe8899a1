//! Mock hardware for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without touching real motor controllers or GPIO.  Limit
//! switches and the indicator are `embedded-hal` pins so the blanket
//! digital port impls are exercised too.

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use robot_core::app::events::SchedulerEvent;
use robot_core::app::ports::{
    DriverAxes, DriverInputPort, EventSink, HeadingSensorPort, MotorGroupPort,
    PositionSensorPort, TelemetryPort, ValvePort, ValvePosition,
};
use robot_core::command::CommandId;
use robot_core::robot::RobotPorts;
use robot_core::subsystems::climber::ClimberPorts;
use robot_core::subsystems::drive::DrivePorts;

// ── Motor call record ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotorCall {
    Speed(f64),
    Stop,
}

pub type CallLog = Rc<RefCell<Vec<MotorCall>>>;

pub struct MockMotor(CallLog);

impl MotorGroupPort for MockMotor {
    fn set_speed(&mut self, speed: f64) {
        self.0.borrow_mut().push(MotorCall::Speed(speed));
    }

    fn stop(&mut self) {
        self.0.borrow_mut().push(MotorCall::Stop);
    }
}

// ── Pins ──────────────────────────────────────────────────────

pub struct MockSwitch(Rc<Cell<bool>>);

impl ErrorType for MockSwitch {
    type Error = Infallible;
}

impl InputPin for MockSwitch {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.0.get())
    }
}

pub struct MockLight(Rc<Cell<bool>>);

impl ErrorType for MockLight {
    type Error = Infallible;
}

impl OutputPin for MockLight {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.set(true);
        Ok(())
    }
}

// ── Sensors, valve, dashboard, joystick ───────────────────────

pub struct MockValve(Rc<Cell<ValvePosition>>);

impl ValvePort for MockValve {
    fn set(&mut self, position: ValvePosition) {
        self.0.set(position);
    }

    fn get(&self) -> ValvePosition {
        self.0.get()
    }
}

pub struct MockGauge(Rc<Cell<f64>>);

impl HeadingSensorPort for MockGauge {
    fn reset(&mut self) {
        self.0.set(0.0);
    }

    fn angle(&self) -> f64 {
        self.0.get()
    }
}

impl PositionSensorPort for MockGauge {
    fn reset(&mut self) {
        self.0.set(0.0);
    }

    fn position(&self) -> f64 {
        self.0.get()
    }
}

pub struct MockDash(Rc<RefCell<Vec<bool>>>);

impl TelemetryPort for MockDash {
    fn publish_reverse_state(&mut self, reversed: bool) {
        self.0.borrow_mut().push(reversed);
    }
}

pub struct MockStick(Rc<Cell<DriverAxes>>);

impl DriverInputPort for MockStick {
    fn axes(&mut self) -> DriverAxes {
        self.0.get()
    }
}

// ── MockBench ─────────────────────────────────────────────────

/// Handles to every mock behind one robot.
#[derive(Default)]
pub struct MockBench {
    pub drive_left: CallLog,
    pub drive_right: CallLog,
    pub left_leg: CallLog,
    pub right_leg: CallLog,
    pub left_limit: Rc<Cell<bool>>,
    pub right_limit: Rc<Cell<bool>>,
    pub shifter: Rc<Cell<ValvePosition>>,
    pub heading: Rc<Cell<f64>>,
    pub left_position: Rc<Cell<f64>>,
    pub right_position: Rc<Cell<f64>>,
    pub indicator: Rc<Cell<bool>>,
    pub published: Rc<RefCell<Vec<bool>>>,
    pub axes: Rc<Cell<DriverAxes>>,
}

#[allow(dead_code)]
impl MockBench {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ports with a joystick, so the drive gets a default command.
    pub fn ports(&self) -> RobotPorts {
        let mut ports = self.ports_without_driver();
        ports.driver_input = Some(Box::new(MockStick(self.axes.clone())));
        ports
    }

    pub fn ports_without_driver(&self) -> RobotPorts {
        RobotPorts {
            drive: DrivePorts {
                left: Box::new(MockMotor(self.drive_left.clone())),
                right: Box::new(MockMotor(self.drive_right.clone())),
                shifter: Box::new(MockValve(self.shifter.clone())),
                gyro: Box::new(MockGauge(self.heading.clone())),
                left_encoder: Box::new(MockGauge(self.left_position.clone())),
                right_encoder: Box::new(MockGauge(self.right_position.clone())),
                indicator: Box::new(MockLight(self.indicator.clone())),
                telemetry: Box::new(MockDash(self.published.clone())),
            },
            climber: ClimberPorts {
                left_leg: Box::new(MockMotor(self.left_leg.clone())),
                right_leg: Box::new(MockMotor(self.right_leg.clone())),
                left_limit: Box::new(MockSwitch(self.left_limit.clone())),
                right_limit: Box::new(MockSwitch(self.right_limit.clone())),
            },
            driver_input: None,
        }
    }

    pub fn set_limits(&self, left: bool, right: bool) {
        self.left_limit.set(left);
        self.right_limit.set(right);
    }

    pub fn set_axes(&self, forward: f64, turn: f64) {
        self.axes.set(DriverAxes { forward, turn });
    }

    pub fn leg_stops(&self) -> (usize, usize) {
        (count_stops(&self.left_leg), count_stops(&self.right_leg))
    }

    pub fn clear_calls(&self) {
        for log in [
            &self.drive_left,
            &self.drive_right,
            &self.left_leg,
            &self.right_leg,
        ] {
            log.borrow_mut().clear();
        }
    }
}

pub fn count_stops(log: &CallLog) -> usize {
    log.borrow()
        .iter()
        .filter(|c| **c == MotorCall::Stop)
        .count()
}

pub fn last_call(log: &CallLog) -> Option<MotorCall> {
    log.borrow().last().copied()
}

// ── RecordingSink ─────────────────────────────────────────────

/// Event sink that keeps every scheduler event.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<SchedulerEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interrupted(&self, id: CommandId) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SchedulerEvent::Interrupted { id: i, .. } if *i == id))
            .count()
    }

    pub fn finished(&self, id: CommandId) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SchedulerEvent::Finished { id: i, .. } if *i == id))
            .count()
    }

    pub fn initialized(&self, id: CommandId) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SchedulerEvent::Initialized { id: i, .. } if *i == id))
            .count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &SchedulerEvent) {
        self.events.push(event.clone());
    }
}
