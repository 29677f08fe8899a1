//! Concrete commands for the [`Robot`](crate::robot::Robot) registry.
//!
//! Every command that moves an actuator with feedback follows the same
//! shape as [`climbing::ExtendClimbers`]: actuate in `execute`, finish on
//! the sensor, and make `end` and `interrupted` the same safe stop.

pub mod climbing;
pub mod drive;
