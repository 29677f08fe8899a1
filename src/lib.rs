//! Robot control core library.
//!
//! A cooperative, tick-driven command scheduler plus the drive and climber
//! subsystems and the commands that run on them.  Hardware is reached only
//! through the port traits in [`app::ports`]; `adapters::sim` binds them to
//! an in-memory plant for the host simulation and tests.

#![deny(unused_must_use)]

pub mod app;
pub mod command;
pub mod commands;
pub mod config;
pub mod error;
pub mod robot;
pub mod scheduler;
pub mod subsystem;
pub mod subsystems;

pub mod adapters;
pub mod drivers;
