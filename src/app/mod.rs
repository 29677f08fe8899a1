//! Application core: scheduling and operator requests, zero I/O.
//!
//! All interaction with hardware happens through the **port traits** in
//! [`ports`], so the whole core runs against mocks in tests and against
//! in-memory adapters in the host simulation.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
