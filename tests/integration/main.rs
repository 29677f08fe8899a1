//! Integration test driver for the `tests/integration/` submodules.
//!
//! Each `mod` below exercises one part of the core against the recording
//! mocks in [`mock_hw`].  Everything runs on the host with no hardware.

mod mock_hw;
mod scheduler_tests;
mod service_tests;
