//! Concrete subsystems.
//!
//! | Subsystem | Owns                                              |
//! |-----------|---------------------------------------------------|
//! | `drive`   | 2 motor groups, shifter, gyro, 2 encoders, light  |
//! | `climber` | 2 leg motors, 2 limit switches                    |

pub mod climber;
pub mod drive;
