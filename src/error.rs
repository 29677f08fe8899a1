//! Unified error types for the robot core.
//!
//! A single `Error` enum that every fallible layer can convert into, keeping
//! the top-level loop's error handling uniform.  All variants are `Copy` so
//! they can be passed back out of the scheduler without allocation.
//!
//! Nothing here is fatal: a rejected schedule request or an invalid config
//! is reported to the caller, which logs it and carries on.

use core::fmt;

use crate::command::CommandId;
use crate::subsystem::SubsystemId;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the core funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A command could not be scheduled.
    Schedule(ScheduleError),
    /// Configuration is invalid or could not be decoded.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schedule(e) => write!(f, "schedule: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Scheduling errors
// ---------------------------------------------------------------------------

/// Why [`Scheduler::schedule`](crate::scheduler::Scheduler::schedule)
/// refused a command.  The command is dropped in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleError {
    /// A required subsystem is held by a command that cannot be interrupted.
    Conflict {
        subsystem: SubsystemId,
        holder: CommandId,
    },
    /// A required subsystem is not part of the registry.
    UnknownSubsystem(SubsystemId),
    /// The scheduled-command table is at capacity.
    Full,
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conflict { subsystem, holder } => {
                write!(f, "{subsystem} held by non-interruptible command {holder}")
            }
            Self::UnknownSubsystem(id) => write!(f, "{id} is not registered"),
            Self::Full => write!(f, "command table full"),
        }
    }
}

impl From<ScheduleError> for Error {
    fn from(e: ScheduleError) -> Self {
        Self::Schedule(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Config bytes could not be decoded.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
