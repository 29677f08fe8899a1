//! Command lifecycle contract.
//!
//! A command is a small state machine bound to the subsystems it requires:
//!
//! ```text
//!  CREATED ──[first tick]──▶ RUNNING ──[is_finished]──▶ FINISHED
//!                              │
//!                  [pre-empted / cancelled]
//!                              ▼
//!                         INTERRUPTED
//! ```
//!
//! The scheduler drives the hooks; a command never calls them on itself.
//! Every hook receives a [`CommandContext`] holding the registry, the
//! command's own [`CommandId`], and the rate-limited logger.  Hooks must
//! return within the tick: long-running behaviour is "not yet finished",
//! never a blocking call.

pub mod context;
pub mod instant;
pub mod throttle;

use core::fmt;

pub use context::CommandContext;
pub use instant::InstantCommand;

use crate::subsystem::Requirements;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Identity token assigned by the scheduler when a command is accepted.
/// Unique among live commands; used as the rate-limited log key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(u32);

impl CommandId {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Execution state
// ---------------------------------------------------------------------------

/// Where a command is in its lifecycle.  `Finished` and `Interrupted` are
/// terminal; the scheduler drops the command right after reaching either.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandState {
    /// Accepted, holding its subsystems, not yet initialized.
    Created,
    /// Initialized; executes every tick.
    Running,
    Finished,
    Interrupted,
}

impl CommandState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Interrupted)
    }
}

// ---------------------------------------------------------------------------
// Command trait
// ---------------------------------------------------------------------------

/// One behaviour, requiring exclusive use of a set of subsystems in `R`.
pub trait Command<R> {
    /// Stable name for logs and events.
    fn name(&self) -> &'static str;

    /// The lock set.  Must not change while the command is scheduled.
    fn requirements(&self) -> Requirements;

    /// Whether a later command may pre-empt this one.
    fn is_interruptible(&self) -> bool {
        true
    }

    /// One-time setup, on the first tick after scheduling.
    fn initialize(&mut self, ctx: &mut CommandContext<'_, R>) {
        let _ = ctx;
    }

    /// Called every tick while running.
    fn execute(&mut self, ctx: &mut CommandContext<'_, R>) {
        let _ = ctx;
    }

    /// Re-evaluated every tick right after `execute`.
    fn is_finished(&mut self, ctx: &mut CommandContext<'_, R>) -> bool;

    /// Normal completion.  Must leave the required subsystems safe.
    fn end(&mut self, ctx: &mut CommandContext<'_, R>) {
        let _ = ctx;
    }

    /// Pre-emption or cancellation.  Must reach the same safe state as
    /// [`end`](Command::end), which it runs unless overridden.
    fn interrupted(&mut self, ctx: &mut CommandContext<'_, R>) {
        self.end(ctx);
    }
}
