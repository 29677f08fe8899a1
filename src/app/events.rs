//! Outbound scheduler events.
//!
//! The [`Scheduler`](crate::scheduler::Scheduler) emits these through the
//! [`EventSink`](super::ports::EventSink) port at every command lifecycle
//! edge.  Adapters on the other side decide what to do with them.

use crate::command::CommandId;
use crate::error::ScheduleError;
use crate::subsystem::SubsystemId;

/// Structured events emitted by the scheduler.
#[derive(Debug, Clone, PartialEq)]
pub enum SchedulerEvent {
    /// A command took ownership of its requirements.
    Scheduled { id: CommandId, name: &'static str },

    /// A command ran its one-time setup on its first tick.
    Initialized { id: CommandId, name: &'static str },

    /// A command's finished predicate held; its end hook ran.
    Finished { id: CommandId, name: &'static str },

    /// A command was pre-empted (`by` is the newcomer) or cancelled
    /// (`by` is `None`); its interrupted hook ran.
    Interrupted {
        id: CommandId,
        name: &'static str,
        by: Option<CommandId>,
    },

    /// A schedule request was refused.
    Rejected {
        name: &'static str,
        reason: ScheduleError,
    },

    /// An idle subsystem adopted its default command.
    DefaultInstalled {
        subsystem: SubsystemId,
        id: CommandId,
        name: &'static str,
    },
}
