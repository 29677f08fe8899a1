//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing scheduler events through the `log`
//! facade (console on the host, the driver-station log on a robot).  A
//! dashboard adapter would implement the same trait.

use log::{info, warn};

use crate::app::events::SchedulerEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`SchedulerEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &SchedulerEvent) {
        match event {
            SchedulerEvent::Scheduled { id, name } => {
                info!("CMD   | {} {} scheduled", name, id);
            }
            SchedulerEvent::Initialized { id, name } => {
                info!("CMD   | {} {} initialized", name, id);
            }
            SchedulerEvent::Finished { id, name } => {
                info!("CMD   | {} {} finished", name, id);
            }
            SchedulerEvent::Interrupted { id, name, by } => match by {
                Some(by) => info!("CMD   | {} {} interrupted by {}", name, id, by),
                None => info!("CMD   | {} {} cancelled", name, id),
            },
            SchedulerEvent::Rejected { name, reason } => {
                warn!("CMD   | {} rejected: {}", name, reason);
            }
            SchedulerEvent::DefaultInstalled {
                subsystem,
                id,
                name,
            } => {
                info!("DFLT  | {} {} installed on {}", name, id, subsystem);
            }
        }
    }
}
