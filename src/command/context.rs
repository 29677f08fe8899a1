//! Per-hook context handed to commands by the scheduler.

use core::fmt;

use log::info;

use super::CommandId;
use super::throttle::LogThrottle;

/// Everything a command hook may touch.
///
/// `robot` is the full registry: the scheduler guarantees the command holds
/// its required subsystems, and by contract a command only actuates those.
/// Sensor reads on other subsystems are fine.
pub struct CommandContext<'a, R> {
    pub robot: &'a mut R,
    id: CommandId,
    tick: u64,
    throttle: &'a mut LogThrottle,
}

impl<'a, R> CommandContext<'a, R> {
    pub(crate) fn new(
        robot: &'a mut R,
        id: CommandId,
        tick: u64,
        throttle: &'a mut LogThrottle,
    ) -> Self {
        Self {
            robot,
            id,
            tick,
            throttle,
        }
    }

    /// The running command's identity token.
    pub fn id(&self) -> CommandId {
        self.id
    }

    /// Scheduler tick during which this hook runs.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Log `message` on the first call and then once per `every` calls,
    /// counted per command.
    pub fn log_every(&mut self, every: u32, message: fmt::Arguments<'_>) {
        if self.throttle.should_log(self.id, every) {
            info!("{message}");
        }
    }
}
