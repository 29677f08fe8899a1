//! Rate-limited logging keyed by command identity.
//!
//! A command that executes at 50 Hz would flood the log if it reported
//! every tick.  [`LogThrottle`] counts calls per [`CommandId`] and lets one
//! through on the first call and every `every`-th call after it.  The
//! scheduler forgets a command's counter when the command terminates.

use heapless::FnvIndexMap;

use super::CommandId;

/// Capacity of the counter table; matches the scheduled-command table.
pub const MAX_TRACKED: usize = 16;

#[derive(Debug, Default)]
pub struct LogThrottle {
    counters: FnvIndexMap<CommandId, u32, MAX_TRACKED>,
}

impl LogThrottle {
    pub fn new() -> Self {
        Self {
            counters: FnvIndexMap::new(),
        }
    }

    /// Count one call for `owner`; `true` when this call should be logged.
    ///
    /// An `every` of 0 is treated as 1.  When the table is full an untracked
    /// owner is never throttled.
    pub fn should_log(&mut self, owner: CommandId, every: u32) -> bool {
        let every = every.max(1);
        let count = self.counters.get(&owner).copied().unwrap_or(0);
        let _ = self.counters.insert(owner, count.wrapping_add(1));
        count % every == 0
    }

    /// Drop `owner`'s counter.
    pub fn forget(&mut self, owner: CommandId) {
        self.counters.remove(&owner);
    }

    /// Number of owners currently tracked.
    pub fn tracked(&self) -> usize {
        self.counters.len()
    }
}
