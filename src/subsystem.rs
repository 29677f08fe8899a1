//! Subsystem identity, requirement sets and the registry contract.
//!
//! A subsystem owns a group of actuator ports.  Subsystems never decide
//! locking themselves: a [`Command`] declares the [`Requirements`] it needs
//! when it is created and the scheduler grants them exclusively.
//!
//! The [`Registry`] replaces process-wide singleton lookup.  The concrete
//! registry ([`Robot`](crate::robot::Robot)) is constructed once at start-up,
//! owns exactly one instance of each subsystem, and is passed by `&mut` to the
//! scheduler and into every command hook.

use core::fmt;

use crate::command::Command;

/// Upper bound on registered subsystems (one bit each in [`Requirements`]).
pub const MAX_SUBSYSTEMS: usize = 32;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Stable index of a subsystem within its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubsystemId(u8);

impl SubsystemId {
    /// Panics (at compile time, for `const` ids) when `index` does not fit
    /// in a [`Requirements`] mask.
    pub const fn new(index: u8) -> Self {
        assert!((index as usize) < MAX_SUBSYSTEMS, "subsystem index out of range");
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    const fn bit(self) -> u32 {
        1u32 << self.0
    }
}

impl fmt::Display for SubsystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subsystem {}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Requirement sets
// ---------------------------------------------------------------------------

/// A set of subsystems, used as a command's lock set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Requirements(u32);

impl Requirements {
    pub const NONE: Self = Self(0);

    pub const fn of(ids: &[SubsystemId]) -> Self {
        let mut mask = 0;
        let mut i = 0;
        while i < ids.len() {
            mask |= ids[i].bit();
            i += 1;
        }
        Self(mask)
    }

    #[must_use]
    pub const fn with(self, id: SubsystemId) -> Self {
        Self(self.0 | id.bit())
    }

    pub const fn contains(self, id: SubsystemId) -> bool {
        self.0 & id.bit() != 0
    }

    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_subset_of(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Members in ascending index order.
    pub fn iter(self) -> impl Iterator<Item = SubsystemId> {
        (0..MAX_SUBSYSTEMS as u8).filter_map(move |i| {
            let id = SubsystemId(i);
            self.contains(id).then_some(id)
        })
    }
}

// ---------------------------------------------------------------------------
// Subsystem contract
// ---------------------------------------------------------------------------

/// Behaviour every subsystem shares.  Domain operations live on the
/// concrete types; commands reach them through the registry.
pub trait Subsystem {
    /// Stable name for logs and events.
    fn name(&self) -> &'static str;

    /// Called once per tick regardless of which command owns the subsystem.
    /// Sensing and telemetry only; actuation is command-driven.
    fn periodic(&mut self) {}
}

/// The set of subsystems a scheduler arbitrates.
pub trait Registry: Sized {
    /// Every registered subsystem.
    fn ids(&self) -> Requirements;

    fn subsystem(&self, id: SubsystemId) -> Option<&dyn Subsystem>;

    fn subsystem_mut(&mut self, id: SubsystemId) -> Option<&mut dyn Subsystem>;

    /// Build the command `id` runs when nothing else holds it.  The
    /// scheduler calls this at most once per subsystem and keeps the result.
    fn init_default_command(&mut self, id: SubsystemId) -> Option<Box<dyn Command<Self>>> {
        let _ = id;
        None
    }

    /// Name of a registered subsystem, or `"?"`.
    fn subsystem_name(&self, id: SubsystemId) -> &'static str {
        self.subsystem(id).map_or("?", |s| s.name())
    }
}
