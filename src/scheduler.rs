//! Command scheduler engine.
//!
//! Driven by one external periodic tick source.  The scheduler owns the
//! table of live commands and, per subsystem, which command holds it.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  schedule(cmd)                                               │
//! │    ├─ requirement held by non-interruptible? ──▶ Rejected    │
//! │    ├─ interrupt every holder of a requirement (synchronous)  │
//! │    └─ take ownership, state = Created                        │
//! │                                                              │
//! │  run()   : once per tick                                     │
//! │    1. Subsystem::periodic for every subsystem                │
//! │    2. for each command, in scheduling order:                 │
//! │         Created ─▶ initialize ─▶ Running                     │
//! │         execute ─▶ is_finished? ─▶ end, release              │
//! │    3. each idle subsystem adopts its default command         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Exclusivity rests entirely on the holder table: a subsystem has at most
//! one holder, and a command holds exactly its requirements from the moment
//! it is accepted until it terminates.  There is no priority between
//! commands on unrelated subsystems.

use core::mem;

use log::{debug, error, info, warn};

use crate::app::events::SchedulerEvent;
use crate::app::ports::EventSink;
use crate::command::throttle::LogThrottle;
use crate::command::{Command, CommandContext, CommandId, CommandState};
use crate::error::ScheduleError;
use crate::subsystem::{MAX_SUBSYSTEMS, Registry, Requirements, SubsystemId};

/// Maximum number of simultaneously scheduled commands (stack-allocated).
pub const MAX_SCHEDULED: usize = 16;

// ═══════════════════════════════════════════════════════════════
//  Internal bookkeeping
// ═══════════════════════════════════════════════════════════════

/// Why a command is in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Requested,
    /// Installed as the default for this subsystem; parked again on exit.
    Default(SubsystemId),
}

struct Entry<R> {
    id: CommandId,
    command: Box<dyn Command<R>>,
    /// Captured at admission.
    requirements: Requirements,
    state: CommandState,
    origin: Origin,
}

/// Per-subsystem default command storage.  The instance is built once and
/// moves between `Parked` and the command table for the rest of the run.
enum DefaultSlot<R> {
    /// Registry not asked yet.
    Unbuilt,
    /// Registry has no default for this subsystem.
    Absent,
    Parked(Box<dyn Command<R>>),
    Running(CommandId),
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

/// The command scheduler for registry `R`.
pub struct Scheduler<R> {
    /// Live commands in scheduling order.
    entries: heapless::Vec<Entry<R>, MAX_SCHEDULED>,
    /// Current holder of each subsystem, indexed by `SubsystemId`.
    holders: [Option<CommandId>; MAX_SUBSYSTEMS],
    defaults: [DefaultSlot<R>; MAX_SUBSYSTEMS],
    throttle: LogThrottle,
    next_id: u32,
    tick: u64,
}

impl<R: Registry> Default for Scheduler<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Registry> Scheduler<R> {
    pub fn new() -> Self {
        Self {
            entries: heapless::Vec::new(),
            holders: [None; MAX_SUBSYSTEMS],
            defaults: core::array::from_fn(|_| DefaultSlot::Unbuilt),
            throttle: LogThrottle::new(),
            next_id: 0,
            tick: 0,
        }
    }

    // ── Requests ──────────────────────────────────────────────

    /// Accept `command`, pre-empting whatever holds its requirements.
    ///
    /// Holders are interrupted synchronously, before this returns, so their
    /// interrupted hooks always run before the new command initializes on
    /// the next [`run`](Self::run).  Refused requests are logged, reported
    /// as [`SchedulerEvent::Rejected`], and the command is dropped.
    pub fn schedule(
        &mut self,
        robot: &mut R,
        sink: &mut impl EventSink,
        command: Box<dyn Command<R>>,
    ) -> Result<CommandId, ScheduleError> {
        self.admit(robot, sink, command, Origin::Requested)
            .map_err(|(reason, _)| reason)
    }

    /// Interrupt a scheduled command.  Returns `false` if `id` is not live.
    pub fn cancel(&mut self, robot: &mut R, sink: &mut impl EventSink, id: CommandId) -> bool {
        if !self.is_scheduled(id) {
            return false;
        }
        self.interrupt(robot, sink, id, None);
        true
    }

    /// Interrupt every scheduled command, default commands included.  Idle
    /// subsystems pick their defaults up again on the next tick.
    pub fn cancel_all(&mut self, robot: &mut R, sink: &mut impl EventSink) {
        let ids: heapless::Vec<CommandId, MAX_SCHEDULED> =
            self.entries.iter().map(|e| e.id).collect();
        for id in ids {
            self.interrupt(robot, sink, id, None);
        }
    }

    // ── Tick ──────────────────────────────────────────────────

    /// Advance every scheduled command by one tick.  Call once per control
    /// period.
    pub fn run(&mut self, robot: &mut R, sink: &mut impl EventSink) {
        self.tick += 1;

        for id in robot.ids().iter() {
            if let Some(subsystem) = robot.subsystem_mut(id) {
                subsystem.periodic();
            }
        }

        let mut i = 0;
        while i < self.entries.len() {
            let entry = &mut self.entries[i];
            let mut ctx = CommandContext::new(robot, entry.id, self.tick, &mut self.throttle);

            if entry.state == CommandState::Created {
                entry.command.initialize(&mut ctx);
                entry.state = CommandState::Running;
                debug!("Scheduler: '{}' {} initialized", entry.command.name(), entry.id);
                sink.emit(&SchedulerEvent::Initialized {
                    id: entry.id,
                    name: entry.command.name(),
                });
            }

            entry.command.execute(&mut ctx);

            if entry.command.is_finished(&mut ctx) {
                entry.command.end(&mut ctx);
                entry.state = CommandState::Finished;

                let entry = self.entries.remove(i);
                info!("Scheduler: '{}' {} finished", entry.command.name(), entry.id);
                sink.emit(&SchedulerEvent::Finished {
                    id: entry.id,
                    name: entry.command.name(),
                });
                self.retire(entry);
            } else {
                i += 1;
            }
        }

        self.install_defaults(robot, sink);
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn is_scheduled(&self, id: CommandId) -> bool {
        self.position(id).is_some()
    }

    /// State of a live command; `None` once it has terminated.
    pub fn state_of(&self, id: CommandId) -> Option<CommandState> {
        self.position(id).map(|i| self.entries[i].state)
    }

    pub fn command_name(&self, id: CommandId) -> Option<&'static str> {
        self.position(id).map(|i| self.entries[i].command.name())
    }

    /// The command currently holding `subsystem`.
    pub fn holder(&self, subsystem: SubsystemId) -> Option<CommandId> {
        self.holders[subsystem.index()]
    }

    /// Number of live commands.
    pub fn scheduled_len(&self) -> usize {
        self.entries.len()
    }

    /// Ticks run since construction.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// `true` when the holder table and the command table agree: every
    /// live command holds exactly its requirements and nothing else holds
    /// anything.
    pub fn holders_consistent(&self) -> bool {
        let entries_ok = self.entries.iter().all(|e| {
            e.requirements
                .iter()
                .all(|s| self.holders[s.index()] == Some(e.id))
        });
        let holders_ok = self.holders.iter().enumerate().all(|(idx, h)| match h {
            None => true,
            Some(id) => self.position(*id).is_some_and(|i| {
                self.entries[i]
                    .requirements
                    .contains(SubsystemId::new(idx as u8))
            }),
        });
        entries_ok && holders_ok
    }

    // ── Internal ──────────────────────────────────────────────

    fn position(&self, id: CommandId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    fn allocate_id(&mut self) -> CommandId {
        loop {
            self.next_id = self.next_id.wrapping_add(1);
            let id = CommandId::from_raw(self.next_id);
            if !self.is_scheduled(id) {
                return id;
            }
        }
    }

    /// Shared admission path for requested and default commands.  On
    /// refusal the command is handed back so a default can be parked.
    fn admit(
        &mut self,
        robot: &mut R,
        sink: &mut dyn EventSink,
        command: Box<dyn Command<R>>,
        origin: Origin,
    ) -> Result<CommandId, (ScheduleError, Box<dyn Command<R>>)> {
        let name = command.name();
        let requirements = command.requirements();
        let registered = robot.ids();

        if let Some(unknown) = requirements.iter().find(|s| !registered.contains(*s)) {
            return Err(Self::reject(sink, command, ScheduleError::UnknownSubsystem(unknown)));
        }

        let mut victims: heapless::Vec<CommandId, MAX_SCHEDULED> = heapless::Vec::new();
        for subsystem in requirements.iter() {
            let Some(holder) = self.holders[subsystem.index()] else {
                continue;
            };
            let interruptible = self
                .position(holder)
                .is_none_or(|i| self.entries[i].command.is_interruptible());
            if !interruptible {
                return Err(Self::reject(
                    sink,
                    command,
                    ScheduleError::Conflict { subsystem, holder },
                ));
            }
            if !victims.contains(&holder) {
                let _ = victims.push(holder);
            }
        }

        if self.entries.len() - victims.len() >= MAX_SCHEDULED {
            return Err(Self::reject(sink, command, ScheduleError::Full));
        }

        let id = self.allocate_id();
        for victim in victims {
            self.interrupt(robot, sink, victim, Some(id));
        }

        let entry = Entry {
            id,
            command,
            requirements,
            state: CommandState::Created,
            origin,
        };
        if let Err(entry) = self.entries.push(entry) {
            return Err(Self::reject(sink, entry.command, ScheduleError::Full));
        }
        for subsystem in requirements.iter() {
            self.holders[subsystem.index()] = Some(id);
        }

        info!("Scheduler: '{}' scheduled as {}", name, id);
        sink.emit(&SchedulerEvent::Scheduled { id, name });
        Ok(id)
    }

    fn reject(
        sink: &mut dyn EventSink,
        command: Box<dyn Command<R>>,
        reason: ScheduleError,
    ) -> (ScheduleError, Box<dyn Command<R>>) {
        warn!("Scheduler: rejected '{}': {}", command.name(), reason);
        sink.emit(&SchedulerEvent::Rejected {
            name: command.name(),
            reason,
        });
        (reason, command)
    }

    /// Remove `id` from the table through its interruption path.
    ///
    /// A command that never initialized has actuated nothing, so its
    /// interrupted hook is skipped.
    fn interrupt(
        &mut self,
        robot: &mut R,
        sink: &mut dyn EventSink,
        id: CommandId,
        by: Option<CommandId>,
    ) {
        let Some(pos) = self.position(id) else {
            return;
        };
        let mut entry = self.entries.remove(pos);

        if entry.state == CommandState::Running {
            let mut ctx = CommandContext::new(robot, entry.id, self.tick, &mut self.throttle);
            entry.command.interrupted(&mut ctx);
        }
        entry.state = CommandState::Interrupted;

        match by {
            Some(by) => info!(
                "Scheduler: '{}' {} interrupted by {}",
                entry.command.name(),
                entry.id,
                by
            ),
            None => info!("Scheduler: '{}' {} cancelled", entry.command.name(), entry.id),
        }
        sink.emit(&SchedulerEvent::Interrupted {
            id: entry.id,
            name: entry.command.name(),
            by,
        });
        self.retire(entry);
    }

    /// Release a terminated command's subsystems and park it if it is a
    /// default command; otherwise it is dropped here.
    fn retire(&mut self, entry: Entry<R>) {
        debug_assert!(entry.state.is_terminal());
        for subsystem in entry.requirements.iter() {
            if self.holders[subsystem.index()] == Some(entry.id) {
                self.holders[subsystem.index()] = None;
            }
        }
        self.throttle.forget(entry.id);

        if let Origin::Default(subsystem) = entry.origin {
            self.defaults[subsystem.index()] = DefaultSlot::Parked(entry.command);
        }
    }

    fn install_defaults(&mut self, robot: &mut R, sink: &mut dyn EventSink) {
        for subsystem in robot.ids().iter() {
            let idx = subsystem.index();
            if self.holders[idx].is_some() {
                continue;
            }

            let command = match mem::replace(&mut self.defaults[idx], DefaultSlot::Absent) {
                DefaultSlot::Unbuilt => match Self::build_default(robot, subsystem) {
                    Some(command) => command,
                    None => continue,
                },
                DefaultSlot::Parked(command) => command,
                other => {
                    self.defaults[idx] = other;
                    continue;
                }
            };

            // Wait until every requirement is free rather than pre-empt.
            let blocked = command
                .requirements()
                .iter()
                .any(|s| self.holders[s.index()].is_some());
            if blocked {
                self.defaults[idx] = DefaultSlot::Parked(command);
                continue;
            }

            match self.admit(robot, sink, command, Origin::Default(subsystem)) {
                Ok(id) => {
                    self.defaults[idx] = DefaultSlot::Running(id);
                    let name = self.command_name(id).unwrap_or("?");
                    debug!(
                        "Scheduler: '{}' default '{}' installed as {}",
                        robot.subsystem_name(subsystem),
                        name,
                        id
                    );
                    sink.emit(&SchedulerEvent::DefaultInstalled {
                        subsystem,
                        id,
                        name,
                    });
                }
                Err((_, command)) => {
                    self.defaults[idx] = DefaultSlot::Parked(command);
                }
            }
        }
    }

    /// Ask the registry for `subsystem`'s default command.  Runs at most
    /// once per subsystem: the slot is already `Absent` when this is called.
    fn build_default(robot: &mut R, subsystem: SubsystemId) -> Option<Box<dyn Command<R>>> {
        let command = robot.init_default_command(subsystem)?;
        let requirements = command.requirements();
        if !requirements.contains(subsystem) {
            error!(
                "Scheduler: default '{}' for '{}' does not require it; ignored",
                command.name(),
                robot.subsystem_name(subsystem)
            );
            return None;
        }
        if !requirements.is_subset_of(robot.ids()) {
            error!(
                "Scheduler: default '{}' for '{}' requires an unregistered subsystem; ignored",
                command.name(),
                robot.subsystem_name(subsystem)
            );
            return None;
        }
        info!(
            "Scheduler: built default '{}' for '{}'",
            command.name(),
            robot.subsystem_name(subsystem)
        );
        Some(command)
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
