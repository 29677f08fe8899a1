//! Commands that do their work once and finish on the same tick.

use super::{Command, CommandContext};
use crate::subsystem::Requirements;

/// Signature for an instant action.  A plain `fn` pointer: no captures,
/// no heap.
pub type InstantActionFn<R> = fn(&mut R);

/// Runs `action` in `initialize`, then reports finished.
///
/// Declaring requirements matters even for one-shot actions: it makes the
/// action pre-empt whatever currently owns those subsystems.
pub struct InstantCommand<R> {
    name: &'static str,
    requirements: Requirements,
    action: InstantActionFn<R>,
}

impl<R> InstantCommand<R> {
    pub fn new(name: &'static str, requirements: Requirements, action: InstantActionFn<R>) -> Self {
        Self {
            name,
            requirements,
            action,
        }
    }
}

impl<R> Command<R> for InstantCommand<R> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn requirements(&self) -> Requirements {
        self.requirements
    }

    fn initialize(&mut self, ctx: &mut CommandContext<'_, R>) {
        (self.action)(ctx.robot);
    }

    fn is_finished(&mut self, _ctx: &mut CommandContext<'_, R>) -> bool {
        true
    }
}
