//! Scheduler behaviour across both real subsystems.

use robot_core::app::events::SchedulerEvent;
use robot_core::command::{Command, CommandContext, CommandState};
use robot_core::commands::climbing::ExtendClimbers;
use robot_core::commands::drive::toggle_reverse;
use robot_core::config::RobotConfig;
use robot_core::error::ScheduleError;
use robot_core::robot::{CLIMBER, DRIVE, Robot};
use robot_core::scheduler::Scheduler;
use robot_core::subsystem::{Requirements, SubsystemId};

use crate::mock_hw::{MockBench, RecordingSink};

/// Holds both subsystems, refuses pre-emption, finishes on request.
struct Lockdown {
    done: bool,
}

impl Command<Robot> for Lockdown {
    fn name(&self) -> &'static str {
        "Lockdown"
    }

    fn requirements(&self) -> Requirements {
        Requirements::of(&[DRIVE, CLIMBER])
    }

    fn is_interruptible(&self) -> bool {
        false
    }

    fn execute(&mut self, ctx: &mut CommandContext<'_, Robot>) {
        ctx.robot.drive.stop();
        ctx.robot.climber.stop();
    }

    fn is_finished(&mut self, _ctx: &mut CommandContext<'_, Robot>) -> bool {
        self.done
    }
}

fn rig(bench: &MockBench) -> (Robot, Scheduler<Robot>, RecordingSink) {
    let robot = Robot::new(&RobotConfig::default(), bench.ports());
    (robot, Scheduler::new(), RecordingSink::new())
}

#[test]
fn drive_and_climber_commands_run_side_by_side() {
    let bench = MockBench::new();
    let (mut robot, mut sched, mut sink) = rig(&bench);
    sched.run(&mut robot, &mut sink);
    let joystick = sched.holder(DRIVE).unwrap();

    let extend = sched
        .schedule(&mut robot, &mut sink, Box::new(ExtendClimbers::new(50)))
        .unwrap();
    sched.run(&mut robot, &mut sink);

    assert_eq!(sched.holder(DRIVE), Some(joystick));
    assert_eq!(sched.holder(CLIMBER), Some(extend));
    assert_eq!(sched.state_of(joystick), Some(CommandState::Running));
    assert_eq!(sched.state_of(extend), Some(CommandState::Running));
    assert_eq!(sink.interrupted(joystick), 0);
    assert!(sched.holders_consistent());
}

#[test]
fn non_interruptible_holder_rejects_newcomer() {
    let bench = MockBench::new();
    let (mut robot, mut sched, mut sink) = rig(&bench);
    let lock = sched
        .schedule(&mut robot, &mut sink, Box::new(Lockdown { done: false }))
        .unwrap();
    sched.run(&mut robot, &mut sink);

    let refused = sched.schedule(&mut robot, &mut sink, Box::new(ExtendClimbers::new(50)));
    assert_eq!(
        refused,
        Err(ScheduleError::Conflict {
            subsystem: CLIMBER,
            holder: lock
        })
    );
    assert!(sink.events.iter().any(|e| matches!(
        e,
        SchedulerEvent::Rejected { name: "ExtendClimbers", .. }
    )));
    assert_eq!(sched.holder(CLIMBER), Some(lock));
    assert_eq!(sched.scheduled_len(), 1);
}

#[test]
fn default_waits_while_lockdown_holds_drive() {
    let bench = MockBench::new();
    let (mut robot, mut sched, mut sink) = rig(&bench);
    sched
        .schedule(&mut robot, &mut sink, Box::new(Lockdown { done: false }))
        .unwrap();
    for _ in 0..3 {
        sched.run(&mut robot, &mut sink);
    }
    assert!(!sink
        .events
        .iter()
        .any(|e| matches!(e, SchedulerEvent::DefaultInstalled { .. })));
}

#[test]
fn multi_subsystem_newcomer_evicts_each_holder_once() {
    let bench = MockBench::new();
    let (mut robot, mut sched, mut sink) = rig(&bench);
    sched.run(&mut robot, &mut sink);
    let joystick = sched.holder(DRIVE).unwrap();
    let extend = sched
        .schedule(&mut robot, &mut sink, Box::new(ExtendClimbers::new(50)))
        .unwrap();
    sched.run(&mut robot, &mut sink);

    let lock = sched
        .schedule(&mut robot, &mut sink, Box::new(Lockdown { done: false }))
        .unwrap();

    assert_eq!(sink.interrupted(joystick), 1);
    assert_eq!(sink.interrupted(extend), 1);
    assert_eq!(sched.holder(DRIVE), Some(lock));
    assert_eq!(sched.holder(CLIMBER), Some(lock));
    assert_eq!(sched.scheduled_len(), 1);
    assert!(sched.holders_consistent());
}

#[test]
fn cancel_all_then_default_returns() {
    let bench = MockBench::new();
    let (mut robot, mut sched, mut sink) = rig(&bench);
    sched.run(&mut robot, &mut sink);
    sched
        .schedule(&mut robot, &mut sink, Box::new(ExtendClimbers::new(50)))
        .unwrap();
    sched.run(&mut robot, &mut sink);

    sched.cancel_all(&mut robot, &mut sink);
    assert_eq!(sched.scheduled_len(), 0);
    assert!(sched.holder(DRIVE).is_none());
    assert!(sched.holder(CLIMBER).is_none());
    assert_eq!(bench.leg_stops(), (1, 1));

    sched.run(&mut robot, &mut sink);
    assert!(sched.holder(DRIVE).is_some());
    assert!(sched.holder(CLIMBER).is_none());
}

#[test]
fn unknown_subsystem_is_rejected() {
    struct Elsewhere;
    impl Command<Robot> for Elsewhere {
        fn name(&self) -> &'static str {
            "Elsewhere"
        }
        fn requirements(&self) -> Requirements {
            Requirements::of(&[SubsystemId::new(7)])
        }
        fn is_finished(&mut self, _ctx: &mut CommandContext<'_, Robot>) -> bool {
            true
        }
    }

    let bench = MockBench::new();
    let (mut robot, mut sched, mut sink) = rig(&bench);
    assert_eq!(
        sched.schedule(&mut robot, &mut sink, Box::new(Elsewhere)),
        Err(ScheduleError::UnknownSubsystem(SubsystemId::new(7)))
    );
}

#[test]
fn pre_empted_command_is_interrupted_before_newcomer_initializes() {
    let bench = MockBench::new();
    let (mut robot, mut sched, mut sink) = rig(&bench);
    sched.run(&mut robot, &mut sink);
    sched.run(&mut robot, &mut sink);
    let joystick = sched.holder(DRIVE).unwrap();
    sink.clear();

    let toggle = sched
        .schedule(&mut robot, &mut sink, Box::new(toggle_reverse()))
        .unwrap();
    sched.run(&mut robot, &mut sink);

    let interrupted_at = sink
        .events
        .iter()
        .position(|e| matches!(e, SchedulerEvent::Interrupted { id, .. } if *id == joystick))
        .unwrap();
    let initialized_at = sink
        .events
        .iter()
        .position(|e| matches!(e, SchedulerEvent::Initialized { id, .. } if *id == toggle))
        .unwrap();
    assert!(interrupted_at < initialized_at);
    assert!(matches!(
        sink.events[interrupted_at],
        SchedulerEvent::Interrupted { by: Some(by), .. } if by == toggle
    ));
}
