//! RobotService: operator request → scheduler → ports.

use robot_core::app::commands::OperatorRequest;
use robot_core::app::service::RobotService;
use robot_core::command::CommandState;
use robot_core::config::RobotConfig;
use robot_core::robot::{CLIMBER, DRIVE};

use crate::mock_hw::{MockBench, MotorCall, RecordingSink, last_call};

fn make_service() -> (RobotService, MockBench, RecordingSink) {
    let bench = MockBench::new();
    let svc = RobotService::new(RobotConfig::default(), bench.ports()).unwrap();
    (svc, bench, RecordingSink::new())
}

#[test]
fn extend_request_runs_to_completion() {
    let (mut svc, bench, mut sink) = make_service();
    let id = svc
        .handle_request(OperatorRequest::ExtendClimbers, &mut sink)
        .unwrap()
        .unwrap();

    for _ in 0..10 {
        svc.tick(&mut sink);
    }
    assert_eq!(svc.scheduler().state_of(id), Some(CommandState::Running));
    assert_eq!(last_call(&bench.left_leg), Some(MotorCall::Speed(1.0)));

    bench.set_limits(true, true);
    svc.tick(&mut sink);
    assert!(!svc.scheduler().is_scheduled(id));
    assert_eq!(bench.leg_stops(), (1, 1));
    assert_eq!(svc.tick_count(), 11);
}

#[test]
fn stop_request_pre_empts_extend() {
    let (mut svc, bench, mut sink) = make_service();
    let extend = svc
        .handle_request(OperatorRequest::ExtendClimbers, &mut sink)
        .unwrap()
        .unwrap();
    svc.tick(&mut sink);

    let stop = svc
        .handle_request(OperatorRequest::StopClimbers, &mut sink)
        .unwrap()
        .unwrap();
    assert_eq!(sink.interrupted(extend), 1);
    assert_eq!(svc.scheduler().holder(CLIMBER), Some(stop));
    assert_eq!(bench.leg_stops(), (1, 1));
}

#[test]
fn set_reverse_and_gear_requests_reach_the_drive() {
    let (mut svc, bench, mut sink) = make_service();
    svc.tick(&mut sink);

    svc.handle_request(OperatorRequest::SetReverse(true), &mut sink)
        .unwrap();
    svc.tick(&mut sink);
    assert!(svc.robot().drive.is_reversed());

    svc.handle_request(OperatorRequest::ToggleGear, &mut sink)
        .unwrap();
    svc.tick(&mut sink);
    assert!(svc.robot().drive.is_high_gear());
    assert_eq!(*bench.published.borrow(), vec![true]);
}

#[test]
fn reversed_joystick_drives_backwards() {
    let (mut svc, bench, mut sink) = make_service();
    bench.set_axes(1.0, 0.0);
    svc.handle_request(OperatorRequest::ToggleReverse, &mut sink)
        .unwrap();
    svc.tick(&mut sink); // toggle runs, joystick installed
    svc.tick(&mut sink); // joystick executes
    assert_eq!(last_call(&bench.drive_left), Some(MotorCall::Speed(-1.0)));
    assert_eq!(last_call(&bench.drive_right), Some(MotorCall::Speed(1.0)));
}

#[test]
fn cancel_all_request_clears_everything() {
    let (mut svc, _bench, mut sink) = make_service();
    svc.tick(&mut sink);
    svc.handle_request(OperatorRequest::ExtendClimbers, &mut sink)
        .unwrap();
    assert_eq!(svc.scheduler().scheduled_len(), 2);

    assert_eq!(
        svc.handle_request(OperatorRequest::CancelAll, &mut sink),
        Ok(None)
    );
    assert_eq!(svc.scheduler().scheduled_len(), 0);
    assert!(svc.scheduler().holder(DRIVE).is_none());
}

#[test]
fn reset_request_zeroes_sensors() {
    let (mut svc, bench, mut sink) = make_service();
    bench.heading.set(12.5);
    svc.handle_request(OperatorRequest::ResetDrive, &mut sink)
        .unwrap();
    svc.tick(&mut sink);
    assert_eq!(svc.robot().drive.heading(), 0.0);
}
