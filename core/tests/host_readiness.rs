//! Host startup, readiness notification, and teardown tests.

use lemongrass_core::{
    config::{ConfigStore, InstanceConfig, INSTANCE_SECTION},
    error::LemonError,
    host::GameHost,
    screen_log_subsystem::ScreenLogSubsystem,
    tooltip_subsystem::TooltipSubsystem,
};
use std::{cell::RefCell, rc::Rc};

fn config(enabled: bool, development_build: bool) -> ConfigStore {
    let instance = InstanceConfig { enabled, development_build, ..InstanceConfig::default() };
    ConfigStore::empty()
        .with_section(INSTANCE_SECTION, &instance)
        .expect("build config")
}

#[test]
fn instance_is_not_ready_before_start() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut host = GameHost::new();

    assert!(host.instance().is_none());
    assert!(!host.is_ready());
    assert!(matches!(host.require(), Err(LemonError::NotReady)));
    assert!(!host.tick(0.016));
}

#[test]
fn start_registers_standard_subsystems_in_order() {
    let mut host = GameHost::new();
    assert!(host.start(config(true, true)).unwrap());

    let instance = host.instance().expect("ready after start");
    assert_eq!(instance.active_names(), vec!["screen_log", "tooltip"]);
}

#[test]
fn release_builds_skip_the_screen_log() {
    let mut host = GameHost::new();
    host.start(config(true, false)).unwrap();

    let instance = host.instance().expect("ready after start");
    assert_eq!(instance.active_names(), vec!["tooltip"]);
    assert!(instance.subsystem::<ScreenLogSubsystem>().is_none());
    assert!(instance.subsystem::<TooltipSubsystem>().is_some());
}

#[test]
fn disabled_configuration_never_constructs_an_instance() {
    let mut host = GameHost::new();
    assert!(!host.start(config(false, true)).unwrap());
    assert!(host.instance().is_none());
}

#[test]
fn ready_fires_once_after_startup_registrations() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut host = GameHost::new();

    let first = Rc::clone(&seen);
    host.on_ready(move |instance| {
        first.borrow_mut().push((1, instance.is_initialized(), instance.active_count()));
    });
    let second = Rc::clone(&seen);
    host.on_ready(move |instance| {
        second.borrow_mut().push((2, instance.is_initialized(), instance.active_count()));
    });
    assert!(seen.borrow().is_empty());

    host.start(config(true, true)).unwrap();
    host.tick(0.016);

    assert_eq!(*seen.borrow(), vec![(1, true, 2), (2, true, 2)]);
}

#[test]
fn late_subscriber_is_invoked_immediately() {
    let mut host = GameHost::new();
    host.start(config(true, false)).unwrap();
    host.tick(0.016);

    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    host.on_ready(move |instance| *sink.borrow_mut() = Some(instance.frame()));

    assert_eq!(*seen.borrow(), Some(1));
}

#[test]
fn second_start_while_live_is_rejected() {
    let mut host = GameHost::new();
    host.start(config(true, false)).unwrap();

    let err = host.start(config(true, false)).unwrap_err();
    assert!(matches!(err, LemonError::InstanceAlreadyLive));
}

#[test]
fn start_with_runs_custom_startup() {
    let mut host = GameHost::new();
    host.start_with(config(true, true), |instance| {
        instance.register::<TooltipSubsystem>();
    })
    .unwrap();

    let instance = host.instance().expect("ready");
    assert_eq!(instance.active_names(), vec!["tooltip"]);
}

#[test]
fn stop_shuts_down_and_drops_the_instance() {
    let mut host = GameHost::new();
    host.start(config(true, true)).unwrap();
    for _ in 0..10 {
        host.tick(0.1);
    }

    host.stop();
    host.stop();

    assert!(host.instance().is_none());
    assert!(matches!(host.require(), Err(LemonError::NotReady)));
    assert!(!host.tick(0.1));
}

#[test]
fn require_gives_mutable_access_when_ready() {
    let mut host = GameHost::new();
    host.start(config(true, true)).unwrap();

    let instance = host.require().expect("ready");
    instance
        .subsystem_mut::<TooltipSubsystem>()
        .expect("tooltip active")
        .request("button", "Save");

    host.tick(1.0);
    let tooltip = host.instance().and_then(|i| i.subsystem::<TooltipSubsystem>()).unwrap();
    assert!(tooltip.visible().is_some());
}

#[test]
fn ready_signal_fires_at_most_once() {
    use lemongrass_core::ready::ReadySignal;

    let mut signal: ReadySignal<u32> = ReadySignal::new();
    signal.subscribe(|n| *n += 1);
    signal.subscribe(|n| *n *= 10);
    assert_eq!(signal.pending(), 2);

    let mut target = 1;
    assert_eq!(signal.fire(&mut target), 2);
    assert_eq!(target, 20);
    assert!(signal.has_fired());

    signal.subscribe(|n| *n = 0);
    assert_eq!(signal.fire(&mut target), 0);
    assert_eq!(target, 20);
}
