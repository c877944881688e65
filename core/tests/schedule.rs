//! Frame-driven timer tests.

use lemongrass_core::{
    clock::FrameClock,
    config::ConfigStore,
    instance::GameInstance,
    registry::SubsystemRegistry,
    schedule::{Countdown, Scheduler, TaskControl},
    screen_log_subsystem::ScreenLogSubsystem,
};
use std::{cell::Cell, rc::Rc};

/// Drive a bare scheduler for `frames` frames of `delta` seconds.
fn run(scheduler: &mut Scheduler, frames: usize, delta: f64) -> usize {
    let mut clock = FrameClock::new();
    let mut registry = SubsystemRegistry::new();
    (0..frames)
        .map(|_| scheduler.advance(&clock.advance(delta), &mut registry))
        .sum()
}

#[test]
fn one_shot_runs_once_after_delay() {
    let hits = Rc::new(Cell::new(0));
    let mut scheduler = Scheduler::new();
    let counter = Rc::clone(&hits);
    scheduler.after(0.5, move |_, _| counter.set(counter.get() + 1));

    run(&mut scheduler, 4, 0.1);
    assert_eq!(hits.get(), 0);

    run(&mut scheduler, 10, 0.1);
    assert_eq!(hits.get(), 1);
    assert!(scheduler.is_empty());
}

#[test]
fn repeating_task_runs_every_interval_until_stopped() {
    let hits = Rc::new(Cell::new(0));
    let mut scheduler = Scheduler::new();
    let counter = Rc::clone(&hits);
    scheduler.every(1.0, move |_, _| {
        counter.set(counter.get() + 1);
        if counter.get() == 3 { TaskControl::Stop } else { TaskControl::Continue }
    });

    // 0.25s frames: due on frames 4, 8, 12.
    let ran = run(&mut scheduler, 20, 0.25);

    assert_eq!(ran, 3);
    assert_eq!(hits.get(), 3);
    assert!(scheduler.is_empty());
}

#[test]
fn cancelled_task_never_runs() {
    let hits = Rc::new(Cell::new(0));
    let mut scheduler = Scheduler::new();
    let counter = Rc::clone(&hits);
    let id = scheduler.every(0.1, move |_, _| {
        counter.set(counter.get() + 1);
        TaskControl::Continue
    });

    assert!(scheduler.cancel(id));
    assert!(!scheduler.cancel(id));
    run(&mut scheduler, 10, 0.1);
    assert_eq!(hits.get(), 0);
}

#[test]
fn paused_clock_holds_timers() {
    let hits = Rc::new(Cell::new(0));
    let mut scheduler = Scheduler::new();
    let counter = Rc::clone(&hits);
    scheduler.after(0.2, move |_, _| counter.set(counter.get() + 1));

    let mut clock = FrameClock::new();
    clock.pause();
    let mut registry = SubsystemRegistry::new();
    for _ in 0..10 {
        scheduler.advance(&clock.advance(0.1), &mut registry);
    }
    assert_eq!(hits.get(), 0);
    assert_eq!(clock.current_frame, 10);

    clock.resume();
    for _ in 0..3 {
        scheduler.advance(&clock.advance(0.1), &mut registry);
    }
    assert_eq!(hits.get(), 1);
}

#[test]
fn instance_runs_tasks_before_subsystem_updates() {
    let config = ConfigStore::parse(
        r#"{ "instance": { "development_build": true }, "screen_log": { "message_lifetime": 1.0 } }"#,
    )
    .unwrap();
    let mut instance = GameInstance::build(config);
    instance.scheduler_mut().every(0.5, |registry, time| {
        registry.get::<ScreenLogSubsystem>().info(format!("heartbeat at frame {}", time.frame));
        TaskControl::Continue
    });

    for _ in 0..10 {
        instance.update(0.25);
    }

    let log = instance.subsystem::<ScreenLogSubsystem>().unwrap();
    // Heartbeats on frames 2, 4, 6, 8, 10; lifetime 1s keeps the last two.
    let texts: Vec<&str> = log.messages().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["heartbeat at frame 8", "heartbeat at frame 10"]);
    assert_eq!(instance.status().scheduled_tasks, 1);
}

#[test]
fn countdown_reports_progress_and_resets() {
    let mut countdown = Countdown::new(2.0);
    assert!(!countdown.tick(0.5));
    assert!((countdown.progress() - 0.25).abs() < 1e-12);
    assert!(countdown.tick(5.0));
    assert_eq!(countdown.remaining(), 0.0);
    assert_eq!(countdown.progress(), 1.0);

    countdown.reset();
    assert_eq!(countdown.remaining(), 2.0);
    assert!(Countdown::new(0.0).is_done());
}
