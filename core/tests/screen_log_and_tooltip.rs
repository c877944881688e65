//! Screen log and tooltip subsystem behaviour, driven through the instance.

use lemongrass_core::{
    config::ConfigStore,
    instance::GameInstance,
    screen_log_subsystem::{MessageLevel, ScreenLogSubsystem},
    tooltip_subsystem::TooltipSubsystem,
};

fn build(extra: &str) -> GameInstance {
    let config = ConfigStore::parse(&format!(
        r#"{{ "instance": {{ "development_build": true }} {extra} }}"#
    ))
    .expect("parse config");
    GameInstance::build(config)
}

fn screen_log(instance: &mut GameInstance) -> &mut ScreenLogSubsystem {
    instance.subsystem_mut::<ScreenLogSubsystem>().expect("screen log active")
}

fn tooltip(instance: &mut GameInstance) -> &mut TooltipSubsystem {
    instance.subsystem_mut::<TooltipSubsystem>().expect("tooltip active")
}

#[test]
fn messages_expire_after_their_lifetime() {
    let mut instance = build(r#", "screen_log": { "message_lifetime": 1.0 }"#);
    screen_log(&mut instance).info("saved");

    instance.update(0.5);
    assert_eq!(screen_log(&mut instance).len(), 1);

    instance.update(0.5);
    assert!(screen_log(&mut instance).is_empty());
}

#[test]
fn oldest_messages_drop_beyond_capacity() {
    let mut instance = build(r#", "screen_log": { "max_messages": 2 }"#);
    let log = screen_log(&mut instance);
    log.info("one");
    log.warn("two");
    log.error("three");

    let kept: Vec<(MessageLevel, &str)> =
        log.messages().map(|m| (m.level, m.text.as_str())).collect();
    assert_eq!(kept, vec![(MessageLevel::Warning, "two"), (MessageLevel::Error, "three")]);
}

#[test]
fn time_scale_slows_message_expiry() {
    let mut instance = build(r#", "screen_log": { "message_lifetime": 1.0 }"#);
    instance.clock.set_time_scale(0.5);
    screen_log(&mut instance).info("slow");

    instance.update(1.5);
    assert_eq!(screen_log(&mut instance).len(), 1);
    instance.update(0.5);
    assert!(screen_log(&mut instance).is_empty());
}

#[test]
fn overlay_shows_live_messages_and_tooltip_state() {
    let mut instance = build("");
    screen_log(&mut instance).warn("low health");
    tooltip(&mut instance).request("slot-3", "Iron Sword");

    instance.update(0.1);

    let log_lines: Vec<&str> = instance.overlay().lines_for("screen_log").collect();
    assert_eq!(log_lines.len(), 1);
    assert!(log_lines[0].ends_with("WARN  low health"), "line was {:?}", log_lines[0]);

    let tip_lines: Vec<&str> = instance.overlay().lines_for("tooltip").collect();
    assert_eq!(tip_lines.len(), 1);
    assert!(tip_lines[0].starts_with("pending owner=slot-3"));
    assert!(instance.overlay().render().contains("[tooltip] pending"));
}

#[test]
fn tooltip_shows_after_delay() {
    let mut instance = build(r#", "tooltip": { "show_delay": 0.5 }"#);
    tooltip(&mut instance).request("slot-1", "Potion");

    instance.update(0.25);
    assert!(tooltip(&mut instance).visible().is_none());

    instance.update(0.25);
    let shown = tooltip(&mut instance).visible().cloned().expect("visible after delay");
    assert_eq!(shown.owner, "slot-1");
    assert_eq!(shown.text, "Potion");
}

#[test]
fn repeated_request_keeps_delay_but_new_owner_restarts_it() {
    let mut instance = build(r#", "tooltip": { "show_delay": 0.5 }"#);
    tooltip(&mut instance).request("a", "Alpha");
    instance.update(0.25);

    tooltip(&mut instance).request("a", "Alpha");
    instance.update(0.25);
    assert!(tooltip(&mut instance).visible().is_some());

    tooltip(&mut instance).request("b", "Beta");
    assert!(tooltip(&mut instance).visible().is_none());
    instance.update(0.25);
    assert!(tooltip(&mut instance).visible().is_none());
    instance.update(0.25);
    assert_eq!(tooltip(&mut instance).visible().map(|t| t.owner.as_str()), Some("b"));
}

#[test]
fn only_the_owner_can_release() {
    let mut instance = build("");
    let tip = tooltip(&mut instance);
    tip.request("owner", "Text");

    assert!(!tip.release("someone-else"));
    assert!(tip.current().is_some());
    assert!(tip.release("owner"));
    assert!(tip.current().is_none());
}

#[test]
fn hide_clears_tooltip_for_any_owner() {
    let mut instance = build(r#", "tooltip": { "show_delay": 0.0 }"#);
    tooltip(&mut instance).request("inventory", "Heavy");
    instance.update(0.0);
    assert!(tooltip(&mut instance).visible().is_some());

    tooltip(&mut instance).hide();
    assert!(tooltip(&mut instance).current().is_none());
    assert!(tooltip(&mut instance).wrapped_lines().is_empty());
}

#[test]
fn tooltip_ignores_time_scale() {
    let mut instance = build(r#", "tooltip": { "show_delay": 0.5 }"#);
    instance.clock.set_time_scale(0.0);
    tooltip(&mut instance).request("menu", "Paused");

    instance.update(0.5);
    assert!(tooltip(&mut instance).visible().is_some());
}

#[test]
fn wrapped_lines_respect_max_width() {
    let mut instance = build(r#", "tooltip": { "show_delay": 0.0, "max_width": 80 }"#);
    tooltip(&mut instance).request("x", "A long sword of the ancient kings");
    instance.update(0.0);

    let lines = tooltip(&mut instance).wrapped_lines();
    assert!(lines.len() > 1);
    assert!(lines.iter().all(|l| l.len() <= 10), "lines: {lines:?}");
}

#[test]
fn shutdown_clears_subsystem_state() {
    let mut instance = build("");
    screen_log(&mut instance).info("bye");
    tooltip(&mut instance).request("x", "y");

    instance.shutdown();

    let registry = instance.registry();
    assert!(registry.find::<ScreenLogSubsystem>().unwrap().is_empty());
    assert!(registry.find::<TooltipSubsystem>().unwrap().current().is_none());
}
