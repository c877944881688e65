//! lemongrass-runner: headless frame-loop host for the Lemongrass core.
//!
//! Usage:
//!   lemongrass-runner --frames 600 --fps 60
//!   lemongrass-runner --config lemongrass.json --frames 120 --overlay-every 30

use anyhow::Result;
use lemongrass_core::{
    config::ConfigStore,
    error::LemonResult,
    host::GameHost,
    instance::GameInstance,
    rng::GameRng,
    schedule::TaskControl,
    screen_log_subsystem::ScreenLogSubsystem,
    tooltip_subsystem::TooltipSubsystem,
    weighted::{ValueProbabilityPair, WeightedTable},
};
use std::env;

/// Stable stream index for the demo loot roller.
const LOOT_STREAM: u64 = 1;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let frames = parse_arg(&args, "--frames", 600u64);
    let fps = parse_arg(&args, "--fps", 60u64).max(1);
    let overlay_every = parse_arg(&args, "--overlay-every", 0u64);
    let config_path = args
        .windows(2)
        .find(|w| w[0] == "--config")
        .map(|w| w[1].as_str());

    println!("Lemongrass — runner");
    println!("  frames:    {frames}");
    println!("  fps:       {fps}");
    println!("  config:    {}", config_path.unwrap_or("<defaults>"));
    println!();

    let config = match config_path {
        Some(path) => ConfigStore::load(path)?,
        None => ConfigStore::empty(),
    };

    let mut host = GameHost::new();
    host.on_ready(install_demo_tasks);

    if !host.start(config)? {
        println!("Instance disabled by configuration; nothing to run.");
        return Ok(());
    }

    let delta = 1.0 / fps as f64;
    for _ in 0..frames {
        host.tick(delta);

        if overlay_every > 0 {
            if let Some(instance) = host.instance() {
                if instance.frame() % overlay_every == 0 && !instance.overlay().is_empty() {
                    println!("── frame {} ──", instance.frame());
                    println!("{}", instance.overlay().render());
                }
            }
        }
    }

    if let Some(instance) = host.instance() {
        println!("{}", serde_json::to_string_pretty(&instance.status())?);
    }
    host.stop();
    Ok(())
}

/// Periodic demo work: a heartbeat on the screen log, a weighted loot
/// roll, and a tooltip that follows the latest drop.
fn install_demo_tasks(instance: &mut GameInstance) {
    let seed = instance.settings().seed;

    instance.scheduler_mut().every(1.0, |registry, time| {
        if let Some(screen_log) = registry.find_mut::<ScreenLogSubsystem>() {
            screen_log.info(format!("heartbeat frame={} t={:.1}s", time.frame, time.elapsed));
        }
        TaskControl::Continue
    });

    let table = match loot_table() {
        Ok(table) => table,
        Err(e) => {
            log::warn!("runner: loot table rejected: {e}");
            return;
        }
    };
    let mut rng = GameRng::derived(seed, LOOT_STREAM).with_name("loot");
    instance.scheduler_mut().every(2.5, move |registry, time| {
        let item = *table.draw(&mut rng);
        log::info!("frame={} runner: dropped {item}", time.frame);
        if let Some(screen_log) = registry.find_mut::<ScreenLogSubsystem>() {
            screen_log.info(format!("dropped {item}"));
        }
        if let Some(tooltip) = registry.find_mut::<TooltipSubsystem>() {
            tooltip.request("loot", item);
        }
        TaskControl::Continue
    });
}

fn loot_table() -> LemonResult<WeightedTable<&'static str>> {
    WeightedTable::new(vec![
        ValueProbabilityPair::new("copper coin", 60.0)?,
        ValueProbabilityPair::new("health potion", 25.0)?,
        ValueProbabilityPair::new("iron sword", 12.0)?,
        ValueProbabilityPair::new("dragon scale", 3.0)?,
    ])
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
