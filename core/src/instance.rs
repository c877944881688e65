//! The game instance — drives every registered subsystem.
//!
//! STARTUP ORDER (fixed, documented, never reordered):
//!   1. Screen log subsystem   (development builds only)
//!   2. Tooltip subsystem
//!
//! RULES:
//!   - A subsystem is initialized once, when it is registered.
//!   - Subsystems update in registration order, every frame.
//!   - Scheduled tasks run before subsystem updates.
//!   - The debug overlay is drawn after all updates, development builds only.
//!   - Shutdown runs in registration order and happens at most once.

use crate::{
    clock::{FrameClock, FrameTime},
    config::{ConfigStore, InstanceConfig, INSTANCE_SECTION},
    error::{LemonError, LemonResult},
    overlay::DebugOverlay,
    registry::SubsystemRegistry,
    schedule::Scheduler,
    screen_log_subsystem::ScreenLogSubsystem,
    subsystem::{GameSubsystem, SubsystemState},
    tooltip_subsystem::TooltipSubsystem,
    types::{Frame, Seconds},
};
use serde::Serialize;
use std::any::TypeId;

/// A serializable summary of the instance, for tooling and runners.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InstanceStatus {
    pub frame:           Frame,
    pub elapsed:         Seconds,
    pub initialized:     bool,
    pub shut_down:       bool,
    pub active:          Vec<&'static str>,
    pub scheduled_tasks: usize,
}

pub struct GameInstance {
    pub clock:     FrameClock,
    settings:      InstanceConfig,
    config:        ConfigStore,
    registry:      SubsystemRegistry,
    /// Registration order. Entries are owned by the registry.
    active:        Vec<TypeId>,
    scheduler:     Scheduler,
    overlay:       DebugOverlay,
    initialized:   bool,
    shut_down:     bool,
}

impl GameInstance {
    pub fn new(config: ConfigStore) -> Self {
        let settings: InstanceConfig = config.section(INSTANCE_SECTION);
        Self {
            clock: FrameClock::new(),
            settings,
            config,
            registry: SubsystemRegistry::new(),
            active: Vec::new(),
            scheduler: Scheduler::new(),
            overlay: DebugOverlay::new(),
            initialized: false,
            shut_down: false,
        }
    }

    /// Build a fully wired instance with the standard subsystems
    /// registered and startup finished.
    pub fn build(config: ConfigStore) -> Self {
        let mut instance = GameInstance::new(config);
        instance.register_standard_subsystems();
        instance.finish_startup();
        instance
    }

    /// The fixed startup registrations.
    pub fn register_standard_subsystems(&mut self) {
        // STARTUP ORDER — fixed, documented, never reordered.
        self.register_if::<ScreenLogSubsystem>(self.settings.development_build);
        self.register::<TooltipSubsystem>();
    }

    /// Register `T` as active, initializing it if needed.
    pub fn try_register<T: GameSubsystem + Default>(&mut self) -> LemonResult<()> {
        let id = TypeId::of::<T>();
        let entry = self.registry.entry::<T>();
        let name = entry.name();

        if self.active.contains(&id) {
            return Err(LemonError::AlreadyRegistered { name: name.to_string() });
        }
        if entry.state() == SubsystemState::ShutDown {
            return Err(LemonError::Retired { name: name.to_string() });
        }

        if entry.initialize(&self.config) {
            log::info!("frame={} instance: initialized '{name}'", self.clock.current_frame);
        }
        self.active.push(id);
        Ok(())
    }

    /// Register `T` as active. A duplicate or retired registration is
    /// logged and otherwise ignored.
    pub fn register<T: GameSubsystem + Default>(&mut self) {
        if let Err(e) = self.try_register::<T>() {
            log::warn!("instance: {e}");
        }
    }

    /// Register `T` only when `enabled`, e.g. for development-only subsystems.
    pub fn register_if<T: GameSubsystem + Default>(&mut self, enabled: bool) {
        if enabled {
            self.register::<T>();
        } else {
            log::debug!("instance: skipped conditional registration");
        }
    }

    /// Mark startup as complete. Called once all startup registrations
    /// have run; the host fires the ready signal right after.
    pub fn finish_startup(&mut self) {
        if self.shut_down {
            log::warn!("instance: finish_startup() after shutdown ignored");
            return;
        }
        if !self.initialized {
            self.initialized = true;
            log::info!("instance: ready with {} active subsystem(s)", self.active.len());
        }
    }

    /// Advance one frame. This is the core per-frame step.
    pub fn update(&mut self, delta: Seconds) -> FrameTime {
        if self.shut_down {
            log::debug!("instance: update() after shutdown ignored");
            return self.clock.now();
        }
        let time = self.clock.advance(delta);

        self.scheduler.advance(&time, &mut self.registry);

        for id in &self.active {
            if let Some(entry) = self.registry.entry_by_id_mut(*id) {
                entry.update(&time);
            }
        }

        if self.settings.development_build {
            self.overlay.clear();
            for id in &self.active {
                if let Some(entry) = self.registry.entry_by_id_mut(*id) {
                    entry.debug_overlay(&mut self.overlay);
                }
            }
        }
        time
    }

    /// Shut down every active subsystem in registration order and clear
    /// the active list. Later calls do nothing.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        for id in &self.active {
            if let Some(entry) = self.registry.entry_by_id_mut(*id) {
                let name = entry.name();
                if entry.shutdown() {
                    log::info!("frame={} instance: shut down '{name}'", self.clock.current_frame);
                }
            }
        }
        self.active.clear();
        self.overlay.clear();
        self.initialized = false;
        self.shut_down = true;
    }

    /// The active `T`, or None if `T` is not registered.
    pub fn subsystem<T: GameSubsystem>(&self) -> Option<&T> {
        if !self.is_active::<T>() {
            return None;
        }
        self.registry.find::<T>()
    }

    pub fn subsystem_mut<T: GameSubsystem>(&mut self) -> Option<&mut T> {
        if !self.is_active::<T>() {
            return None;
        }
        self.registry.find_mut::<T>()
    }

    pub fn is_active<T: GameSubsystem>(&self) -> bool {
        self.active.contains(&TypeId::of::<T>())
    }

    /// Raw per-type lookup. Lazily constructs unregistered types without
    /// initializing them.
    pub fn registry(&self) -> &SubsystemRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut SubsystemRegistry {
        &mut self.registry
    }

    pub fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }

    /// Active subsystem names, in registration order.
    pub fn active_names(&self) -> Vec<&'static str> {
        self.active
            .iter()
            .filter_map(|id| self.registry.entry_by_id(*id))
            .map(|e| e.name())
            .collect()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    pub fn frame(&self) -> Frame {
        self.clock.current_frame
    }

    pub fn settings(&self) -> &InstanceConfig {
        &self.settings
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    pub fn status(&self) -> InstanceStatus {
        InstanceStatus {
            frame:           self.clock.current_frame,
            elapsed:         self.clock.elapsed,
            initialized:     self.initialized,
            shut_down:       self.shut_down,
            active:          self.active_names(),
            scheduled_tasks: self.scheduler.len(),
        }
    }

    /// The overlay drawn during the last update.
    pub fn overlay(&self) -> &DebugOverlay {
        &self.overlay
    }
}
