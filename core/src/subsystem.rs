//! Subsystem trait and lifecycle state.
//!
//! RULE: Every subsystem implements GameSubsystem.
//! The instance initializes a subsystem once when it is registered,
//! updates it once per frame in registration order, and shuts it
//! down once when the instance itself shuts down.

use crate::{clock::FrameTime, config::ConfigStore, overlay::DebugOverlay};
use std::any::Any;

/// The contract every subsystem must fulfill.
pub trait GameSubsystem: Any {
    /// Unique stable name for this subsystem.
    fn name(&self) -> &'static str;

    /// Called once, when the subsystem is first registered as active.
    /// Read parameters from `config`; bad values fall back to defaults.
    fn initialize(&mut self, config: &ConfigStore);

    /// Called once per frame while active. Must not block.
    fn update(&mut self, time: &FrameTime);

    /// Called once, when the owning instance shuts down. Release
    /// everything acquired in initialize().
    fn shutdown(&mut self);

    /// Called after update() in development builds only.
    fn debug_overlay(&mut self, _overlay: &mut DebugOverlay) {}

    /// For downcasting by the registry.
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubsystemState {
    Uninitialized,
    Initialized,
    ShutDown,
}

impl SubsystemState {
    /// The only state a subsystem may move to next, if any.
    pub fn next(self) -> Option<SubsystemState> {
        match self {
            Self::Uninitialized => Some(Self::Initialized),
            Self::Initialized   => Some(Self::ShutDown),
            Self::ShutDown      => None,
        }
    }

    pub fn can_update(self) -> bool {
        self == Self::Initialized
    }
}

/// A cached subsystem plus its lifecycle state.
pub struct SubsystemEntry {
    state:     SubsystemState,
    subsystem: Box<dyn GameSubsystem>,
}

impl SubsystemEntry {
    pub fn new(subsystem: Box<dyn GameSubsystem>) -> Self {
        Self { state: SubsystemState::Uninitialized, subsystem }
    }

    pub fn state(&self) -> SubsystemState {
        self.state
    }

    pub fn name(&self) -> &'static str {
        self.subsystem.name()
    }

    pub fn subsystem(&self) -> &dyn GameSubsystem {
        self.subsystem.as_ref()
    }

    pub fn subsystem_mut(&mut self) -> &mut dyn GameSubsystem {
        self.subsystem.as_mut()
    }

    /// Uninitialized -> Initialized. Returns false (and does nothing)
    /// from any other state.
    pub fn initialize(&mut self, config: &ConfigStore) -> bool {
        if self.state.next() != Some(SubsystemState::Initialized) {
            return false;
        }
        self.subsystem.initialize(config);
        self.state = SubsystemState::Initialized;
        true
    }

    /// Skipped unless Initialized.
    pub fn update(&mut self, time: &FrameTime) -> bool {
        if !self.state.can_update() {
            return false;
        }
        self.subsystem.update(time);
        true
    }

    pub fn debug_overlay(&mut self, overlay: &mut DebugOverlay) -> bool {
        if !self.state.can_update() {
            return false;
        }
        overlay.begin_section(self.subsystem.name());
        self.subsystem.debug_overlay(overlay);
        true
    }

    /// Initialized -> ShutDown. Returns false (and does nothing)
    /// from any other state.
    pub fn shutdown(&mut self) -> bool {
        if self.state.next() != Some(SubsystemState::ShutDown) {
            return false;
        }
        self.subsystem.shutdown();
        self.state = SubsystemState::ShutDown;
        true
    }
}
