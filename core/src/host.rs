//! Process-wide host context.
//!
//! The host owns the single live game instance and the readiness signal.
//! Whatever owns the frame loop owns the host and calls `tick` once per
//! frame and `stop` once at teardown.

use crate::{
    config::{ConfigStore, InstanceConfig, INSTANCE_SECTION},
    error::{LemonError, LemonResult},
    instance::GameInstance,
    ready::ReadySignal,
    types::Seconds,
};

#[derive(Default)]
pub struct GameHost {
    instance: Option<GameInstance>,
    ready:    ReadySignal<GameInstance>,
}

impl GameHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the standard instance (see `GameInstance::build`).
    /// Returns Ok(false) when the configuration disables the instance.
    pub fn start(&mut self, config: ConfigStore) -> LemonResult<bool> {
        self.start_with(config, GameInstance::register_standard_subsystems)
    }

    /// Start an instance whose startup registrations are performed by
    /// `startup`. `finish_startup` is called afterwards if `startup`
    /// did not already do so.
    pub fn start_with<F>(&mut self, config: ConfigStore, startup: F) -> LemonResult<bool>
    where
        F: FnOnce(&mut GameInstance),
    {
        if self.instance.is_some() {
            return Err(LemonError::InstanceAlreadyLive);
        }
        let settings: InstanceConfig = config.section(INSTANCE_SECTION);
        if !settings.enabled {
            log::info!("host: instance disabled by configuration");
            return Ok(false);
        }

        let mut instance = GameInstance::new(config);
        startup(&mut instance);
        instance.finish_startup();

        let notified = self.ready.fire(&mut instance);
        log::info!("host: instance ready, notified {notified} subscriber(s)");
        self.instance = Some(instance);
        Ok(true)
    }

    /// Run `subscriber` once the instance is ready. If it is already
    /// ready, `subscriber` runs immediately.
    pub fn on_ready<F>(&mut self, subscriber: F)
    where
        F: FnOnce(&mut GameInstance) + 'static,
    {
        if !self.ready.has_fired() {
            self.ready.subscribe(subscriber);
            return;
        }
        match self.instance.as_mut() {
            Some(instance) if instance.is_initialized() => subscriber(instance),
            _ => log::warn!("host: ready subscriber arrived after the instance stopped, dropped"),
        }
    }

    /// The instance, if it exists and has finished startup.
    pub fn instance(&self) -> Option<&GameInstance> {
        let ready = self.instance.as_ref().filter(|i| i.is_initialized());
        if ready.is_none() {
            log::debug!("host: instance requested before it was ready");
        }
        ready
    }

    pub fn instance_mut(&mut self) -> Option<&mut GameInstance> {
        let ready = self.instance.as_mut().filter(|i| i.is_initialized());
        if ready.is_none() {
            log::debug!("host: instance requested before it was ready");
        }
        ready
    }

    /// Like `instance_mut`, but reports absence as `NotReady`.
    pub fn require(&mut self) -> LemonResult<&mut GameInstance> {
        self.instance_mut().ok_or(LemonError::NotReady)
    }

    pub fn is_ready(&self) -> bool {
        self.instance.as_ref().is_some_and(|i| i.is_initialized())
    }

    /// Drive one frame. Does nothing while no instance is ready.
    pub fn tick(&mut self, delta: Seconds) -> bool {
        match self.instance.as_mut().filter(|i| i.is_initialized()) {
            Some(instance) => {
                instance.update(delta);
                true
            }
            None => false,
        }
    }

    /// Shut down and drop the instance. Later calls do nothing.
    pub fn stop(&mut self) {
        if let Some(mut instance) = self.instance.take() {
            instance.shutdown();
            log::info!("host: instance stopped at frame {}", instance.frame());
        }
    }
}
