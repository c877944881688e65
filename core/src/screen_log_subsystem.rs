//! Screen log subsystem — development builds only.
//!
//! Collects short messages for on-screen display. Each message lives for
//! `message_lifetime` seconds of scaled time; beyond `max_messages` the
//! oldest are dropped. Messages are drawn through the debug overlay.
//!
//! Execution: first in registration order, so messages pushed by later
//! subsystems this frame are still alive when the overlay is drawn.

use crate::{
    clock::FrameTime,
    config::{ConfigStore, ScreenLogConfig, SCREEN_LOG_SECTION},
    overlay::DebugOverlay,
    subsystem::GameSubsystem,
    types::Seconds,
};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

impl MessageLevel {
    fn tag(self) -> &'static str {
        match self {
            Self::Info    => "INFO",
            Self::Warning => "WARN",
            Self::Error   => "ERROR",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScreenMessage {
    pub level:     MessageLevel,
    pub text:      String,
    pub logged_at: DateTime<Utc>,
    /// Seconds of scaled time left before the message expires.
    pub remaining: Seconds,
}

#[derive(Default)]
pub struct ScreenLogSubsystem {
    config:   ScreenLogConfig,
    messages: VecDeque<ScreenMessage>,
}

impl ScreenLogSubsystem {
    pub fn push(&mut self, level: MessageLevel, text: impl Into<String>) {
        if self.config.max_messages == 0 {
            return;
        }
        while self.messages.len() >= self.config.max_messages {
            self.messages.pop_front();
        }
        self.messages.push_back(ScreenMessage {
            level,
            text: text.into(),
            logged_at: Utc::now(),
            remaining: self.config.message_lifetime,
        });
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(MessageLevel::Info, text);
    }

    pub fn warn(&mut self, text: impl Into<String>) {
        self.push(MessageLevel::Warning, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(MessageLevel::Error, text);
    }

    pub fn messages(&self) -> impl Iterator<Item = &ScreenMessage> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn config(&self) -> &ScreenLogConfig {
        &self.config
    }
}

impl GameSubsystem for ScreenLogSubsystem {
    fn name(&self) -> &'static str { "screen_log" }

    fn initialize(&mut self, config: &ConfigStore) {
        let mut section: ScreenLogConfig = config.section(SCREEN_LOG_SECTION);
        if !section.message_lifetime.is_finite() || section.message_lifetime < 0.0 {
            log::warn!(
                "screen_log: message_lifetime {} is invalid, using default",
                section.message_lifetime
            );
            section.message_lifetime = ScreenLogConfig::default().message_lifetime;
        }
        log::info!(
            "screen_log: lifetime={:.2}s capacity={}",
            section.message_lifetime,
            section.max_messages
        );
        self.config = section;
    }

    fn update(&mut self, time: &FrameTime) {
        for message in &mut self.messages {
            message.remaining -= time.delta;
        }
        let before = self.messages.len();
        self.messages.retain(|m| m.remaining > 0.0);
        let expired = before - self.messages.len();
        if expired > 0 {
            log::debug!("frame={} screen_log: expired {expired} message(s)", time.frame);
        }
    }

    fn shutdown(&mut self) {
        self.messages.clear();
    }

    fn debug_overlay(&mut self, overlay: &mut DebugOverlay) {
        for message in &self.messages {
            overlay.line(format!(
                "{} {:<5} {}",
                message.logged_at.format("%H:%M:%S"),
                message.level.tag(),
                message.text
            ));
        }
    }

    fn as_any(&self) -> &dyn std::any::Any { self }
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any { self }
}
