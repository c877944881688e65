//! Tooltip subsystem.
//!
//! One tooltip is shown at a time. A hover source calls `request` every
//! frame it wants the tooltip; the tooltip becomes visible once the
//! request has been held for `show_delay` seconds. A newer request from a
//! different owner replaces the current one and restarts the delay.
//! Only the current owner can release it.

use crate::{
    clock::FrameTime,
    config::{ConfigStore, TooltipConfig, TOOLTIP_SECTION},
    overlay::DebugOverlay,
    schedule::Countdown,
    subsystem::GameSubsystem,
};

/// Approximate glyph width used to turn `max_width` into a column count.
const GLYPH_WIDTH_PX: u32 = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub owner:   String,
    pub text:    String,
    pub visible: bool,
    delay:       Countdown,
}

#[derive(Default)]
pub struct TooltipSubsystem {
    config:  TooltipConfig,
    current: Option<Tooltip>,
}

impl TooltipSubsystem {
    /// Ask for a tooltip. Repeating the same owner and text keeps the
    /// running delay; anything else restarts it.
    pub fn request(&mut self, owner: &str, text: &str) {
        if let Some(current) = &self.current {
            if current.owner == owner && current.text == text {
                return;
            }
        }
        self.current = Some(Tooltip {
            owner:   owner.to_string(),
            text:    text.to_string(),
            visible: false,
            delay:   Countdown::new(self.config.show_delay),
        });
    }

    /// Hide the tooltip if `owner` holds it. Returns whether it did.
    pub fn release(&mut self, owner: &str) -> bool {
        match &self.current {
            Some(current) if current.owner == owner => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// Hide the tooltip regardless of owner.
    pub fn hide(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Tooltip> {
        self.current.as_ref()
    }

    pub fn visible(&self) -> Option<&Tooltip> {
        self.current.as_ref().filter(|t| t.visible)
    }

    /// The visible tooltip's text wrapped to `max_width`.
    pub fn wrapped_lines(&self) -> Vec<String> {
        let Some(tooltip) = self.visible() else {
            return Vec::new();
        };
        let columns = (self.config.max_width / GLYPH_WIDTH_PX).max(1) as usize;
        wrap_words(&tooltip.text, columns)
    }

    pub fn config(&self) -> &TooltipConfig {
        &self.config
    }
}

/// Width is counted in chars, one glyph each.
fn wrap_words(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut width = 0;
    for word in text.split_whitespace() {
        let word_width = word.chars().count();
        if !line.is_empty() && width + 1 + word_width > columns {
            lines.push(std::mem::take(&mut line));
            width = 0;
        }
        if !line.is_empty() {
            line.push(' ');
            width += 1;
        }
        line.push_str(word);
        width += word_width;
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

impl GameSubsystem for TooltipSubsystem {
    fn name(&self) -> &'static str { "tooltip" }

    fn initialize(&mut self, config: &ConfigStore) {
        let mut section: TooltipConfig = config.section(TOOLTIP_SECTION);
        if !section.show_delay.is_finite() || section.show_delay < 0.0 {
            log::warn!("tooltip: show_delay {} is invalid, using default", section.show_delay);
            section.show_delay = TooltipConfig::default().show_delay;
        }
        log::info!(
            "tooltip: prefab='{}' delay={:.2}s max_width={}",
            section.prefab_path,
            section.show_delay,
            section.max_width
        );
        self.config = section;
    }

    fn update(&mut self, time: &FrameTime) {
        let Some(tooltip) = &mut self.current else {
            return;
        };
        if !tooltip.visible && tooltip.delay.tick(time.unscaled_delta) {
            tooltip.visible = true;
            log::debug!("frame={} tooltip: showing for '{}'", time.frame, tooltip.owner);
        }
    }

    fn shutdown(&mut self) {
        self.hide();
    }

    fn debug_overlay(&mut self, overlay: &mut DebugOverlay) {
        match &self.current {
            None => overlay.line("hidden"),
            Some(t) if t.visible => overlay.line(format!("visible owner={} text=\"{}\"", t.owner, t.text)),
            Some(t) => overlay.line(format!(
                "pending owner={} in {:.2}s",
                t.owner,
                t.delay.remaining()
            )),
        }
    }

    fn as_any(&self) -> &dyn std::any::Any { self }
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any { self }
}
