//! Key/value configuration store.
//!
//! The store is a single JSON object. Each top-level key names a section
//! read by exactly one consumer (the instance itself, or one subsystem).
//! Missing or malformed sections fall back to their documented defaults;
//! missing keys inside a section fall back field by field.

use crate::error::{LemonError, LemonResult};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

pub const INSTANCE_SECTION: &str = "instance";
pub const SCREEN_LOG_SECTION: &str = "screen_log";
pub const TOOLTIP_SECTION: &str = "tooltip";

#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    sections: Map<String, Value>,
}

impl ConfigStore {
    /// An empty store; every section reads as its default.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a JSON document. The root must be an object.
    pub fn parse(content: &str) -> LemonResult<Self> {
        let root: Value = serde_json::from_str(content)
            .map_err(|e| LemonError::invalid(format!("config is not valid JSON: {e}")))?;
        match root {
            Value::Object(sections) => Ok(Self { sections }),
            other => Err(LemonError::invalid(format!(
                "config root must be an object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Load from a file on disk.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Ok(Self::parse(&content)?)
    }

    /// Read one section, falling back to `T::default()` when the section
    /// is missing or does not deserialize.
    pub fn section<T>(&self, name: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let Some(raw) = self.sections.get(name) else {
            log::debug!("config: section '{name}' missing, using defaults");
            return T::default();
        };
        match serde_json::from_value(raw.clone()) {
            Ok(section) => section,
            Err(e) => {
                log::warn!("config: section '{name}' is malformed ({e}), using defaults");
                T::default()
            }
        }
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Replace one section. Used by hosts that build configuration in code.
    pub fn set_section<T: Serialize>(&mut self, name: &str, section: &T) -> LemonResult<()> {
        let value = serde_json::to_value(section)?;
        self.sections.insert(name.to_string(), value);
        Ok(())
    }

    pub fn with_section<T: Serialize>(mut self, name: &str, section: &T) -> LemonResult<Self> {
        self.set_section(name, section)?;
        Ok(self)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null      => "null",
        Value::Bool(_)   => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_)  => "array",
        Value::Object(_) => "object",
    }
}

// ── Instance ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InstanceConfig {
    /// When false the host never constructs a game instance.
    pub enabled: bool,
    /// Development builds register debug-only subsystems and draw the
    /// debug overlay every frame.
    pub development_build: bool,
    /// Master seed for every derived RNG stream.
    pub seed: u64,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            development_build: cfg!(debug_assertions),
            seed: 0x1e30_9a55,
        }
    }
}

// ── Screen log ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScreenLogConfig {
    /// Seconds a message stays on screen.
    pub message_lifetime: f64,
    /// Oldest messages are dropped beyond this count.
    pub max_messages: usize,
}

impl Default for ScreenLogConfig {
    fn default() -> Self {
        Self {
            message_lifetime: 5.0,
            max_messages: 32,
        }
    }
}

// ── Tooltip ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TooltipConfig {
    /// Resource path of the tooltip prefab the presentation layer spawns.
    pub prefab_path: String,
    /// Seconds a request must stay alive before the tooltip shows.
    pub show_delay: f64,
    /// Text wider than this many pixels wraps.
    pub max_width: u32,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            prefab_path: "UI/Tooltip".into(),
            show_delay: 0.35,
            max_width: 320,
        }
    }
}
