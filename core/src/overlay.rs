//! Debug overlay sink.
//!
//! Development builds collect one overlay per frame. Each active subsystem
//! appends lines under its own section; the host decides how to draw them.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayLine {
    pub section: &'static str,
    pub text:    String,
}

#[derive(Debug, Clone, Default)]
pub struct DebugOverlay {
    section: &'static str,
    lines:   Vec<OverlayLine>,
}

impl DebugOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines written after this call are attributed to `section`.
    pub fn begin_section(&mut self, section: &'static str) {
        self.section = section;
    }

    pub fn line(&mut self, text: impl Into<String>) {
        self.lines.push(OverlayLine {
            section: self.section,
            text:    text.into(),
        });
    }

    pub fn lines(&self) -> &[OverlayLine] {
        &self.lines
    }

    pub fn lines_for<'a>(&'a self, section: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.lines
            .iter()
            .filter(move |l| l.section == section)
            .map(|l| l.text.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.section = "";
        self.lines.clear();
    }

    /// One `[section] text` row per line.
    pub fn render(&self) -> String {
        self.lines
            .iter()
            .map(|l| format!("[{}] {}", l.section, l.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
