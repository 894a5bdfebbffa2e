//! Capture-target addressing.

/// What to capture: a monitor, or a window matched by title or app name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureTarget {
    /// The primary monitor, or the first monitor if none reports primary.
    PrimaryMonitor,

    /// A monitor by enumeration index.
    Monitor(usize),

    /// The first non-minimized window whose title contains the string.
    Window(String),

    /// The first non-minimized window of the named application.
    App(String),
}

impl CaptureTarget {
    /// Parse a selector string.
    ///
    /// `monitor:primary`, `monitor:<index>`, `window:<title>` and
    /// `app:<name>` are recognized; anything else matches on window title.
    pub fn parse(selector: &str) -> Self {
        if let Some(rest) = selector.strip_prefix("monitor:") {
            if rest == "primary" {
                return Self::PrimaryMonitor;
            }
            if let Ok(index) = rest.parse() {
                return Self::Monitor(index);
            }
        }
        if let Some(title) = selector.strip_prefix("window:") {
            return Self::Window(title.to_string());
        }
        if let Some(name) = selector.strip_prefix("app:") {
            return Self::App(name.to_string());
        }
        Self::Window(selector.to_string())
    }
}
