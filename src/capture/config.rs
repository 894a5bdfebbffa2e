//! Capture configuration and dimension resolution.

use serde::{Deserialize, Serialize};

/// Optional capture settings. Every field may be omitted; defaults are
/// derived from the target's content dimensions at capture time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Viewport width the target is laid out at during capture
    /// (defaults to the target's content width).
    pub window_width: Option<u32>,

    /// Viewport height the target is laid out at during capture
    /// (defaults to the target's content height).
    pub window_height: Option<u32>,

    /// Final output image width (defaults to the viewport width).
    pub width: Option<u32>,

    /// Final output image height (defaults to the viewport height).
    pub height: Option<u32>,

    /// Address a target by selector instead of binding one directly.
    /// Takes precedence over a bound target.
    pub selector: Option<String>,
}

/// Fully resolved dimensions handed to a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Output canvas width.
    pub width: u32,

    /// Output canvas height.
    pub height: u32,

    /// Viewport the target is laid out at before composition.
    pub viewport_width: u32,

    /// See [`RenderOptions::viewport_width`].
    pub viewport_height: u32,
}

impl SnapshotConfig {
    /// Resolve the optional dimensions against the target's content size.
    ///
    /// Output dimensions fall back to the viewport dimensions, which in
    /// turn fall back to the content dimensions. A viewport dimension
    /// configured as 0 does not propagate into the output default.
    pub fn resolve_dimensions(&self, content_width: u32, content_height: u32) -> RenderOptions {
        let viewport_width = self.window_width.unwrap_or(content_width);
        let viewport_height = self.window_height.unwrap_or(content_height);

        let width = self.width.unwrap_or(if viewport_width == 0 {
            content_width
        } else {
            viewport_width
        });
        let height = self.height.unwrap_or(if viewport_height == 0 {
            content_height
        } else {
            viewport_height
        });

        RenderOptions {
            width,
            height,
            viewport_width,
            viewport_height,
        }
    }
}
