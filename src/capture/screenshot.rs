//! Target rasterization using the `xcap` crate.
//!
//! This is the infrastructure layer — it talks to the OS. The
//! [`Renderer`] trait is the seam: tests and alternative backends
//! bring their own implementation.

use image::DynamicImage;
use xcap::{Monitor, Window};

use super::compose::{self, ComposeError};
use super::config::RenderOptions;
use super::target::CaptureTarget;
use crate::data_url;

/// Rasterizes a capture target into an encoded PNG data URL.
pub trait Renderer: Send + Sync {
    /// Content dimensions of the target, or `None` when the target
    /// cannot be resolved.
    fn measure(&self, target: &CaptureTarget) -> Result<Option<(u32, u32)>, RenderError>;

    /// Render the target at the given dimensions and return a PNG data URL.
    fn render(&self, target: &CaptureTarget, options: &RenderOptions)
        -> Result<String, RenderError>;
}

/// Default renderer backed by `xcap` monitor/window capture.
pub struct XcapRenderer;

impl Renderer for XcapRenderer {
    fn measure(&self, target: &CaptureTarget) -> Result<Option<(u32, u32)>, RenderError> {
        match resolve(target)? {
            Some(resolved) => resolved.dimensions().map(Some),
            None => Ok(None),
        }
    }

    fn render(
        &self,
        target: &CaptureTarget,
        options: &RenderOptions,
    ) -> Result<String, RenderError> {
        let resolved = resolve(target)?.ok_or(RenderError::TargetVanished)?;
        let image = resolved.capture()?;
        let png_bytes = compose::compose_png(&image, options)?;
        Ok(data_url::encode_png(&png_bytes))
    }
}

enum Resolved {
    Monitor(Monitor),
    Window(Window),
}

impl Resolved {
    fn dimensions(&self) -> Result<(u32, u32), RenderError> {
        let failed = |e: xcap::XCapError| RenderError::CaptureFailed(e.to_string());
        match self {
            Resolved::Monitor(monitor) => Ok((
                monitor.width().map_err(failed)?,
                monitor.height().map_err(failed)?,
            )),
            Resolved::Window(window) => Ok((
                window.width().map_err(failed)?,
                window.height().map_err(failed)?,
            )),
        }
    }

    fn capture(&self) -> Result<DynamicImage, RenderError> {
        let image = match self {
            Resolved::Monitor(monitor) => monitor
                .capture_image()
                .map_err(|e| RenderError::CaptureFailed(e.to_string()))?,
            Resolved::Window(window) => window
                .capture_image()
                .map_err(|e| RenderError::CaptureFailed(e.to_string()))?,
        };
        Ok(DynamicImage::ImageRgba8(image))
    }
}

fn resolve(target: &CaptureTarget) -> Result<Option<Resolved>, RenderError> {
    match target {
        CaptureTarget::PrimaryMonitor => {
            let monitors =
                Monitor::all().map_err(|e| RenderError::MonitorEnumeration(e.to_string()))?;
            let primary = monitors
                .into_iter()
                .find(|m| m.is_primary().unwrap_or(false))
                .or_else(|| {
                    // Fallback: if no monitor reports as primary, use the first one
                    let all = Monitor::all().ok()?;
                    all.into_iter().next()
                });
            Ok(primary.map(Resolved::Monitor))
        }
        CaptureTarget::Monitor(index) => {
            let monitors =
                Monitor::all().map_err(|e| RenderError::MonitorEnumeration(e.to_string()))?;
            Ok(monitors.into_iter().nth(*index).map(Resolved::Monitor))
        }
        CaptureTarget::Window(title) => {
            let windows =
                Window::all().map_err(|e| RenderError::WindowEnumeration(e.to_string()))?;
            Ok(windows
                .into_iter()
                .filter(|w| !w.is_minimized().unwrap_or(false))
                .find(|w| w.title().map(|t| t.contains(title)).unwrap_or(false))
                .map(Resolved::Window))
        }
        CaptureTarget::App(name) => {
            let windows =
                Window::all().map_err(|e| RenderError::WindowEnumeration(e.to_string()))?;
            Ok(windows
                .into_iter()
                .filter(|w| !w.is_minimized().unwrap_or(false))
                .find(|w| w.app_name().map(|a| a == *name).unwrap_or(false))
                .map(Resolved::Window))
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to enumerate monitors: {0}")]
    MonitorEnumeration(String),

    #[error("Failed to enumerate windows: {0}")]
    WindowEnumeration(String),

    #[error("Capture target disappeared before rendering")]
    TargetVanished,

    #[error("Screen capture failed: {0}")]
    CaptureFailed(String),

    #[error(transparent)]
    Compose(#[from] ComposeError),
}
