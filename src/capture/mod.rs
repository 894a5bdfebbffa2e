//! Snapshot capture domain — public API.
//!
//! This module owns the three snapshot operations (capture, save,
//! release), the busy flag, and target binding. External code should
//! only use what is exported here.

mod compose;
mod config;
mod screenshot;
mod target;

pub use compose::ComposeError;
pub use config::{RenderOptions, SnapshotConfig};
pub use screenshot::{RenderError, Renderer, XcapRenderer};
pub use target::CaptureTarget;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::data_url::{self, DataUrlError};
use crate::store;

/// Filename used by [`Snapshotter::save`] when none is given.
pub const DEFAULT_FILENAME: &str = "image.png";

/// Delay before rasterization so pending UI updates can settle.
const SETTLE_DELAY: Duration = Duration::from_millis(100);

/// A captured snapshot: the published locator and the PNG payload.
///
/// The locator stays valid until passed to [`Snapshotter::release`] or
/// [`store::release`]; the bytes are the caller's to keep.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub url: String,
    pub png_bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Raised before any rendering is attempted.
    #[error("Capture target not found. Bind a target or pass a valid selector.")]
    TargetNotFound,

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Decode(#[from] DataUrlError),

    #[error("Snapshot {url} is no longer available")]
    Released { url: String },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Clonable busy indicator. A UI layer holds a clone and polls it to
/// disable capture controls while an operation is in flight.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn get(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn raise(&self) -> BusyGuard<'_> {
        self.0.store(true, Ordering::SeqCst);
        BusyGuard(&self.0)
    }
}

/// Lowers the flag when dropped, so every exit path resets it.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Captures snapshots of a bound or selector-addressed target.
pub struct Snapshotter {
    config: SnapshotConfig,
    target: Mutex<Option<CaptureTarget>>,
    renderer: Box<dyn Renderer>,
    busy: BusyFlag,
    save_dir: PathBuf,
}

impl Snapshotter {
    pub fn new(config: SnapshotConfig) -> Self {
        Self::with_renderer(config, Box::new(XcapRenderer))
    }

    /// Build against a specific renderer instead of [`XcapRenderer`].
    pub fn with_renderer(config: SnapshotConfig, renderer: Box<dyn Renderer>) -> Self {
        Self {
            config,
            target: Mutex::new(None),
            renderer,
            busy: BusyFlag::default(),
            save_dir: default_save_dir(),
        }
    }

    /// Override where [`Snapshotter::save`] writes files.
    pub fn with_save_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.save_dir = dir.into();
        self
    }

    /// Bind a capture target directly. A `selector` in the config takes
    /// precedence over the bound target.
    pub fn bind(&self, target: CaptureTarget) {
        *self.target.lock().unwrap() = Some(target);
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// A clone of the busy indicator, for a UI layer to poll.
    pub fn busy_flag(&self) -> BusyFlag {
        self.busy.clone()
    }

    /// Capture the target as a PNG and publish it.
    ///
    /// Resolves the target, lets pending UI updates settle, renders at
    /// the configured dimensions, and publishes the decoded payload.
    /// Fails with [`SnapshotError::TargetNotFound`] before any
    /// rendering call when the target cannot be resolved.
    pub async fn capture(&self) -> Result<Snapshot, SnapshotError> {
        let target = self.resolve_target()?;

        let (content_width, content_height) = self
            .renderer
            .measure(&target)?
            .ok_or(SnapshotError::TargetNotFound)?;

        let _busy = self.busy.raise();
        let start = Instant::now();

        tokio::time::sleep(SETTLE_DELAY).await;

        let options = self
            .config
            .resolve_dimensions(content_width, content_height);
        let rendered = self.renderer.render(&target, &options)?;
        let render_ms = start.elapsed().as_millis();

        let png_bytes = data_url::decode(&rendered)?;
        let url = store::publish(png_bytes.clone());

        log::info!(
            "Captured {:?} as {}x{} PNG in {}ms — {} bytes, published as {}",
            target,
            options.width,
            options.height,
            render_ms,
            png_bytes.len(),
            url
        );

        Ok(Snapshot { url, png_bytes })
    }

    /// Capture the target and write it to the save directory.
    ///
    /// The filename defaults to [`DEFAULT_FILENAME`]. The snapshot's
    /// locator is released once the file is written.
    pub async fn save(&self, filename: Option<&str>) -> Result<PathBuf, SnapshotError> {
        let snapshot = self.capture().await?;

        let name = filename.unwrap_or(DEFAULT_FILENAME);
        let path = self.save_dir.join(name);

        let written = write_download(&snapshot.url, &path);
        store::release(Some(&snapshot.url));
        written?;

        log::info!("Saved snapshot to {}", path.display());
        Ok(path)
    }

    /// Release a snapshot's locator. `None` is a no-op.
    pub fn release(&self, url: Option<&str>) {
        store::release(url);
    }

    fn resolve_target(&self) -> Result<CaptureTarget, SnapshotError> {
        if let Some(selector) = self.config.selector.as_deref() {
            return Ok(CaptureTarget::parse(selector));
        }
        self.target
            .lock()
            .unwrap()
            .clone()
            .ok_or(SnapshotError::TargetNotFound)
    }
}

fn write_download(url: &str, path: &Path) -> Result<(), SnapshotError> {
    let bytes = store::resolve(url).ok_or_else(|| SnapshotError::Released {
        url: url.to_string(),
    })?;
    std::fs::write(path, bytes.as_slice()).map_err(|source| SnapshotError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn default_save_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}
