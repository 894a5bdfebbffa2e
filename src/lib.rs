//! snapgrab — capture a window or screen region as a PNG snapshot.
//!
//! Wires together:
//! - Capture domain (capture/): the snapshot operations and the renderer seam
//! - Data-URL codec (data_url.rs): the encoded hand-off format between renderer and capture
//! - Published-snapshot store (store.rs): locators for captured payloads
//!
//! ```rust,no_run
//! use snapgrab::{CaptureTarget, SnapshotConfig, Snapshotter};
//!
//! # async fn demo() -> Result<(), snapgrab::SnapshotError> {
//! let snapper = Snapshotter::new(SnapshotConfig::default());
//! snapper.bind(CaptureTarget::PrimaryMonitor);
//!
//! let snapshot = snapper.capture().await?;
//! println!("published {} ({} bytes)", snapshot.url, snapshot.png_bytes.len());
//! snapper.release(Some(&snapshot.url));
//!
//! snapper.save(None).await?; // writes image.png to the download directory
//! # Ok(())
//! # }
//! ```

pub mod capture;
pub mod data_url;
pub mod store;

pub use capture::{
    BusyFlag, CaptureTarget, ComposeError, RenderError, RenderOptions, Renderer, Snapshot,
    SnapshotConfig, SnapshotError, Snapshotter, XcapRenderer, DEFAULT_FILENAME,
};
