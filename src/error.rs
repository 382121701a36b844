//! Error types for setup and persistence
//!
//! The simulation itself cannot fail; these cover the collaborators built
//! around it at start-up.

use thiserror::Error;

/// Failure while building the window, surface or GPU device
#[derive(Debug, Error)]
pub enum PlatformError {
    /// No browser window (not running in a page)
    #[error("no window")]
    NoWindow,

    /// Window has no document
    #[error("no document")]
    NoDocument,

    /// Canvas element missing or of the wrong type
    #[error("canvas not found: #{0}")]
    NoCanvas(String),

    /// Surface creation failed
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    /// No adapter compatible with the surface
    #[error("adapter error: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    /// Device request rejected
    #[error("device error: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    /// Surface reports no usable format
    #[error("surface is incompatible with the adapter")]
    IncompatibleSurface,

    /// Logger already installed or could not be set
    #[error("logger error: {0}")]
    Logger(String),
}

/// Failure while loading or saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Settings file could not be read or written
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings JSON malformed
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Browser storage unavailable or rejected the write
    #[error("storage error: {0}")]
    Storage(String),
}
