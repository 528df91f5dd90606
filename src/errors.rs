//! Error Types
//!
//! All public APIs that can fail return [`Result<T>`], an alias for
//! `std::result::Result<T, BackdropError>`.
//!
//! Initialization failures are reported to the caller exactly once as
//! [`BackdropError::ContextUnavailable`]; hosts are expected to fall back
//! to a static non-3D visual instead of retrying in a loop.

use thiserror::Error;

/// The main error type for the backdrop engine.
#[derive(Error, Debug)]
pub enum BackdropError {
    // ========================================================================
    // GPU & Rendering Errors
    // ========================================================================
    /// Failed to request a compatible GPU adapter.
    #[error("Failed to request WGPU adapter: {0}")]
    AdapterRequestFailed(String),

    /// Failed to create the GPU device.
    #[error("Failed to create WGPU device: {0}")]
    DeviceCreateFailed(#[from] wgpu::RequestDeviceError),

    /// Failed to create a surface for the drawing target.
    #[error("Failed to create surface: {0}")]
    SurfaceCreateFailed(#[from] wgpu::CreateSurfaceError),

    /// The surface exists but could not be configured for the adapter.
    #[error("Surface configuration failed: {0}")]
    SurfaceConfigFailed(String),

    /// No renderable context is available at all. Hosts receive this once
    /// and should degrade to a static visual.
    #[error("No renderable context available: {0}")]
    ContextUnavailable(String),

    // ========================================================================
    // Host / Windowing Errors
    // ========================================================================
    /// Event loop error (winit).
    #[error("Event loop error: {0}")]
    EventLoopError(#[from] winit::error::EventLoopError),

    /// Window creation error (winit).
    #[error("Window creation error: {0}")]
    WindowCreateFailed(#[from] winit::error::OsError),

    // ========================================================================
    // Per-frame Errors
    // ========================================================================
    /// A single frame failed to draw. Callers log this and keep looping;
    /// one bad frame must not kill the visual permanently.
    #[error("Frame draw failed: {0}")]
    DrawFailed(String),
}

/// Alias for `Result<T, BackdropError>`.
pub type Result<T> = std::result::Result<T, BackdropError>;
