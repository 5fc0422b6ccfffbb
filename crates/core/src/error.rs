//! Error types for the electric-border core.
//!
//! The engine itself never fails: geometry is clamped, zero-size hosts are
//! "not ready" and a missing drawing surface renders nothing. Errors only
//! surface at the configuration edges (colors, presets, snapshots).

use thiserror::Error;

/// Errors produced while configuring or exporting a border.
#[derive(Debug, Error)]
pub enum BorderError {
    /// Width or height was zero or not representable for a backing store.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A style description was not a JSON object.
    #[error("invalid style: {0}")]
    InvalidStyle(String),

    /// A style preset name was not recognized.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// A snapshot or other output could not be written.
    #[error("i/o error: {0}")]
    Io(String),
}
