#![deny(unsafe_code)]
//! CPU rendering target for the electric-border engine.
//!
//! [`RasterSurface`] implements the core `DrawSurface` trait over an RGBA8
//! buffer so the border can be rendered offline (CLI, tests) exactly as a
//! canvas host would draw it. With the `png` feature, [`snapshot::write_png`]
//! exports the buffer.

pub mod pixel;
pub mod surface;

#[cfg(feature = "png")]
pub mod snapshot;

pub use surface::RasterSurface;
