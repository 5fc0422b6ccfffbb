#![deny(unsafe_code)]
//! Core of the electric-border effect: a noisy, animated outline drawn around
//! a rounded rectangle.
//!
//! Provides value/fractal noise (`noise_field`), arc-length contour sampling
//! (`contour`), the pure per-frame step (`frame`), the lifecycle controller
//! (`lifecycle`), and the host seams it drives: [`FrameScheduler`],
//! [`DrawSurface`] and [`Subscription`].

pub mod clock;
pub mod color;
pub mod contour;
pub mod error;
pub mod frame;
pub mod lifecycle;
pub mod noise_field;
pub mod params;
pub mod scheduler;
pub mod settings;
pub mod style;
pub mod surface;

pub use clock::AnimationClock;
pub use color::Srgba;
pub use contour::{GeometrySample, RoundedRect};
pub use error::BorderError;
pub use frame::{displaced_contour, sample_count, step_frame, Frame, FrameReport};
pub use lifecycle::{BorderController, LifecycleState};
pub use noise_field::{hash, value_noise_2d, FractalNoise, ValueNoise};
pub use scheduler::{FrameHandle, FrameScheduler, ManualScheduler, Subscription};
pub use settings::{BorderSettings, NoiseSettings, PerimeterEstimate, RenderSettings};
pub use style::BorderStyle;
pub use surface::{DrawSurface, StrokeStyle, SurfaceDimensions};
