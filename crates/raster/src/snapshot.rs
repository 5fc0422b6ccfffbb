//! PNG export of a [`RasterSurface`].
//!
//! This module is feature-gated behind `png` (default on) so that hosts that
//! only need the in-memory surface do not pull in the `image` crate.

use crate::surface::RasterSurface;
use electric_border_core::BorderError;
use std::path::Path;

/// Writes the surface's backing store as an RGBA PNG.
///
/// Returns `BorderError::InvalidDimensions` for an unconfigured (0x0)
/// surface, or `BorderError::Io` on write failure.
pub fn write_png(surface: &RasterSurface, path: &Path) -> Result<(), BorderError> {
    if surface.width() == 0 || surface.height() == 0 {
        return Err(BorderError::InvalidDimensions);
    }
    let img = image::RgbaImage::from_raw(
        surface.width(),
        surface.height(),
        surface.pixels().to_vec(),
    )
    .ok_or_else(|| BorderError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| BorderError::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use electric_border_core::{
        BorderController, BorderSettings, BorderStyle, DrawSurface, ManualScheduler,
        RenderSettings, SurfaceDimensions,
    };

    #[test]
    fn write_png_round_trip() {
        let mut c = BorderController::new(
            BorderStyle::default(),
            BorderSettings::default(),
            ManualScheduler::new(),
            Some(RasterSurface::new()),
        );
        c.on_resized(64.0, 32.0);
        c.on_visibility_changed(true);
        c.pump(16.0);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("border.png");
        write_png(c.surface().unwrap(), &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 184);
        assert_eq!(img.height(), 152);
        assert!(img.pixels().any(|p| p[3] > 0));
    }

    #[test]
    fn write_png_rejects_unconfigured_surface() {
        let dir = tempfile::tempdir().unwrap();
        let result = write_png(&RasterSurface::new(), &dir.path().join("empty.png"));
        assert!(matches!(result, Err(BorderError::InvalidDimensions)));
    }

    #[test]
    fn write_png_reports_io_failure() {
        let mut s = RasterSurface::new();
        s.configure(
            &SurfaceDimensions::from_host(4.0, 4.0, 1.0, &RenderSettings::default()).unwrap(),
        );
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.png");
        assert!(matches!(write_png(&s, &path), Err(BorderError::Io(_))));
    }
}
