//! Image leaves: decoding and the handle carried by image actions.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbaImage;

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::geometry::Size;

/// A decoded image, shared between every action list that references it.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageHandle {
    pub path: PathBuf,
    pub pixels: Arc<RgbaImage>,
}

impl ImageHandle {
    /// Wrap already-decoded pixels.
    pub fn new(path: impl Into<PathBuf>, pixels: RgbaImage) -> Self {
        Self { path: path.into(), pixels: Arc::new(pixels) }
    }

    /// Intrinsic size: one layout unit per pixel.
    pub fn size(&self) -> Size {
        Size::new(self.pixels.width() as f32, self.pixels.height() as f32)
    }

    /// Color of the pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.pixels.width() || y >= self.pixels.height() {
            return None;
        }
        let [r, g, b, a] = self.pixels.get_pixel(x, y).0;
        Some(Rgba::from_rgba8(r, g, b, a))
    }
}

/// Image-decoding collaborator.
pub trait ImageLoader {
    /// Decode the image at `path`.
    fn load(&self, path: &Path) -> Result<ImageHandle>;
}

/// Decodes images from the filesystem with the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileImages;

impl ImageLoader for FileImages {
    fn load(&self, path: &Path) -> Result<ImageHandle> {
        let decoded = image::open(path).map_err(|source| Error::Resource {
            path: path.to_owned(),
            source,
        })?;
        log::debug!(
            "decoded {} ({}x{})",
            path.display(),
            decoded.width(),
            decoded.height()
        );
        Ok(ImageHandle::new(path, decoded.to_rgba8()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_png_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.png");
        RgbaImage::from_pixel(3, 2, image::Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let handle = FileImages.load(&path).unwrap();
        assert_eq!(handle.size(), Size::new(3.0, 2.0));
        assert_eq!(handle.pixel(0, 0), Some(Rgba::new(1.0, 0.0, 0.0, 1.0)));
        assert_eq!(handle.pixel(3, 0), None);
    }

    #[test]
    fn missing_file_is_resource_error() {
        let err = FileImages.load(Path::new("/nonexistent/icon.png")).unwrap_err();
        assert!(matches!(err, Error::Resource { .. }));
        assert!(err.to_string().starts_with("/nonexistent/icon.png"));
    }

    #[test]
    fn garbage_is_resource_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();
        assert!(matches!(FileImages.load(&path), Err(Error::Resource { .. })));
    }
}
