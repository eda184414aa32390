//! Decoded raster images (base photographs and icon artwork).
//!
//! Pixels are kept in Cairo's native ARGB32 layout in an owned buffer so a
//! [`RasterImage`] can be cloned into export jobs running on other threads.
//! A Cairo surface is only created at draw time.

use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Errors raised while resolving or decoding an image.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("failed to read image {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("unsupported image reference '{0}' (expected a file path or file:// URL)")]
    UnsupportedReference(String),

    #[error("image dimensions {0}x{1} are not drawable")]
    InvalidDimensions(u32, u32),

    #[error("cairo error: {0}")]
    Cairo(#[from] cairo::Error),
}

/// Premultiplied ARGB32 pixel buffer.
#[derive(Clone, PartialEq)]
pub struct RasterImage {
    width: i32,
    height: i32,
    stride: i32,
    data: Vec<u8>,
}

impl std::fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl RasterImage {
    /// Loads an image from a host-supplied reference.
    ///
    /// Accepts plain filesystem paths and `file://` URLs. Remote URLs must be
    /// fetched by the host and passed in through [`RasterImage::from_bytes`].
    pub fn load(reference: &str) -> Result<Self, ImageError> {
        Self::load_path(&resolve_reference(reference)?)
    }

    /// Reads and decodes an image file.
    pub fn load_path(path: &Path) -> Result<Self, ImageError> {
        let bytes = std::fs::read(path).map_err(|source| ImageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let image = Self::from_bytes(&bytes)?;
        log::info!(
            "Loaded image {} ({}x{})",
            path.display(),
            image.width,
            image.height
        );
        Ok(image)
    }

    /// Decodes an encoded image (PNG, JPEG, WebP).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageError> {
        let decoded = image::load_from_memory(bytes)?;
        Self::from_rgba(&decoded.to_rgba8())
    }

    /// Converts straight-alpha RGBA pixels into premultiplied ARGB32.
    pub fn from_rgba(rgba: &image::RgbaImage) -> Result<Self, ImageError> {
        let (w, h) = rgba.dimensions();
        let width = i32::try_from(w).map_err(|_| ImageError::InvalidDimensions(w, h))?;
        let height = i32::try_from(h).map_err(|_| ImageError::InvalidDimensions(w, h))?;
        if width == 0 || height == 0 {
            return Err(ImageError::InvalidDimensions(w, h));
        }

        let stride = cairo::Format::ARgb32.stride_for_width(w)?;
        let mut data = vec![0u8; stride as usize * height as usize];

        for (y, row) in rgba.rows().enumerate() {
            let row_start = y * stride as usize;
            for (x, pixel) in row.enumerate() {
                let [r, g, b, a] = pixel.0;
                let premultiply = |c: u8| ((c as u32 * a as u32 + 127) / 255) as u8;
                let argb = u32::from_be_bytes([a, premultiply(r), premultiply(g), premultiply(b)]);
                let offset = row_start + x * 4;
                data[offset..offset + 4].copy_from_slice(&argb.to_ne_bytes());
            }
        }

        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    /// Copies the pixels out of a finished ARGB32 image surface.
    ///
    /// Every context drawing into the surface must be dropped first.
    pub fn from_surface(mut surface: cairo::ImageSurface) -> Result<Self, ImageError> {
        surface.flush();
        let width = surface.width();
        let height = surface.height();
        let stride = surface.stride();
        let data = surface
            .data()
            .map_err(|_| ImageError::Cairo(cairo::Error::SurfaceFinished))?
            .to_vec();
        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width as f64, self.height as f64)
    }

    /// Creates a Cairo surface over a copy of the pixels.
    pub fn to_surface(&self) -> Result<cairo::ImageSurface, cairo::Error> {
        cairo::ImageSurface::create_for_data(
            self.data.clone(),
            cairo::Format::ARgb32,
            self.width,
            self.height,
            self.stride,
        )
    }
}

/// Turns a path or `file://` URL into a filesystem path.
pub fn resolve_reference(reference: &str) -> Result<PathBuf, ImageError> {
    let trimmed = reference.trim();
    if trimmed.is_empty() {
        return Err(ImageError::UnsupportedReference(reference.to_string()));
    }

    match Url::parse(trimmed) {
        Ok(url) if url.scheme() == "file" => url
            .to_file_path()
            .map_err(|_| ImageError::UnsupportedReference(reference.to_string())),
        // Single-letter schemes are Windows drive letters, not URLs
        Ok(url) if url.scheme().len() > 1 => {
            Err(ImageError::UnsupportedReference(reference.to_string()))
        }
        _ => Ok(Path::new(trimmed).to_path_buf()),
    }
}
