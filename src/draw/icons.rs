//! Icon artwork cache.
//!
//! Each [`IconKind`] maps to an entry that is either loaded, failed, or not
//! yet requested. The renderer consults the cache and silently skips icons
//! that are unavailable; the annotation itself stays in the model.

use super::annotation::IconKind;
use super::color::{self, Color};
use super::image::{ImageError, RasterImage};
use std::collections::HashMap;
use std::f64::consts::PI;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Pixel size of the built-in icon artwork.
const BUILTIN_ICON_SIZE: i32 = 256;

#[derive(Debug, Error)]
pub enum IconError {
    #[error("icon '{kind}' not found at {path}")]
    Missing { kind: IconKind, path: PathBuf },

    #[error("icon '{kind}' could not be loaded: {source}")]
    Image {
        kind: IconKind,
        #[source]
        source: ImageError,
    },
}

/// Something that can produce artwork for an icon kind.
pub trait IconSource {
    fn load(&self, kind: IconKind) -> Result<RasterImage, IconError>;
}

/// Loads `<kind>.png` files from a directory.
#[derive(Debug, Clone)]
pub struct DirectoryIconSource {
    dir: PathBuf,
}

impl DirectoryIconSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl IconSource for DirectoryIconSource {
    fn load(&self, kind: IconKind) -> Result<RasterImage, IconError> {
        let path = self.dir.join(format!("{}.png", kind.as_str()));
        if !path.exists() {
            return Err(IconError::Missing { kind, path });
        }
        RasterImage::load_path(&path).map_err(|source| IconError::Image { kind, source })
    }
}

/// Paints the default marker set with Cairo.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinIconSource;

impl IconSource for BuiltinIconSource {
    fn load(&self, kind: IconKind) -> Result<RasterImage, IconError> {
        paint_builtin(kind).map_err(|source| IconError::Image { kind, source })
    }
}

#[derive(Debug, Clone)]
enum IconEntry {
    Loaded(Arc<RasterImage>),
    Failed,
}

/// Lookup status of a single icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconStatus {
    NotRequested,
    Loaded,
    Failed,
}

/// Map from icon kind to loaded artwork. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct IconCache {
    entries: HashMap<IconKind, IconEntry>,
}

impl IconCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache populated with the built-in artwork for every kind.
    pub fn builtin() -> Self {
        let mut cache = Self::new();
        cache.load_all(&BuiltinIconSource, |_| {});
        cache
    }

    /// Icons from `directory` where present, built-in artwork for the rest.
    pub fn with_directory(directory: &Path) -> Self {
        let mut cache = Self::new();
        let mut found = 0usize;
        cache.load_all(&DirectoryIconSource::new(directory), |_| found += 1);
        let fallback = cache.retry_failed(&BuiltinIconSource);
        log::info!(
            "Loaded {} icon(s) from {}, {} built-in",
            found,
            directory.display(),
            fallback
        );
        cache
    }

    /// Loads (or reloads) one icon, recording failures instead of returning them.
    ///
    /// Returns `true` when the icon is now available.
    pub fn load(&mut self, source: &dyn IconSource, kind: IconKind) -> bool {
        match source.load(kind) {
            Ok(image) => {
                self.insert(kind, image);
                true
            }
            Err(err) => {
                log::warn!("{err}");
                self.mark_failed(kind);
                false
            }
        }
    }

    /// Loads every icon kind, calling `on_loaded` for each one that succeeds.
    pub fn load_all<F>(&mut self, source: &dyn IconSource, mut on_loaded: F)
    where
        F: FnMut(IconKind),
    {
        for kind in IconKind::ALL {
            if self.load(source, kind) {
                on_loaded(kind);
            }
        }
    }

    /// Retries icons that previously failed. Returns how many recovered.
    pub fn retry_failed(&mut self, source: &dyn IconSource) -> usize {
        let failed: Vec<IconKind> = self
            .entries
            .iter()
            .filter(|(_, entry)| matches!(entry, IconEntry::Failed))
            .map(|(kind, _)| *kind)
            .collect();
        failed
            .into_iter()
            .filter(|kind| self.load(source, *kind))
            .count()
    }

    pub fn insert(&mut self, kind: IconKind, image: RasterImage) {
        self.entries.insert(kind, IconEntry::Loaded(Arc::new(image)));
    }

    pub fn mark_failed(&mut self, kind: IconKind) {
        self.entries.insert(kind, IconEntry::Failed);
    }

    pub fn get(&self, kind: IconKind) -> Option<&RasterImage> {
        match self.entries.get(&kind) {
            Some(IconEntry::Loaded(image)) => Some(image),
            _ => None,
        }
    }

    pub fn status(&self, kind: IconKind) -> IconStatus {
        match self.entries.get(&kind) {
            None => IconStatus::NotRequested,
            Some(IconEntry::Loaded(_)) => IconStatus::Loaded,
            Some(IconEntry::Failed) => IconStatus::Failed,
        }
    }
}

// ============================================================================
// Built-in artwork
// ============================================================================

fn paint_builtin(kind: IconKind) -> Result<RasterImage, ImageError> {
    let surface =
        cairo::ImageSurface::create(cairo::Format::ARgb32, BUILTIN_ICON_SIZE, BUILTIN_ICON_SIZE)?;
    {
        let ctx = cairo::Context::new(&surface)?;
        ctx.set_antialias(cairo::Antialias::Best);
        ctx.set_line_join(cairo::LineJoin::Round);
        ctx.set_line_cap(cairo::LineCap::Round);
        // Artwork is authored on a 0..1 grid
        ctx.scale(BUILTIN_ICON_SIZE as f64, BUILTIN_ICON_SIZE as f64);

        match kind {
            IconKind::Arrow => paint_arrow(&ctx),
            IconKind::Circle => paint_circle(&ctx),
            IconKind::Crash => paint_crash(&ctx),
            IconKind::Warning => paint_warning(&ctx),
            IconKind::Injury => paint_injury(&ctx),
            IconKind::Cross => paint_cross(&ctx),
        }?;
    }
    RasterImage::from_surface(surface)
}

/// Fills the current path with `fill`, then strokes it with a white outline.
fn fill_outlined(ctx: &cairo::Context, fill: Color, outline: f64) -> Result<(), cairo::Error> {
    fill.apply(ctx);
    ctx.fill_preserve()?;
    color::WHITE.apply(ctx);
    ctx.set_line_width(outline);
    ctx.stroke()
}

fn paint_arrow(ctx: &cairo::Context) -> Result<(), cairo::Error> {
    // Points right; the annotation rotation turns it
    ctx.move_to(0.08, 0.40);
    ctx.line_to(0.56, 0.40);
    ctx.line_to(0.56, 0.22);
    ctx.line_to(0.92, 0.50);
    ctx.line_to(0.56, 0.78);
    ctx.line_to(0.56, 0.60);
    ctx.line_to(0.08, 0.60);
    ctx.close_path();
    fill_outlined(ctx, color::RED, 0.035)
}

fn paint_circle(ctx: &cairo::Context) -> Result<(), cairo::Error> {
    color::WHITE.apply(ctx);
    ctx.set_line_width(0.13);
    ctx.arc(0.5, 0.5, 0.40, 0.0, 2.0 * PI);
    ctx.stroke()?;
    color::RED.apply(ctx);
    ctx.set_line_width(0.08);
    ctx.arc(0.5, 0.5, 0.40, 0.0, 2.0 * PI);
    ctx.stroke()
}

fn paint_crash(ctx: &cairo::Context) -> Result<(), cairo::Error> {
    let spikes = 10;
    for i in 0..spikes * 2 {
        let radius = if i % 2 == 0 { 0.46 } else { 0.24 };
        let angle = i as f64 * PI / spikes as f64 - PI / 2.0;
        let (x, y) = (0.5 + radius * angle.cos(), 0.5 + radius * angle.sin());
        if i == 0 {
            ctx.move_to(x, y);
        } else {
            ctx.line_to(x, y);
        }
    }
    ctx.close_path();
    fill_outlined(ctx, color::AMBER, 0.03)?;

    ctx.arc(0.5, 0.5, 0.16, 0.0, 2.0 * PI);
    color::RED.apply(ctx);
    ctx.fill()
}

fn paint_warning(ctx: &cairo::Context) -> Result<(), cairo::Error> {
    ctx.move_to(0.5, 0.08);
    ctx.line_to(0.94, 0.88);
    ctx.line_to(0.06, 0.88);
    ctx.close_path();
    color::BLACK.apply(ctx);
    ctx.set_line_width(0.05);
    ctx.stroke_preserve()?;
    color::AMBER.apply(ctx);
    ctx.fill()?;

    color::BLACK.apply(ctx);
    ctx.rectangle(0.46, 0.34, 0.08, 0.30);
    ctx.fill()?;
    ctx.arc(0.5, 0.75, 0.05, 0.0, 2.0 * PI);
    ctx.fill()
}

fn paint_injury(ctx: &cairo::Context) -> Result<(), cairo::Error> {
    ctx.arc(0.5, 0.5, 0.44, 0.0, 2.0 * PI);
    color::WHITE.apply(ctx);
    ctx.fill_preserve()?;
    color::RED.apply(ctx);
    ctx.set_line_width(0.05);
    ctx.stroke()?;

    ctx.rectangle(0.40, 0.20, 0.20, 0.60);
    ctx.rectangle(0.20, 0.40, 0.60, 0.20);
    ctx.fill()
}

fn paint_cross(ctx: &cairo::Context) -> Result<(), cairo::Error> {
    for (width, fill) in [(0.22, color::WHITE), (0.14, color::RED)] {
        fill.apply(ctx);
        ctx.set_line_width(width);
        ctx.move_to(0.18, 0.18);
        ctx.line_to(0.82, 0.82);
        ctx.move_to(0.82, 0.18);
        ctx.line_to(0.18, 0.82);
        ctx.stroke()?;
    }
    Ok(())
}
