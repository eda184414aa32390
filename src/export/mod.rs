//! Flattening the composition into the saved artifacts.
//!
//! Export renders the same scene as the live preview, minus the guide and
//! selection outline, onto an off-screen surface of exactly the logical
//! canvas size, then encodes it as PNG. The slow part runs on tokio's
//! blocking pool; dropping the future discards the result.

pub mod file;
pub mod types;

pub use file::{OutputConfig, save_artifacts};
pub use types::{ExportArtifacts, ExportError, ExportJob, SavedArtifacts};

use crate::draw::{RenderOptions, RenderStyle, Scene, render_scene};
use crate::session;
use crate::util::{CANVAS_HEIGHT, CANVAS_WIDTH};
use tokio::task;

/// Renders the scene for export onto a new 1920×1080 surface.
pub fn render_export_surface(
    scene: &Scene<'_>,
    style: &RenderStyle,
) -> Result<cairo::ImageSurface, ExportError> {
    let surface = cairo::ImageSurface::create(
        cairo::Format::ARgb32,
        CANVAS_WIDTH as i32,
        CANVAS_HEIGHT as i32,
    )?;
    {
        let ctx = cairo::Context::new(&surface)?;
        render_scene(&ctx, scene, style, RenderOptions::export());
    }
    surface.flush();
    Ok(surface)
}

/// Renders and PNG-encodes the composition.
pub fn export_png(scene: &Scene<'_>, style: &RenderStyle) -> Result<Vec<u8>, ExportError> {
    let surface = render_export_surface(scene, style)?;
    let mut png = Vec::new();
    surface.write_to_png(&mut png)?;
    log::info!(
        "Exported {} annotation(s) as {} byte PNG",
        scene.state.annotations.len(),
        png.len()
    );
    Ok(png)
}

/// Produces both save outputs synchronously.
pub fn export_artifacts(
    scene: &Scene<'_>,
    style: &RenderStyle,
) -> Result<ExportArtifacts, ExportError> {
    let png = export_png(scene, style)?;
    let state_json = session::serialize(scene.state)?;
    Ok(ExportArtifacts { png, state_json })
}

impl ExportJob {
    pub fn run(&self) -> Result<ExportArtifacts, ExportError> {
        let scene = Scene::new(&self.state, self.image.as_ref(), &self.icons);
        export_artifacts(&scene, &self.style)
    }
}

/// Runs an export on the blocking pool.
///
/// The editor may keep running while this is awaited. Cancelling is simply
/// dropping the future: the job owns all of its inputs and writes nothing.
pub async fn export_png_async(job: ExportJob) -> Result<ExportArtifacts, ExportError> {
    task::spawn_blocking(move || job.run())
        .await
        .map_err(|e| ExportError::Task(e.to_string()))?
}
