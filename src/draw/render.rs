//! Cairo-based rendering of the editor scene.
//!
//! All drawing happens in logical canvas coordinates (1920×1080). The live
//! preview scales the context to the device surface first; the export path
//! draws onto a surface of exactly the logical size.

use super::annotation::{Annotation, AnnotationKind, IconKind};
use super::color::{self, Color};
use super::font::FontDescriptor;
use super::icons::IconCache;
use super::scene::Scene;
use super::text::{LABEL_PADDING, layout_label};
use crate::config::Config;
use crate::util::{CANVAS_HEIGHT, CANVAS_WIDTH, Rect};
use std::f64::consts::PI;

/// Corner radius of the label plate.
const LABEL_CORNER_RADIUS: f64 = 10.0;
/// Border width of the label plate.
const LABEL_BORDER_WIDTH: f64 = 2.0;
/// Gap between an annotation and its selection outline.
const SELECTION_MARGIN: f64 = 6.0;

/// Visual settings shared by preview and export.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub background: Color,
    /// Fill applied outside the square guide region
    pub guide_dim: Color,
    pub guide_border: Color,
    /// Dash length of the guide border
    pub guide_dash: f64,
    pub font: FontDescriptor,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background: color::CANVAS_BACKGROUND,
            guide_dim: color::BLACK.with_alpha(0.45),
            guide_border: color::WHITE.with_alpha(0.9),
            guide_dash: 14.0,
            font: FontDescriptor::default(),
        }
    }
}

impl From<&Config> for RenderStyle {
    fn from(config: &Config) -> Self {
        Self {
            background: Color::from_rgba(config.canvas.background_color),
            guide_dim: color::BLACK.with_alpha(config.canvas.guide_dim_alpha),
            guide_border: Color::from_rgba(config.canvas.guide_border_color),
            guide_dash: config.canvas.guide_dash_length,
            font: config.annotations.font(),
        }
    }
}

/// Per-frame switches that differ between preview and export.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions<'a> {
    /// Draw the square crop guide (editing only)
    pub show_guide: bool,
    /// Outline this annotation as selected (editing only)
    pub selected: Option<&'a str>,
}

impl<'a> RenderOptions<'a> {
    pub fn preview(selected: Option<&'a str>) -> Self {
        Self {
            show_guide: true,
            selected,
        }
    }

    /// Export output: no guide, no selection outline.
    pub fn export() -> Self {
        Self::default()
    }
}

/// Renders the scene onto a device surface of arbitrary size.
///
/// The logical canvas is stretched to `surface_width × surface_height`, so
/// stored coordinates never depend on the display resolution.
pub fn render_preview(
    ctx: &cairo::Context,
    surface_width: f64,
    surface_height: f64,
    scene: &Scene<'_>,
    style: &RenderStyle,
    options: RenderOptions<'_>,
) {
    if surface_width <= 0.0 || surface_height <= 0.0 {
        return;
    }
    ctx.save().ok();
    ctx.scale(surface_width / CANVAS_WIDTH, surface_height / CANVAS_HEIGHT);
    render_scene(ctx, scene, style, options);
    ctx.restore().ok();
}

/// Renders the full scene in logical coordinates.
///
/// Order: background, transformed base image, optional guide, annotations
/// bottom to top, optional selection outline.
pub fn render_scene(
    ctx: &cairo::Context,
    scene: &Scene<'_>,
    style: &RenderStyle,
    options: RenderOptions<'_>,
) {
    render_background(ctx, style.background);

    if let Some(image) = scene.image {
        match image.to_surface() {
            Ok(surface) => render_base_image(ctx, &surface, scene.state.transform),
            Err(err) => log::warn!("Skipping base image: {err}"),
        }
    }

    if options.show_guide {
        render_guide(ctx, style);
    }

    for annotation in scene.state.annotations.all() {
        render_annotation(ctx, annotation, scene.icons, &style.font);
    }

    if let Some(id) = options.selected
        && let Some(annotation) = scene.state.annotations.find(id)
    {
        render_selection_outline(ctx, annotation, &style.font);
    }
}

/// Clears the canvas and fills it with a solid color.
pub fn render_background(ctx: &cairo::Context, background: Color) {
    ctx.save().ok();
    ctx.set_operator(cairo::Operator::Source);
    background.apply(ctx);
    let _ = ctx.paint();
    ctx.restore().ok();
}

fn render_base_image(
    ctx: &cairo::Context,
    surface: &cairo::ImageSurface,
    transform: super::transform::Transform,
) {
    ctx.save().ok();
    ctx.translate(transform.x, transform.y);
    ctx.scale(transform.scale, transform.scale);
    if ctx.set_source_surface(surface, 0.0, 0.0).is_ok() {
        ctx.source().set_filter(cairo::Filter::Good);
        let _ = ctx.paint();
    }
    ctx.restore().ok();
}

/// Square region (side = shorter canvas edge) centred on the canvas.
pub fn guide_rect() -> Rect {
    let side = CANVAS_WIDTH.min(CANVAS_HEIGHT);
    Rect {
        x: (CANVAS_WIDTH - side) / 2.0,
        y: (CANVAS_HEIGHT - side) / 2.0,
        width: side,
        height: side,
    }
}

/// Darkens everything outside the square guide and dashes its edge.
pub fn render_guide(ctx: &cairo::Context, style: &RenderStyle) {
    let guide = guide_rect();
    ctx.save().ok();

    ctx.set_fill_rule(cairo::FillRule::EvenOdd);
    ctx.rectangle(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT);
    ctx.rectangle(guide.x, guide.y, guide.width, guide.height);
    style.guide_dim.apply(ctx);
    let _ = ctx.fill();

    style.guide_border.apply(ctx);
    ctx.set_line_width(3.0);
    ctx.set_dash(&[style.guide_dash, style.guide_dash], 0.0);
    ctx.rectangle(guide.x, guide.y, guide.width, guide.height);
    let _ = ctx.stroke();

    ctx.restore().ok();
}

/// Renders a single annotation. Blank labels and missing icons draw nothing.
pub fn render_annotation(
    ctx: &cairo::Context,
    annotation: &Annotation,
    icons: &IconCache,
    font: &FontDescriptor,
) {
    match &annotation.kind {
        AnnotationKind::Icon {
            tool,
            size,
            rotation,
        } => render_icon(ctx, icons, *tool, annotation, *size, *rotation),
        AnnotationKind::Text { content, size } => {
            render_label(ctx, annotation.position.x, annotation.position.y, content, *size, font)
        }
    }
}

fn render_icon(
    ctx: &cairo::Context,
    icons: &IconCache,
    tool: IconKind,
    annotation: &Annotation,
    size: f64,
    rotation: f64,
) {
    let Some(image) = icons.get(tool) else {
        log::trace!("Icon '{}' unavailable; skipping {}", tool, annotation.id);
        return;
    };
    let surface = match image.to_surface() {
        Ok(surface) => surface,
        Err(err) => {
            log::debug!("Icon '{}' surface failed: {}", tool, err);
            return;
        }
    };
    let (width, height) = image.size();

    ctx.save().ok();
    ctx.translate(annotation.position.x, annotation.position.y);
    ctx.rotate(rotation.to_radians());
    ctx.scale(size / width, size / height);
    if ctx
        .set_source_surface(&surface, -width / 2.0, -height / 2.0)
        .is_ok()
    {
        ctx.source().set_filter(cairo::Filter::Good);
        let _ = ctx.paint();
    }
    ctx.restore().ok();
}

/// Renders a wrapped label top-left anchored at (x, y) over a rounded plate.
pub fn render_label(
    ctx: &cairo::Context,
    x: f64,
    y: f64,
    content: &str,
    size: f64,
    font: &FontDescriptor,
) {
    let Some(label) = layout_label(content, size, font) else {
        return;
    };

    ctx.save().ok();
    ctx.set_antialias(cairo::Antialias::Best);

    rounded_rect(ctx, x, y, label.width, label.height, LABEL_CORNER_RADIUS);
    color::LABEL_BACKGROUND.apply(ctx);
    let _ = ctx.fill_preserve();
    color::LABEL_BORDER.apply(ctx);
    ctx.set_line_width(LABEL_BORDER_WIDTH);
    let _ = ctx.stroke();

    let layout = pangocairo::functions::create_layout(ctx);
    layout.set_font_description(Some(&font.to_pango(size)));
    color::LABEL_TEXT.apply(ctx);

    for (index, line) in label.lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        layout.set_text(line);
        let line_top = y + LABEL_PADDING + index as f64 * label.line_height;
        // Centre the glyph box inside the line slot
        let glyph_height = layout.size().1 as f64 / pango::SCALE as f64;
        ctx.move_to(
            x + LABEL_PADDING,
            line_top + (label.line_height - glyph_height) / 2.0,
        );
        pangocairo::functions::show_layout(ctx, &layout);
    }

    ctx.restore().ok();
}

fn render_selection_outline(ctx: &cairo::Context, annotation: &Annotation, font: &FontDescriptor) {
    let Some(bounds) = annotation
        .hit_bounds(font)
        .map(|rect| rect.inflate(SELECTION_MARGIN))
    else {
        return;
    };

    ctx.save().ok();
    color::SELECTION_OUTLINE.apply(ctx);
    ctx.set_line_width(3.0);
    ctx.set_dash(&[10.0, 6.0], 0.0);
    ctx.rectangle(bounds.x, bounds.y, bounds.width, bounds.height);
    let _ = ctx.stroke();
    ctx.restore().ok();
}

fn rounded_rect(ctx: &cairo::Context, x: f64, y: f64, width: f64, height: f64, radius: f64) {
    let r = radius.min(width / 2.0).min(height / 2.0);
    ctx.new_sub_path();
    ctx.arc(x + width - r, y + r, r, -PI / 2.0, 0.0);
    ctx.arc(x + width - r, y + height - r, r, 0.0, PI / 2.0);
    ctx.arc(x + r, y + height - r, r, PI / 2.0, PI);
    ctx.arc(x + r, y + r, r, PI, 3.0 * PI / 2.0);
    ctx.close_path();
}
