//! RGBA color type and the editor's palette constants.

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use incident_sketch::draw::Color;
/// let red = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
/// let dimmed = red.with_alpha(0.5);
/// assert_eq!(dimmed.a, 0.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Builds a color from a config-style `[r, g, b, a]` array, clamping each component.
    pub fn from_rgba(rgba: [f64; 4]) -> Self {
        Self {
            r: rgba[0].clamp(0.0, 1.0),
            g: rgba[1].clamp(0.0, 1.0),
            b: rgba[2].clamp(0.0, 1.0),
            a: rgba[3].clamp(0.0, 1.0),
        }
    }

    /// Returns the same color with a different alpha.
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Sets this color as the context's current source.
    pub fn apply(&self, ctx: &cairo::Context) {
        ctx.set_source_rgba(self.r, self.g, self.b, self.a);
    }
}

// ============================================================================
// Editor palette
// ============================================================================

/// Canvas fill behind the base photograph.
pub const CANVAS_BACKGROUND: Color = Color::new(0.11, 0.12, 0.13, 1.0);

/// Label text color.
pub const LABEL_TEXT: Color = Color::new(0.97, 0.97, 0.97, 1.0);

/// Semi-transparent dark plate behind label text.
pub const LABEL_BACKGROUND: Color = Color::new(0.0, 0.0, 0.0, 0.65);

/// Light border around the label plate.
pub const LABEL_BORDER: Color = Color::new(1.0, 1.0, 1.0, 0.85);

/// Dashed outline drawn around the current selection in the preview.
pub const SELECTION_OUTLINE: Color = Color::new(0.24, 0.62, 1.0, 0.95);

/// Predefined white color (R=1.0, G=1.0, B=1.0)
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// Predefined black color (R=0.0, G=0.0, B=0.0)
pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

/// Predefined red color, used by the crash and injury markers.
pub const RED: Color = Color::new(0.86, 0.12, 0.12, 1.0);

/// Predefined amber color, used by the warning marker.
pub const AMBER: Color = Color::new(1.0, 0.76, 0.03, 1.0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rgba_clamps_components() {
        let color = Color::from_rgba([1.5, -0.2, 0.5, 2.0]);
        assert_eq!(color, Color::new(1.0, 0.0, 0.5, 1.0));
    }
}
