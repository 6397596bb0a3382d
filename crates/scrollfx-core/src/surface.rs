//! Imperative 2D raster target used by the ripple and wave fields.
//!
//! The fields never talk to a browser canvas directly. They issue calls on a
//! [`RasterSurface`]; the web host implements it over
//! `CanvasRenderingContext2d` and tests use the recording [`DrawList`].

use glam::Vec2;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A zero-area surface cannot be drawn to; the frame is skipped.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    /// Hue in degrees, saturation/lightness in percent, alpha in `[0, 1]`.
    Hsla { h: f32, s: f32, l: f32, a: f32 },
    /// Channels in `0..=255`, alpha in `[0, 1]`.
    Rgba { r: u8, g: u8, b: u8, a: f32 },
}

impl Color {
    pub const TRANSPARENT: Color = Color::Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 0.0,
    };

    pub const fn hsla(h: f32, s: f32, l: f32, a: f32) -> Self {
        Self::Hsla { h, s, l, a }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::Rgba { r, g, b, a }
    }

    pub fn alpha(&self) -> f32 {
        match *self {
            Self::Hsla { a, .. } | Self::Rgba { a, .. } => a,
        }
    }

    /// CSS color string accepted by canvas `fillStyle` and gradient stops.
    pub fn css(&self) -> String {
        match *self {
            Self::Hsla { h, s, l, a } => {
                format!("hsla({h:.1}, {s:.1}%, {l:.1}%, {:.4})", a.clamp(0.0, 1.0))
            }
            Self::Rgba { r, g, b, a } => {
                format!("rgba({r}, {g}, {b}, {:.4})", a.clamp(0.0, 1.0))
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Color,
}

impl ColorStop {
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Gradients in this crate carry at most five stops.
pub type Stops = SmallVec<[ColorStop; 5]>;

/// Two-circle radial gradient, as `createRadialGradient(x0, y0, r0, x1, y1, r1)`.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
    pub inner_center: Vec2,
    pub inner_radius: f32,
    pub outer_center: Vec2,
    pub outer_radius: f32,
    pub stops: Stops,
}

impl RadialGradient {
    pub fn concentric(center: Vec2, inner_radius: f32, outer_radius: f32, stops: Stops) -> Self {
        Self {
            inner_center: center,
            inner_radius,
            outer_center: center,
            outer_radius,
            stops,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    pub from: Vec2,
    pub to: Vec2,
    pub stops: Stops,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Color),
    Radial(RadialGradient),
    Linear(LinearGradient),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    #[default]
    SourceOver,
    Screen,
}

impl BlendMode {
    /// Value for `globalCompositeOperation`.
    pub fn css_name(self) -> &'static str {
        match self {
            Self::SourceOver => "source-over",
            Self::Screen => "screen",
        }
    }
}

pub trait RasterSurface {
    fn size(&self) -> SurfaceSize;
    fn clear(&mut self);
    fn set_blend(&mut self, mode: BlendMode);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, paint: &Paint);
    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint);
    /// Closed polygon; fewer than three points draws nothing.
    fn fill_polygon(&mut self, points: &[Vec2], paint: &Paint);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    Blend(BlendMode),
    StrokeCircle {
        center: Vec2,
        radius: f32,
        width: f32,
        paint: Paint,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        paint: Paint,
    },
    FillPolygon {
        points: Vec<Vec2>,
        paint: Paint,
    },
}

/// Surface that records every call. Used by tests and headless tooling.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    size: SurfaceSize,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    pub fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn count_clears(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Clear))
            .count()
    }

    /// Number of shapes drawn (strokes, fills and polygons).
    pub fn count_shapes(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    DrawCommand::StrokeCircle { .. }
                        | DrawCommand::FillCircle { .. }
                        | DrawCommand::FillPolygon { .. }
                )
            })
            .count()
    }
}

impl RasterSurface for DrawList {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn set_blend(&mut self, mode: BlendMode) {
        self.commands.push(DrawCommand::Blend(mode));
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, paint: &Paint) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            width,
            paint: paint.clone(),
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            paint: paint.clone(),
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2], paint: &Paint) {
        if points.len() < 3 {
            return;
        }
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            paint: paint.clone(),
        });
    }
}
