use crate::config::{SliderConfig, ValueRange};
use derive_more::{Deref, Display, From, Into};

/// Both arcs are turned by this much so the visual zero sits at the left of the circle.
pub const ARC_ROTATION_DEGREES: f64 = 180.0;
/// Share of each step segment covered by a dash; the rest is gap.
pub const DASH_FACTOR: f64 = 0.9;

/// An offset from the slider's center, in widget units (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Display, Deref, From, Into)]
#[display("{_0}°")]
pub struct Degrees(f64);

impl Degrees {
    pub fn new(degrees: f64) -> Self {
        Self(degrees)
    }

    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }
}

/// Fraction of the range covered by `value`, not clamped.
///
/// An empty range (`lower == upper`) reports zero instead of NaN.
pub fn progress(range: &ValueRange, value: f64) -> f64 {
    let span = range.span();
    if span == 0.0 {
        0.0
    } else {
        (value - range.lower) / span
    }
}

/// Rotation of the handle; the only place progress is clamped to `[0, 1]`.
pub fn handle_rotation(sweep_degrees: f64, progress: f64) -> Degrees {
    Degrees(sweep_degrees * progress.clamp(0.0, 1.0) - ARC_ROTATION_DEGREES)
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashPattern {
    /// `[dash, gap]` lengths along the arc, or empty for a solid stroke.
    pub segments: Vec<f64>,
    /// Offset into the pattern; half a dash centers the first dash on the arc start.
    pub phase: f64,
}

impl DashPattern {
    pub fn for_config(config: &SliderConfig) -> Self {
        let span = config.range.span();
        let segment_degrees = if config.step > 0.0 {
            config.sweep_degrees * config.step / span
        } else {
            config.sweep_degrees
        };
        let segment_length = segment_degrees.to_radians() * config.mid_radius();
        let dash = segment_length * DASH_FACTOR;
        let gap = segment_length * (1.0 - DASH_FACTOR);

        let segments = if config.dashed && config.step > 0.0 {
            vec![dash, gap]
        } else {
            Vec::new()
        };

        Self {
            segments,
            phase: dash / 2.0,
        }
    }

    pub fn is_solid(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Everything a renderer needs for one frame, derived from a config and a value.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub progress: f64,
    pub track_sweep: Degrees,
    pub progress_sweep: Degrees,
    pub handle_rotation: Degrees,
    pub dash: DashPattern,
    pub mid_radius: f64,
    pub line_width: f64,
}

impl Geometry {
    pub fn project(config: &SliderConfig, value: f64) -> Self {
        let progress = progress(&config.range, value);
        Self {
            progress,
            track_sweep: Degrees(config.sweep_degrees),
            progress_sweep: Degrees(config.sweep_degrees * progress),
            handle_rotation: handle_rotation(config.sweep_degrees, progress),
            dash: DashPattern::for_config(config),
            mid_radius: config.mid_radius(),
            line_width: config.line_width,
        }
    }

    /// Arcs start here, in screen degrees (clockwise, zero pointing right).
    pub fn start_angle(&self) -> Degrees {
        Degrees(ARC_ROTATION_DEGREES)
    }

    pub fn handle_radius(&self) -> f64 {
        self.line_width / 2.0
    }

    pub fn handle_center(&self) -> Point {
        let theta = self.handle_rotation.to_radians();
        Point::new(self.mid_radius * theta.cos(), self.mid_radius * theta.sin())
    }

    pub fn handle_contains(&self, offset: Point) -> bool {
        self.handle_center().distance_to(offset) <= self.handle_radius()
    }
}
