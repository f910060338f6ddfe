//! Value, geometry and drag logic for a circular arc slider.
//!
//! The slider shows a track arc, a progress arc and a handle around a circle. This crate holds
//! everything that is not drawing: validating a [`SliderConfig`], projecting a value into
//! [`Geometry`] for the renderer, and turning pointer positions into new values through the
//! [`DragInterpreter`]. Hosts own the value and expose it through a [`ValueBinding`].

pub mod binding;
pub mod config;
pub mod drag;
pub mod geometry;
pub mod slider;
pub mod transition;

pub use binding::{Binding, SharedValue, ValueBinding};
pub use config::{ConfigError, SliderConfig, ValueRange};
pub use drag::{DragInterpreter, DragOutcome, DragState};
pub use geometry::{DashPattern, Degrees, Geometry, Point};
pub use slider::ArcSlider;
pub use transition::{DEFAULT_TRANSITION, Transition};
