use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_STEP: f64 = 0.0;
pub const DEFAULT_SWEEP_DEGREES: f64 = 360.0;
pub const DEFAULT_OUTER_DIAMETER: f64 = 300.0;
pub const DEFAULT_LINE_WIDTH: f64 = 50.0;

/// Closed interval `lower..=upper` the slider value lives in.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ValueRange {
    pub lower: f64,
    pub upper: f64,
}

impl ValueRange {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn span(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Unlike `f64::clamp` this never panics, even for an inverted range.
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.lower).min(self.upper)
    }
}

impl From<std::ops::RangeInclusive<f64>> for ValueRange {
    fn from(range: std::ops::RangeInclusive<f64>) -> Self {
        Self::new(*range.start(), *range.end())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SliderConfig {
    pub range: ValueRange,
    /// Quantization step; `0` means continuous.
    #[serde(default)]
    pub step: f64,
    #[serde(default = "default_sweep_degrees")]
    pub sweep_degrees: f64,
    #[serde(default = "default_outer_diameter")]
    pub outer_diameter: f64,
    #[serde(default = "default_line_width")]
    pub line_width: f64,
    #[serde(default)]
    pub dashed: bool,
}

fn default_sweep_degrees() -> f64 {
    DEFAULT_SWEEP_DEGREES
}

fn default_outer_diameter() -> f64 {
    DEFAULT_OUTER_DIAMETER
}

fn default_line_width() -> f64 {
    DEFAULT_LINE_WIDTH
}

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("value {value} lies outside {lower}..={upper}")]
    ValueOutOfRange { value: f64, lower: f64, upper: f64 },
    #[error("step {step} must lie within 0..={span}")]
    InvalidStep { step: f64, span: f64 },
    #[error("outer diameter {0} must be positive")]
    NonPositiveDiameter(f64),
    #[error("line width {line_width} must be smaller than outer diameter {outer_diameter}")]
    LineWiderThanDiameter { line_width: f64, outer_diameter: f64 },
    #[error("line width {0} must be positive")]
    NonPositiveLineWidth(f64),
    #[error("sweep of {0} degrees must lie within (0, 360]")]
    InvalidSweep(f64),
}

impl SliderConfig {
    pub fn new(range: impl Into<ValueRange>) -> Self {
        Self {
            range: range.into(),
            step: DEFAULT_STEP,
            sweep_degrees: DEFAULT_SWEEP_DEGREES,
            outer_diameter: DEFAULT_OUTER_DIAMETER,
            line_width: DEFAULT_LINE_WIDTH,
            dashed: false,
        }
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn with_sweep_degrees(mut self, sweep_degrees: f64) -> Self {
        self.sweep_degrees = sweep_degrees;
        self
    }

    pub fn with_outer_diameter(mut self, outer_diameter: f64) -> Self {
        self.outer_diameter = outer_diameter;
        self
    }

    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = line_width;
        self
    }

    pub fn with_dashed(mut self, dashed: bool) -> Self {
        self.dashed = dashed;
        self
    }

    /// Distance from the circle center to the middle of the stroked band.
    pub fn mid_radius(&self) -> f64 {
        (self.outer_diameter - self.line_width) / 2.0
    }

    /// Checks every condition the slider needs before it can be drawn with `value`.
    ///
    /// Conditions are written in their positive form so a NaN anywhere fails.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self, value: f64) -> Result<(), ConfigError> {
        let range = self.range;
        if !range.contains(value) {
            return Err(ConfigError::ValueOutOfRange {
                value,
                lower: range.lower,
                upper: range.upper,
            });
        }

        let span = range.span();
        if !(self.step >= 0.0 && self.step <= span) {
            return Err(ConfigError::InvalidStep {
                step: self.step,
                span,
            });
        }

        if !(self.outer_diameter > 0.0) {
            return Err(ConfigError::NonPositiveDiameter(self.outer_diameter));
        }

        if !(self.outer_diameter > self.line_width) {
            return Err(ConfigError::LineWiderThanDiameter {
                line_width: self.line_width,
                outer_diameter: self.outer_diameter,
            });
        }

        if !(self.line_width > 0.0) {
            return Err(ConfigError::NonPositiveLineWidth(self.line_width));
        }

        if !(self.sweep_degrees > 0.0 && self.sweep_degrees <= 360.0) {
            return Err(ConfigError::InvalidSweep(self.sweep_degrees));
        }

        Ok(())
    }

    /// The slider draws nothing at all when this is false.
    pub fn is_renderable(&self, value: f64) -> bool {
        self.validate(value).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> SliderConfig {
        SliderConfig::new(0.0..=100.0)
    }

    #[test]
    fn test_defaults_match_widget_defaults() {
        let config = base();
        assert_eq!(config.step, 0.0);
        assert_eq!(config.sweep_degrees, 360.0);
        assert_eq!(config.outer_diameter, 300.0);
        assert_eq!(config.line_width, 50.0);
        assert!(!config.dashed);
        assert_eq!(config.mid_radius(), 125.0);
    }

    #[test]
    fn test_valid_config_is_renderable() {
        assert!(base().is_renderable(0.0));
        assert!(base().is_renderable(100.0));
        assert!(base().with_step(100.0).is_renderable(50.0));
        assert!(base().with_sweep_degrees(360.0).is_renderable(50.0));
    }

    #[test]
    fn test_each_violation_is_reported() {
        let cases = vec![
            (
                base(),
                101.0,
                ConfigError::ValueOutOfRange {
                    value: 101.0,
                    lower: 0.0,
                    upper: 100.0,
                },
            ),
            (
                base().with_step(-1.0),
                10.0,
                ConfigError::InvalidStep {
                    step: -1.0,
                    span: 100.0,
                },
            ),
            (
                base().with_step(150.0),
                10.0,
                ConfigError::InvalidStep {
                    step: 150.0,
                    span: 100.0,
                },
            ),
            (
                base().with_outer_diameter(0.0).with_line_width(-5.0),
                10.0,
                ConfigError::NonPositiveDiameter(0.0),
            ),
            (
                base().with_line_width(300.0),
                10.0,
                ConfigError::LineWiderThanDiameter {
                    line_width: 300.0,
                    outer_diameter: 300.0,
                },
            ),
            (
                base().with_line_width(0.0),
                10.0,
                ConfigError::NonPositiveLineWidth(0.0),
            ),
            (
                base().with_sweep_degrees(0.0),
                10.0,
                ConfigError::InvalidSweep(0.0),
            ),
            (
                base().with_sweep_degrees(360.5),
                10.0,
                ConfigError::InvalidSweep(360.5),
            ),
        ];

        for (config, value, expected) in cases {
            assert_eq!(config.validate(value), Err(expected));
            assert!(!config.is_renderable(value));
        }
    }

    #[test]
    fn test_nan_is_never_renderable() {
        assert!(!base().is_renderable(f64::NAN));
        assert!(!base().with_step(f64::NAN).is_renderable(1.0));
        assert!(!base().with_sweep_degrees(f64::NAN).is_renderable(1.0));
        assert!(!base().with_line_width(f64::NAN).is_renderable(1.0));
    }

    #[test]
    fn test_inverted_range_rejects_every_value() {
        let config = SliderConfig::new(ValueRange::new(10.0, 0.0));
        assert!(!config.is_renderable(5.0));
        assert!(!config.is_renderable(10.0));
    }

    #[test]
    fn test_clamp_handles_inverted_range() {
        assert_eq!(ValueRange::new(0.0, 10.0).clamp(12.0), 10.0);
        assert_eq!(ValueRange::new(0.0, 10.0).clamp(-3.0), 0.0);
        assert_eq!(ValueRange::new(10.0, 0.0).clamp(5.0), 0.0);
    }

    #[test]
    fn test_deserialization_fills_defaults() {
        let json = r#"{ "range": { "lower": -50.0, "upper": 50.0 }, "step": 5.0 }"#;
        let config: SliderConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.range, ValueRange::new(-50.0, 50.0));
        assert_eq!(config.step, 5.0);
        assert_eq!(config.sweep_degrees, DEFAULT_SWEEP_DEGREES);
        assert_eq!(config.outer_diameter, DEFAULT_OUTER_DIAMETER);
        assert_eq!(config.line_width, DEFAULT_LINE_WIDTH);
        assert!(!config.dashed);
    }
}
