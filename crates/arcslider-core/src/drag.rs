use crate::binding::ValueBinding;
use crate::config::SliderConfig;
use crate::geometry::{progress, Point, ARC_ROTATION_DEGREES};
use strum::{Display, EnumIter};

/// Moves whose candidate lies at least this far (in progress) from the current value are
/// treated as jumps across the open end of the arc.
pub const JUMP_THRESHOLD: f64 = 0.5;
/// A jump starting above this progress pins the value to the upper bound.
pub const UPPER_SNAP_THRESHOLD: f64 = 0.9;
/// A jump starting below this progress pins the value to the lower bound.
pub const LOWER_SNAP_THRESHOLD: f64 = 0.1;

/// Pointer angle in degrees, in `(-180, 180]`, measured clockwise on screen.
pub fn pointer_angle(offset: Point) -> f64 {
    offset.y.atan2(offset.x).to_degrees()
}

/// Progress the pointer points at. Capped at 1 because an arc shorter than a full circle
/// leaves a gap the pointer can still be in; no lower cap is needed since the angle starts
/// at the arc origin.
pub fn candidate_progress(offset: Point, sweep_degrees: f64) -> f64 {
    ((pointer_angle(offset) + ARC_ROTATION_DEGREES) / sweep_degrees).min(1.0)
}

/// Rounds to the nearest multiple of `step`; a non-positive step leaves the value alone.
pub fn quantize(value: f64, step: f64) -> f64 {
    if step > 0.0 {
        (value / step).round() * step
    } else {
        value
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    Moved(f64),
    SnappedToUpper(f64),
    SnappedToLower(f64),
    Ignored,
}

impl DragOutcome {
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Moved(v) | Self::SnappedToUpper(v) | Self::SnappedToLower(v) => Some(*v),
            Self::Ignored => None,
        }
    }
}

/// Decides what a move towards `candidate` does, given the value before the move.
pub fn interpret_progress(config: &SliderConfig, current_value: f64, candidate: f64) -> DragOutcome {
    let range = config.range;
    let current = progress(&range, current_value);

    if (current - candidate).abs() < JUMP_THRESHOLD {
        let raw = range.lower + range.span() * candidate;
        DragOutcome::Moved(range.clamp(quantize(raw, config.step)))
    } else if current > UPPER_SNAP_THRESHOLD {
        DragOutcome::SnappedToUpper(range.upper)
    } else if current < LOWER_SNAP_THRESHOLD {
        DragOutcome::SnappedToLower(range.lower)
    } else {
        DragOutcome::Ignored
    }
}

pub fn interpret_drag(config: &SliderConfig, current_value: f64, offset: Point) -> DragOutcome {
    interpret_progress(
        config,
        current_value,
        candidate_progress(offset, config.sweep_degrees),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

#[derive(Debug, Default)]
pub struct DragInterpreter {
    state: DragState,
}

impl DragInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == DragState::Dragging
    }

    pub fn begin(&mut self) {
        self.transition(DragState::Dragging);
    }

    /// Applies one pointer move. The first move of a gesture also starts the drag.
    pub fn update(
        &mut self,
        config: &SliderConfig,
        binding: &mut impl ValueBinding,
        offset: Point,
    ) -> DragOutcome {
        self.begin();

        let outcome = interpret_drag(config, binding.get(), offset);
        match outcome {
            DragOutcome::Moved(v) => binding.set(v),
            DragOutcome::SnappedToUpper(v) | DragOutcome::SnappedToLower(v) => {
                log::debug!("drag jumped across the arc gap, snapping to {}", v);
                binding.set(v);
            }
            DragOutcome::Ignored => {}
        }
        outcome
    }

    /// Returns true when this completed a drag, i.e. the completion should be announced.
    pub fn end(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.transition(DragState::Idle);
        was_dragging
    }

    fn transition(&mut self, next: DragState) {
        if self.state != next {
            log::debug!("drag {} -> {}", self.state, next);
            self.state = next;
        }
    }
}
