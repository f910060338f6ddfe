use crate::binding::ValueBinding;
use crate::config::{ConfigError, SliderConfig};
use crate::drag::{DragInterpreter, DragOutcome, DragState};
use crate::geometry::{Geometry, Point};

type ChangeEnded = Box<dyn FnMut()>;

/// A slider instance: its configuration, the host's value binding, and the drag state.
pub struct ArcSlider<B> {
    config: SliderConfig,
    binding: B,
    drag: DragInterpreter,
    on_value_change_ended: Option<ChangeEnded>,
}

impl<B: ValueBinding> ArcSlider<B> {
    pub fn new(binding: B, config: SliderConfig) -> Self {
        Self {
            config,
            binding,
            drag: DragInterpreter::new(),
            on_value_change_ended: None,
        }
    }

    /// Called once each time a drag gesture finishes.
    pub fn on_value_change_ended(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_value_change_ended = Some(Box::new(callback));
        self
    }

    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    /// Replaces the configuration. A drag in progress is dropped without completing.
    pub fn set_config(&mut self, config: SliderConfig) {
        self.config = config;
        self.drag = DragInterpreter::new();
    }

    pub fn value(&self) -> f64 {
        self.binding.get()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.config.validate(self.value())
    }

    pub fn is_renderable(&self) -> bool {
        self.validate().is_ok()
    }

    /// `None` means nothing should be drawn.
    pub fn geometry(&self) -> Option<Geometry> {
        self.is_renderable()
            .then(|| Geometry::project(&self.config, self.value()))
    }

    /// Geometry for a displayed value that lags behind the bound one, e.g. mid-transition.
    /// Renderability is still judged on the bound value.
    pub fn geometry_at(&self, displayed: f64) -> Option<Geometry> {
        self.is_renderable()
            .then(|| Geometry::project(&self.config, displayed))
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    pub fn drag_began(&mut self) {
        if self.is_renderable() {
            self.drag.begin();
        }
    }

    /// Feeds a pointer position, as an offset from the slider center, into the drag.
    pub fn drag_changed(&mut self, offset: Point) -> DragOutcome {
        if !self.is_renderable() {
            return DragOutcome::Ignored;
        }
        self.drag.update(&self.config, &mut self.binding, offset)
    }

    pub fn drag_ended(&mut self) {
        if self.drag.end()
            && let Some(callback) = self.on_value_change_ended.as_mut()
        {
            callback();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::SharedValue;
    use std::cell::Cell;
    use std::rc::Rc;

    fn config() -> SliderConfig {
        SliderConfig::new(0.0..=100.0)
            .with_step(10.0)
            .with_sweep_degrees(270.0)
    }

    fn offset_for(progress: f64) -> Point {
        let theta = (270.0 * progress - 180.0_f64).to_radians();
        Point::new(120.0 * theta.cos(), 120.0 * theta.sin())
    }

    fn counter() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
        let count = Rc::new(Cell::new(0));
        let inner = count.clone();
        (count, move || inner.set(inner.get() + 1))
    }

    #[test]
    fn test_drag_writes_through_shared_value() {
        let host = SharedValue::new(40.0);
        let mut slider = ArcSlider::new(host.clone(), config());

        let outcome = slider.drag_changed(offset_for(0.42));
        assert_eq!(outcome, DragOutcome::Moved(40.0));
        let outcome = slider.drag_changed(offset_for(0.47));
        assert_eq!(outcome, DragOutcome::Moved(50.0));
        assert_eq!(host.get(), 50.0);
        assert_eq!(slider.drag_state(), DragState::Dragging);
    }

    #[test]
    fn test_completion_fires_once_per_drag() {
        let (count, callback) = counter();
        let mut slider = ArcSlider::new(40.0, config()).on_value_change_ended(callback);

        slider.drag_ended();
        assert_eq!(count.get(), 0);

        slider.drag_changed(offset_for(0.45));
        slider.drag_changed(offset_for(0.5));
        slider.drag_ended();
        slider.drag_ended();
        assert_eq!(count.get(), 1);

        slider.drag_began();
        slider.drag_ended();
        assert_eq!(count.get(), 2);
        assert_eq!(slider.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_drag_end_does_not_touch_value() {
        let mut slider = ArcSlider::new(40.0, config());
        slider.drag_changed(offset_for(0.58));
        let before = slider.value();
        slider.drag_ended();
        assert_eq!(slider.value(), before);
    }

    #[test]
    fn test_unrenderable_slider_ignores_drags() {
        let (count, callback) = counter();
        let mut slider =
            ArcSlider::new(40.0, config().with_line_width(400.0)).on_value_change_ended(callback);

        assert!(slider.geometry().is_none());
        assert_eq!(slider.drag_changed(offset_for(0.45)), DragOutcome::Ignored);
        slider.drag_began();
        slider.drag_ended();
        assert_eq!(slider.value(), 40.0);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_set_config_resets_drag_without_completion() {
        let (count, callback) = counter();
        let mut slider = ArcSlider::new(40.0, config()).on_value_change_ended(callback);

        slider.drag_changed(offset_for(0.45));
        slider.set_config(config().with_dashed(true));
        slider.drag_ended();
        assert_eq!(count.get(), 0);
        assert!(slider.config().dashed);
    }

    #[test]
    fn test_geometry_follows_value() {
        let slider = ArcSlider::new(100.0, config());
        let geometry = slider.geometry().unwrap();
        assert_eq!(geometry.progress, 1.0);
        assert_eq!(*geometry.handle_rotation, 90.0);
    }

    #[test]
    fn test_hit_test_uses_displayed_value() {
        let slider = ArcSlider::new(100.0, config());
        let drawn = slider.geometry_at(0.0).unwrap();
        assert_eq!(drawn.progress, 0.0);

        let visible_handle = drawn.handle_center();
        assert!(drawn.handle_contains(visible_handle));
        assert!(!slider.geometry().unwrap().handle_contains(visible_handle));
    }

    #[test]
    fn test_geometry_at_needs_renderable_slider() {
        let slider = ArcSlider::new(140.0, config());
        assert!(slider.geometry_at(50.0).is_none());
    }

    #[test]
    fn test_empty_range_draws_handle_at_start() {
        let slider = ArcSlider::new(3.0, SliderConfig::new(3.0..=3.0));
        let geometry = slider.geometry().unwrap();
        assert_eq!(geometry.progress, 0.0);
        assert_eq!(*geometry.handle_rotation, -180.0);
    }
}
