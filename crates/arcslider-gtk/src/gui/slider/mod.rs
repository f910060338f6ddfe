use crate::config::ColorSettings;
use crate::gui::theme::SliderColors;
use arcslider_core::{
    ArcSlider, DEFAULT_TRANSITION, DragState, Point, SharedValue, SliderConfig, Transition,
    ValueBinding,
};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

pub mod view;

pub use view::draw;

/// Number of wedges the track gradient is painted in.
pub const GRADIENT_STEPS: usize = 64;

type SharedSlider = Rc<RefCell<ArcSlider<SharedValue>>>;

pub struct ArcSliderInit {
    /// The value the slider reads and writes; the host keeps a clone.
    pub value: SharedValue,
    pub config: SliderConfig,
    pub colors: ColorSettings,
    pub on_value_change_ended: Option<Box<dyn FnMut()>>,
}

#[derive(Debug)]
pub enum ArcSliderMsg {
    DragBegin,
    /// Pointer position in widget coordinates.
    DragMove(Point),
    DragEnd,
    /// The host changed the bound value itself.
    Refresh,
    Reconfigure {
        config: SliderConfig,
        colors: ColorSettings,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArcSliderOutput {
    Changed(f64),
    ValueChangeEnded,
}

pub struct ArcSliderWidget {
    slider: SharedSlider,
    colors: Rc<RefCell<ColorSettings>>,
    transition: Rc<RefCell<Transition>>,
    ticking: Rc<Cell<bool>>,
    area: gtk::DrawingArea,
}

fn now() -> Duration {
    Duration::from_micros(glib::monotonic_time().max(0) as u64)
}

fn offset_from_center(area: &gtk::DrawingArea, x: f64, y: f64) -> Point {
    Point::new(
        x - area.width() as f64 / 2.0,
        y - area.height() as f64 / 2.0,
    )
}

#[relm4::component(pub)]
impl SimpleComponent for ArcSliderWidget {
    type Init = ArcSliderInit;
    type Input = ArcSliderMsg;
    type Output = ArcSliderOutput;

    view! {
        #[root]
        gtk::DrawingArea {
            add_css_class: "arcslider",
            set_halign: gtk::Align::Center,
            set_valign: gtk::Align::Center,
            #[watch]
            set_content_width: model.size(),
            #[watch]
            set_content_height: model.size(),
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let ArcSliderInit {
            value,
            config,
            colors,
            mut on_value_change_ended,
        } = init;

        let output = sender.clone();
        let slider = ArcSlider::new(value.clone(), config).on_value_change_ended(move || {
            if let Some(callback) = on_value_change_ended.as_mut() {
                callback();
            }
            let _ = output.output(ArcSliderOutput::ValueChangeEnded);
        });

        if let Err(e) = slider.validate() {
            log::warn!("Arc slider hidden: {}", e);
        }

        let model = ArcSliderWidget {
            slider: Rc::new(RefCell::new(slider)),
            colors: Rc::new(RefCell::new(colors)),
            transition: Rc::new(RefCell::new(
                Transition::settled(value.get()).with_duration(DEFAULT_TRANSITION),
            )),
            ticking: Rc::new(Cell::new(false)),
            area: root.clone(),
        };

        let widgets = view_output!();

        model.install_draw_func();
        model.install_drag_gesture(&sender);

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            ArcSliderMsg::DragBegin => self.slider.borrow_mut().drag_began(),
            ArcSliderMsg::DragMove(point) => {
                let offset = offset_from_center(&self.area, point.x, point.y);
                let mut slider = self.slider.borrow_mut();
                let outcome = slider.drag_changed(offset);
                let tracking = slider.drag_state() == DragState::Dragging;
                drop(slider);
                if let Some(value) = outcome.value() {
                    self.animate_to(value, tracking);
                    let _ = sender.output(ArcSliderOutput::Changed(value));
                }
            }
            ArcSliderMsg::DragEnd => self.slider.borrow_mut().drag_ended(),
            ArcSliderMsg::Refresh => {
                let slider = self.slider.borrow();
                if let Err(e) = slider.validate() {
                    log::warn!("Arc slider hidden: {}", e);
                }
                let value = slider.value();
                drop(slider);
                self.animate_to(value, false);
            }
            ArcSliderMsg::Reconfigure { config, colors } => {
                let mut slider = self.slider.borrow_mut();
                slider.set_config(config);
                if let Err(e) = slider.validate() {
                    log::warn!("Arc slider hidden: {}", e);
                }
                let value = slider.value();
                drop(slider);

                *self.colors.borrow_mut() = colors;
                self.transition.borrow_mut().settle(value);
                self.area.queue_draw();
            }
        }
    }
}

impl ArcSliderWidget {
    fn size(&self) -> i32 {
        self.slider.borrow().config().outer_diameter.ceil().max(0.0) as i32
    }

    fn install_draw_func(&self) {
        let slider = self.slider.clone();
        let colors = self.colors.clone();
        let transition = self.transition.clone();

        self.area.set_draw_func(move |area, cr, width, height| {
            let slider = slider.borrow();
            let displayed = transition.borrow().sample(now());
            let Some(geometry) = slider.geometry_at(displayed) else {
                return;
            };
            let center = Point::new(width as f64 / 2.0, height as f64 / 2.0);
            let colors = SliderColors::from_context(&area.style_context(), &colors.borrow());

            if let Err(e) = view::draw(cr, center, &geometry, &colors) {
                log::error!("Drawing error: {}", e);
            }
        });
    }

    /// Drags only start on the handle, presses anywhere else are left to other widgets.
    fn install_drag_gesture(&self, sender: &ComponentSender<Self>) {
        let drag = gtk::GestureDrag::new();

        {
            let slider = self.slider.clone();
            let transition = self.transition.clone();
            let area = self.area.downgrade();
            let sender = sender.clone();
            drag.connect_drag_begin(move |gesture, x, y| {
                let Some(area) = area.upgrade() else {
                    return;
                };
                let offset = offset_from_center(&area, x, y);
                // hit test against the handle as drawn, which may still be easing
                let displayed = transition.borrow().sample(now());
                let on_handle = slider
                    .borrow()
                    .geometry_at(displayed)
                    .is_some_and(|g| g.handle_contains(offset));

                if on_handle {
                    gesture.set_state(gtk::EventSequenceState::Claimed);
                    sender.input(ArcSliderMsg::DragBegin);
                } else {
                    gesture.set_state(gtk::EventSequenceState::Denied);
                }
            });
        }

        {
            let sender = sender.clone();
            drag.connect_drag_update(move |gesture, dx, dy| {
                if let Some((x, y)) = gesture.start_point() {
                    sender.input(ArcSliderMsg::DragMove(Point::new(x + dx, y + dy)));
                }
            });
        }

        {
            let sender = sender.clone();
            drag.connect_drag_end(move |_, _, _| {
                sender.input(ArcSliderMsg::DragEnd);
            });
        }

        self.area.add_controller(drag);
    }

    /// While `tracking` the handle follows the pointer directly; otherwise it eases over.
    fn animate_to(&self, value: f64, tracking: bool) {
        self.transition.borrow_mut().follow(value, now(), tracking);
        if self.ticking.replace(true) {
            return;
        }

        let transition = self.transition.clone();
        let ticking = self.ticking.clone();
        self.area.add_tick_callback(move |area, _| {
            area.queue_draw();
            if transition.borrow().is_finished(now()) {
                ticking.set(false);
                glib::ControlFlow::Break
            } else {
                glib::ControlFlow::Continue
            }
        });
    }
}
