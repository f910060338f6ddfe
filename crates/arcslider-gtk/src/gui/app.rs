use crate::config::{self, Settings};
use crate::events::AppEvent;
use crate::gui::slider::{ArcSliderInit, ArcSliderMsg, ArcSliderOutput, ArcSliderWidget};
use crate::gui::theme;
use arcslider_core::{SharedValue, ValueBinding};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::path::PathBuf;

pub struct AppModel {
    pub value: SharedValue,
    pub settings: Settings,
    pub settings_path: PathBuf,
    pub completed_drags: u32,
    pub slider: Controller<ArcSliderWidget>,
}

#[derive(Debug)]
pub enum AppMsg {
    ValueChanged(f64),
    ValueChangeEnded,
    Reset,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    fn status(&self) -> String {
        format!(
            "Value: {:.2}    Drags: {}",
            self.value.get(),
            self.completed_drags
        )
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Settings, PathBuf, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some("Arc Slider"),
            set_default_size: (420, 480),

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::r {
                        sender.input(AppMsg::Reset);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 12,
                set_margin_all: 24,

                #[local_ref]
                slider_widget -> gtk::DrawingArea {
                    set_vexpand: true,
                },

                gtk::Label {
                    #[watch]
                    set_label: &model.status(),
                },

                gtk::Button {
                    set_label: "Reset",
                    connect_clicked => AppMsg::Reset,
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (settings, settings_path, rx) = init;

        theme::load_css();

        let value = SharedValue::new(settings.value);
        let slider = ArcSliderWidget::builder()
            .launch(ArcSliderInit {
                value: value.clone(),
                config: settings.slider,
                colors: settings.colors,
                on_value_change_ended: Some(Box::new(|| log::debug!("Drag finished"))),
            })
            .forward(sender.input_sender(), |output| match output {
                ArcSliderOutput::Changed(v) => AppMsg::ValueChanged(v),
                ArcSliderOutput::ValueChangeEnded => AppMsg::ValueChangeEnded,
            });

        let model = AppModel {
            value,
            settings,
            settings_path,
            completed_drags: 0,
            slider,
        };

        let slider_widget = model.slider.widget();
        let widgets = view_output!();

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::ValueChanged(v) => log::trace!("Value changed to {}", v),
            AppMsg::ValueChangeEnded => {
                self.completed_drags += 1;
                log::info!("Value settled at {}", self.value.get());
            }
            AppMsg::Reset => {
                self.value.set(self.settings.value);
                self.slider.emit(ArcSliderMsg::Refresh);
            }
            AppMsg::ConfigReload => match config::load_settings(&self.settings_path) {
                Ok(new_settings) => {
                    self.settings = new_settings;
                    self.slider.emit(ArcSliderMsg::Reconfigure {
                        config: new_settings.slider,
                        colors: new_settings.colors,
                    });
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}
