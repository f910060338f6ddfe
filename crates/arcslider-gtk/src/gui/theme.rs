use crate::config::{ColorSettings, HexColor};
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::{Srgba, WithAlpha};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderColors {
    pub track: Srgba<f64>,
    pub progress: Srgba<f64>,
    pub handle: Srgba<f64>,
}

impl Default for SliderColors {
    fn default() -> Self {
        Self {
            track: Srgba::new(0.0, 0.478, 1.0, 1.0),
            progress: Srgba::new(0.204, 0.78, 0.349, 1.0),
            handle: Srgba::new(0.0, 0.0, 0.0, 1.0),
        }
    }
}

impl SliderColors {
    /// Colors set in the config win. The rest keep the defaults unless the settings opt
    /// into the theme, in which case they come from the theme's named colors.
    pub fn from_context(context: &gtk::StyleContext, settings: &ColorSettings) -> Self {
        Self::resolve_with(settings, |name| Self::lookup_color(context, name))
    }

    /// Without a widget there is no theme to ask, as when rendering to a file.
    pub fn from_settings(settings: &ColorSettings) -> Self {
        Self::resolve_with(settings, |_| None)
    }

    fn resolve_with(
        settings: &ColorSettings,
        lookup: impl Fn(&str) -> Option<Srgba<f64>>,
    ) -> Self {
        let fallback = Self::default();
        let pick = |configured: Option<HexColor>, name: &str, default: Srgba<f64>| {
            configured
                .map(to_srgba)
                .or_else(|| settings.follow_theme.then(|| lookup(name)).flatten())
                .unwrap_or(default)
        };
        Self {
            track: pick(settings.track, "accent_bg_color", fallback.track),
            progress: pick(settings.progress, "success_color", fallback.progress),
            handle: pick(settings.handle, "theme_fg_color", fallback.handle),
        }
    }

    fn lookup_color(context: &gtk::StyleContext, name: &str) -> Option<Srgba<f64>> {
        context.lookup_color(name).map(|c| {
            Srgba::new(
                c.red() as f64,
                c.green() as f64,
                c.blue() as f64,
                c.alpha() as f64,
            )
        })
    }
}

fn to_srgba(color: HexColor) -> Srgba<f64> {
    color.rgb().into_format::<f64>().with_alpha(1.0)
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.arcslider {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
