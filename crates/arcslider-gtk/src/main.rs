use arcslider_core::{ArcSlider, Point};
use arcslider_gtk::config::{self, Settings};
use arcslider_gtk::gui::app::AppModel;
use arcslider_gtk::gui::slider;
use arcslider_gtk::gui::theme::SliderColors;
use arcslider_gtk::sys::runtime;
use clap::Parser;
use relm4::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "arcslider-demo", version, about, long_about = None)]
struct Cli {
    /// Read settings from this file instead of the per-user config
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Write the default config file (if missing) and print its path
    #[arg(long)]
    write_default_config: bool,

    /// Render the slider at its initial value to a PNG file instead of opening a window
    #[arg(long, value_name = "FILE")]
    snapshot: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.write_default_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let config_path = match cli.config {
        Some(path) => path,
        None => config::get_config_path()?,
    };
    let settings = config::load_or_default(&config_path);

    if let Some(target) = cli.snapshot {
        return write_snapshot(&settings, &target);
    }

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx, config_path.clone());

    let app = RelmApp::new("org.arcslider.demo").with_args(Vec::new());

    app.run::<AppModel>((settings, config_path, rx));
    Ok(())
}

fn write_snapshot(settings: &Settings, target: &Path) -> anyhow::Result<()> {
    let slider = ArcSlider::new(settings.value, settings.slider);
    if let Err(e) = slider.validate() {
        anyhow::bail!("Nothing to render: {}", e);
    }
    let Some(geometry) = slider.geometry() else {
        anyhow::bail!("Nothing to render");
    };

    let size = settings.slider.outer_diameter.ceil() as i32;
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, size, size)?;
    {
        let cr = cairo::Context::new(&surface)?;
        let center = Point::new(size as f64 / 2.0, size as f64 / 2.0);
        slider::draw(
            &cr,
            center,
            &geometry,
            &SliderColors::from_settings(&settings.colors),
        )?;
    }

    let mut file = fs_err::File::create(target)?;
    surface.write_to_png(&mut file)?;
    log::info!("Snapshot written to {}", target.display());
    Ok(())
}
