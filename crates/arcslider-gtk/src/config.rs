use arcslider_core::SliderConfig;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use palette::Srgb;
use palette::rgb::FromHexError;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// An opaque color written as `#rrggbb` (or `#rgb`) in the config file.
#[derive(Debug, Clone, Copy, PartialEq, DeserializeFromStr, SerializeDisplay)]
pub struct HexColor(Srgb<u8>);

impl HexColor {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    pub fn rgb(&self) -> Srgb<u8> {
        self.0
    }
}

impl FromStr for HexColor {
    type Err = FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::from_str(s.trim()).map(Self)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}",
            self.0.red, self.0.green, self.0.blue
        )
    }
}

/// Per-part color overrides; unset parts keep the blue/green/black defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct ColorSettings {
    pub track: Option<HexColor>,
    pub progress: Option<HexColor>,
    pub handle: Option<HexColor>,
    /// Take unset parts from the GTK theme instead of the defaults.
    #[serde(default)]
    pub follow_theme: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "default_slider")]
    pub slider: SliderConfig,
    /// Value the demo starts with.
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub colors: ColorSettings,
}

fn default_slider() -> SliderConfig {
    SliderConfig::new(0.0..=100.0)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            slider: default_slider(),
            value: 0.0,
            colors: ColorSettings::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, SettingsError> {
    let proj_dirs = ProjectDirs::from("org", "arcslider", "arcslider")
        .ok_or(SettingsError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("ARCSLIDER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default(path: &Path) -> Settings {
    match load_settings(path) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Using default settings, {} could not be loaded: {}", path.display(), e);
            Settings::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>, config_path: PathBuf) {
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", SettingsError::from(e));
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_toml(source: &str) -> Settings {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_hex_color_deserialization() {
        let cases = vec![
            ("\"#007aff\"", HexColor::new(0x00, 0x7a, 0xff)),
            ("\"007AFF\"", HexColor::new(0x00, 0x7a, 0xff)),
            ("\"#fff\"", HexColor::new(0xff, 0xff, 0xff)),
            ("\" #000000 \"", HexColor::new(0, 0, 0)),
        ];

        for (json, expected) in cases {
            let deserialized: HexColor = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_hex_color_rejects_garbage() {
        assert!(serde_json::from_str::<HexColor>("\"blue\"").is_err());
        assert!("#12345".parse::<HexColor>().is_err());
    }

    #[test]
    fn test_hex_color_serializes_as_hex() {
        let json = serde_json::to_string(&HexColor::new(0x34, 0xc7, 0x59)).unwrap();
        assert_eq!(json, "\"#34c759\"");
    }

    #[test]
    fn test_default_config_parses() {
        let settings = parse_toml(DEFAULT_CONFIG);
        assert_eq!(settings.slider.range.lower, 0.0);
        assert_eq!(settings.slider.range.upper, 100.0);
        assert_eq!(settings.slider.step, 10.0);
        assert_eq!(settings.slider.sweep_degrees, 270.0);
        assert!(settings.slider.dashed);
        assert_eq!(settings.value, 40.0);
        assert_eq!(settings.colors.track, Some(HexColor::new(0x00, 0x7a, 0xff)));
        assert!(settings.slider.is_renderable(settings.value));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let settings = parse_toml("value = 12.5\n");
        assert_eq!(settings.value, 12.5);
        assert_eq!(settings.slider, default_slider());
        assert_eq!(settings.colors, ColorSettings::default());
    }

    #[test]
    fn test_partial_slider_section() {
        let settings = parse_toml(
            "[slider]\nrange = { lower = -1.0, upper = 1.0 }\nsweep_degrees = 180.0\n",
        );
        assert_eq!(settings.slider.range.lower, -1.0);
        assert_eq!(settings.slider.sweep_degrees, 180.0);
        assert_eq!(settings.slider.line_width, 50.0);
        assert_eq!(settings.colors.handle, None);
        assert!(!settings.colors.follow_theme);
    }

    #[test]
    fn test_follow_theme_is_opt_in() {
        let settings = parse_toml("[colors]\nfollow_theme = true\n");
        assert!(settings.colors.follow_theme);
        assert!(!Settings::default().colors.follow_theme);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let settings = load_or_default(Path::new("/nonexistent/arcslider/config.toml"));
        assert_eq!(settings.slider, default_slider());
    }
}
