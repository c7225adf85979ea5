//! Runtime configuration loaded from TOML.
//!
//! Every numeric field has a valid range. Out-of-range values are clamped
//! rather than rejected, so a config file can never put the prompter into
//! an unusable state.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{PrompterError, Result};

/// Scroll speed range in px/s. Authoritative for the engine, key bindings
/// and config clamping alike.
pub const SPEED_RANGE: RangeInclusive<f64> = 5.0..=2000.0;
pub const FONT_SIZE_RANGE: RangeInclusive<u16> = 8..=200;
pub const LINE_SPACING_RANGE: RangeInclusive<f32> = 1.0..=3.0;
pub const MARGIN_RANGE: RangeInclusive<u32> = 0..=300;
pub const TARGET_DURATION_RANGE: RangeInclusive<u32> = 10..=7200;
pub const FOCUS_BAND_RATIO_RANGE: RangeInclusive<f32> = 0.05..=0.5;
pub const COUNTDOWN_RANGE: RangeInclusive<u32> = 0..=10;
pub const MIN_WINDOW_WIDTH: u32 = 320;
pub const MIN_WINDOW_HEIGHT: u32 = 240;

/// Default file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "teleprompter.toml";

/// Top-level configuration (`teleprompter.toml`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PrompterConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub speed_px_s: f64,
    pub font_family: String,
    /// Explicit font file; overrides family lookup when set.
    pub font_path: Option<PathBuf>,
    pub font_size: u16,
    pub line_spacing: f32,
    pub margin_px: u32,
    pub target_duration_s: u32,
    pub theme: String,
    pub mirror: bool,
    pub focus_band: bool,
    pub focus_band_ratio: f32,
    pub countdown_s: u32,
}

impl Default for PrompterConfig {
    fn default() -> Self {
        Self {
            window_title: "Teleprompter".to_string(),
            window_width: 1100,
            window_height: 750,
            speed_px_s: 35.0,
            font_family: "Helvetica".to_string(),
            font_path: None,
            font_size: 50,
            line_spacing: 1.2,
            margin_px: 80,
            target_duration_s: 300,
            theme: "dark".to_string(),
            mirror: false,
            focus_band: true,
            focus_band_ratio: 0.2,
            countdown_s: 3,
        }
    }
}

impl PrompterConfig {
    /// Parse a TOML document and clamp every field into range.
    pub fn from_toml(text: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(text)?;
        Ok(cfg.clamped())
    }

    /// Load and clamp a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            PrompterError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml(&text)
    }

    /// Return a copy with every numeric field clamped into its valid range.
    pub fn clamped(mut self) -> Self {
        self.speed_px_s = clamp_speed(self.speed_px_s).unwrap_or(35.0);
        self.font_size = clamp(self.font_size, &FONT_SIZE_RANGE);
        self.line_spacing = if self.line_spacing.is_finite() {
            clamp(self.line_spacing, &LINE_SPACING_RANGE)
        } else {
            1.2
        };
        self.margin_px = clamp(self.margin_px, &MARGIN_RANGE);
        self.target_duration_s = clamp(self.target_duration_s, &TARGET_DURATION_RANGE);
        self.focus_band_ratio = if self.focus_band_ratio.is_finite() {
            clamp(self.focus_band_ratio, &FOCUS_BAND_RATIO_RANGE)
        } else {
            0.2
        };
        self.countdown_s = clamp(self.countdown_s, &COUNTDOWN_RANGE);
        self.window_width = self.window_width.max(MIN_WINDOW_WIDTH);
        self.window_height = self.window_height.max(MIN_WINDOW_HEIGHT);
        self
    }
}

/// Clamp a speed into [`SPEED_RANGE`]. Non-finite input yields `None`.
pub fn clamp_speed(px_per_sec: f64) -> Option<f64> {
    px_per_sec
        .is_finite()
        .then(|| px_per_sec.clamp(*SPEED_RANGE.start(), *SPEED_RANGE.end()))
}

/// Clamp `value` into an inclusive range.
pub fn clamp<T: PartialOrd + Copy>(value: T, range: &RangeInclusive<T>) -> T {
    if value < *range.start() {
        *range.start()
    } else if value > *range.end() {
        *range.end()
    } else {
        value
    }
}

/// Resolve the active configuration.
///
/// Resolution order:
/// 1. An explicit path (from `--config` or the environment); must exist.
/// 2. `./teleprompter.toml` if present.
/// 3. Built-in defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<PrompterConfig> {
    if let Some(path) = explicit {
        log::info!("Loading config from {}", path.display());
        return PrompterConfig::load(path);
    }

    let local = Path::new(DEFAULT_CONFIG_FILE);
    if local.is_file() {
        log::info!("Loading config from ./{DEFAULT_CONFIG_FILE}");
        return PrompterConfig::load(local);
    }

    log::debug!("No config file found -- using defaults");
    Ok(PrompterConfig::default())
}
