//! The teleprompter view model.
//!
//! Owns the script text, the display settings, the current layout and the
//! scroll engine, and keeps them consistent: every change that invalidates
//! layout recomputes it and re-clamps the engine.

use prompter_types::backend::{FontSpec, TextMetrics};
use prompter_types::config::{
    FONT_SIZE_RANGE, LINE_SPACING_RANGE, MARGIN_RANGE, PrompterConfig, clamp,
};

use crate::engine::{ScrollEngine, ScrollEvent};
use crate::layout::{DocumentLayout, LayoutParams};
use crate::theme::Theme;

/// Opacity of the focus band overlay (about 15%).
pub const FOCUS_BAND_ALPHA: u8 = 38;

/// Presentation settings threaded into layout and rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySettings {
    pub font_family: String,
    pub font_size: u16,
    pub line_spacing: f32,
    pub margin_px: u32,
    pub theme: Theme,
    pub mirror: bool,
    pub focus_band: bool,
    pub focus_band_ratio: f32,
}

impl DisplaySettings {
    pub fn from_config(cfg: &PrompterConfig) -> Self {
        Self {
            font_family: cfg.font_family.clone(),
            font_size: cfg.font_size,
            line_spacing: cfg.line_spacing,
            margin_px: cfg.margin_px,
            theme: Theme::from_config(&cfg.theme),
            mirror: cfg.mirror,
            focus_band: cfg.focus_band,
            focus_band_ratio: cfg.focus_band_ratio,
        }
    }

    pub fn font(&self) -> FontSpec {
        FontSpec::new(self.font_family.clone(), self.font_size)
    }
}

/// Script, layout and scroll state for one window.
#[derive(Debug, Clone)]
pub struct Teleprompter {
    settings: DisplaySettings,
    text: String,
    layout: DocumentLayout,
    engine: ScrollEngine,
    viewport: (u32, u32),
    target_duration_s: u32,
}

impl Teleprompter {
    /// Build a view model for `text` in a `viewport` sized window. The
    /// engine starts paused at the top.
    pub fn new(
        cfg: &PrompterConfig,
        text: &str,
        viewport: (u32, u32),
        metrics: &dyn TextMetrics,
    ) -> Self {
        let mut prompter = Self {
            settings: DisplaySettings::from_config(cfg),
            text: String::new(),
            layout: DocumentLayout::default(),
            engine: ScrollEngine::new(cfg.speed_px_s),
            viewport,
            target_duration_s: cfg.target_duration_s,
        };
        prompter.set_text(text, metrics);
        prompter
    }

    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn layout(&self) -> &DocumentLayout {
        &self.layout
    }

    pub fn engine(&self) -> &ScrollEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ScrollEngine {
        &mut self.engine
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Replace the script. Layout is recomputed and the engine is paused
    /// at the top.
    pub fn set_text(&mut self, text: &str, metrics: &dyn TextMetrics) {
        self.text = text.to_string();
        self.engine.pause();
        self.relayout(metrics);
        self.engine.clear_at_bottom();
        self.engine.to_top();
    }

    pub fn set_font_size(&mut self, size: u16, metrics: &dyn TextMetrics) {
        let size = clamp(size, &FONT_SIZE_RANGE);
        if size == self.settings.font_size {
            return;
        }
        self.settings.font_size = size;
        self.relayout(metrics);
    }

    pub fn adjust_font_size(&mut self, delta: i16, metrics: &dyn TextMetrics) {
        let size = (i32::from(self.settings.font_size) + i32::from(delta))
            .clamp(i32::from(u16::MIN), i32::from(u16::MAX)) as u16;
        self.set_font_size(size, metrics);
    }

    pub fn set_line_spacing(&mut self, spacing: f32, metrics: &dyn TextMetrics) {
        if !spacing.is_finite() {
            return;
        }
        self.settings.line_spacing = clamp(spacing, &LINE_SPACING_RANGE);
        self.relayout(metrics);
    }

    /// Change line spacing by `tenths` of a line.
    pub fn adjust_line_spacing(&mut self, tenths: i8, metrics: &dyn TextMetrics) {
        let current = (self.settings.line_spacing * 10.0).round();
        self.set_line_spacing((current + f32::from(tenths)) / 10.0, metrics);
    }

    pub fn set_margin(&mut self, margin_px: u32, metrics: &dyn TextMetrics) {
        self.settings.margin_px = clamp(margin_px, &MARGIN_RANGE);
        self.relayout(metrics);
    }

    pub fn adjust_margin(&mut self, delta: i32, metrics: &dyn TextMetrics) {
        let margin = i64::from(self.settings.margin_px) + i64::from(delta);
        self.set_margin(margin.max(0) as u32, metrics);
    }

    /// React to a new drawable size.
    pub fn resize(&mut self, width: u32, height: u32, metrics: &dyn TextMetrics) {
        if (width, height) == self.viewport {
            return;
        }
        self.viewport = (width, height);
        self.relayout(metrics);
    }

    /// Flip the mirror transform. Layout and scroll state are untouched.
    pub fn toggle_mirror(&mut self) -> bool {
        self.settings.mirror = !self.settings.mirror;
        self.settings.mirror
    }

    pub fn toggle_focus_band(&mut self) -> bool {
        self.settings.focus_band = !self.settings.focus_band;
        self.settings.focus_band
    }

    pub fn cycle_theme(&mut self) -> Theme {
        self.settings.theme = self.settings.theme.next();
        self.settings.theme
    }

    pub fn target_duration_s(&self) -> u32 {
        self.target_duration_s
    }

    /// Fit the speed so the whole script scrolls in the configured target
    /// duration. Returns the new speed.
    pub fn fit_to_duration(&mut self) -> f64 {
        self.engine.fit_to_duration(f64::from(self.target_duration_s));
        self.engine.speed()
    }

    pub fn tick(&mut self, dt_seconds: f64) -> ScrollEvent {
        self.engine.tick(dt_seconds)
    }

    /// Top edge of the focus band in viewport coordinates.
    pub fn band_top(&self) -> u32 {
        self.viewport.1 / 10
    }

    /// The focus band as `(y, height)`, or `None` when hidden.
    pub fn focus_band(&self) -> Option<(u32, u32)> {
        if !self.settings.focus_band {
            return None;
        }
        let height = (self.viewport.1 as f32 * self.settings.focus_band_ratio).round() as u32;
        Some((self.band_top(), height))
    }

    fn relayout(&mut self, metrics: &dyn TextMetrics) {
        let params = LayoutParams {
            font: self.settings.font(),
            line_spacing: self.settings.line_spacing,
            margin_px: self.settings.margin_px,
            viewport_width: self.viewport.0,
            viewport_height: self.viewport.1,
        };
        self.layout = DocumentLayout::compute(&self.text, &params, metrics);
        self.engine.set_maximum(self.layout.maximum());
    }
}
