//! Shared test utilities for prompter-core tests.
//!
//! Provides [`FixedMetrics`] for deterministic layout and a [`MockBackend`]
//! that records all draw calls for assertion.

use prompter_types::backend::{FontSpec, RenderBackend, TextMetrics};
use prompter_types::color::Color;
use prompter_types::error::Result;

/// Monospace metrics: every char is half the font size wide and a line is
/// exactly the font size tall.
pub struct FixedMetrics;

impl TextMetrics for FixedMetrics {
    fn measure_text(&self, text: &str, font: &FontSpec) -> u32 {
        text.chars().count() as u32 * u32::from(font.size / 2)
    }

    fn line_height(&self, font: &FontSpec) -> u32 {
        u32::from(font.size)
    }
}

/// A recorded call from the mock backend.
#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum DrawCall {
    Clear(Color),
    FillRect {
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        color: Color,
    },
    DrawText {
        text: String,
        x: i32,
        y: i32,
        font_size: u16,
        color: Color,
        mirrored: bool,
    },
    SetMirror(bool),
}

/// A mock backend that records all draw calls for test assertions.
pub struct MockBackend {
    pub calls: Vec<DrawCall>,
    pub width: u32,
    pub height: u32,
    mirrored: bool,
    fullscreen: bool,
}

impl MockBackend {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            calls: Vec::new(),
            width,
            height,
            mirrored: false,
            fullscreen: false,
        }
    }

    /// Return only the `DrawText` entries.
    pub fn text_calls(&self) -> Vec<&DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::DrawText { .. }))
            .collect()
    }

    /// Check if any `DrawText` call contains the given substring.
    pub fn has_text(&self, needle: &str) -> bool {
        self.calls.iter().any(|c| {
            if let DrawCall::DrawText { text, .. } = c {
                text.contains(needle)
            } else {
                false
            }
        })
    }

    /// Mirror flag of the first `DrawText` whose text equals `needle`.
    pub fn mirrored_for(&self, needle: &str) -> Option<bool> {
        self.calls.iter().find_map(|c| match c {
            DrawCall::DrawText { text, mirrored, .. } if text == needle => Some(*mirrored),
            _ => None,
        })
    }

    /// Count of `FillRect` calls.
    pub fn fill_rect_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::FillRect { .. }))
            .count()
    }
}

impl TextMetrics for MockBackend {
    fn measure_text(&self, text: &str, font: &FontSpec) -> u32 {
        FixedMetrics.measure_text(text, font)
    }

    fn line_height(&self, font: &FontSpec) -> u32 {
        FixedMetrics.line_height(font)
    }
}

impl RenderBackend for MockBackend {
    fn viewport_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) -> Result<()> {
        self.calls.push(DrawCall::Clear(color));
        Ok(())
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) -> Result<()> {
        self.calls.push(DrawCall::FillRect { x, y, w, h, color });
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        font: &FontSpec,
        color: Color,
    ) -> Result<()> {
        self.calls.push(DrawCall::DrawText {
            text: text.to_string(),
            x,
            y,
            font_size: font.size,
            color,
            mirrored: self.mirrored,
        });
        Ok(())
    }

    fn set_mirror(&mut self, mirrored: bool) {
        self.mirrored = mirrored;
        self.calls.push(DrawCall::SetMirror(mirrored));
    }

    fn swap_buffers(&mut self) -> Result<()> {
        Ok(())
    }

    fn set_fullscreen(&mut self, fullscreen: bool) -> Result<bool> {
        self.fullscreen = fullscreen;
        Ok(fullscreen)
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn shutdown(&mut self) -> Result<()> {
        Ok(())
    }
}
