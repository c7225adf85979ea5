//! Backend trait definitions.
//!
//! Every platform implements these traits. The core dispatches all drawing,
//! text measurement and input through trait boundaries and never calls
//! platform APIs directly.

use crate::color::Color;
use crate::error::Result;
use crate::input::InputEvent;

/// A font request: family name plus point size.
///
/// Backends treat one point as one pixel (72 DPI). Family lookup is
/// best-effort; a backend may substitute a fallback face.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontSpec {
    pub family: String,
    pub size: u16,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: u16) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }

    /// Same family at a different size.
    pub fn with_size(&self, size: u16) -> Self {
        Self {
            family: self.family.clone(),
            size,
        }
    }
}

/// Text measurement, the only capability document layout needs.
pub trait TextMetrics {
    /// Width of `text` in pixels when drawn with `font`.
    fn measure_text(&self, text: &str, font: &FontSpec) -> u32;

    /// Natural line height of `font` in pixels (before line spacing).
    fn line_height(&self, font: &FontSpec) -> u32;
}

/// Rendering backend trait.
///
/// Coordinates are logical: `set_mirror(true)` flips subsequent draws
/// horizontally around the viewport center without changing what callers
/// pass in.
pub trait RenderBackend: TextMetrics {
    /// Current drawable size in pixels.
    fn viewport_size(&self) -> (u32, u32);

    /// Clear the screen to a solid color.
    fn clear(&mut self, color: Color) -> Result<()>;

    /// Draw a filled rectangle. Colors with alpha < 255 are blended.
    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) -> Result<()>;

    /// Draw a single line of text with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, text: &str, x: i32, y: i32, font: &FontSpec, color: Color)
    -> Result<()>;

    /// Enable or disable the horizontal mirror transform for later draws.
    fn set_mirror(&mut self, mirrored: bool);

    /// Present the current frame to the display.
    fn swap_buffers(&mut self) -> Result<()>;

    /// Switch between windowed and fullscreen. Returns the new state.
    fn set_fullscreen(&mut self, fullscreen: bool) -> Result<bool>;

    /// Whether the window is currently fullscreen.
    fn is_fullscreen(&self) -> bool;

    /// Release resources.
    fn shutdown(&mut self) -> Result<()>;
}

/// Input backend trait.
///
/// Maps platform-specific input to the platform-agnostic `InputEvent` enum.
pub trait InputBackend {
    /// Poll for pending input events.
    fn poll_events(&mut self) -> Vec<InputEvent>;

    /// Enable or disable delivery of [`InputEvent::TextInput`]. Only inline
    /// prompts need it; backends without text input ignore the request.
    fn set_text_input(&mut self, _enabled: bool) {}
}
