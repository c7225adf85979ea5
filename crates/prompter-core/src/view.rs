//! Frame rendering through the [`RenderBackend`] trait.
//!
//! Script text is drawn under the mirror transform; the focus band, HUD
//! and overlays are always drawn unmirrored.

use prompter_types::backend::{FontSpec, RenderBackend};
use prompter_types::color::Color;
use prompter_types::error::Result;

use crate::prompter::{FOCUS_BAND_ALPHA, Teleprompter};

pub const HUD_FONT_SIZE: u16 = 18;
pub const COUNTDOWN_FONT_SIZE: u16 = 160;
const HUD_PADDING: i32 = 8;
const HUD_BG: Color = Color::rgba(0, 0, 0, 170);
const HUD_FG: Color = Color::rgb(220, 220, 220);
const PROMPT_BG: Color = Color::rgba(30, 30, 30, 230);

/// Modal overlay drawn on top of the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay<'a> {
    None,
    /// Whole seconds left before scrolling starts.
    Countdown(u32),
    /// Inline text entry.
    Prompt { label: &'a str, input: &'a str },
}

/// Per-frame state owned by the shell rather than the view model.
#[derive(Debug, Clone, Copy)]
pub struct FrameInfo<'a> {
    pub overlay: Overlay<'a>,
    /// Transient status message, shown at the end of the HUD line.
    pub message: Option<&'a str>,
}

impl Default for FrameInfo<'_> {
    fn default() -> Self {
        Self {
            overlay: Overlay::None,
            message: None,
        }
    }
}

/// Draw one complete frame. Does not present it.
pub fn render(
    backend: &mut dyn RenderBackend,
    prompter: &Teleprompter,
    frame: &FrameInfo<'_>,
) -> Result<()> {
    let settings = prompter.settings();
    let (vw, vh) = backend.viewport_size();
    backend.clear(settings.theme.background())?;

    backend.set_mirror(settings.mirror);
    let font = settings.font();
    let fg = settings.theme.foreground();
    let position = prompter.engine().position();
    let x = settings.margin_px as i32;
    for line in prompter.layout().visible_lines(position, vh) {
        if line.text.is_empty() {
            continue;
        }
        let y = i64::from(line.y) - i64::from(position);
        backend.draw_text(&line.text, x, y as i32, &font, fg)?;
    }
    backend.set_mirror(false);

    if let Some((y, h)) = prompter.focus_band() {
        backend.fill_rect(0, y as i32, vw, h, Color::WHITE.with_alpha(FOCUS_BAND_ALPHA))?;
    }

    draw_hud(backend, prompter, frame.overlay, frame.message, (vw, vh))?;

    match frame.overlay {
        Overlay::None => Ok(()),
        Overlay::Countdown(n) => draw_countdown(backend, &font, n, fg, (vw, vh)),
        Overlay::Prompt { label, input } => draw_prompt(backend, &font, label, input, (vw, vh)),
    }
}

/// The HUD status line text.
pub fn status_line(prompter: &Teleprompter, overlay: Overlay<'_>, message: Option<&str>) -> String {
    let engine = prompter.engine();
    let settings = prompter.settings();
    let state = if matches!(overlay, Overlay::Countdown(_)) {
        "Countdown"
    } else if engine.is_running() {
        "Playing"
    } else if engine.at_bottom() {
        "Finished"
    } else {
        "Paused"
    };
    let mut line = format!(
        "{state} | {:.0} px/s | {:.0}% | {} left | {}pt | {}",
        engine.speed(),
        engine.progress() * 100.0,
        format_remaining(engine.remaining_time()),
        settings.font_size,
        settings.theme.name(),
    );
    if settings.mirror {
        line.push_str(" | MIRROR");
    }
    if let Some(msg) = message {
        line.push_str(" | ");
        line.push_str(msg);
    }
    line
}

/// Format seconds as `mm:ss`, rounding up to the next whole second.
pub fn format_remaining(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.ceil() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

fn draw_hud(
    backend: &mut dyn RenderBackend,
    prompter: &Teleprompter,
    overlay: Overlay<'_>,
    message: Option<&str>,
    (vw, vh): (u32, u32),
) -> Result<()> {
    let hud_font = prompter.settings().font().with_size(HUD_FONT_SIZE);
    let lh = backend.line_height(&hud_font) as i32;
    let bar_h = lh + 2 * HUD_PADDING;
    let bar_y = vh as i32 - bar_h;
    backend.fill_rect(0, bar_y, vw, bar_h as u32, HUD_BG)?;
    let text = status_line(prompter, overlay, message);
    backend.draw_text(&text, HUD_PADDING, bar_y + HUD_PADDING, &hud_font, HUD_FG)
}

fn draw_countdown(
    backend: &mut dyn RenderBackend,
    font: &FontSpec,
    remaining: u32,
    color: Color,
    (vw, vh): (u32, u32),
) -> Result<()> {
    let big = font.with_size(COUNTDOWN_FONT_SIZE);
    let text = remaining.to_string();
    let w = backend.measure_text(&text, &big);
    let h = backend.line_height(&big);
    let x = (vw.saturating_sub(w) / 2) as i32;
    let y = (vh.saturating_sub(h) / 2) as i32;
    backend.draw_text(&text, x, y, &big, color)
}

fn draw_prompt(
    backend: &mut dyn RenderBackend,
    font: &FontSpec,
    label: &str,
    input: &str,
    (vw, vh): (u32, u32),
) -> Result<()> {
    let prompt_font = font.with_size(HUD_FONT_SIZE + 6);
    let lh = backend.line_height(&prompt_font);
    let box_w = (vw * 4 / 5).max(1);
    let box_h = lh * 2 + 3 * HUD_PADDING as u32;
    let box_x = (vw.saturating_sub(box_w) / 2) as i32;
    let box_y = (vh.saturating_sub(box_h) / 2) as i32;
    backend.fill_rect(box_x, box_y, box_w, box_h, PROMPT_BG)?;

    let text_x = box_x + HUD_PADDING * 2;
    let label_y = box_y + HUD_PADDING;
    backend.draw_text(label, text_x, label_y, &prompt_font, Color::WHITE)?;
    let entry = format!("{input}_");
    backend.draw_text(
        &entry,
        text_x,
        label_y + lh as i32 + HUD_PADDING,
        &prompt_font,
        Color::WHITE,
    )
}
