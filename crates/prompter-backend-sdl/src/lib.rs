//! SDL2 backend for the teleprompter.
//!
//! Implements `RenderBackend` and `InputBackend` using SDL2, with text drawn
//! through SDL2_ttf. The mirror transform is applied here: while mirrored,
//! every draw is reflected around the vertical center line and glyph
//! textures are flipped horizontally.

mod font;

use std::path::PathBuf;

use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::{Keycode, Mod};
use sdl2::rect::Rect;
use sdl2::render::{BlendMode, Canvas, TextureCreator};
use sdl2::video::{FullscreenType, Window, WindowContext};
use sdl2::{EventPump, VideoSubsystem};

use prompter_types::backend::{FontSpec, InputBackend, RenderBackend, TextMetrics};
use prompter_types::color::Color;
use prompter_types::config::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};
use prompter_types::error::{PrompterError, Result};
use prompter_types::input::{InputEvent, Key};

pub use font::{FALLBACK_FAMILIES, resolve_font_file, system_font_dirs};

use font::FontCache;

/// SDL2 rendering and input backend.
///
/// `fonts` is declared first so loaded fonts drop before the canvas. The
/// TTF context itself is leaked for the process lifetime so fonts can hold
/// a `'static` borrow of it.
pub struct SdlBackend {
    fonts: FontCache,
    canvas: Canvas<Window>,
    texture_creator: TextureCreator<WindowContext>,
    video: VideoSubsystem,
    event_pump: EventPump,
    mirrored: bool,
}

impl SdlBackend {
    /// Create a resizable window with a vsync'd renderer.
    pub fn new(title: &str, width: u32, height: u32, font_path: Option<PathBuf>) -> Result<Self> {
        let sdl = sdl2::init().map_err(|e| PrompterError::Backend(e.to_string()))?;
        let video = sdl
            .video()
            .map_err(|e| PrompterError::Backend(e.to_string()))?;
        let ttf = sdl2::ttf::init().map_err(|e| PrompterError::Font(e.to_string()))?;
        let ttf: &'static _ = Box::leak(Box::new(ttf));

        let mut window = video
            .window(title, width, height)
            .position_centered()
            .resizable()
            .allow_highdpi()
            .build()
            .map_err(|e| PrompterError::Backend(e.to_string()))?;
        window
            .set_minimum_size(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)
            .map_err(|e| PrompterError::Backend(e.to_string()))?;
        let canvas = window
            .into_canvas()
            .accelerated()
            .present_vsync()
            .build()
            .map_err(|e| PrompterError::Backend(e.to_string()))?;
        let texture_creator = canvas.texture_creator();
        let event_pump = sdl
            .event_pump()
            .map_err(|e| PrompterError::Backend(e.to_string()))?;
        video.text_input().stop();

        log::info!("SDL2 backend initialized: {width}x{height}");

        Ok(Self {
            fonts: FontCache::new(ttf, font_path),
            canvas,
            texture_creator,
            video,
            event_pump,
            mirrored: false,
        })
    }

    /// Reflect a rectangle's x across the viewport when mirrored.
    fn place_x(&self, x: i32, w: u32) -> i32 {
        if !self.mirrored {
            return x;
        }
        let (vw, _) = self.viewport_size();
        mirror_x(x, w, vw)
    }

    /// Set the SDL draw color with optional blend mode.
    fn set_color(&mut self, color: Color) {
        if color.a < 255 {
            self.canvas.set_blend_mode(BlendMode::Blend);
        } else {
            self.canvas.set_blend_mode(BlendMode::None);
        }
        self.canvas.set_draw_color(sdl2::pixels::Color::RGBA(
            color.r, color.g, color.b, color.a,
        ));
    }
}

/// Mirrored left edge of a `w` wide span starting at `x` in a `viewport_w`
/// wide viewport.
pub fn mirror_x(x: i32, w: u32, viewport_w: u32) -> i32 {
    viewport_w as i32 - x - w as i32
}

impl TextMetrics for SdlBackend {
    fn measure_text(&self, text: &str, font: &FontSpec) -> u32 {
        if text.is_empty() {
            return 0;
        }
        match self.fonts.with_font(font, |f| f.size_of(text)) {
            Ok(Ok((w, _))) => w,
            Ok(Err(e)) => {
                log::warn!("measure_text failed: {e}");
                0
            },
            Err(e) => {
                log::warn!("{e}");
                0
            },
        }
    }

    fn line_height(&self, font: &FontSpec) -> u32 {
        self.fonts
            .with_font(font, |f| f.height().max(1) as u32)
            .unwrap_or_else(|_| u32::from(font.size.max(1)))
    }
}

impl RenderBackend for SdlBackend {
    fn viewport_size(&self) -> (u32, u32) {
        self.canvas
            .output_size()
            .unwrap_or_else(|_| self.canvas.window().size())
    }

    fn clear(&mut self, color: Color) -> Result<()> {
        self.canvas.set_draw_color(sdl2::pixels::Color::RGBA(
            color.r, color.g, color.b, color.a,
        ));
        self.canvas.clear();
        Ok(())
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) -> Result<()> {
        if w == 0 || h == 0 {
            return Ok(());
        }
        let tx = self.place_x(x, w);
        self.set_color(color);
        self.canvas
            .fill_rect(Rect::new(tx, y, w, h))
            .map_err(|e| PrompterError::Backend(e.to_string()))
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        font: &FontSpec,
        color: Color,
    ) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        let sdl_color = sdl2::pixels::Color::RGBA(color.r, color.g, color.b, color.a);
        let surface = self
            .fonts
            .with_font(font, |f| f.render(text).blended(sdl_color))?
            .map_err(|e| PrompterError::Font(e.to_string()))?;
        let mut texture = self
            .texture_creator
            .create_texture_from_surface(&surface)
            .map_err(|e| PrompterError::Backend(e.to_string()))?;
        texture.set_blend_mode(BlendMode::Blend);

        let (w, h) = (surface.width(), surface.height());
        let tx = self.place_x(x, w);
        self.canvas
            .copy_ex(
                &texture,
                None,
                Rect::new(tx, y, w, h),
                0.0,
                None,
                self.mirrored,
                false,
            )
            .map_err(|e| PrompterError::Backend(e.to_string()))
    }

    fn set_mirror(&mut self, mirrored: bool) {
        self.mirrored = mirrored;
    }

    fn swap_buffers(&mut self) -> Result<()> {
        self.canvas.present();
        Ok(())
    }

    fn set_fullscreen(&mut self, fullscreen: bool) -> Result<bool> {
        let mode = if fullscreen {
            FullscreenType::Desktop
        } else {
            FullscreenType::Off
        };
        self.canvas
            .window_mut()
            .set_fullscreen(mode)
            .map_err(|e| PrompterError::Backend(e.to_string()))?;
        log::info!("Fullscreen {}", if fullscreen { "on" } else { "off" });
        Ok(self.is_fullscreen())
    }

    fn is_fullscreen(&self) -> bool {
        self.canvas.window().fullscreen_state() != FullscreenType::Off
    }

    fn shutdown(&mut self) -> Result<()> {
        log::info!("SDL2 backend shut down");
        Ok(())
    }
}

impl InputBackend for SdlBackend {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        for event in self.event_pump.poll_iter() {
            events.extend(map_sdl_event(event));
        }
        events
    }

    fn set_text_input(&mut self, enabled: bool) {
        let text_input = self.video.text_input();
        if enabled {
            text_input.start();
        } else {
            text_input.stop();
        }
    }
}

/// Map an SDL2 event to a teleprompter input event.
/// One SDL event can carry several typed characters (IME commits, paste).
fn map_sdl_event(event: Event) -> Vec<InputEvent> {
    match event {
        Event::Quit { .. } => vec![InputEvent::Quit],
        Event::KeyDown {
            keycode: Some(key),
            keymod,
            ..
        } => map_key_down(key)
            .map(|key| InputEvent::KeyPress {
                key,
                ctrl: keymod.intersects(Mod::LCTRLMOD | Mod::RCTRLMOD),
            })
            .into_iter()
            .collect(),
        Event::Window {
            win_event: WindowEvent::SizeChanged(w, h),
            ..
        } => vec![InputEvent::Resized {
            width: w.max(0) as u32,
            height: h.max(0) as u32,
        }],
        Event::TextInput { text, .. } => text.chars().map(InputEvent::TextInput).collect(),
        _ => Vec::new(),
    }
}

fn map_key_down(key: Keycode) -> Option<Key> {
    let mapped = match key {
        Keycode::Space => Key::Space,
        Keycode::Up => Key::Up,
        Keycode::Down => Key::Down,
        Keycode::Left => Key::Left,
        Keycode::Right => Key::Right,
        Keycode::PageUp => Key::PageUp,
        Keycode::PageDown => Key::PageDown,
        Keycode::Return | Keycode::KpEnter => Key::Enter,
        Keycode::Escape => Key::Escape,
        Keycode::Backspace => Key::Backspace,
        Keycode::F11 => Key::F11,
        Keycode::Plus | Keycode::Equals | Keycode::KpPlus => Key::Plus,
        Keycode::Minus | Keycode::KpMinus => Key::Minus,
        Keycode::LeftBracket => Key::LeftBracket,
        Keycode::RightBracket => Key::RightBracket,
        Keycode::Comma => Key::Comma,
        Keycode::Period => Key::Period,
        Keycode::Num0 | Keycode::Kp0 => Key::Digit(0),
        Keycode::Num1 => Key::Digit(1),
        Keycode::Num2 => Key::Digit(2),
        Keycode::Num3 => Key::Digit(3),
        Keycode::Num4 => Key::Digit(4),
        Keycode::Num5 => Key::Digit(5),
        Keycode::Num6 => Key::Digit(6),
        Keycode::Num7 => Key::Digit(7),
        Keycode::Num8 => Key::Digit(8),
        Keycode::Num9 => Key::Digit(9),
        Keycode::B => Key::Letter('b'),
        Keycode::G => Key::Letter('g'),
        Keycode::M => Key::Letter('m'),
        Keycode::O => Key::Letter('o'),
        Keycode::Q => Key::Letter('q'),
        Keycode::R => Key::Letter('r'),
        Keycode::S => Key::Letter('s'),
        Keycode::T => Key::Letter('t'),
        _ => return None,
    };
    Some(mapped)
}
