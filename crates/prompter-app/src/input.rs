use std::path::PathBuf;

use prompter_core::command::{self, Command};
use prompter_core::script::Script;
use prompter_types::backend::{InputBackend, RenderBackend};
use prompter_types::input::{InputEvent, Key};

use crate::app_state::{AppState, Mode};

/// Longest text accepted by the path prompt.
const MAX_PROMPT_LEN: usize = 1024;

/// Result of handling a single input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
}

/// Route an event to the handler for the current mode.
pub fn handle_event<B: RenderBackend + InputBackend>(
    event: &InputEvent,
    state: &mut AppState,
    backend: &mut B,
) -> InputResult {
    match event {
        InputEvent::Quit => return InputResult::Quit,
        InputEvent::Resized { .. } => {
            let (w, h) = backend.viewport_size();
            state.prompter.resize(w, h, &*backend);
            return InputResult::Continue;
        },
        _ => {},
    }
    match state.mode {
        Mode::Viewing => handle_viewing_input(event, state, backend),
        Mode::Countdown => handle_countdown_input(event, state),
        Mode::PromptPercent | Mode::PromptOpen => handle_prompt_input(event, state, backend),
    }
}

/// Handle input while the script is shown.
pub fn handle_viewing_input<B: RenderBackend + InputBackend>(
    event: &InputEvent,
    state: &mut AppState,
    backend: &mut B,
) -> InputResult {
    let InputEvent::KeyPress { key, ctrl } = event else {
        return InputResult::Continue;
    };
    match command::binding(*key, *ctrl) {
        Some(cmd) => run_command(cmd, state, backend),
        None => InputResult::Continue,
    }
}

/// Handle input during the pre-roll: only cancel and quit are live.
pub fn handle_countdown_input(event: &InputEvent, state: &mut AppState) -> InputResult {
    let InputEvent::KeyPress { key, ctrl } = event else {
        return InputResult::Continue;
    };
    match command::binding(*key, *ctrl) {
        Some(Command::Quit) => InputResult::Quit,
        Some(Command::Back | Command::TogglePlay | Command::Stop) => {
            state.cancel_countdown();
            state.set_status("Countdown cancelled");
            InputResult::Continue
        },
        _ => InputResult::Continue,
    }
}

/// Handle input while an inline prompt is open.
pub fn handle_prompt_input<B: RenderBackend + InputBackend>(
    event: &InputEvent,
    state: &mut AppState,
    backend: &mut B,
) -> InputResult {
    match event {
        InputEvent::TextInput(ch) => {
            let accept = match state.mode {
                Mode::PromptPercent => ch.is_ascii_digit() && state.prompt_input.len() < 3,
                _ => !ch.is_control() && state.prompt_input.len() < MAX_PROMPT_LEN,
            };
            if accept {
                state.prompt_input.push(*ch);
            }
        },
        InputEvent::KeyPress { key, ctrl } => match key {
            Key::Backspace => {
                state.prompt_input.pop();
            },
            Key::Escape => close_prompt(state, backend),
            Key::Enter => {
                let input = std::mem::take(&mut state.prompt_input);
                let mode = state.mode;
                close_prompt(state, backend);
                match mode {
                    Mode::PromptPercent => confirm_percent(&input, state),
                    Mode::PromptOpen => confirm_open(&input, state, backend),
                    _ => {},
                }
            },
            Key::Letter('q') if *ctrl => return InputResult::Quit,
            _ => {},
        },
        _ => {},
    }
    InputResult::Continue
}

/// Execute a bound command in viewing mode.
pub fn run_command<B: RenderBackend + InputBackend>(
    cmd: Command,
    state: &mut AppState,
    backend: &mut B,
) -> InputResult {
    match cmd {
        Command::TogglePlay => toggle_play(state),
        Command::Stop => {
            let engine = state.prompter.engine_mut();
            engine.stop();
            engine.clear_at_bottom();
        },
        Command::AdjustSpeed(delta) => {
            state
                .prompter
                .engine_mut()
                .adjust_speed(f64::from(delta));
        },
        Command::Jump(delta) => state.prompter.engine_mut().jump(delta),
        Command::ToTop => state.prompter.engine_mut().to_top(),
        Command::PromptPercent => open_prompt(Mode::PromptPercent, state, backend),
        Command::PromptOpen => open_prompt(Mode::PromptOpen, state, backend),
        Command::FitToDuration => {
            let speed = state.prompter.fit_to_duration();
            let target = state.prompter.target_duration_s();
            state.set_status(format!("Fit to {target}s: {speed:.1} px/s"));
        },
        Command::ToggleMirror => {
            let on = state.prompter.toggle_mirror();
            log::info!("Mirror {}", if on { "on" } else { "off" });
        },
        Command::AdjustFontSize(delta) => state.prompter.adjust_font_size(delta, &*backend),
        Command::AdjustMargin(delta) => state.prompter.adjust_margin(delta, &*backend),
        Command::AdjustLineSpacing(tenths) => {
            state.prompter.adjust_line_spacing(tenths, &*backend);
        },
        Command::ToggleFocusBand => {
            state.prompter.toggle_focus_band();
        },
        Command::CycleTheme => {
            let theme = state.prompter.cycle_theme();
            state.set_status(format!("Theme: {}", theme.name()));
        },
        Command::ToggleFullscreen => {
            let want = !backend.is_fullscreen();
            set_fullscreen(state, backend, want);
        },
        Command::Back => {
            if backend.is_fullscreen() {
                set_fullscreen(state, backend, false);
            }
        },
        Command::Quit => return InputResult::Quit,
    }
    InputResult::Continue
}

/// Pause if running; otherwise rewind a finished run and start through the
/// countdown.
pub fn toggle_play(state: &mut AppState) {
    let engine = state.prompter.engine_mut();
    if engine.is_running() {
        engine.pause();
        return;
    }
    if engine.at_bottom() {
        engine.to_top();
        engine.clear_at_bottom();
    }
    state.begin_countdown();
}

fn set_fullscreen<B: RenderBackend>(state: &mut AppState, backend: &mut B, on: bool) {
    if let Err(e) = backend.set_fullscreen(on) {
        log::error!("Fullscreen toggle failed: {e}");
        state.set_status(format!("Fullscreen failed: {e}"));
        return;
    }
    let (w, h) = backend.viewport_size();
    state.prompter.resize(w, h, &*backend);
}

fn open_prompt<B: InputBackend>(mode: Mode, state: &mut AppState, backend: &mut B) {
    state.mode = mode;
    state.prompt_input.clear();
    if mode == Mode::PromptOpen {
        if let Some(path) = &state.script_path {
            state.prompt_input = path.display().to_string();
        }
    }
    backend.set_text_input(true);
}

fn close_prompt<B: InputBackend>(state: &mut AppState, backend: &mut B) {
    state.mode = Mode::Viewing;
    state.prompt_input.clear();
    backend.set_text_input(false);
}

/// Values above 100 land on the end of the script.
fn confirm_percent(input: &str, state: &mut AppState) {
    match input.trim().parse::<u32>() {
        Ok(pct) => state.prompter.engine_mut().go_to_percent(f64::from(pct.min(100))),
        Err(_) => state.set_status("Enter a whole number from 0 to 100"),
    }
}

fn confirm_open<B: RenderBackend>(input: &str, state: &mut AppState, backend: &mut B) {
    let input = input.trim();
    if input.is_empty() {
        return;
    }
    let path = PathBuf::from(input);
    match Script::load(&path) {
        Ok(script) => {
            state.prompter.set_text(&script.text, &*backend);
            let name = path
                .file_name()
                .map_or_else(|| input.to_string(), |n| n.to_string_lossy().into_owned());
            if script.lossy {
                state.set_status(format!("Loaded {name} (invalid UTF-8 dropped)"));
            } else {
                state.set_status(format!("Loaded {name}"));
            }
            state.script_path = Some(path);
        },
        Err(e) => {
            log::error!("Cannot open {}: {e}", path.display());
            state.set_status(format!("Cannot open {input}: {e}"));
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prompter_types::backend::{FontSpec, TextMetrics};
    use prompter_types::color::Color;
    use prompter_types::config::PrompterConfig;
    use prompter_types::error::Result;
    use std::io::Write;

    /// Headless backend: fixed metrics, no drawing.
    struct NullBackend {
        size: (u32, u32),
        fullscreen: bool,
        text_input: bool,
    }

    impl NullBackend {
        fn new() -> Self {
            Self {
                size: (800, 600),
                fullscreen: false,
                text_input: false,
            }
        }
    }

    impl TextMetrics for NullBackend {
        fn measure_text(&self, text: &str, font: &FontSpec) -> u32 {
            text.chars().count() as u32 * u32::from(font.size / 2)
        }

        fn line_height(&self, font: &FontSpec) -> u32 {
            u32::from(font.size)
        }
    }

    impl RenderBackend for NullBackend {
        fn viewport_size(&self) -> (u32, u32) {
            self.size
        }
        fn clear(&mut self, _color: Color) -> Result<()> {
            Ok(())
        }
        fn fill_rect(&mut self, _x: i32, _y: i32, _w: u32, _h: u32, _c: Color) -> Result<()> {
            Ok(())
        }
        fn draw_text(&mut self, _t: &str, _x: i32, _y: i32, _f: &FontSpec, _c: Color) -> Result<()> {
            Ok(())
        }
        fn set_mirror(&mut self, _mirrored: bool) {}
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

    impl InputBackend for NullBackend {
        fn poll_events(&mut self) -> Vec<InputEvent> {
            Vec::new()
        }
        fn set_text_input(&mut self, enabled: bool) {
            self.text_input = enabled;
        }
    }

    fn setup(countdown_s: u32) -> (AppState, NullBackend) {
        let backend = NullBackend::new();
        let config = PrompterConfig {
            countdown_s,
            font_size: 20,
            ..PrompterConfig::default()
        };
        let text = (0..300)
            .map(|i| format!("Paragraph {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let script = Script::from_bytes(text.as_bytes());
        let state = AppState::new(config, &script, None, backend.size, &backend);
        (state, backend)
    }

    fn press(key: Key) -> InputEvent {
        InputEvent::KeyPress { key, ctrl: false }
    }

    #[test]
    fn space_runs_countdown_then_starts() {
        let (mut state, mut b) = setup(3);
        handle_event(&press(Key::Space), &mut state, &mut b);
        assert_eq!(state.mode, Mode::Countdown);
        assert!(!state.prompter.engine().is_running());

        for _ in 0..200 {
            state.advance(1.0 / 60.0);
        }
        assert_eq!(state.mode, Mode::Viewing);
        assert!(state.prompter.engine().is_running());

        handle_event(&press(Key::Space), &mut state, &mut b);
        assert!(!state.prompter.engine().is_running());
    }

    #[test]
    fn zero_countdown_starts_immediately() {
        let (mut state, mut b) = setup(0);
        handle_event(&press(Key::Space), &mut state, &mut b);
        assert_eq!(state.mode, Mode::Viewing);
        assert!(state.prompter.engine().is_running());
    }

    #[test]
    fn escape_cancels_countdown() {
        let (mut state, mut b) = setup(3);
        handle_event(&press(Key::Space), &mut state, &mut b);
        let result = handle_event(&press(Key::Escape), &mut state, &mut b);
        assert_eq!(result, InputResult::Continue);
        assert_eq!(state.mode, Mode::Viewing);
        state.advance(5.0);
        assert!(!state.prompter.engine().is_running());
    }

    #[test]
    fn play_after_finish_rewinds() {
        let (mut state, mut b) = setup(0);
        state.prompter.engine_mut().go_to_percent(100.0);
        state.prompter.engine_mut().start();
        state.advance(0.1);
        assert!(state.prompter.engine().at_bottom());

        handle_event(&press(Key::Space), &mut state, &mut b);
        let engine = state.prompter.engine();
        assert!(!engine.at_bottom());
        assert_eq!(engine.position(), 0);
        assert!(engine.is_running());
    }

    #[test]
    fn percent_prompt_jumps() {
        let (mut state, mut b) = setup(3);
        handle_event(&press(Key::Letter('g')), &mut state, &mut b);
        assert_eq!(state.mode, Mode::PromptPercent);
        assert!(b.text_input);
        for ch in ['5', 'x', '0'] {
            handle_event(&InputEvent::TextInput(ch), &mut state, &mut b);
        }
        assert_eq!(state.prompt_input, "50");
        handle_event(&press(Key::Enter), &mut state, &mut b);

        let engine = state.prompter.engine();
        let expected = (f64::from(engine.maximum()) / 2.0).round() as u32;
        assert_eq!(engine.position(), expected);
        assert_eq!(state.mode, Mode::Viewing);
        assert!(!b.text_input);
    }

    #[test]
    fn percent_above_hundred_goes_to_end() {
        let (mut state, mut b) = setup(3);
        handle_event(&press(Key::Letter('g')), &mut state, &mut b);
        for ch in "250".chars() {
            handle_event(&InputEvent::TextInput(ch), &mut state, &mut b);
        }
        handle_event(&press(Key::Enter), &mut state, &mut b);
        let engine = state.prompter.engine();
        assert_eq!(engine.position(), engine.maximum());
        assert!(state.status.is_none());
    }

    #[test]
    fn empty_percent_keeps_position() {
        let (mut state, mut b) = setup(3);
        state.prompter.engine_mut().jump(40);
        handle_event(&press(Key::Letter('g')), &mut state, &mut b);
        handle_event(&press(Key::Enter), &mut state, &mut b);
        assert_eq!(state.prompter.engine().position(), 40);
        assert!(state.status.is_some());
    }

    #[test]
    fn escape_closes_prompt_without_quitting() {
        let (mut state, mut b) = setup(3);
        handle_event(&press(Key::Letter('o')), &mut state, &mut b);
        let result = handle_event(&press(Key::Escape), &mut state, &mut b);
        assert_eq!(result, InputResult::Continue);
        assert_eq!(state.mode, Mode::Viewing);
    }

    #[test]
    fn open_prompt_loads_script() {
        let (mut state, mut b) = setup(3);
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"A short script").unwrap();

        state.prompter.engine_mut().jump(900);
        handle_event(&press(Key::Letter('o')), &mut state, &mut b);
        for ch in f.path().display().to_string().chars() {
            handle_event(&InputEvent::TextInput(ch), &mut state, &mut b);
        }
        handle_event(&press(Key::Enter), &mut state, &mut b);

        assert_eq!(state.prompter.text(), "A short script");
        let engine = state.prompter.engine();
        assert_eq!(engine.position(), 0);
        assert_eq!(state.script_path.as_deref(), Some(f.path()));
    }

    #[test]
    fn failed_open_keeps_current_script() {
        let (mut state, mut b) = setup(3);
        let text = state.prompter.text().to_string();
        let dir = tempfile::tempdir().unwrap();
        handle_event(&press(Key::Letter('o')), &mut state, &mut b);
        for ch in dir.path().join("absent.txt").display().to_string().chars() {
            handle_event(&InputEvent::TextInput(ch), &mut state, &mut b);
        }
        handle_event(&press(Key::Enter), &mut state, &mut b);
        assert_eq!(state.prompter.text(), text);
        assert!(
            state
                .status
                .as_ref()
                .is_some_and(|s| s.text.starts_with("Cannot open"))
        );
    }

    #[test]
    fn escape_leaves_fullscreen_but_never_quits() {
        let (mut state, mut b) = setup(3);
        handle_event(&press(Key::F11), &mut state, &mut b);
        assert!(b.fullscreen);
        assert_eq!(
            handle_event(&press(Key::Escape), &mut state, &mut b),
            InputResult::Continue
        );
        assert!(!b.fullscreen);
        assert_eq!(
            handle_event(&press(Key::Escape), &mut state, &mut b),
            InputResult::Continue
        );
        assert!(!b.fullscreen);
    }

    #[test]
    fn ctrl_q_quits_everywhere() {
        let (mut state, mut b) = setup(3);
        let ctrl_q = InputEvent::KeyPress {
            key: Key::Letter('q'),
            ctrl: true,
        };
        handle_event(&press(Key::Letter('g')), &mut state, &mut b);
        assert_eq!(handle_event(&ctrl_q, &mut state, &mut b), InputResult::Quit);
    }

    #[test]
    fn stop_returns_to_top() {
        let (mut state, mut b) = setup(0);
        handle_event(&press(Key::Space), &mut state, &mut b);
        state.prompter.engine_mut().jump(500);
        handle_event(&press(Key::Letter('s')), &mut state, &mut b);
        let engine = state.prompter.engine();
        assert!(!engine.is_running());
        assert_eq!(engine.position(), 0);
    }

    #[test]
    fn speed_keys_clamp() {
        let (mut state, mut b) = setup(3);
        for _ in 0..10 {
            handle_event(&press(Key::Down), &mut state, &mut b);
        }
        assert_eq!(state.prompter.engine().speed(), 5.0);
    }

    #[test]
    fn resize_relayouts() {
        let (mut state, mut b) = setup(3);
        b.size = (400, 600);
        handle_event(
            &InputEvent::Resized {
                width: 400,
                height: 600,
            },
            &mut state,
            &mut b,
        );
        assert_eq!(state.prompter.viewport(), (400, 600));
    }
}
