//! Key bindings: map keys to teleprompter commands.

use prompter_types::input::Key;

pub const SPEED_STEP: f64 = 10.0;
pub const SMALL_JUMP_PX: i64 = 200;
pub const LARGE_JUMP_PX: i64 = 1200;
pub const FONT_STEP_PT: i16 = 2;
pub const MARGIN_STEP_PX: i32 = 10;
/// Line spacing changes in tenths.
pub const SPACING_STEP_TENTHS: i8 = 1;

/// An action requested from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start (through the countdown gate) or pause.
    TogglePlay,
    /// Pause and return to the top.
    Stop,
    AdjustSpeed(i32),
    Jump(i64),
    ToTop,
    /// Ask for a percentage, then jump there.
    PromptPercent,
    FitToDuration,
    ToggleMirror,
    AdjustFontSize(i16),
    AdjustMargin(i32),
    AdjustLineSpacing(i8),
    ToggleFocusBand,
    CycleTheme,
    ToggleFullscreen,
    /// Ask for a script path, then load it.
    PromptOpen,
    /// Close prompt, cancel countdown or leave fullscreen.
    Back,
    Quit,
}

/// The binding for a key press, if any.
pub fn binding(key: Key, ctrl: bool) -> Option<Command> {
    if ctrl {
        return match key {
            Key::Letter('q') => Some(Command::Quit),
            Key::Letter('o') => Some(Command::PromptOpen),
            _ => None,
        };
    }
    let cmd = match key {
        Key::Space => Command::TogglePlay,
        Key::Up => Command::AdjustSpeed(SPEED_STEP as i32),
        Key::Down => Command::AdjustSpeed(-(SPEED_STEP as i32)),
        Key::Left => Command::Jump(-SMALL_JUMP_PX),
        Key::Right => Command::Jump(SMALL_JUMP_PX),
        Key::PageUp => Command::Jump(-LARGE_JUMP_PX),
        Key::PageDown => Command::Jump(LARGE_JUMP_PX),
        Key::Digit(0) => Command::ToTop,
        Key::Plus => Command::AdjustFontSize(FONT_STEP_PT),
        Key::Minus => Command::AdjustFontSize(-FONT_STEP_PT),
        Key::LeftBracket => Command::AdjustMargin(-MARGIN_STEP_PX),
        Key::RightBracket => Command::AdjustMargin(MARGIN_STEP_PX),
        Key::Comma => Command::AdjustLineSpacing(-SPACING_STEP_TENTHS),
        Key::Period => Command::AdjustLineSpacing(SPACING_STEP_TENTHS),
        Key::F11 => Command::ToggleFullscreen,
        Key::Escape => Command::Back,
        Key::Letter('g') => Command::PromptPercent,
        Key::Letter('r') => Command::FitToDuration,
        Key::Letter('m') => Command::ToggleMirror,
        Key::Letter('o') => Command::PromptOpen,
        Key::Letter('s') => Command::Stop,
        Key::Letter('b') => Command::ToggleFocusBand,
        Key::Letter('t') => Command::CycleTheme,
        _ => return None,
    };
    Some(cmd)
}

/// Help text listing every binding.
pub const SHORTCUTS: &str = "\
Space: Play/Pause   S: Stop   F11: Fullscreen
Up/Down: Speed +/-10   Left/Right: Nudge 200 px   PgUp/PgDn: Jump 1200 px
+/-: Font size   [/]: Margins   ,/.: Line spacing
M: Mirror   B: Focus band   T: Theme   0: Top   G: Go to %
O: Open file   R: Fit speed to duration   Esc: Back   Ctrl+Q: Quit";
