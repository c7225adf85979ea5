use std::path::PathBuf;

use prompter_core::countdown::Countdown;
use prompter_core::script::Script;
use prompter_core::view::{FrameInfo, Overlay};
use prompter_core::{ScrollEvent, Teleprompter};
use prompter_types::backend::TextMetrics;
use prompter_types::config::PrompterConfig;

/// How long a status message stays in the HUD.
pub const STATUS_TTL_S: f64 = 4.0;

pub const PERCENT_LABEL: &str = "Go to percent (0-100), Enter to confirm:";
pub const OPEN_LABEL: &str = "Open script path, Enter to confirm:";

/// The UI modes the app supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Viewing,
    /// Pre-roll before scrolling starts.
    Countdown,
    PromptPercent,
    PromptOpen,
}

/// A transient HUD message.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub remaining_s: f64,
}

/// All mutable application state except `backend`.
pub struct AppState {
    pub config: PrompterConfig,
    pub prompter: Teleprompter,
    pub mode: Mode,
    pub countdown: Option<Countdown>,
    pub prompt_input: String,
    pub status: Option<StatusMessage>,
    pub script_path: Option<PathBuf>,
}

impl AppState {
    pub fn new(
        config: PrompterConfig,
        script: &Script,
        script_path: Option<PathBuf>,
        viewport: (u32, u32),
        metrics: &dyn TextMetrics,
    ) -> Self {
        let prompter = Teleprompter::new(&config, &script.text, viewport, metrics);
        let mut state = Self {
            config,
            prompter,
            mode: Mode::Viewing,
            countdown: None,
            prompt_input: String::new(),
            status: None,
            script_path,
        };
        if script.lossy {
            state.set_status("Invalid UTF-8 bytes were dropped");
        }
        state
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            remaining_s: STATUS_TTL_S,
        });
    }

    /// Begin the pre-roll, or start scrolling at once when it is disabled.
    pub fn begin_countdown(&mut self) {
        let seconds = self.config.countdown_s;
        if seconds == 0 {
            self.prompter.engine_mut().start();
            return;
        }
        log::debug!("Countdown {seconds}s");
        self.countdown = Some(Countdown::new(seconds));
        self.mode = Mode::Countdown;
    }

    /// Abandon the pre-roll. The engine stays paused.
    pub fn cancel_countdown(&mut self) {
        self.countdown = None;
        if self.mode == Mode::Countdown {
            self.mode = Mode::Viewing;
        }
    }

    /// Advance timers and the scroll engine by one frame.
    pub fn advance(&mut self, dt_seconds: f64) {
        if let Some(status) = &mut self.status {
            status.remaining_s -= dt_seconds;
            if status.remaining_s <= 0.0 {
                self.status = None;
            }
        }

        if self.mode == Mode::Countdown {
            let done = self
                .countdown
                .as_mut()
                .is_none_or(|c| c.tick(dt_seconds));
            if done {
                self.countdown = None;
                self.mode = Mode::Viewing;
                self.prompter.engine_mut().start();
            }
            return;
        }

        if self.prompter.tick(dt_seconds) == ScrollEvent::Finished {
            log::info!("Reached the end of the script");
            self.set_status("Finished");
        }
    }

    /// Per-frame overlay and message for the renderer.
    pub fn frame_info(&self) -> FrameInfo<'_> {
        let overlay = match self.mode {
            Mode::Viewing => Overlay::None,
            Mode::Countdown => Overlay::Countdown(
                self.countdown.as_ref().map_or(0, Countdown::remaining),
            ),
            Mode::PromptPercent => Overlay::Prompt {
                label: PERCENT_LABEL,
                input: &self.prompt_input,
            },
            Mode::PromptOpen => Overlay::Prompt {
                label: OPEN_LABEL,
                input: &self.prompt_input,
            },
        };
        FrameInfo {
            overlay,
            message: self.status.as_ref().map(|s| s.text.as_str()),
        }
    }
}
