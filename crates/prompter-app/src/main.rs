//! Teleprompter desktop entry point.
//!
//! Opens a window, loads the script (or a placeholder) and scrolls it at a
//! steady speed. Space plays/pauses, Up/Down change speed, M mirrors the
//! text for a beam-splitter, F11 goes fullscreen, Ctrl+Q quits.

mod app_state;
mod input;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use app_state::AppState;
use prompter_backend_sdl::SdlBackend;
use prompter_core::script::Script;
use prompter_core::view;
use prompter_types::backend::{InputBackend, RenderBackend};
use prompter_types::config::resolve_config;

/// Longest frame delta fed to the engine, in seconds.
const MAX_FRAME_DT: f64 = 0.25;

/// Scrolling teleprompter.
#[derive(Debug, Parser)]
#[command(name = "teleprompter", version, about, after_help = prompter_core::command::SHORTCUTS)]
struct Cli {
    /// Script to load (plain text). A placeholder is shown when omitted.
    script: Option<PathBuf>,

    /// Configuration file (TOML).
    #[arg(long, env = "TELEPROMPTER_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref()).context("loading configuration")?;
    log::info!(
        "Starting teleprompter ({}x{}, {:.0} px/s)",
        config.window_width,
        config.window_height,
        config.speed_px_s,
    );

    let mut backend = SdlBackend::new(
        &config.window_title,
        config.window_width,
        config.window_height,
        config.font_path.clone(),
    )?;

    let script = Script::load_or_placeholder(cli.script.as_deref())
        .with_context(|| format!("loading script {:?}", cli.script))?;
    let script_path = cli.script.filter(|p| p.exists());
    let viewport = backend.viewport_size();
    let mut state = AppState::new(config, &script, script_path, viewport, &backend);

    let mut last_frame = Instant::now();
    'running: loop {
        let events = backend.poll_events();
        for event in &events {
            if input::handle_event(event, &mut state, &mut backend) == input::InputResult::Quit {
                break 'running;
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f64().min(MAX_FRAME_DT);
        last_frame = now;
        state.advance(dt);

        view::render(&mut backend, &state.prompter, &state.frame_info())?;
        backend.swap_buffers()?;
    }

    backend.shutdown()?;
    log::info!("Teleprompter shut down cleanly");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_accepts_script_and_config() {
        let cli = Cli::try_parse_from(["teleprompter", "speech.txt", "--config", "alt.toml"])
            .unwrap();
        assert_eq!(cli.script, Some(PathBuf::from("speech.txt")));
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
    }

    #[test]
    fn cli_arguments_are_optional() {
        let cli = Cli::try_parse_from(["teleprompter"]).unwrap();
        assert!(cli.script.is_none());
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
