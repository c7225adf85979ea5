//! Platform-agnostic teleprompter core.
//!
//! Holds the scroll engine, document layout, countdown gate, script loading,
//! themes, key bindings and the frame renderer. Nothing here touches a
//! platform API; drawing and text measurement go through the backend traits
//! in `prompter-types`.

pub mod command;
pub mod countdown;
pub mod engine;
pub mod layout;
pub mod prompter;
pub mod script;
pub mod theme;
pub mod view;

#[cfg(test)]
pub(crate) mod test_utils;

pub use engine::{ScrollEngine, ScrollEvent};
pub use prompter::{DisplaySettings, Teleprompter};
