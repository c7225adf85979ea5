//! Foundation types and traits for the teleprompter.
//!
//! This crate contains the platform-agnostic types shared by every other
//! crate in the workspace: colors, font descriptions, input events, backend
//! trait definitions, configuration, and error types.

pub mod backend;
pub mod color;
pub mod config;
pub mod error;
pub mod input;
