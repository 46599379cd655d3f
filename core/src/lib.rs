//! Core of the nanogen image task runner.
//!
//! A [`task::TaskRequest`] is validated at construction, rendered into a
//! slash-directive command string by [`render::render`], handed to an
//! external creative CLI through the [`runner::CommandExecutor`] seam and
//! finally wrapped in a [`report::Report`].

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod render;
pub mod report;
pub mod runner;
pub mod task;
