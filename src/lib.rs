// SPDX-License-Identifier: MPL-2.0
//! `smartstudy` is the desktop shell of a study assistant built with the Iced
//! GUI framework.
//!
//! All state lives in [`session::Session`] and is testable without a window:
//! toast notifications with cancellable timers, a persisted light/dark theme,
//! a bounded activity history, debounced draft auto-save, progress counters,
//! keyboard shortcuts and tooltips. The [`app`] module hosts the session in an
//! iced application.

pub mod activity;
pub mod app;
pub mod autosave;
pub mod config;
pub mod error;
pub mod forms;
pub mod progress;
pub mod session;
pub mod shortcuts;
pub mod storage;
pub mod text;
pub mod timer;
pub mod ui;
