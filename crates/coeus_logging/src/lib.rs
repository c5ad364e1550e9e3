#![deny(missing_docs)]
//! Shared logging utilities for the Coeus workspace.
//!
//! This crate provides the `coeus_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every line is tagged
//! with the flow step the current thread is working on, so a log of one run
//! reads as `[register] ...`, `[upload] ...`, `[ingest] ...`.

use std::cell::Cell;

#[doc(hidden)]
pub use log;

/// Step label used before any step has been set on a thread.
pub const DEFAULT_STEP: &str = "-";

thread_local! {
    /// Label of the flow step the current thread is handling.
    static FLOW_STEP: Cell<&'static str> = const { Cell::new(DEFAULT_STEP) };
}

/// Sets the flow step label for the current thread.
/// The driver calls this once per dispatched message.
pub fn set_flow_step(step: &'static str) {
    FLOW_STEP.with(|v| v.set(step));
}

/// Retrieves the flow step label for the current thread.
/// Returns [`DEFAULT_STEP`] if no step has been set.
pub fn flow_step() -> &'static str {
    FLOW_STEP.with(|v| v.get())
}

/// Logs a trace-level message tagged with the current flow step.
#[macro_export]
macro_rules! coeus_trace {
    ($($arg:tt)*) => {{
        $crate::log::trace!("[{}] {}", $crate::flow_step(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message tagged with the current flow step.
#[macro_export]
macro_rules! coeus_debug {
    ($($arg:tt)*) => {{
        $crate::log::debug!("[{}] {}", $crate::flow_step(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message tagged with the current flow step.
#[macro_export]
macro_rules! coeus_info {
    ($($arg:tt)*) => {{
        $crate::log::info!("[{}] {}", $crate::flow_step(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message tagged with the current flow step.
#[macro_export]
macro_rules! coeus_warn {
    ($($arg:tt)*) => {{
        $crate::log::warn!("[{}] {}", $crate::flow_step(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message tagged with the current flow step.
#[macro_export]
macro_rules! coeus_error {
    ($($arg:tt)*) => {{
        $crate::log::error!("[{}] {}", $crate::flow_step(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Another test may have installed the logger already.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
