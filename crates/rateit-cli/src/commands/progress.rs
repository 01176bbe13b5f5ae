use super::prompts::is_interactive;
use crate::output::Output;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while catalog requests are in flight. On a non-terminal,
/// or with JSON/quiet output, progress is logged instead.
pub struct RequestSpinner {
    spinner: Option<ProgressBar>,
}

impl RequestSpinner {
    pub fn start(msg: impl Into<String>, output: &Output) -> Self {
        let msg = msg.into();
        if !output.is_human() || output.is_quiet() || !is_interactive() {
            tracing::info!(operation = "request", message = %msg, "Waiting for catalog");
            return Self { spinner: None };
        }

        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
        spinner.set_style(style);
        spinner.set_message(msg);
        spinner.enable_steady_tick(Duration::from_millis(80));
        Self { spinner: Some(spinner) }
    }

    pub fn finish(self) {
        if let Some(spinner) = self.spinner {
            spinner.finish_and_clear();
        }
    }
}
