use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TICK_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Starts a steady-tick spinner with `message`. The caller finishes it with
/// `finish_and_clear` before printing anything else.
pub fn start(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg:.dim}")
            .expect("static spinner template")
            .tick_strings(TICK_FRAMES),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
