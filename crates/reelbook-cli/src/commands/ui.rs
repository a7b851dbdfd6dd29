use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::io::IsTerminal;
use std::time::Duration;

/// Spinner shown while a request is outstanding.
///
/// Without a terminal there is nothing to animate, so progress goes to the
/// structured log instead.
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Spinner {
    pub fn start(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        if !is_interactive() {
            tracing::info!(operation = "progress", message = %msg, "Waiting for backend");
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }
        bar.set_message(msg);
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar: Some(bar) }
    }

    pub fn finish(self) {
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}

/// Run `fut` with a spinner showing `msg`
pub async fn with_spinner<F: Future>(msg: &str, fut: F) -> F::Output {
    let spinner = Spinner::start(msg);
    let result = fut.await;
    spinner.finish();
    result
}

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}
