//! Check command - mount the widget host and wait for the globe to load.
//!
//! Runs the same lifecycle a page would: capability check, widget
//! construction, load/error signals, teardown. The resulting status text is
//! printed; a fatal status makes the command fail.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use orbview::config::ConfigFile;
use orbview::host::{HostState, MapHost};
use orbview::style::globe_style;
use orbview::widget::{select_factory, Capabilities, Container};

use crate::error::CliError;

/// Container size used for the check.
const CHECK_WIDTH: u32 = 1280;
const CHECK_HEIGHT: u32 = 720;

/// How often the wait loop looks at the interrupt flag.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Arguments for the check command.
pub struct CheckArgs {
    pub timeout: u64,
    pub offline: bool,
}

/// Run the check command.
pub fn run(args: CheckArgs) -> Result<(), CliError> {
    let config = ConfigFile::load()?;

    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;

    let outcome = runtime.block_on(async {
        let mut capabilities = Capabilities::detect();
        if args.offline {
            capabilities.network = false;
        }
        let factory = select_factory(&capabilities);
        tracing::info!(factory = factory.name(), "Selected widget");

        let options = config.widget_options(globe_style());
        let mut host = MapHost::new(factory, options);
        let container = Container::new("globe", CHECK_WIDTH, CHECK_HEIGHT);

        let spinner = spinner(host.start(&container), &host);
        let deadline = Instant::now() + Duration::from_secs(args.timeout);

        while !host.state().is_settled() {
            if interrupted.load(Ordering::SeqCst) {
                tracing::info!("Interrupted");
                break;
            }
            if Instant::now() >= deadline {
                tracing::warn!(timeout_secs = args.timeout, "Widget did not settle in time");
                break;
            }
            match tokio::time::timeout(POLL_INTERVAL, host.next_event()).await {
                Ok(Some(state)) => spinner.set_message(status_line(state, host.status())),
                Ok(None) => break,
                Err(_) => {}
            }
        }

        spinner.finish_and_clear();
        let outcome = (host.state(), host.status().to_string());
        host.stop();
        outcome
    });

    if interrupted.load(Ordering::SeqCst) && !outcome.0.is_settled() {
        return Err(CliError::Check("interrupted".to_string()));
    }
    report(outcome.0, &outcome.1, args.timeout)
}

fn spinner(state: HostState, host: &MapHost) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message(status_line(state, host.status()));
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

fn status_line(state: HostState, status: &str) -> String {
    if status.is_empty() {
        state.label().to_string()
    } else {
        format!("{} ({})", status, state.label())
    }
}

fn report(state: HostState, status: &str, timeout: u64) -> Result<(), CliError> {
    match state {
        HostState::Ready => {
            println!("{} Globe loaded", style("✓").green());
            Ok(())
        }
        HostState::Error => {
            println!("{} {}", style("✗").red(), status);
            Err(CliError::Check(status.to_string()))
        }
        HostState::Initializing | HostState::Uninitialized => Err(CliError::Check(format!(
            "globe did not load within {}s",
            timeout
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line() {
        assert_eq!(status_line(HostState::Ready, ""), "ready");
        assert_eq!(
            status_line(HostState::Initializing, "Loading globe..."),
            "Loading globe... (initializing)"
        );
    }

    #[test]
    fn test_report_outcomes() {
        assert!(report(HostState::Ready, "", 30).is_ok());

        let err = report(HostState::Error, "Error: WebGL context lost", 30).unwrap_err();
        assert!(err.to_string().contains("WebGL context lost"));

        let err = report(HostState::Initializing, "Loading globe...", 5).unwrap_err();
        assert!(err.to_string().contains("within 5s"));
    }
}
