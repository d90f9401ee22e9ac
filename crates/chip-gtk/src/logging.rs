//! Tracing setup for applications hosting chips.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Default filter when `RUST_LOG` is unset
#[cfg(debug_assertions)]
const DEFAULT_FILTER: &str = "chip_core=debug,chip_gtk=debug";
#[cfg(not(debug_assertions))]
const DEFAULT_FILTER: &str = "chip_core=info,chip_gtk=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
///
/// Debug builds also write to `/tmp/chip-gtk-<timestamp>.log`, with
/// `/tmp/chip-gtk.log` pointing at the latest run. Keep the returned guard
/// alive for the life of the process or buffered lines are lost.
#[must_use]
pub fn setup_logging() -> Option<WorkerGuard> {
    #[cfg(debug_assertions)]
    {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let log_filename = format!("chip-gtk-{timestamp}.log");
        let log_path = std::path::Path::new("/tmp").join(&log_filename);

        let symlink_path = std::path::Path::new("/tmp/chip-gtk.log");
        let _ = std::fs::remove_file(symlink_path);
        let _ = std::os::unix::fs::symlink(&log_path, symlink_path);

        let file_appender = tracing_appender::rolling::never("/tmp", &log_filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let installed = tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(
                fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true),
            )
            .with(env_filter())
            .try_init();

        installed.is_ok().then_some(guard)
    }

    #[cfg(not(debug_assertions))]
    {
        let _ = tracing_subscriber::registry()
            .with(fmt::layer())
            .with(env_filter())
            .try_init();
        None
    }
}
