//! Watches the source directories and rebuilds the site on change. Events
//! arrive on a channel from the notify watcher thread and are handled by a
//! blocking receive loop, so rebuilds are serialized by construction: a new
//! event arriving mid-rebuild waits in the channel until the current rebuild
//! finishes. Failed rebuilds are logged and the loop keeps watching.

use std::fmt;
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::time::Duration;

use log::{debug, error, info};
use notify::{Event, EventKind, RecursiveMode, Watcher};

use crate::build;
use crate::config::Config;

/// How long to wait after the first event before rebuilding, so one save
/// producing several filesystem events triggers a single rebuild.
const DEBOUNCE: Duration = Duration::from_millis(200);

/// Builds once, then watches the template, content, and public directories
/// and rebuilds on every relevant change. Runs until the watcher goes away
/// (in practice, until the process is interrupted).
pub fn watch(config: &Config) -> Result<()> {
    let (tx, rx) = channel();
    let mut watcher = notify::recommended_watcher(
        move |result: notify::Result<Event>| match result {
            Ok(event) => match event.kind {
                EventKind::Create(_)
                | EventKind::Modify(_)
                | EventKind::Remove(_) => {
                    // The receiver only goes away when the loop below has
                    // already exited.
                    let _ = tx.send(event);
                }
                _ => {}
            },
            Err(err) => error!("Watch error: {}", err),
        },
    )?;

    for root in [
        &config.templates_directory,
        &config.pages_directory,
        &config.public_directory,
    ] {
        if root.is_dir() {
            watcher.watch(root, RecursiveMode::Recursive)?;
            info!("Watching `{}`", root.display());
        }
    }

    rebuild(config);

    loop {
        match rx.recv_timeout(Duration::from_secs(1)) {
            Ok(event) => {
                // Ignore events that only touch build artifacts.
                if event
                    .paths
                    .iter()
                    .all(|p| p.starts_with(&config.output_directory))
                {
                    continue;
                }
                for path in &event.paths {
                    info!("`{}` changed", path.display());
                }

                std::thread::sleep(DEBOUNCE);
                while rx.try_recv().is_ok() {}

                rebuild(config);
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

/// Runs one build, logging the outcome. Never fatal: in watch mode a broken
/// source tree just waits for the next save.
fn rebuild(config: &Config) {
    debug!("Compiling website..");
    match build::build_site(config) {
        Ok(()) => {}
        Err(err) => error!("Build failed: {}", err),
    }
}

/// Represents the result of setting up the watch loop.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error creating the filesystem watcher or registering the
/// watched directories. Errors after setup are logged, not returned.
#[derive(Debug)]
pub struct Error(notify::Error);

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Watching source directories: {}", self.0)
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<notify::Error> for Error {
    /// Converts a [`notify::Error`] into an [`Error`]. This allows us to use
    /// the `?` operator for watcher setup.
    fn from(err: notify::Error) -> Error {
        Error(err)
    }
}
