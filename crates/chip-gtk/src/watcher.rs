//! Live reload of the chip config file.
//!
//! Edits to `appearance.theme` and `behavior.deleteWhenDisabled` are
//! broadcast to every live chip through the theme registry, then the new
//! config is handed to the `on_change` callback.

use chip_core::config::{Config, Directories};
use chip_core::{Error, Result, theme};
use gtk4::gio;
use gtk4::glib;
use gtk4::prelude::*;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info, warn};

type ConfigChangeCallback = Rc<RefCell<Option<Box<dyn Fn(&Config)>>>>;

/// Writers often truncate then write; wait for the file to settle
const DEBOUNCE: Duration = Duration::from_millis(100);

pub struct ConfigWatcher {
    path: PathBuf,
    config: Rc<RefCell<Config>>,
    on_change: ConfigChangeCallback,
    monitor: RefCell<Option<gio::FileMonitor>>,
}

impl ConfigWatcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let config = load_or_default(&path);
        Self {
            path,
            config: Rc::new(RefCell::new(config)),
            on_change: Rc::new(RefCell::new(None)),
            monitor: RefCell::new(None),
        }
    }

    /// Watch `config.json` in the platform config directory
    pub fn from_default_location() -> Self {
        Self::new(Directories::new().config_file)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> Config {
        self.config.borrow().clone()
    }

    pub fn set_on_change<F: Fn(&Config) + 'static>(&self, callback: F) {
        *self.on_change.borrow_mut() = Some(Box::new(callback));
    }

    /// Push the loaded theme and delete policy to every live chip and make
    /// them the defaults for new chips
    pub fn apply(&self) -> usize {
        theme::apply_config(&self.config.borrow())
    }

    pub fn is_watching(&self) -> bool {
        self.monitor.borrow().is_some()
    }

    /// Start monitoring the config file. The file need not exist yet.
    pub fn start_watching(&self) -> Result<()> {
        if self.is_watching() {
            return Ok(());
        }

        let file = gio::File::for_path(&self.path);
        let monitor = file
            .monitor_file(gio::FileMonitorFlags::NONE, gio::Cancellable::NONE)
            .map_err(|e| Error::Config(format!("cannot watch {}: {e}", self.path.display())))?;

        let config = self.config.clone();
        let on_change = self.on_change.clone();
        let path = self.path.clone();

        monitor.connect_changed(move |_, _, _, event| {
            if !matches!(
                event,
                gio::FileMonitorEvent::Changed
                    | gio::FileMonitorEvent::Created
                    | gio::FileMonitorEvent::Deleted
            ) {
                return;
            }
            debug!("Config file event {event:?}: {}", path.display());

            let config = config.clone();
            let on_change = on_change.clone();
            let path = path.clone();
            glib::timeout_add_local_once(DEBOUNCE, move || {
                reload(&path, &config, &on_change);
            });
        });

        *self.monitor.borrow_mut() = Some(monitor);
        info!("Watching {}", self.path.display());
        Ok(())
    }

    pub fn stop_watching(&self) {
        if let Some(monitor) = self.monitor.borrow_mut().take() {
            monitor.cancel();
            debug!("Stopped watching {}", self.path.display());
        }
    }
}

impl Drop for ConfigWatcher {
    fn drop(&mut self) {
        self.stop_watching();
    }
}

fn load_or_default(path: &Path) -> Config {
    match Config::load(path) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load {}: {e}, using defaults", path.display());
            Config::default()
        }
    }
}

fn reload(path: &Path, config: &RefCell<Config>, on_change: &ConfigChangeCallback) {
    let next = match Config::load(path) {
        Ok(next) => next,
        Err(e) => {
            // Keep the last good config while the file is half-written or broken
            warn!("Ignoring config change: {e}");
            return;
        }
    };

    let previous = config.replace(next.clone());
    if previous == next {
        debug!("Config unchanged after reload");
        return;
    }

    if previous.delete_policy() != next.delete_policy() {
        theme::apply_delete_policy(next.delete_policy());
    }
    if previous.theme() != next.theme() {
        theme::apply_theme(next.theme());
    }

    if let Some(ref callback) = *on_change.borrow() {
        callback(&next);
    }
}
