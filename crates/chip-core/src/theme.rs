//! Process-wide theme and delete policy, and the registry of live chips that
//! follow them.
//!
//! Listeners are held weakly: dropping a chip is enough to unsubscribe it,
//! and dead entries are pruned on the next subscribe or broadcast. Everything
//! here lives on the UI thread.

use crate::chip::DeletePolicy;
use crate::config::Config;
use chip_types::Theme;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use tracing::{debug, info};

/// Anything that re-queries its palette when the theme changes
pub trait ThemeListener {
    fn theme_changed(&self, theme: Theme);

    /// Called when the configured delete policy changes
    fn delete_policy_changed(&self, _policy: DeletePolicy) {}
}

#[derive(Default)]
pub struct ThemeRegistry {
    current: Cell<Theme>,
    delete_policy: Cell<DeletePolicy>,
    listeners: RefCell<Vec<Weak<dyn ThemeListener>>>,
}

impl ThemeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_theme(theme: Theme) -> Self {
        Self {
            current: Cell::new(theme),
            ..Self::default()
        }
    }

    pub fn current(&self) -> Theme {
        self.current.get()
    }

    /// Policy new chips start with
    pub fn delete_policy(&self) -> DeletePolicy {
        self.delete_policy.get()
    }

    pub fn subscribe(&self, listener: Weak<dyn ThemeListener>) {
        let mut listeners = self.listeners.borrow_mut();
        listeners.retain(|existing| existing.strong_count() > 0);
        listeners.push(listener);
    }

    /// Subscribe a shared listener without spelling out the coercion
    pub fn subscribe_rc<T: ThemeListener + 'static>(&self, listener: &Rc<T>) {
        let weak = Rc::downgrade(listener);
        self.subscribe(weak);
    }

    /// Store `theme` and notify every live listener.
    ///
    /// Returns the number of listeners notified.
    pub fn apply(&self, theme: Theme) -> usize {
        self.current.set(theme);
        let notified = self.broadcast(|listener| listener.theme_changed(theme));
        info!("Applied {theme} theme to {notified} chip(s)");
        notified
    }

    /// Store `policy` and push it to every live listener
    pub fn apply_delete_policy(&self, policy: DeletePolicy) -> usize {
        self.delete_policy.set(policy);
        let notified = self.broadcast(|listener| listener.delete_policy_changed(policy));
        info!("Applied delete policy {policy:?} to {notified} chip(s)");
        notified
    }

    /// Apply both the theme and the delete policy from `config`
    pub fn apply_config(&self, config: &Config) -> usize {
        self.apply_delete_policy(config.delete_policy());
        self.apply(config.theme())
    }

    fn broadcast(&self, notify: impl Fn(&dyn ThemeListener)) -> usize {
        // Upgrade before calling out so listeners may subscribe re-entrantly
        let live: Vec<Rc<dyn ThemeListener>> = {
            let mut listeners = self.listeners.borrow_mut();
            listeners.retain(|listener| listener.strong_count() > 0);
            listeners.iter().filter_map(Weak::upgrade).collect()
        };

        for listener in &live {
            notify(listener.as_ref());
        }
        live.len()
    }

    /// Number of listeners still alive
    pub fn live_count(&self) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|listener| listener.strong_count() > 0)
            .count()
    }
}

thread_local! {
    static GLOBAL: ThemeRegistry = ThemeRegistry::new();
}

/// Theme new chips start with
pub fn current_theme() -> Theme {
    GLOBAL.with(ThemeRegistry::current)
}

/// Delete policy new chips start with
pub fn current_delete_policy() -> DeletePolicy {
    GLOBAL.with(ThemeRegistry::delete_policy)
}

/// Broadcast `theme` to every live chip on this thread
pub fn apply_theme(theme: Theme) -> usize {
    GLOBAL.with(|registry| registry.apply(theme))
}

/// Broadcast `policy` to every live chip on this thread
pub fn apply_delete_policy(policy: DeletePolicy) -> usize {
    GLOBAL.with(|registry| registry.apply_delete_policy(policy))
}

/// Broadcast the theme and delete policy of `config` to every live chip
pub fn apply_config(config: &Config) -> usize {
    GLOBAL.with(|registry| registry.apply_config(config))
}

pub fn subscribe(listener: Weak<dyn ThemeListener>) {
    debug!("Subscribing chip to theme registry");
    GLOBAL.with(|registry| registry.subscribe(listener));
}

pub fn live_count() -> usize {
    GLOBAL.with(ThemeRegistry::live_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Silent;

    impl ThemeListener for Silent {
        fn theme_changed(&self, _theme: Theme) {}
    }

    #[test]
    fn test_subscribe_prunes_dead_entries() {
        let registry = ThemeRegistry::new();
        for _ in 0..100 {
            let listener = Rc::new(Silent);
            registry.subscribe_rc(&listener);
        }

        // Only the most recent entry is kept; it is dead by now too
        assert_eq!(registry.listeners.borrow().len(), 1);
        assert_eq!(registry.live_count(), 0);

        let kept = Rc::new(Silent);
        registry.subscribe_rc(&kept);
        assert_eq!(registry.listeners.borrow().len(), 1);
        assert_eq!(registry.live_count(), 1);
    }

    #[test]
    fn test_delete_policy_defaults_to_suppress() {
        let registry = ThemeRegistry::new();
        assert_eq!(registry.delete_policy(), DeletePolicy::SuppressWhenDisabled);
    }
}
