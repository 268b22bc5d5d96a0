//! Global differentiation mode.
//!
//! Graph recording is controlled by named boolean settings. The only supported
//! way to change a setting is scoped acquisition: [`using_config`] returns a
//! [`ConfigGuard`] that restores the previous value when dropped, which
//! happens on normal scope exit, on early `?` return and during panic
//! unwinding alike.
//!
//! ```
//! use neurograd_core::config::{self, Setting};
//!
//! assert!(config::is_backprop_enabled());
//! {
//!     let _guard = config::no_grad();
//!     assert!(!config::is_backprop_enabled());
//! }
//! assert!(config::is_backprop_enabled());
//! assert!(config::Config::get(Setting::EnableBackprop));
//! ```
//!
//! Settings live in thread-local storage. Each thread therefore sees its own
//! process-style global; the engine is single-threaded and sharing graphs
//! across threads is not supported.

use std::cell::Cell;
use std::fmt;
use std::str::FromStr;

use crate::error::NeuroGradError;

/// A named process setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    /// When `true`, calling a [`Function`](crate::Function) records graph
    /// edges (creator, inputs, outputs, priority). Default `true`.
    EnableBackprop,
}

impl Setting {
    /// Textual name of the setting.
    pub fn name(&self) -> &'static str {
        match self {
            Setting::EnableBackprop => "enable_backprop",
        }
    }

    fn default_value(&self) -> bool {
        match self {
            Setting::EnableBackprop => true,
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Setting {
    type Err = NeuroGradError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enable_backprop" => Ok(Setting::EnableBackprop),
            other => Err(NeuroGradError::UnknownSetting(other.to_string())),
        }
    }
}

thread_local! {
    static ENABLE_BACKPROP: Cell<bool> = Cell::new(Setting::EnableBackprop.default_value());
}

/// Accessor for the current settings.
pub struct Config;

impl Config {
    /// Current value of `setting`.
    pub fn get(setting: Setting) -> bool {
        match setting {
            Setting::EnableBackprop => ENABLE_BACKPROP.with(Cell::get),
        }
    }

    // Private: the guard is the only mutation path.
    fn replace(setting: Setting, value: bool) -> bool {
        match setting {
            Setting::EnableBackprop => ENABLE_BACKPROP.with(|cell| cell.replace(value)),
        }
    }
}

/// RAII guard returned by [`using_config`]. Restores the previous value of its
/// setting when dropped.
#[must_use = "the setting is restored as soon as the guard is dropped"]
pub struct ConfigGuard {
    setting: Setting,
    previous: bool,
}

impl ConfigGuard {
    pub fn setting(&self) -> Setting {
        self.setting
    }

    /// Value the setting had before this guard was acquired.
    pub fn previous(&self) -> bool {
        self.previous
    }
}

impl Drop for ConfigGuard {
    fn drop(&mut self) {
        Config::replace(self.setting, self.previous);
        log::trace!("restored {} = {}", self.setting, self.previous);
    }
}

impl fmt::Debug for ConfigGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigGuard")
            .field("setting", &self.setting)
            .field("previous", &self.previous)
            .finish()
    }
}

/// Sets `setting` to `value` until the returned guard is dropped.
pub fn using_config(setting: Setting, value: bool) -> ConfigGuard {
    let previous = Config::replace(setting, value);
    log::trace!("set {} = {} (was {})", setting, value, previous);
    ConfigGuard { setting, previous }
}

/// Runs `f` with `setting` temporarily set to `value`.
pub fn with_config<R>(setting: Setting, value: bool, f: impl FnOnce() -> R) -> R {
    let _guard = using_config(setting, value);
    f()
}

/// Disables graph recording until the returned guard is dropped.
pub fn no_grad() -> ConfigGuard {
    using_config(Setting::EnableBackprop, false)
}

/// Runs `f` without graph recording.
pub fn no_grad_scope<R>(f: impl FnOnce() -> R) -> R {
    with_config(Setting::EnableBackprop, false, f)
}

pub fn is_backprop_enabled() -> bool {
    Config::get(Setting::EnableBackprop)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
