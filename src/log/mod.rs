//! The `log` module controls epiabm's diagnostic logging. This is not to be confused with
//! _reporting_, which records the compartment counts of a run through an
//! [`OutputSink`](crate::report::OutputSink).
//!
//! This module (re)exports the five logging macros: `error!`, `warn!`, `info!`, `debug!` and
//! `trace!` where `error!` represents the highest-priority log messages and `trace!` the lowest.
//!
//! Logging is _disabled_ by default. Logging messages can be enabled by passing the command line
//! option `--log-level <level>` to a model built on [`crate::runner`], or from code using:
//!
//!  - `enable_logging()`: turns on all log messages
//!  - `disable_logging()`: turns off all log messages
//!  - `set_log_level(level: LevelFilter)`: enables only log messages with priority at least `level`
//!
//! In addition, per-module filtering of messages can be configured using `set_module_filter()` /
//! `set_module_filters()` and `remove_module_filter()`:
//!
//! ```rust
//! use epiabm::log::{set_module_filter, set_log_level, LevelFilter};
//!
//! pub fn setup_logging() {
//!     // Enable `info` log messages globally.
//!     set_log_level(LevelFilter::Info);
//!     // Trace every infection attempt of the spatial sweep.
//!     set_module_filter("epiabm::sweep::spatial", LevelFilter::Trace);
//! }
//! ```
#[cfg(feature = "logging")]
mod standard_logger;

#[cfg(not(feature = "logging"))]
mod null_logger;

pub use log::{debug, error, info, trace, warn, LevelFilter};

use crate::{HashMap, HashMapExt};
#[cfg(feature = "logging")]
use log4rs::Handle;
use std::sync::LazyLock;
use std::sync::{Mutex, MutexGuard};

const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Off;
const DEFAULT_MODULE_FILTERS: [(&str, LevelFilter); 1] = [
    // Status changes are traced one by one
    ("epiabm::population", LevelFilter::Info),
];

static LOG_CONFIGURATION: LazyLock<Mutex<LogConfiguration>> = LazyLock::new(Mutex::default);

/// Level override for a module path such as `"epiabm::sweep"`.
#[derive(Debug, PartialEq)]
struct ModuleLogConfiguration {
    module: String,
    level: LevelFilter,
}

impl From<(&str, LevelFilter)> for ModuleLogConfiguration {
    fn from((module, level): (&str, LevelFilter)) -> Self {
        Self {
            module: module.to_string(),
            level,
        }
    }
}

/// The global level, the per-module overrides, and the installed logger. There is a single
/// instance, behind `LOG_CONFIGURATION`.
#[derive(Debug)]
pub(in crate::log) struct LogConfiguration {
    /// Applies to modules without an override. `LevelFilter::Off` silences
    /// everything else.
    pub(in crate::log) global_log_level: LevelFilter,
    pub(in crate::log) module_configurations: HashMap<String, ModuleLogConfiguration>,

    #[cfg(feature = "logging")]
    root_handle: Option<Handle>,
}

impl Default for LogConfiguration {
    fn default() -> Self {
        let mut module_configurations = HashMap::new();
        for (module, level) in DEFAULT_MODULE_FILTERS {
            module_configurations.insert(module.to_string(), (module, level).into());
        }
        LogConfiguration {
            global_log_level: DEFAULT_LOG_LEVEL,
            module_configurations,
            #[cfg(feature = "logging")]
            root_handle: None,
        }
    }
}

impl LogConfiguration {
    pub(in crate::log) fn set_log_level(&mut self, level: LevelFilter) {
        self.global_log_level = level;
        self.set_config();
    }

    /// Records the override, returning whether it differs from the previous one.
    fn insert_module_filter(&mut self, module: &str, level: LevelFilter) -> bool {
        let previous = self
            .module_configurations
            .insert(module.to_string(), (module, level).into());
        previous.is_none_or(|config| config.level != level)
    }

    pub(in crate::log) fn set_module_filters<S: ToString>(
        &mut self,
        module_filters: &[(&S, LevelFilter)],
    ) {
        let mut changed = false;
        for (module, level) in module_filters {
            changed |= self.insert_module_filter(&module.to_string(), *level);
        }
        if changed {
            self.set_config();
        }
    }

    pub(in crate::log) fn remove_module_filter(&mut self, module: &str) {
        if self.module_configurations.remove(module).is_some() {
            self.set_config();
        }
    }
}

/// Turns on every message. Same as `set_log_level(LevelFilter::Trace)`.
pub fn enable_logging() {
    set_log_level(LevelFilter::Trace);
}

/// Turns off every message. Same as `set_log_level(LevelFilter::Off)`.
pub fn disable_logging() {
    set_log_level(LevelFilter::Off);
}

/// Sets the level of modules without an override of their own.
pub fn set_log_level(level: LevelFilter) {
    get_log_configuration().set_log_level(level);
}

/// Overrides the level of `module_path` and everything below it.
pub fn set_module_filter(module_path: &str, level_filter: LevelFilter) {
    get_log_configuration().set_module_filters(&[(&module_path, level_filter)]);
}

/// Drops the override of `module_path`, which falls back to the global level.
pub fn remove_module_filter(module_path: &str) {
    get_log_configuration().remove_module_filter(module_path);
}

/// Overrides several modules at once, rebuilding the logger a single time.
pub fn set_module_filters<S: ToString>(module_filters: &[(&S, LevelFilter)]) {
    get_log_configuration().set_module_filters(module_filters);
}

fn get_log_configuration() -> MutexGuard<'static, LogConfiguration> {
    LOG_CONFIGURATION.lock().expect("Mutex poisoned")
}

#[cfg(test)]
mod tests {
    use super::{get_log_configuration, remove_module_filter, set_log_level, set_module_filters};
    use log::{error, trace, LevelFilter};
    use std::sync::{LazyLock, Mutex};

    // Force logging tests to run serially for consistent behavior.
    static TEST_MUTEX: LazyLock<Mutex<()>> = LazyLock::new(Mutex::default);

    #[test]
    fn test_set_log_level() {
        let _guard = TEST_MUTEX.lock().expect("Mutex poisoned");
        set_log_level(LevelFilter::Error);
        {
            let config = get_log_configuration();
            assert_eq!(config.global_log_level, LevelFilter::Error);
            error!("test_set_log_level: global set to error");
            trace!("test_set_log_level: NOT EMITTED");
        }
        set_log_level(LevelFilter::Off);
        {
            let config = get_log_configuration();
            assert_eq!(config.global_log_level, LevelFilter::Off);
        }
    }

    #[test]
    fn test_set_remove_module_filters() {
        let _guard = TEST_MUTEX.lock().expect("Mutex poisoned");
        {
            let config = get_log_configuration();
            let expected = ("epiabm::population", LevelFilter::Info).into();
            assert_eq!(
                config.module_configurations.get("epiabm::population"),
                Some(&expected)
            );
        }

        let filters: [(&&str, LevelFilter); 2] = [
            (&"epiabm::population", LevelFilter::Error),
            (&"epiabm::sweep", LevelFilter::Debug),
        ];
        set_module_filters(&filters);
        {
            let config = get_log_configuration();
            for (module_path, level) in &filters {
                assert_eq!(
                    config.module_configurations.get(**module_path),
                    Some(&((**module_path, *level).into()))
                );
            }
        }

        remove_module_filter("epiabm::sweep");
        {
            let config = get_log_configuration();
            assert!(config.module_configurations.get("epiabm::sweep").is_none());
            assert_eq!(
                config.module_configurations.get("epiabm::population"),
                Some(&("epiabm::population", LevelFilter::Error).into())
            );
        }

        // Restore the default
        set_module_filters(&[(&"epiabm::population", LevelFilter::Info)]);
        set_log_level(LevelFilter::Off);
    }
}
