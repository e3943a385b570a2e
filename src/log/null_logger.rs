//! Used when the `logging` feature is off: only the `log` crate's maximum
//! level is honoured and nothing is printed.
use crate::log::LogConfiguration;

impl LogConfiguration {
    pub(in crate::log) fn set_config(&mut self) {
        log::set_max_level(self.global_log_level);
    }
}
