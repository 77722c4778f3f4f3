//! Serialised access to a captured `log` stream.

use std::sync::{Mutex, MutexGuard, OnceLock};

use log::Level;
use logtest::Logger;
use rstest::fixture;

/// Handle to the global logger with exclusive access.
///
/// Tests hold the guard for their whole run so records emitted by one test
/// are never drained by another.
pub struct LoggerHandle {
    guard: MutexGuard<'static, Logger>,
}

impl LoggerHandle {
    /// Acquire the global [`Logger`] instance.
    pub fn new() -> Self {
        static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

        let logger = LOGGER.get_or_init(|| Mutex::new(Logger::start()));
        let guard = logger
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        Self { guard }
    }

    /// Discard every captured record.
    pub fn clear(&mut self) { while self.guard.pop().is_some() {} }

    /// Drain every captured record as `(level, message)` pairs.
    pub fn drain(&mut self) -> Vec<(Level, String)> {
        let mut out = Vec::new();
        while let Some(record) = self.guard.pop() {
            out.push((record.level(), record.args().to_string()));
        }
        out
    }

    /// Drain captured records and return the messages logged at `level`.
    pub fn messages_at(&mut self, level: Level) -> Vec<String> {
        self.drain()
            .into_iter()
            .filter(|(lvl, _)| *lvl == level)
            .map(|(_, message)| message)
            .collect()
    }
}

impl Default for LoggerHandle {
    fn default() -> Self { Self::new() }
}

impl std::ops::Deref for LoggerHandle {
    type Target = Logger;

    fn deref(&self) -> &Self::Target { &self.guard }
}

impl std::ops::DerefMut for LoggerHandle {
    fn deref_mut(&mut self) -> &mut Self::Target { &mut self.guard }
}

#[allow(
    unused_braces,
    reason = "rustc false positive for single line rstest fixtures"
)]
#[fixture]
pub fn logger() -> LoggerHandle { LoggerHandle::new() }
