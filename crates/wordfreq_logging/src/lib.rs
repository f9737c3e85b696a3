#![deny(missing_docs)]
//! Shared logging utilities for the wordfreq workspace.
//!
//! This crate provides the `wordfreq_*` logging macros used across the
//! codebase, a thread-local job scope that tags log lines with the job being
//! processed, and a minimal test initializer for the global logger.

use std::cell::Cell;

thread_local! {
    /// Job currently being processed on this thread, if any.
    static CURRENT_JOB: Cell<Option<u64>> = const { Cell::new(None) };
}

/// Returns the job id of the enclosing [`JobScope`] on this thread.
pub fn current_job() -> Option<u64> {
    CURRENT_JOB.with(|v| v.get())
}

/// Tags every `wordfreq_*` log line on the current thread with a job id
/// until dropped. Scopes nest; dropping restores the outer job id.
#[must_use = "the job tag is removed as soon as the scope is dropped"]
#[derive(Debug)]
pub struct JobScope {
    previous: Option<u64>,
}

impl JobScope {
    /// Enters a scope for `job_id` on the current thread.
    pub fn enter(job_id: u64) -> Self {
        let previous = CURRENT_JOB.with(|v| v.replace(Some(job_id)));
        Self { previous }
    }
}

impl Drop for JobScope {
    fn drop(&mut self) {
        CURRENT_JOB.with(|v| v.set(self.previous));
    }
}

/// Shared body of the `wordfreq_*` macros.
#[doc(hidden)]
#[macro_export]
macro_rules! __wordfreq_log {
    ($level:expr, $($arg:tt)*) => {{
        match $crate::current_job() {
            Some(job) => log::log!($level, "[job {}] {}", job, format_args!($($arg)*)),
            None => log::log!($level, $($arg)*),
        }
    }};
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! wordfreq_trace {
    ($($arg:tt)*) => {
        $crate::__wordfreq_log!(log::Level::Trace, $($arg)*)
    };
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! wordfreq_debug {
    ($($arg:tt)*) => {
        $crate::__wordfreq_log!(log::Level::Debug, $($arg)*)
    };
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! wordfreq_info {
    ($($arg:tt)*) => {
        $crate::__wordfreq_log!(log::Level::Info, $($arg)*)
    };
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! wordfreq_warn {
    ($($arg:tt)*) => {
        $crate::__wordfreq_log!(log::Level::Warn, $($arg)*)
    };
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! wordfreq_error {
    ($($arg:tt)*) => {
        $crate::__wordfreq_log!(log::Level::Error, $($arg)*)
    };
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Another test may already have installed the logger.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::{current_job, initialize_for_tests, JobScope};

    #[test]
    fn job_scope_sets_and_restores() {
        assert_eq!(current_job(), None);
        {
            let _outer = JobScope::enter(1);
            assert_eq!(current_job(), Some(1));
            {
                let _inner = JobScope::enter(2);
                assert_eq!(current_job(), Some(2));
            }
            assert_eq!(current_job(), Some(1));
        }
        assert_eq!(current_job(), None);
    }

    #[test]
    fn job_scope_is_thread_local() {
        let _scope = JobScope::enter(9);
        let seen = std::thread::spawn(current_job).join().unwrap();
        assert_eq!(seen, None);
        assert_eq!(current_job(), Some(9));
    }

    #[test]
    fn macros_accept_format_arguments() {
        initialize_for_tests();
        let _scope = JobScope::enter(3);
        wordfreq_info!("counted {} words in {} chunks", 10, 2);
        wordfreq_debug!("plain message");
        wordfreq_trace!("value={value}", value = 1);
    }
}
