use thiserror::Error;
use tracing::{error, warn};

/// Domain errors for the Inkpad shell.
///
/// Most shell work is fire-and-forget (menu clicks, message forwarding) and
/// never produces an error at all; these variants cover the paths that can
/// genuinely fail: print jobs, the capture engine, and window operations.
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("print job has no content: exactly one of `html` or `src` is required")]
    PrintJobEmpty,

    #[error("print job is ambiguous: `html` and `src` are mutually exclusive")]
    PrintJobAmbiguous,

    #[error("PDF capture failed: {0}")]
    PdfCapture(String),

    #[error("PDF capture is not supported on this platform")]
    UnsupportedPlatform,
}

pub type Result<T> = std::result::Result<T, ShellError>;

/// Extension trait for silent error logging with caller location tracking.
/// Use on fire-and-forget paths where the operation is recoverable and the
/// requester receives no failure signal.
pub trait ResultExt<T> {
    /// Log error with caller location and return None. Use for recoverable failures.
    fn log_err(self) -> Option<T>;
    /// Log as warning with caller location and return None. Use for expected failures.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn log_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(err) => {
                let caller = std::panic::Location::caller();
                error!(
                    error = ?err,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation failed"
                );
                None
            }
        }
    }

    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(err) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = ?err,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_err_returns_value_on_ok() {
        let r: std::result::Result<i32, String> = Ok(7);
        assert_eq!(r.log_err(), Some(7));
    }

    #[test]
    fn log_err_returns_none_on_err() {
        let r: std::result::Result<i32, String> = Err("nope".into());
        assert_eq!(r.log_err(), None);
    }

    #[test]
    fn print_job_errors_display() {
        assert!(ShellError::PrintJobEmpty.to_string().contains("html"));
        assert!(ShellError::PrintJobAmbiguous
            .to_string()
            .contains("mutually exclusive"));
    }
}
