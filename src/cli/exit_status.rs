use std::process::ExitCode;

use crate::issues::ScanStatus;

/// Exit status for CLI commands.
///
/// - `Success` (0): no error-severity violations (warnings and info allowed)
/// - `Failure` (1): at least one error-severity violation
/// - `Error` (2): fatal condition (bad root, no rules enabled, config error, interrupt)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ScanStatus> for ExitStatus {
    fn from(status: ScanStatus) -> Self {
        match status {
            ScanStatus::Clean | ScanStatus::Findings => ExitStatus::Success,
            ScanStatus::Failing => ExitStatus::Failure,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
