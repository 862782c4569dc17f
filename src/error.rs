use thiserror::Error;

/// Errors raised by the channel planner itself.
///
/// `TagSpanExceedsBandwidth` and `NoCoveringCandidate` are planning failures;
/// the other variants reject inputs that break the call contract.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error(
        "Tag frequencies span {span_hz:.0} Hz, which is more than the radio sample rate of {sample_rate_hz:.0} Hz; no single acquisition window can hold every tag."
    )]
    TagSpanExceedsBandwidth { span_hz: f64, sample_rate_hz: f64 },

    /// Candidate generation always yields at least one center (the
    /// feasible-window midpoint when the grid is empty), so `tuner` only hits
    /// this if that guarantee is broken. Selection over an empty table reports
    /// it instead of panicking.
    #[error("No candidate center frequency places every tag inside the acquisition band.")]
    NoCoveringCandidate,

    #[error("At least one tag frequency is required.")]
    EmptyTagList,

    #[error("Invalid sample rate {0} Hz (must be finite and > 0).")]
    InvalidSampleRate(f64),

    #[error("Invalid channel count {0} (must be >= 1).")]
    InvalidChannelCount(usize),

    #[error("Tag frequency at position {index} is not a finite number.")]
    NonFiniteTag { index: usize },
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<PlanError> for AppError {
    fn from(err: PlanError) -> Self {
        let exit_code = match err {
            PlanError::TagSpanExceedsBandwidth { .. } | PlanError::NoCoveringCandidate => 3,
            _ => 2,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_error_maps_to_exit_code_3() {
        let err: AppError = PlanError::TagSpanExceedsBandwidth {
            span_hz: 300_000.0,
            sample_rate_hz: 192_000.0,
        }
        .into();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("300000 Hz"));
    }

    #[test]
    fn contract_errors_map_to_exit_code_2() {
        let err: AppError = PlanError::EmptyTagList.into();
        assert_eq!(err.exit_code(), 2);
    }
}
