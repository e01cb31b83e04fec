use std::fmt;

use thiserror::Error;

/// Recoverable failures raised inside the analysis engine.
///
/// Degenerate inputs (empty graphs, single nodes, self-loops) are not errors;
/// every metric returns a well-defined result for them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Power iteration did not settle within its iteration budget.
    #[error(
        "eigenvector centrality did not converge within {iterations} iterations (tolerance {tolerance:e})"
    )]
    ConvergenceFailure { iterations: usize, tolerance: f64 },

    /// A Unix timestamp that has no UTC date-time representation.
    #[error("timestamp {0} is outside the representable date range")]
    TimestampOutOfRange(i64),
}

impl CoreError {
    /// Machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::ConvergenceFailure { .. } => ErrorCode::ConvergenceFailure,
            Self::TimestampOutOfRange(_) => ErrorCode::TimestampOutOfRange,
        }
    }
}

/// Machine-readable error codes shared by the library and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    MalformedInput,
    ConfigParseError,
    TimestampOutOfRange,
    ConvergenceFailure,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::MalformedInput => "E1001",
            Self::ConfigParseError => "E1002",
            Self::TimestampOutOfRange => "E1003",
            Self::ConvergenceFailure => "E2001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::MalformedInput => "Malformed edge list",
            Self::ConfigParseError => "Config file parse error",
            Self::TimestampOutOfRange => "Timestamp out of range",
            Self::ConvergenceFailure => "Eigenvector centrality did not converge",
        }
    }

    /// Optional remediation hint that can be surfaced to analysts.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::MalformedInput => {
                Some("Edge lists need 'Node1', 'Node2' and 'Timestamp' columns.")
            }
            Self::ConfigParseError => Some("Fix syntax in the config file and retry."),
            Self::TimestampOutOfRange => Some("Timestamps must be Unix epoch seconds."),
            Self::ConvergenceFailure => Some(
                "Raise eigenvector.max_iterations or enable eigenvector.retry in the config.",
            ),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreError, ErrorCode};
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            ErrorCode::MalformedInput,
            ErrorCode::ConfigParseError,
            ErrorCode::TimestampOutOfRange,
            ErrorCode::ConvergenceFailure,
        ];

        let mut seen = HashSet::new();
        for code in all {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        let code = ErrorCode::ConvergenceFailure.code();
        assert_eq!(code.len(), 5);
        assert!(code.starts_with('E'));
        assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn core_errors_map_to_codes() {
        let err = CoreError::ConvergenceFailure {
            iterations: 10,
            tolerance: 1e-6,
        };
        assert_eq!(err.code(), ErrorCode::ConvergenceFailure);
        assert!(err.to_string().contains("10 iterations"));
        assert_eq!(
            CoreError::TimestampOutOfRange(-1).code(),
            ErrorCode::TimestampOutOfRange
        );
    }
}
