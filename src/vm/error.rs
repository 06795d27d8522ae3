// VM Error types: load-time parse errors, execution faults, and the umbrella error

use thiserror::Error;

/// Errors raised while loading assembly source
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: empty label definition")]
    EmptyLabel { line: usize },
    #[error("line {line}: duplicate label '{label}'")]
    DuplicateLabel { line: usize, label: String },
}

/// Errors raised while executing a step
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecError {
    #[error("unknown instruction: {0}")]
    UnknownOpcode(String),
    #[error("unknown label: {0}")]
    UnknownLabel(String),
    #[error("unknown sensor: {0}")]
    UnknownSensor(String),
    #[error("unknown mode: {0}")]
    UnknownMode(String),
    #[error("unknown fan level: {0}")]
    UnknownFanLevel(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("step limit of {limit} reached (possible infinite loop)")]
    StepLimitExceeded { limit: u64 },
    #[error("{opcode} is missing operand {index}")]
    MissingOperand { opcode: String, index: usize },
    #[error("invalid register: {0}")]
    InvalidRegister(String),
    #[error("invalid integer literal: {0}")]
    InvalidInteger(String),
}

/// Any failure the VM can report to a caller
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VmError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Exec(#[from] ExecError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let err = ParseError::DuplicateLabel {
            line: 7,
            label: "loop".to_string(),
        };
        assert_eq!(err.to_string(), "line 7: duplicate label 'loop'");
        assert_eq!(
            ExecError::UnknownSensor("PRESSURE".into()).to_string(),
            "unknown sensor: PRESSURE"
        );
        assert_eq!(
            ExecError::StepLimitExceeded { limit: 5 }.to_string(),
            "step limit of 5 reached (possible infinite loop)"
        );
    }

    #[test]
    fn test_umbrella_conversion() {
        let err: VmError = ExecError::DivisionByZero.into();
        assert_eq!(err, VmError::Exec(ExecError::DivisionByZero));
        assert_eq!(err.to_string(), "division by zero");
    }
}
