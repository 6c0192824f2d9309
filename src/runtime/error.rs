use thiserror::Error;

use crate::runtime::exception::RaisedException;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("Function '{name}' expected {expected} arguments, got {found}")]
    FunctionArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("Function '{name}' expected {min} to {max} arguments, got {found}")]
    FunctionArityRange {
        name: String,
        min: usize,
        max: usize,
        found: usize,
    },
    #[error(
        "Invalid argument type for operation '{operation}': '{argument}' expected {expected}, got {got}"
    )]
    InvalidArgumentType {
        operation: String,
        argument: String,
        expected: String,
        got: String,
    },
    #[error("unsupported operand type(s) for {operation}: '{lhs}' and '{rhs}'")]
    UnsupportedOperand {
        operation: String,
        lhs: String,
        rhs: String,
    },
    #[error("Integer overflow in '{operation}'")]
    IntegerOverflow { operation: String },
    #[error("Object of type {type_name} is not iterable")]
    NotIterable { type_name: String },
    #[error("Object of type {type_name} is not callable")]
    ObjectNotCallable { type_name: String },
    #[error("Undefined function '{name}'")]
    UndefinedFunction { name: String },
    #[error("{exception}")]
    Raised { exception: RaisedException },
}

impl RuntimeError {
    pub fn expect_function_arity(
        name: &str,
        expected: usize,
        found: usize,
    ) -> Result<(), RuntimeError> {
        if expected == found {
            return Ok(());
        }
        Err(Self::FunctionArityMismatch {
            name: name.to_string(),
            expected,
            found,
        })
    }

    pub fn expect_function_arity_range(
        name: &str,
        min: usize,
        max: usize,
        found: usize,
    ) -> Result<(), RuntimeError> {
        if (min..=max).contains(&found) {
            return Ok(());
        }
        Err(Self::FunctionArityRange {
            name: name.to_string(),
            min,
            max,
            found,
        })
    }

    pub fn stop_iteration() -> Self {
        Self::Raised {
            exception: RaisedException::stop_iteration(),
        }
    }

    /// True when this error is the end-of-iteration signal rather than a failure.
    pub fn is_stop_iteration(&self) -> bool {
        matches!(self, Self::Raised { exception } if exception.is_stop_iteration())
    }
}

impl From<RaisedException> for RuntimeError {
    fn from(exception: RaisedException) -> Self {
        Self::Raised { exception }
    }
}

#[cfg(test)]
mod tests {
    use super::RuntimeError;
    use crate::runtime::exception::{ExceptionKind, RaisedException};

    #[test]
    fn arity_helpers_accept_matching_counts() {
        assert!(RuntimeError::expect_function_arity("map", 2, 2).is_ok());
        assert!(RuntimeError::expect_function_arity_range("range", 1, 3, 3).is_ok());
        assert_eq!(
            RuntimeError::expect_function_arity_range("range", 1, 3, 0)
                .expect_err("zero arguments should fail")
                .to_string(),
            "Function 'range' expected 1 to 3 arguments, got 0"
        );
    }

    #[test]
    fn only_stop_iteration_counts_as_end_of_iteration() {
        assert!(RuntimeError::stop_iteration().is_stop_iteration());
        let raised = RuntimeError::from(RaisedException::new(ExceptionKind::Exception, vec![]));
        assert!(!raised.is_stop_iteration());
        assert!(
            !RuntimeError::NotIterable {
                type_name: "int".to_string()
            }
            .is_stop_iteration()
        );
    }
}
