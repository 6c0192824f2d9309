//! Lazy, one-shot integer ranges.
//!
//! A `LazyRange` is the suspended state of an `xrange` generator body: the
//! next value to hand out plus where it is in its lifecycle. Each `resume`
//! runs the body up to its next yield. Arguments that never iterate make the
//! first resume raise `StopIteration` (unlike `range`, which prints a
//! diagnostic and returns an empty list).

use std::cell::RefCell;
use std::rc::Rc;

use crate::builtins::range::RangeParameters;
use crate::runtime::error::RuntimeError;
use crate::runtime::exception::RaisedException;
use crate::runtime::value::Value;

pub type GeneratorRef = Rc<RefCell<LazyRange>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorState {
    Created,
    /// Only held while `resume` is executing.
    Running,
    Suspended,
    Exhausted,
}

#[derive(Debug, Clone)]
pub enum Resumption {
    Yielded(i64),
    /// The body finished, or had already finished before this resume.
    Returned,
    /// The body raised its termination signal instead of yielding.
    Raised(RaisedException),
}

#[derive(Debug)]
pub struct LazyRange {
    parameters: RangeParameters,
    current: i64,
    state: GeneratorState,
}

impl LazyRange {
    pub fn new(parameters: RangeParameters) -> Self {
        Self {
            parameters,
            current: parameters.start,
            state: GeneratorState::Created,
        }
    }

    pub fn into_ref(self) -> GeneratorRef {
        Rc::new(RefCell::new(self))
    }

    pub fn parameters(&self) -> RangeParameters {
        self.parameters
    }

    pub fn state(&self) -> GeneratorState {
        self.state
    }

    pub fn resume(&mut self) -> Resumption {
        match self.state {
            GeneratorState::Exhausted => Resumption::Returned,
            GeneratorState::Created => {
                self.state = GeneratorState::Running;
                if !self.parameters.is_consistent() {
                    self.state = GeneratorState::Exhausted;
                    tracing::debug!(
                        start = self.parameters.start,
                        end = self.parameters.end,
                        step = self.parameters.step,
                        "xrange arguments never iterate, raising StopIteration"
                    );
                    return Resumption::Raised(RaisedException::stop_iteration());
                }
                self.suspend_at(self.current)
            }
            GeneratorState::Running | GeneratorState::Suspended => {
                self.state = GeneratorState::Running;
                match self.parameters.step_from(self.current) {
                    Some(next) => self.suspend_at(next),
                    None => {
                        self.state = GeneratorState::Exhausted;
                        Resumption::Returned
                    }
                }
            }
        }
    }

    fn suspend_at(&mut self, value: i64) -> Resumption {
        self.current = value;
        self.state = GeneratorState::Suspended;
        Resumption::Yielded(value)
    }
}

impl Iterator for LazyRange {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        match self.resume() {
            Resumption::Yielded(value) => Some(value),
            Resumption::Returned | Resumption::Raised(_) => None,
        }
    }
}

/// `xrange(...)`: validates the arguments now, iterates later.
pub fn xrange(args: &[Value]) -> Result<Value, RuntimeError> {
    let parameters = RangeParameters::from_args("xrange", args)?;
    Ok(Value::Generator(LazyRange::new(parameters).into_ref()))
}

#[cfg(test)]
mod tests {
    use super::{GeneratorState, LazyRange, Resumption, xrange};
    use crate::builtins::range::RangeParameters;
    use crate::runtime::error::RuntimeError;
    use crate::runtime::value::Value;

    fn lazy(start: i64, end: i64, step: i64) -> LazyRange {
        LazyRange::new(RangeParameters { start, end, step })
    }

    fn drain(range: &mut LazyRange) -> Vec<i64> {
        let mut values = Vec::new();
        while let Resumption::Yielded(value) = range.resume() {
            values.push(value);
        }
        values
    }

    #[test]
    fn yields_values_then_returns() {
        let mut range = lazy(0, 3, 1);
        assert_eq!(range.state(), GeneratorState::Created);
        assert!(matches!(range.resume(), Resumption::Yielded(0)));
        assert_eq!(range.state(), GeneratorState::Suspended);
        assert!(matches!(range.resume(), Resumption::Yielded(1)));
        assert!(matches!(range.resume(), Resumption::Yielded(2)));
        assert!(matches!(range.resume(), Resumption::Returned));
        assert_eq!(range.state(), GeneratorState::Exhausted);
    }

    #[test]
    fn inconsistent_arguments_raise_stop_iteration_first() {
        let mut range = lazy(3, 3, 1);
        match range.resume() {
            Resumption::Raised(exception) => assert!(exception.is_stop_iteration()),
            other => panic!("expected StopIteration, got {other:?}"),
        }
        assert_eq!(range.state(), GeneratorState::Exhausted);
        assert!(matches!(range.resume(), Resumption::Returned));
    }

    #[test]
    fn exhausted_generator_stays_exhausted() {
        let mut range = lazy(5, 2, -1);
        assert_eq!(drain(&mut range), [5, 4, 3]);
        assert!(drain(&mut range).is_empty());
        assert!(matches!(range.resume(), Resumption::Returned));
    }

    #[test]
    fn resumes_where_it_left_off() {
        let mut range = lazy(2, 9, 3);
        assert!(matches!(range.resume(), Resumption::Yielded(2)));
        assert_eq!(drain(&mut range), [5, 8]);
    }

    #[test]
    fn iterator_adapter_hides_termination() {
        assert_eq!(lazy(0, 10, 4).collect::<Vec<_>>(), [0, 4, 8]);
        assert_eq!(lazy(1, 0, 1).count(), 0);
    }

    #[test]
    fn xrange_checks_arguments_eagerly() {
        let generator = xrange(&[Value::Int(3)]).expect("xrange");
        assert_eq!(generator.type_name(), "generator");
        assert_eq!(
            xrange(&[]).expect_err("no args"),
            RuntimeError::FunctionArityRange {
                name: "xrange".to_string(),
                min: 1,
                max: 3,
                found: 0,
            }
        );
        assert!(xrange(&[Value::Int(3), Value::Int(3)]).is_ok());
    }
}
