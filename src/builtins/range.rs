//! Argument normalization shared by `range` and `xrange`, and the eager
//! `range` materializer.
//!
//! The two producers disagree on arguments that describe no iteration at all:
//! `range` prints a diagnostic and returns an empty list, while `xrange`
//! raises `StopIteration` from its first resume. Both behaviors are kept as
//! they are.

use std::iter;

use crate::runtime::error::RuntimeError;
use crate::runtime::object::CallContext;
use crate::runtime::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeParameters {
    pub start: i64,
    pub end: i64,
    pub step: i64,
}

impl RangeParameters {
    /// Normalizes `(end)`, `(start, end)` or `(start, end, step)`.
    pub fn from_args(name: &str, args: &[Value]) -> Result<Self, RuntimeError> {
        RuntimeError::expect_function_arity_range(name, 1, 3, args.len())?;
        let int_arg = |index: usize, argument: &str| -> Result<i64, RuntimeError> {
            let value = &args[index];
            value
                .as_int()
                .ok_or_else(|| RuntimeError::InvalidArgumentType {
                    operation: name.to_string(),
                    argument: argument.to_string(),
                    expected: "int".to_string(),
                    got: value.type_name().to_string(),
                })
        };
        match args.len() {
            1 => Ok(Self {
                start: 0,
                end: int_arg(0, "end")?,
                step: 1,
            }),
            2 => Ok(Self {
                start: int_arg(0, "start")?,
                end: int_arg(1, "end")?,
                step: 1,
            }),
            _ => Ok(Self {
                start: int_arg(0, "start")?,
                end: int_arg(1, "end")?,
                step: int_arg(2, "step")?,
            }),
        }
    }

    pub fn continues_from(&self, current: i64) -> bool {
        (current < self.end && self.step > 0) || (current > self.end && self.step < 0)
    }

    /// False when the triple never iterates, `start == end` and zero steps included.
    pub fn is_consistent(&self) -> bool {
        self.continues_from(self.start)
    }

    /// Next value after `current`, if iteration goes on past it.
    ///
    /// An overflowing step ends iteration: the value would lie beyond `end`.
    pub fn step_from(&self, current: i64) -> Option<i64> {
        current
            .checked_add(self.step)
            .filter(|&next| self.continues_from(next))
    }

    pub fn values(self) -> impl Iterator<Item = i64> {
        let first = Some(self.start).filter(|_| self.is_consistent());
        iter::successors(first, move |&current| self.step_from(current))
    }
}

/// `range(...)`: an eager list, or an empty list plus a diagnostic.
pub fn range(context: &mut dyn CallContext, args: &[Value]) -> Result<Value, RuntimeError> {
    let parameters = RangeParameters::from_args("range", args)?;
    Ok(Value::list(materialize(context, parameters)))
}

pub fn materialize(context: &mut dyn CallContext, parameters: RangeParameters) -> Vec<Value> {
    if !parameters.is_consistent() {
        tracing::warn!(
            start = parameters.start,
            end = parameters.end,
            step = parameters.step,
            "range arguments never iterate, returning an empty list"
        );
        let diagnostic = context.config().range_diagnostic.clone();
        context.write_output(diagnostic);
        return Vec::new();
    }
    parameters.values().map(Value::Int).collect()
}
