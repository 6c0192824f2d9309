//! Host iteration protocol.
//!
//! `iterate` is the `GET_ITER` step and `ValueIter::next_value` the `__next__`
//! step; running out is reported as a raised `StopIteration`. `for_each` is
//! the `FOR_ITER` loop: it treats that signal as the normal end of the
//! sequence and lets every other error through untouched.

use std::cell::RefCell;
use std::rc::Rc;

use crate::builtins::xrange::{GeneratorRef, Resumption};
use crate::runtime::error::RuntimeError;
use crate::runtime::list::ListRef;
use crate::runtime::value::Value;

pub type IteratorRef = Rc<RefCell<ValueIter>>;

#[derive(Debug)]
pub enum ValueIter {
    List { list: ListRef, index: usize },
    Tuple { values: Rc<[Value]>, index: usize },
    Str { chars: Vec<char>, index: usize },
    Generator(GeneratorRef),
}

impl ValueIter {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::List { .. } => "list_iterator",
            Self::Tuple { .. } => "tuple_iterator",
            Self::Str { .. } => "str_iterator",
            Self::Generator(_) => "generator",
        }
    }

    pub fn next_value(&mut self) -> Result<Value, RuntimeError> {
        match self {
            Self::List { list, index } => {
                let item = list.borrow().__getitem__(*index);
                let value = item.ok_or_else(RuntimeError::stop_iteration)?;
                *index += 1;
                Ok(value)
            }
            Self::Tuple { values, index } => {
                let value = values
                    .get(*index)
                    .cloned()
                    .ok_or_else(RuntimeError::stop_iteration)?;
                *index += 1;
                Ok(value)
            }
            Self::Str { chars, index } => {
                let ch = chars
                    .get(*index)
                    .copied()
                    .ok_or_else(RuntimeError::stop_iteration)?;
                *index += 1;
                Ok(Value::str(ch.to_string()))
            }
            Self::Generator(generator) => resume_generator(generator),
        }
    }
}

/// Resumes a generator through the host protocol.
///
/// A finished body surfaces as a fresh `StopIteration`; a body that raised
/// its own termination signal surfaces as that instance.
pub fn resume_generator(generator: &GeneratorRef) -> Result<Value, RuntimeError> {
    let resumption = generator.borrow_mut().resume();
    match resumption {
        Resumption::Yielded(value) => Ok(Value::Int(value)),
        Resumption::Returned => Err(RuntimeError::stop_iteration()),
        Resumption::Raised(exception) => Err(exception.into()),
    }
}

pub fn iterate(value: &Value) -> Result<IteratorRef, RuntimeError> {
    let iterator = match value {
        Value::Iterator(iterator) => return Ok(iterator.clone()),
        Value::List(list) => ValueIter::List {
            list: list.clone(),
            index: 0,
        },
        Value::Tuple(values) => ValueIter::Tuple {
            values: values.clone(),
            index: 0,
        },
        Value::Str(text) => ValueIter::Str {
            chars: text.chars().collect(),
            index: 0,
        },
        Value::Generator(generator) => ValueIter::Generator(generator.clone()),
        other => {
            return Err(RuntimeError::NotIterable {
                type_name: other.type_name().to_string(),
            });
        }
    };
    Ok(Rc::new(RefCell::new(iterator)))
}

/// `iter(value)`: generators and iterators are their own iterators.
pub fn get_iter(value: &Value) -> Result<Value, RuntimeError> {
    match value {
        Value::Generator(_) | Value::Iterator(_) => Ok(value.clone()),
        other => iterate(other).map(Value::Iterator),
    }
}

/// `next(value)`.
pub fn next_value(value: &Value) -> Result<Value, RuntimeError> {
    match value {
        Value::Generator(generator) => resume_generator(generator),
        Value::Iterator(iterator) => iterator.borrow_mut().next_value(),
        other => Err(RuntimeError::InvalidArgumentType {
            operation: "next".to_string(),
            argument: "iterator".to_string(),
            expected: "iterator".to_string(),
            got: other.type_name().to_string(),
        }),
    }
}

pub fn for_each(
    iterable: &Value,
    mut body: impl FnMut(Value) -> Result<(), RuntimeError>,
) -> Result<(), RuntimeError> {
    let iterator = iterate(iterable)?;
    loop {
        let next = iterator.borrow_mut().next_value();
        match next {
            Ok(value) => body(value)?,
            Err(error) if error.is_stop_iteration() => return Ok(()),
            Err(error) => return Err(error),
        }
    }
}

pub fn collect(iterable: &Value) -> Result<Vec<Value>, RuntimeError> {
    let mut values = Vec::new();
    for_each(iterable, |value| {
        values.push(value);
        Ok(())
    })?;
    Ok(values)
}
