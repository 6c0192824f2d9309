use crate::runtime::error::RuntimeError;
use crate::runtime::iteration::for_each;
use crate::runtime::value::Value;

/// `sum(iterable, initial)`: left fold with the host `+`.
pub fn sum(iterable: &Value, initial: Value) -> Result<Value, RuntimeError> {
    let mut total = initial;
    for_each(iterable, |item| {
        total = total.add(&item)?;
        Ok(())
    })?;
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::sum;
    use crate::builtins::RangeParameters;
    use crate::builtins::xrange::LazyRange;
    use crate::runtime::error::RuntimeError;
    use crate::runtime::value::Value;

    fn ints(values: &[i64]) -> Value {
        Value::list(values.iter().copied().map(Value::Int).collect())
    }

    #[test]
    fn folds_from_the_initial_value() {
        assert_eq!(sum(&ints(&[1, 2, 3]), Value::Int(0)).expect("sum").repr(), "6");
        assert_eq!(sum(&ints(&[1, 2, 3]), Value::Int(10)).expect("sum").repr(), "16");
    }

    #[test]
    fn empty_input_returns_initial_unchanged() {
        let initial = Value::list(vec![Value::str("kept")]);
        let total = sum(&ints(&[]), initial.clone()).expect("empty sum");
        let (Value::List(total), Value::List(initial)) = (total, initial) else {
            panic!("sum should hand back the initial list");
        };
        assert!(std::rc::Rc::ptr_eq(&total, &initial));
        assert_eq!(sum(&ints(&[]), Value::None).expect("None").repr(), "None");
    }

    #[test]
    fn result_type_follows_plus() {
        let words = Value::list(vec![Value::str("a"), Value::str("b")]);
        assert_eq!(sum(&words, Value::str("")).expect("str sum").repr(), "'ab'");
        let nested = Value::list(vec![ints(&[1]), ints(&[2, 3])]);
        assert_eq!(
            sum(&nested, ints(&[])).expect("list sum").repr(),
            "[1, 2, 3]"
        );
    }

    #[test]
    fn plus_errors_propagate() {
        let mixed = Value::list(vec![Value::Int(1), Value::str("a")]);
        assert_eq!(
            sum(&mixed, Value::Int(0)).expect_err("int + str should fail"),
            RuntimeError::UnsupportedOperand {
                operation: "+".to_string(),
                lhs: "int".to_string(),
                rhs: "str".to_string(),
            }
        );
    }

    #[test]
    fn sums_a_lazy_range() {
        let generator = Value::Generator(
            LazyRange::new(RangeParameters {
                start: 1,
                end: 5,
                step: 1,
            })
            .into_ref(),
        );
        assert_eq!(sum(&generator, Value::Int(0)).expect("sum").repr(), "10");
        assert_eq!(sum(&generator, Value::Int(0)).expect("drained").repr(), "0");
    }
}
