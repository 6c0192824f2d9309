use crate::runtime::error::RuntimeError;
use crate::runtime::iteration::for_each;
use crate::runtime::object::CallContext;
use crate::runtime::value::Value;

/// `map(func, iterable)`: calls `func` once per element, in order.
pub fn map(
    context: &mut dyn CallContext,
    func: &Value,
    iterable: &Value,
) -> Result<Value, RuntimeError> {
    let mut values = Vec::new();
    for_each(iterable, |item| {
        values.push(func.call(context, vec![item])?);
        Ok(())
    })?;
    Ok(Value::list(values))
}

/// `filter(func, iterable)`; a `None` predicate keeps truthy elements.
pub fn filter(
    context: &mut dyn CallContext,
    func: &Value,
    iterable: &Value,
) -> Result<Value, RuntimeError> {
    let mut values = Vec::new();
    for_each(iterable, |item| {
        let keep = match func {
            Value::None => item.is_truthy(),
            func => func.call(context, vec![item.clone()])?.is_truthy(),
        };
        if keep {
            values.push(item);
        }
        Ok(())
    })?;
    Ok(Value::list(values))
}
