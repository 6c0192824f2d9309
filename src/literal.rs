//! YAML literals as host values.
//!
//! `null`, booleans, integers, strings and sequences map onto the matching
//! host values; `!tuple [..]` builds a tuple and `'@name'` looks a global up
//! (e.g. `@repr`, `@AssertionError`).

use std::collections::HashMap;

use thiserror::Error;

use crate::runtime::value::Value;

#[derive(Debug, Error)]
pub enum LiteralError {
    #[error("Invalid literal: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Unsupported literal {kind}: only null, bool, int, str, sequences and !tuple are allowed")]
    Unsupported { kind: String },
    #[error("Unknown global '{name}'")]
    UnknownGlobal { name: String },
}

/// Parses one literal; a bare `@name` skips YAML, where `@` is reserved.
pub fn parse_literal(source: &str, globals: &HashMap<String, Value>) -> Result<Value, LiteralError> {
    if let Some(name) = source.trim().strip_prefix('@') {
        return global(name, globals);
    }
    let literal: serde_yaml::Value = serde_yaml::from_str(source)?;
    from_yaml(&literal, globals)
}

pub fn from_yaml(
    literal: &serde_yaml::Value,
    globals: &HashMap<String, Value>,
) -> Result<Value, LiteralError> {
    use serde_yaml::Value as Yaml;

    match literal {
        Yaml::Null => Ok(Value::None),
        Yaml::Bool(value) => Ok(Value::Bool(*value)),
        Yaml::Number(number) => number.as_i64().map(Value::Int).ok_or_else(|| {
            LiteralError::Unsupported {
                kind: format!("number {number}"),
            }
        }),
        Yaml::String(text) => match text.strip_prefix('@') {
            Some(name) => global(name, globals),
            None => Ok(Value::str(text)),
        },
        Yaml::Sequence(items) => Ok(Value::list(sequence(items, globals)?)),
        Yaml::Tagged(tagged) if tagged.tag == "tuple" => match &tagged.value {
            Yaml::Sequence(items) => Ok(Value::tuple(sequence(items, globals)?)),
            _ => Err(LiteralError::Unsupported {
                kind: "!tuple without a sequence".to_string(),
            }),
        },
        Yaml::Tagged(tagged) => Err(LiteralError::Unsupported {
            kind: format!("tag {}", tagged.tag),
        }),
        Yaml::Mapping(_) => Err(LiteralError::Unsupported {
            kind: "mapping".to_string(),
        }),
    }
}

fn global(name: &str, globals: &HashMap<String, Value>) -> Result<Value, LiteralError> {
    globals
        .get(name)
        .cloned()
        .ok_or_else(|| LiteralError::UnknownGlobal {
            name: name.to_string(),
        })
}

fn sequence(
    items: &[serde_yaml::Value],
    globals: &HashMap<String, Value>,
) -> Result<Vec<Value>, LiteralError> {
    items.iter().map(|item| from_yaml(item, globals)).collect()
}
