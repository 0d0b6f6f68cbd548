use serde_json::{Map, Value};

/// Parses a `key=value` argument.
pub fn key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected `key=value`, got `{}`", s)),
    }
}

/// Collects `key=value` pairs into a JSON object. Repeated keys become arrays.
pub fn to_object(pairs: &[(String, String)]) -> Value {
    let mut object = Map::new();
    for (key, value) in pairs {
        let value = Value::String(value.clone());
        match object.remove(key) {
            None => {
                object.insert(key.clone(), value);
            }
            Some(Value::Array(mut values)) => {
                values.push(value);
                object.insert(key.clone(), Value::Array(values));
            }
            Some(existing) => {
                object.insert(key.clone(), Value::Array(vec![existing, value]));
            }
        }
    }

    Value::Object(object)
}
