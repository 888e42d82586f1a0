use plain_params::{plain_params, Params, Value};

plain_params! {
    /// A person with values computed from the real fields.
    ///
    /// `age_in_days` and `full_description` are derived and ignore supplied
    /// input. `nickname` is a stored virtual field: optional, settable, never
    /// validated.
    pub struct ProfileParams {
        real: [name, age],
        virtual: [
            age_in_days = age_in_days,
            full_description = full_description,
            nickname,
        ],
    }
}

fn age_in_days(params: &Params) -> Value {
    let Some(Value::Number(age)) = params.slot("age") else {
        return Value::Null;
    };
    match age.as_i64() {
        Some(age) => age.checked_mul(365).map_or(Value::Null, Value::from),
        None => age.as_f64().map_or(Value::Null, |age| Value::from(age * 365.0)),
    }
}

fn full_description(params: &Params) -> Value {
    let name = params.slot("name").and_then(text);
    let age = params.slot("age").and_then(text);
    match (name, age) {
        (Some(name), Some(age)) => Value::from(format!("{} is {} years old", name, age)),
        _ => Value::Null,
    }
}

/// Interpolation text; `null` and `false` have none.
fn text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
