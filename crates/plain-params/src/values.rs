//! The `{ real: {...}, virtual: {...} }` report returned by [`Params::values`](crate::Params::values).

use serde::Serialize;
use serde_json::{Map, Value};

/// Current field values, split by kind and in declaration order.
///
/// Recomputed on every call; holding one does not track later changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValuesReport {
    pub real: Map<String, Value>,
    #[serde(rename = "virtual")]
    pub r#virtual: Map<String, Value>,
}

impl ValuesReport {
    pub fn into_json(self) -> Value {
        let mut report = Map::with_capacity(2);
        report.insert("real".to_owned(), Value::Object(self.real));
        report.insert("virtual".to_owned(), Value::Object(self.r#virtual));
        Value::Object(report)
    }
}
