//! # Params Instance
//!
//! A [`Params`] is one bound instance of a [`Schema`]: a value slot per real
//! and stored virtual field, plus the errors of its last validation run.
//!
//! ## Construction
//!
//! [`Params::new`] is a single linear pass; it either returns a fully bound
//! instance or an error, never anything in between.
//!
//! 1. Every input key is normalized to a [`FieldKey`]. A key matching no
//!    declared field fails with [`ParamsError::UnknownField`] (the first
//!    offending key in input order is reported).
//! 2. Real fields bind their input value, or `null` when absent.
//! 3. Stored virtual fields bind a supplied non-null value.
//! 4. Values supplied for derived virtual fields are ignored; those fields are
//!    computed from the others on every read.
//!
//! Construction never validates. Call [`Params::is_valid`] to run the rules.

use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, trace};

use crate::error::ParamsError;
use crate::key::FieldKey;
use crate::schema::{FieldKind, ModelName, Schema, VirtualField};
use crate::validation::Errors;
use crate::values::ValuesReport;

#[derive(Debug, Clone)]
pub struct Params {
    schema: Arc<Schema>,
    slots: Vec<Value>,
    errors: Errors,
}

impl Params {
    /// Binds `input` against `schema`.
    pub fn new<I, K>(schema: Arc<Schema>, input: I) -> Result<Self, ParamsError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<FieldKey>,
    {
        let mut supplied: Vec<Option<Value>> = vec![None; schema.len()];
        for (key, value) in input {
            let key: FieldKey = key.into();
            let Some(position) = schema.position(key.as_str()) else {
                debug!(model = %schema.model_name(), field = %key, "Unknown field in input");
                return Err(schema.unknown_field(key.into_string()));
            };
            supplied[position] = Some(value);
        }

        let mut slots = Vec::with_capacity(schema.len());
        for (field, value) in schema.fields().iter().zip(supplied) {
            let slot = match (field.kind(), value) {
                (FieldKind::Real, value) => value.unwrap_or(Value::Null),
                (FieldKind::Virtual(VirtualField::Stored), value) => {
                    value.unwrap_or(Value::Null)
                }
                (FieldKind::Virtual(VirtualField::Derived(_)), Some(_)) => {
                    debug!(
                        model = %schema.model_name(),
                        field = field.name(),
                        "Ignoring input for derived field"
                    );
                    Value::Null
                }
                (FieldKind::Virtual(VirtualField::Derived(_)), None) => Value::Null,
            };
            slots.push(slot);
        }

        trace!(model = %schema.model_name(), fields = slots.len(), "Params bound");

        Ok(Self {
            schema,
            slots,
            errors: Errors::default(),
        })
    }

    /// Binds a JSON object. Anything other than an object is rejected.
    pub fn from_json(schema: Arc<Schema>, input: Value) -> Result<Self, ParamsError> {
        match input {
            Value::Object(map) => Self::new(schema, map),
            other => Err(ParamsError::InvalidInput {
                model: schema.model_name().name().to_owned(),
                found: json_type_name(&other).to_owned(),
            }),
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn model_name(&self) -> &ModelName {
        self.schema.model_name()
    }

    /// Current value of a declared field; `None` if the field is not declared.
    ///
    /// Derived fields are computed at call time.
    pub fn get(&self, field: impl Into<FieldKey>) -> Option<Value> {
        let field = field.into();
        let position = self.schema.position(field.as_str())?;
        Some(self.read(position))
    }

    /// The stored value of a real or stored virtual field.
    ///
    /// Derived fields have no slot and return `None`. Derivations use this to
    /// read their prerequisites without recursion.
    pub fn slot(&self, field: &str) -> Option<&Value> {
        let position = self.schema.position(field)?;
        match self.schema.fields()[position].kind() {
            FieldKind::Virtual(VirtualField::Derived(_)) => None,
            _ => self.slots.get(position),
        }
    }

    /// Mutable access to a real or stored virtual field's slot.
    pub fn slot_mut(&mut self, field: &str) -> Option<&mut Value> {
        let position = self.schema.position(field)?;
        match self.schema.fields()[position].kind() {
            FieldKind::Virtual(VirtualField::Derived(_)) => None,
            _ => self.slots.get_mut(position),
        }
    }

    /// Assigns a real or stored virtual field.
    pub fn set(&mut self, field: impl Into<FieldKey>, value: impl Into<Value>) -> Result<(), ParamsError> {
        let field = field.into();
        let Some(position) = self.schema.position(field.as_str()) else {
            return Err(self.schema.unknown_field(field.into_string()));
        };
        if let FieldKind::Virtual(VirtualField::Derived(_)) = self.schema.fields()[position].kind() {
            return Err(ParamsError::ReadOnlyField {
                model: self.schema.model_name().name().to_owned(),
                field: field.into_string(),
            });
        }
        self.slots[position] = value.into();
        Ok(())
    }

    fn read(&self, position: usize) -> Value {
        match self.schema.fields()[position].kind() {
            FieldKind::Virtual(VirtualField::Derived(derive)) => derive(self),
            _ => self.slots[position].clone(),
        }
    }

    /// Runs all registered rules and records their messages.
    pub fn is_valid(&mut self) -> bool {
        let errors = self.schema.validations().run(self);
        if !errors.is_empty() {
            debug!(
                model = %self.schema.model_name(),
                failures = errors.len(),
                fields = ?errors.fields().collect::<Vec<_>>(),
                "Validation failed"
            );
        }
        self.errors = errors;
        self.errors.is_empty()
    }

    pub fn is_invalid(&mut self) -> bool {
        !self.is_valid()
    }

    /// Messages from the last [`is_valid`](Self::is_valid) run.
    pub fn errors(&self) -> &Errors {
        &self.errors
    }

    /// Current values of every field, split into real and virtual.
    pub fn values(&self) -> ValuesReport {
        let mut report = ValuesReport::default();
        for (position, field) in self.schema.fields().iter().enumerate() {
            let value = self.read(position);
            let partition = if field.is_real() {
                &mut report.real
            } else {
                &mut report.r#virtual
            };
            partition.insert(field.name().to_owned(), value);
        }
        report
    }

    pub fn real_values(&self) -> Map<String, Value> {
        self.values().real
    }

    pub fn virtual_values(&self) -> Map<String, Value> {
        self.values().r#virtual
    }

    /// The values report as a JSON value.
    pub fn to_json(&self) -> Value {
        self.values().into_json()
    }

    /// Never persisted.
    pub fn is_persisted(&self) -> bool {
        false
    }

    pub fn to_model(&self) -> &Self {
        self
    }

    /// Identifying key; `None` since the object is never persisted.
    pub fn to_key(&self) -> Option<Vec<Value>> {
        None
    }

    pub fn to_param(&self) -> Option<String> {
        None
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
