//! # Declarations & Schemas
//!
//! A [`Declaration`] is what a model states about itself: which fields are
//! real, which are virtual, how derived virtual fields are computed, and any
//! extra validation rules. [`Schema::build`] checks the declaration once and
//! turns it into the immutable field table every instance binds against.
//!
//! Checks performed at build time, in order:
//!
//! 1. At least one field is declared ([`ParamsError::NoFieldsDeclared`]).
//! 2. No name is both real and virtual ([`ParamsError::DuplicateFields`]).
//! 3. Every rule targets a declared field ([`ParamsError::UnknownField`]).
//!
//! Declarations can also be read from JSON, which is how models whose fields
//! are only known at runtime are described:
//!
//! ```rust
//! use plain_params::Schema;
//!
//! let schema = Schema::from_json(
//!     "SignupParams",
//!     r#"{ "real_fields": ["email"], "virtual_fields": ["referrer"] }"#,
//! )
//! .unwrap();
//! assert_eq!(schema.real_fields().collect::<Vec<_>>(), ["email"]);
//! ```

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::error::ParamsError;
use crate::params::Params;
use crate::validation::{Rule, Validations};

/// Computes a derived virtual field from the instance's other fields.
///
/// Must tolerate missing prerequisites by returning `Value::Null`.
pub type Derive = fn(&Params) -> Value;

/// How a virtual field gets its value.
#[derive(Clone, Copy)]
pub enum VirtualField {
    /// A plain settable slot.
    Stored,
    /// Computed on every read; supplied input is ignored.
    Derived(Derive),
}

impl fmt::Debug for VirtualField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VirtualField::Stored => f.write_str("Stored"),
            VirtualField::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Real,
    Virtual(VirtualField),
}

#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    name: String,
    kind: FieldKind,
}

impl FieldDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn is_real(&self) -> bool {
        matches!(self.kind, FieldKind::Real)
    }

    pub fn is_virtual(&self) -> bool {
        !self.is_real()
    }

    pub fn is_derived(&self) -> bool {
        matches!(self.kind, FieldKind::Virtual(VirtualField::Derived(_)))
    }
}

/// Field lists and rules as a model states them, before any checking.
#[derive(Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Declaration {
    #[serde(default)]
    real_fields: Vec<String>,
    #[serde(default)]
    virtual_fields: Vec<String>,
    #[serde(skip)]
    derivations: Vec<(String, Derive)>,
    #[serde(skip)]
    rules: Vec<(String, Rule)>,
}

impl Declaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `{ "real_fields": [...], "virtual_fields": [...] }`.
    ///
    /// Either list may be omitted. Virtual fields read this way are stored.
    pub fn from_json(json: &str) -> Result<Self, ParamsError> {
        serde_json::from_str(json).map_err(|e| ParamsError::InvalidDeclaration(e.to_string()))
    }

    /// Appends real fields.
    pub fn real<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.real_fields.extend(names.into_iter().map(Into::into));
        self
    }

    /// Appends stored virtual fields.
    pub fn stored<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.virtual_fields.extend(names.into_iter().map(Into::into));
        self
    }

    /// Appends a derived virtual field.
    pub fn derived(mut self, name: impl Into<String>, derive: Derive) -> Self {
        let name = name.into();
        if !self.virtual_fields.contains(&name) {
            self.virtual_fields.push(name.clone());
        }
        self.derivations.push((name, derive));
        self
    }

    pub fn validates(mut self, field: impl Into<String>, rule: Rule) -> Self {
        self.rules.push((field.into(), rule));
        self
    }

    pub fn validates_presence_of<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules
            .extend(fields.into_iter().map(|f| (f.into(), Rule::Presence)));
        self
    }

    /// Adds a format rule; fails if `pattern` is not a valid regex.
    pub fn validates_format_of(self, field: &str, pattern: &str) -> Result<Self, ParamsError> {
        let rule = Rule::format(field, pattern)?;
        Ok(self.validates(field, rule))
    }

    pub fn real_fields(&self) -> &[String] {
        &self.real_fields
    }

    pub fn virtual_fields(&self) -> &[String] {
        &self.virtual_fields
    }
}

impl fmt::Debug for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Declaration")
            .field("real_fields", &self.real_fields)
            .field("virtual_fields", &self.virtual_fields)
            .field(
                "derived",
                &self.derivations.iter().map(|(n, _)| n).collect::<Vec<_>>(),
            )
            .field("rules", &self.rules)
            .finish()
    }
}

/// Naming information for a model, e.g. `TestParams` -> `test_params`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelName {
    name: String,
    singular: String,
    human: String,
}

impl ModelName {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let singular = underscore(&name);
        let human = crate::validation::humanize(&singular);
        Self {
            name,
            singular,
            human,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn singular(&self) -> &str {
        &self.singular
    }

    pub fn human(&self) -> &str {
        &self.human
    }

    /// Key under which form-style input for this model is nested.
    pub fn param_key(&self) -> &str {
        &self.singular
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

fn underscore(name: &str) -> String {
    let name = name.rsplit("::").next().unwrap_or(name);
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_lower) {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }
    out
}

/// The checked, immutable field table of a model.
#[derive(Debug)]
pub struct Schema {
    model_name: ModelName,
    fields: Vec<FieldDescriptor>,
    index: HashMap<String, usize>,
    validations: Validations,
}

impl Schema {
    /// Checks `declaration` and builds the field table.
    pub fn build(model: impl Into<String>, declaration: Declaration) -> Result<Self, ParamsError> {
        let model_name = ModelName::new(model);
        let Declaration {
            real_fields,
            virtual_fields,
            derivations,
            rules,
        } = declaration;

        if real_fields.is_empty() && virtual_fields.is_empty() {
            return Err(ParamsError::NoFieldsDeclared {
                model: model_name.name.clone(),
            });
        }

        let real_fields = dedup(real_fields);
        let virtual_fields = dedup(virtual_fields);

        let duplicated: Vec<String> = real_fields
            .iter()
            .filter(|f| virtual_fields.contains(f))
            .cloned()
            .collect();
        if !duplicated.is_empty() {
            return Err(ParamsError::DuplicateFields {
                model: model_name.name.clone(),
                fields: duplicated,
            });
        }

        let mut validations = Validations::new();
        let mut fields = Vec::with_capacity(real_fields.len() + virtual_fields.len());

        for name in real_fields {
            validations.register_presence_rule(name.as_str());
            fields.push(FieldDescriptor {
                name,
                kind: FieldKind::Real,
            });
        }

        for name in virtual_fields {
            let kind = derivations
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, derive)| VirtualField::Derived(*derive))
                .unwrap_or(VirtualField::Stored);
            fields.push(FieldDescriptor {
                name,
                kind: FieldKind::Virtual(kind),
            });
        }

        let index: HashMap<String, usize> = fields
            .iter()
            .enumerate()
            .map(|(i, f)| (f.name.clone(), i))
            .collect();

        for (field, rule) in rules {
            if !index.contains_key(&field) {
                return Err(ParamsError::UnknownField {
                    model: model_name.name.clone(),
                    field,
                });
            }
            if !validations.register(field.as_str(), rule) {
                trace!(model = %model_name, field = %field, "Rule already registered");
            }
        }

        debug!(
            model = %model_name,
            fields = fields.len(),
            rules = validations.len(),
            "Schema built"
        );

        Ok(Self {
            model_name,
            fields,
            index,
            validations,
        })
    }

    /// Builds a shared schema from a declaring closure.
    ///
    /// Typed models call this once from a `OnceLock`.
    pub fn define<F>(model: impl Into<String>, declare: F) -> Result<Arc<Self>, ParamsError>
    where
        F: FnOnce() -> Result<Declaration, ParamsError>,
    {
        let declaration = declare()?;
        Self::build(model, declaration).map(Arc::new)
    }

    pub fn from_json(model: impl Into<String>, json: &str) -> Result<Self, ParamsError> {
        Self::build(model, Declaration::from_json(json)?)
    }

    pub fn model_name(&self) -> &ModelName {
        &self.model_name
    }

    /// All fields, real first, each group in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.position(name).map(|i| &self.fields[i])
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn real_fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter(|f| f.is_real()).map(|f| f.name())
    }

    pub fn virtual_fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter(|f| f.is_virtual()).map(|f| f.name())
    }

    pub fn validations(&self) -> &Validations {
        &self.validations
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn unknown_field(&self, field: impl Into<String>) -> ParamsError {
        ParamsError::UnknownField {
            model: self.model_name.name.clone(),
            field: field.into(),
        }
    }
}

fn dedup(names: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}
