//! # Plain Params
//!
//! Declarative params objects: a type lists its **real** fields (supplied by
//! the caller and required) and its **virtual** fields (extra stored slots, or
//! values derived from the real ones), and gets construction from a key-value
//! map, per-field accessors, presence validation and a uniform values report.
//!
//! ## Architecture Overview
//!
//! 1. **Declaration** ([`Declaration`]) - the field lists and extra rules a model states
//! 2. **Schema** ([`Schema`]) - the checked, immutable field table, built once per model
//! 3. **Instance** ([`Params`]) - values bound against a schema, plus validation state
//!
//! Typed models wrap the three behind [`ParamsModel`], usually via
//! [`plain_params!`].
//!
//! ## Example
//!
//! ```rust
//! use plain_params::{fields, plain_params, ParamsError};
//!
//! plain_params! {
//!     pub struct PersonParams {
//!         real: [name, age],
//!     }
//! }
//!
//! let mut person = PersonParams::new(fields! { name: "John" }).unwrap();
//! assert!(!person.is_valid());
//! assert_eq!(person.errors().get("age"), ["can't be blank"]);
//! assert!(!person.is_persisted());
//!
//! let err = PersonParams::new(fields! { city: "Lisbon" }).unwrap_err();
//! assert!(matches!(err, ParamsError::UnknownField { .. }));
//! ```
//!
//! ## Runtime Schemas
//!
//! Models whose fields are only known at runtime skip the macro and bind
//! against a [`Schema`] directly, built from code or from JSON:
//!
//! ```rust
//! use plain_params::{Declaration, Params, Schema};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let schema = Arc::new(
//!     Schema::build("SignupParams", Declaration::new().real(["email"]).stored(["referrer"]))
//!         .unwrap(),
//! );
//! let params = Params::from_json(schema, json!({ "email": "a@b.co", "referrer": "ad" })).unwrap();
//! assert_eq!(params.values().r#virtual["referrer"], "ad");
//! ```
//!
//! ## Errors
//!
//! Declaration and binding problems are [`ParamsError`]s and abort
//! construction. Validation failures are not errors; they are collected in
//! [`Errors`] by [`Params::is_valid`].

pub mod error;
pub mod key;
pub mod model;
pub mod params;
pub mod schema;
pub mod tracing;
pub mod validation;
pub mod values;

// Re-export core types for convenience
pub use error::ParamsError;
pub use key::{FieldKey, Symbol};
pub use model::ParamsModel;
pub use params::Params;
pub use schema::{Declaration, Derive, FieldDescriptor, FieldKind, ModelName, Schema, VirtualField};
pub use serde_json::{Map, Value};
pub use validation::{is_blank, Errors, Rule, Validations};
pub use values::ValuesReport;

#[doc(hidden)]
pub mod __private {
    pub use paste;
}
