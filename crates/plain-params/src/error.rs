//! # Params Errors
//!
//! Errors raised while declaring a schema or constructing an instance from it.
//! Every variant aborts construction; no partially bound instance is ever
//! returned. Validation failures are not errors and live in
//! [`Errors`](crate::Errors) instead.

/// Errors that can occur while building a schema or binding input to it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamsError {
    /// The model declared neither real nor virtual fields.
    #[error("No real_fields or virtual_fields declared for {model}")]
    NoFieldsDeclared { model: String },

    /// One or more names appear in both the real and the virtual list.
    #[error(
        "Duplicated field(s) '{}' in real_fields and virtual_fields of {model}",
        .fields.join(", ")
    )]
    DuplicateFields { model: String, fields: Vec<String> },

    /// A key (input, rule or accessor) matches no declared field.
    #[error("field '{field}' is not in real_fields or virtual_fields of {model}")]
    UnknownField { model: String, field: String },

    /// Attempted write to a derived virtual field.
    #[error("field '{field}' of {model} is derived and cannot be assigned")]
    ReadOnlyField { model: String, field: String },

    /// A serialized declaration could not be parsed.
    #[error("Invalid declaration: {0}")]
    InvalidDeclaration(String),

    /// A validation rule could not be built (e.g. a bad format pattern).
    #[error("Invalid rule for field '{field}': {reason}")]
    InvalidRule { field: String, reason: String },

    /// Input handed to a JSON constructor was not an object.
    #[error("Invalid input for {model}: expected an object, got {found}")]
    InvalidInput { model: String, found: String },
}

impl ParamsError {
    /// Field names this error is about, if any.
    pub fn fields(&self) -> Vec<&str> {
        match self {
            ParamsError::DuplicateFields { fields, .. } => {
                fields.iter().map(String::as_str).collect()
            }
            ParamsError::UnknownField { field, .. }
            | ParamsError::ReadOnlyField { field, .. }
            | ParamsError::InvalidRule { field, .. } => vec![field.as_str()],
            _ => Vec::new(),
        }
    }
}
