//! # Typed Models
//!
//! [`ParamsModel`] is the contract a typed params struct satisfies: it owns
//! one [`Schema`], built once per type, and wraps a [`Params`] instance bound
//! against it.
//!
//! Implementations are normally generated with [`plain_params!`](crate::plain_params),
//! which declares the struct, its schema and one accessor per field:
//!
//! ```rust
//! use plain_params::{fields, plain_params, Params, Value};
//!
//! fn age_in_days(params: &Params) -> Value {
//!     params
//!         .slot("age")
//!         .and_then(Value::as_i64)
//!         .and_then(|age| age.checked_mul(365))
//!         .map_or(Value::Null, Value::from)
//! }
//!
//! plain_params! {
//!     /// Who is signing up.
//!     pub struct PersonParams {
//!         real: [name, age],
//!         virtual: [age_in_days = age_in_days, nickname],
//!     }
//! }
//!
//! let mut person = PersonParams::new(fields! { name: "Jane", "age": 25 }).unwrap();
//! assert!(person.is_valid());
//! assert_eq!(person.age_in_days(), 9125);
//!
//! person.set_nickname("JJ");
//! assert_eq!(person.nickname(), "JJ");
//! ```
//!
//! Derived virtual fields (`name = function`) get a reader only. Real and
//! stored virtual fields get a reader and a `set_<name>` writer.

use serde_json::Value;
use std::sync::Arc;

use crate::error::ParamsError;
use crate::key::FieldKey;
use crate::params::Params;
use crate::schema::Schema;

/// A params type with a schema of its own.
pub trait ParamsModel: Sized {
    /// The shared schema, built on first use.
    ///
    /// A declaration error is returned on every call, so each construction
    /// attempt fails the same way.
    fn schema() -> Result<Arc<Schema>, ParamsError>;

    /// Wraps an instance already bound against [`ParamsModel::schema`].
    fn from_params(params: Params) -> Self;

    fn params(&self) -> &Params;

    fn params_mut(&mut self) -> &mut Params;

    fn into_params(self) -> Params;

    /// Binds `input` against this model's schema.
    fn construct<I, K>(input: I) -> Result<Self, ParamsError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<FieldKey>,
    {
        let params = Params::new(Self::schema()?, input)?;
        Ok(Self::from_params(params))
    }

    /// Binds a JSON object against this model's schema.
    fn construct_from_json(input: Value) -> Result<Self, ParamsError> {
        let params = Params::from_json(Self::schema()?, input)?;
        Ok(Self::from_params(params))
    }
}

/// Declares a typed params struct.
///
/// ```text
/// plain_params! {
///     pub struct ContactParams {
///         real: [name, email, phone],
///         virtual: [formatted_phone = formatted_phone, note],
///         validations: contact_validations,
///     }
/// }
/// ```
///
/// Each clause is optional; an omitted field list is empty. A `validations`
/// hook is a `fn(Declaration) -> Result<Declaration, ParamsError>` that adds
/// rules.
///
/// Field readers are inherent methods named after the field, so a field may
/// not take the name of a [`Params`](crate::Params) or [`ParamsModel`] method
/// (see [`RESERVED_FIELD_NAMES`]). Such a declaration fails to compile:
///
/// ```compile_fail
/// use plain_params::plain_params;
///
/// plain_params! {
///     struct ReportParams {
///         real: [title, errors],
///     }
/// }
/// ```
#[macro_export]
macro_rules! plain_params {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(real: [$($real:ident),* $(,)?] $(,)?)?
            $(virtual: [$($vfield:ident $(= $derive:path)?),* $(,)?] $(,)?)?
            $(validations: $validations:path $(,)?)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            params: $crate::Params,
        }

        const _: () = {
            $($(
                $crate::__plain_params_field_name!($real);
            )*)?
            $($(
                $crate::__plain_params_field_name!($vfield);
            )*)?
        };

        impl $crate::ParamsModel for $name {
            fn schema() -> ::core::result::Result<
                ::std::sync::Arc<$crate::Schema>,
                $crate::ParamsError,
            > {
                static SCHEMA: ::std::sync::OnceLock<
                    ::core::result::Result<::std::sync::Arc<$crate::Schema>, $crate::ParamsError>,
                > = ::std::sync::OnceLock::new();

                SCHEMA
                    .get_or_init(|| {
                        $crate::Schema::define(stringify!($name), || {
                            let real: &[&str] = &[$($(stringify!($real)),*)?];
                            #[allow(unused_mut)]
                            let mut declaration = $crate::Declaration::new()
                                .real(real.iter().copied());
                            $($(
                                declaration = $crate::__plain_params_virtual!(
                                    declaration, $vfield $(= $derive)?
                                );
                            )*)?
                            $(
                                declaration = $validations(declaration)?;
                            )?
                            ::core::result::Result::Ok(declaration)
                        })
                    })
                    .clone()
            }

            fn from_params(params: $crate::Params) -> Self {
                Self { params }
            }

            fn params(&self) -> &$crate::Params {
                &self.params
            }

            fn params_mut(&mut self) -> &mut $crate::Params {
                &mut self.params
            }

            fn into_params(self) -> $crate::Params {
                self.params
            }
        }

        impl $name {
            /// Binds `input`, failing on undeclared keys or a bad declaration.
            pub fn new<I, K>(input: I) -> ::core::result::Result<Self, $crate::ParamsError>
            where
                I: ::core::iter::IntoIterator<Item = (K, $crate::Value)>,
                K: ::core::convert::Into<$crate::FieldKey>,
            {
                <Self as $crate::ParamsModel>::construct(input)
            }

            pub fn from_json(
                input: $crate::Value,
            ) -> ::core::result::Result<Self, $crate::ParamsError> {
                <Self as $crate::ParamsModel>::construct_from_json(input)
            }

            $($(
                pub fn $real(&self) -> $crate::Value {
                    self.params.get(stringify!($real)).unwrap_or($crate::Value::Null)
                }
            )*)?

            $($(
                pub fn $vfield(&self) -> $crate::Value {
                    self.params.get(stringify!($vfield)).unwrap_or($crate::Value::Null)
                }
            )*)?
        }

        $($(
            $crate::__plain_params_setter!($name, $real);
        )*)?
        $($(
            $crate::__plain_params_setter!($name, $vfield $(= $derive)?);
        )*)?

        impl ::core::ops::Deref for $name {
            type Target = $crate::Params;

            fn deref(&self) -> &$crate::Params {
                &self.params
            }
        }

        impl ::core::ops::DerefMut for $name {
            fn deref_mut(&mut self) -> &mut $crate::Params {
                &mut self.params
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __plain_params_field_name {
    ($field:ident) => {
        ::core::assert!(
            !$crate::model::is_reserved_field_name(stringify!($field)),
            concat!(
                "field `",
                stringify!($field),
                "` would shadow a method of the same name"
            ),
        );
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __plain_params_virtual {
    ($declaration:ident, $field:ident = $derive:path) => {
        $declaration.derived(stringify!($field), $derive)
    };
    ($declaration:ident, $field:ident) => {
        $declaration.stored([stringify!($field)])
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __plain_params_setter {
    ($name:ident, $field:ident = $derive:path) => {};
    ($name:ident, $field:ident) => {
        $crate::__private::paste::paste! {
            impl $name {
                pub fn [<set_ $field>](&mut self, value: impl ::core::convert::Into<$crate::Value>) {
                    if let ::core::option::Option::Some(slot) =
                        self.params.slot_mut(stringify!($field))
                    {
                        *slot = value.into();
                    }
                }
            }
        }
    };
}

/// Names a typed model cannot give a field: its own constructors plus the
/// methods of [`Params`] and [`ParamsModel`].
pub const RESERVED_FIELD_NAMES: &[&str] = &[
    "new",
    "from_json",
    "construct",
    "construct_from_json",
    "from_params",
    "params",
    "params_mut",
    "into_params",
    "schema",
    "model_name",
    "get",
    "set",
    "slot",
    "slot_mut",
    "is_valid",
    "is_invalid",
    "errors",
    "values",
    "real_values",
    "virtual_values",
    "to_json",
    "is_persisted",
    "to_model",
    "to_key",
    "to_param",
];

/// Whether `name` is one of [`RESERVED_FIELD_NAMES`]. Usable in constants.
pub const fn is_reserved_field_name(name: &str) -> bool {
    let mut i = 0;
    while i < RESERVED_FIELD_NAMES.len() {
        if same_bytes(RESERVED_FIELD_NAMES[i].as_bytes(), name.as_bytes()) {
            return true;
        }
        i += 1;
    }
    false
}

const fn same_bytes(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// Builds an input list from `key: value` pairs.
///
/// Keys may be bare identifiers (symbol-like) or string literals; values are
/// anything convertible into [`Value`](crate::Value).
///
/// ```rust
/// use plain_params::fields;
///
/// let input = fields! { name: "John", "age": 30 };
/// assert_eq!(input.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    ($($key:tt : $value:expr),* $(,)?) => {{
        let input: ::std::vec::Vec<($crate::FieldKey, $crate::Value)> = ::std::vec![
            $((
                $crate::FieldKey::from($crate::__field_key!($key)),
                ::core::convert::Into::<$crate::Value>::into($value),
            )),*
        ];
        input
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field_key {
    ($key:ident) => {
        $crate::Symbol(stringify!($key))
    };
    ($key:literal) => {
        $key
    };
}
