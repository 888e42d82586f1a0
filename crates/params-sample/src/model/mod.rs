//! Sample params models.
//!
//! - [`PersonParams`] - two real fields, nothing else
//! - [`ProfileParams`] - real fields plus derived and stored virtual fields
//! - [`ContactParams`] - format rules on top of presence

pub mod contact;
pub mod person;
pub mod profile;

pub use contact::ContactParams;
pub use person::PersonParams;
pub use profile::ProfileParams;
