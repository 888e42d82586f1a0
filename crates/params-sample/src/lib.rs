//! # Params Sample Library
//!
//! Example models built on [`plain_params`], exposed for the demo binary and
//! integration tests.

pub mod model;
