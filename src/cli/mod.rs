//! Binary-facing command implementations.

pub mod notify;
