//! Delivery backends. Each sink performs one synchronous send with no retries.

pub mod email;
pub mod webhook;
