//! Typed records shared across the store, service and HTTP layers.

pub mod email;
pub mod request;
