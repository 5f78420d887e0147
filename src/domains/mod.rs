//! Domain modules containing business logic.
//!
//! Each domain is a bounded context with its own errors and services:
//! - **tools**: the registry, validator and invoker behind `tools/list` and `tools/call`
//! - **artifacts**: generated binaries served back by opaque id

pub mod artifacts;
pub mod tools;
