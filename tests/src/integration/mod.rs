//! Cross-crate integration tests.

pub mod http_adapters;
pub mod runtime_flow;
