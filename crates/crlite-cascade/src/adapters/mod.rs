//! Adapters Layer (Driven Adapters)
//!
//! Implementations of the outbound ports.
//!
//! - `CrliteApiClient` - HTTP client for `/revokedList` and `/cert`
//! - `FileCascadeSource` - Reads a cascade document from disk
//! - `BundledCascadeSource` - Parses a cascade document compiled into the host

pub mod cascade_file;
pub mod http_client;

pub use cascade_file::{BundledCascadeSource, FileCascadeSource};
pub use http_client::{CrliteApiClient, DEFAULT_REQUEST_TIMEOUT};
