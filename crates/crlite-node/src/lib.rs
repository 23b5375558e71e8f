//! # CRLite Node
//!
//! Host runtime for the revocation engine. The `crlite-node` binary is a
//! thin CLI over [`RevocationRuntime`]; this library exposes the pieces for
//! integration tests.
//!
//! - `config` - `NodeConfig` from defaults, environment and flags
//! - `logging` - tracing subscriber setup
//! - `runtime` - startup, per-domain checks, shutdown
//! - `report` - `CheckReport` and domain input normalisation

pub mod config;
pub mod logging;
pub mod report;
pub mod runtime;

pub use config::{ConfigError, NodeConfig};
pub use logging::init_logging;
pub use report::{domain_from_input, CheckReport};
pub use runtime::{RevocationRuntime, BUNDLED_CASCADE};
