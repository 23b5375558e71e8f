//! # CRLite Test Suite
//!
//! Unified test crate.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── fixtures/          # Cascade documents with known classifications
//! └── src/
//!     ├── support.rs     # In-process revocation backend (axum)
//!     └── integration/
//!         ├── cascade_compat.rs   # Bit-exact classification of fixtures
//!         ├── http_adapters.rs    # reqwest client against the backend
//!         └── runtime_flow.rs     # start / check_domain / shutdown
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p crlite-tests
//! cargo test -p crlite-tests integration::runtime_flow::
//! ```

pub mod integration;
pub mod support;
