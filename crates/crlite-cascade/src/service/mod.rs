//! Service Layer
//!
//! - `RevocationEngine`: implements `RevocationApi` over the domain types
//! - `FeedRefresher`: keeps the engine's revoked-domain snapshot current

pub mod decision_engine;
pub mod feed_refresher;

pub use decision_engine::RevocationEngine;
pub use feed_refresher::{FeedRefresher, DEFAULT_FETCH_TIMEOUT, DEFAULT_REFRESH_INTERVAL};
