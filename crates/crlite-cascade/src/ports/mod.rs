//! Ports Layer - Trait definitions
//!
//! - Inbound (driving): `RevocationApi`, the host-facing surface
//! - Outbound (driven): revoked-domain feed, certificate intelligence,
//!   static cascade source

pub mod inbound;
pub mod outbound;

pub use inbound::RevocationApi;
pub use outbound::{CascadeSource, CertificateIntelligence, RevokedDomainFeed};
