// contiv-api: Async Rust client for the Contiv control-plane REST API

pub mod auth;
pub mod client;
pub mod endpoint_groups;
pub mod error;
pub mod keys;
pub mod models;
pub mod policies;
pub mod tenants;
pub mod transport;

pub use client::{AUTH_TOKEN_HEADER, ContivClient};
pub use error::Error;
pub use models::{
    Encap, NetworkSpec, RuleAction, RuleDirection, RuleProtocol, RuleSpec, RuleTarget,
};
pub use transport::{ConnectionConfig, TlsMode, TransportConfig};
