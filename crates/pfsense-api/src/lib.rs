// pfsense-api: Async Rust client for the pfSense REST management API

pub mod auth;
pub mod client;
pub mod envelope;
pub mod error;
pub mod interface;
pub mod models;
pub mod routing;
pub mod scalar;
pub mod transport;

#[cfg(test)]
mod testing;

pub use auth::{AuthMode, Credentials};
pub use client::{ApiRequest, Client, Transport};
pub use envelope::{ApiResponse, Envelope};
pub use error::Error;
pub use interface::InterfaceService;
pub use models::{DefaultGatewayRequest, Gateway, GatewayRequest, Interface, InterfaceRequest, Vlan};
pub use routing::RoutingService;
pub use scalar::StringOrInt;
pub use transport::{TlsMode, TransportConfig};
