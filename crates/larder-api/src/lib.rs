// larder-api: Async Rust client for the larder back-office REST API.
//
// Thin I/O adapter over the recipe / ingredient / inventory endpoints.
// All business rules live server-side; this crate only models the wire
// contract and maps failures into a structured error type.

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
