//! Adapters for the outside world.

pub mod lookup_client;

pub use lookup_client::{LookupClient, LookupClientError};
