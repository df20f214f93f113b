//! Network layer - async HTTP execution
//!
//! The network actor runs on the Tokio runtime and handles request commands.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
pub use client::{AdapterResponse, HttpAdapter, ReqwestAdapter};
