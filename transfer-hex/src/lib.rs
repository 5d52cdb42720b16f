//! # Transfer Hex
//!
//! The transfer engine (application service) and the inbound HTTP adapter.
//!
//! [`TransferService`] is generic over the store and rate-source ports, so
//! adapters are injected at compile time and the engine can be tested with
//! in-memory fakes.

mod openapi;
mod service;

#[cfg(test)]
mod service_tests;

pub mod inbound;

pub use openapi::ApiDoc;
pub use service::TransferService;
