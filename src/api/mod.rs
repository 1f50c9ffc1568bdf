//! HTTP surface for the wagering engine
//!
//! Thin axum layer over the coordinator: handlers translate JSON requests
//! into coordinator calls and domain errors into status codes. The
//! authentication layer in front of this API is an external collaborator;
//! requests arrive already attributed to an account id.

pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;

pub use server::ApiServer;
