//! # Almanack Server
//!
//! HTTP API for writer records: list/search, create, update and delete
//! against a [`WriterStore`](almanack_store::WriterStore) backend.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
mod handlers;
pub mod server;

pub use server::{AppState, Server, ServerConfig};
