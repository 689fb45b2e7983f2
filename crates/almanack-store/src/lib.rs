//! # Almanack Store
//!
//! Storage backends for writer records.
//!
//! The [`WriterStore`] trait is the seam between the HTTP layer and
//! persistence. Two backends are provided: [`PgWriterStore`] for
//! PostgreSQL and [`InMemoryStore`] for development and testing.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod postgres;
pub mod store;

pub use postgres::PgWriterStore;
pub use store::{InMemoryStore, WriterStore};
