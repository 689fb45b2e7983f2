//! # Almanack Core
//!
//! Core types for the almanack writer-record service.
//!
//! This crate provides the foundational pieces shared by the storage and
//! HTTP layers:
//! - The unified error type
//! - The writer record and its create/update/filter parameter types

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod writer;

pub use error::{Error, Result};
pub use writer::{NewWriter, Writer, WriterFilter, WriterUpdate};
