//! # sheetsync-schema
//!
//! JSON Schemas for every document sheetsync writes or prints.
//!
//! The document types live in `sheetsync-core` with `#[derive(JsonSchema)]`.
//! This crate collects their schemas in a [`SchemaRegistry`] so the CLI can
//! export them (`sheetsync schema`) and tests can validate real output.

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
