//! Remote schema backend abstraction for Schema Mapper.
//!
//! A [`SchemaConnector`] is the client-side view of one remote data environment:
//! it lists the environment's table catalog, lazily resolves per-table field
//! definitions, and persists mapping changesets. The core crate consumes this
//! trait only; the bundled [`rest::RestConnector`] speaks the mapping service's
//! JSON protocol over HTTP.

pub mod error;
pub mod rest;
pub mod traits;
pub mod types;

pub use error::{ConnectorError, Result};
pub use rest::RestConnector;
pub use traits::SchemaConnector;
pub use types::{CatalogEntry, FieldChange, FieldEntry, ServiceEnvelope, TableChange};
