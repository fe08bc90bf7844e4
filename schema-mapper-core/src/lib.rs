//! Schema Mapper Core Library
//!
//! Provides the client-side business logic for mapping a remote data
//! environment's schema, including:
//! - the selection tree (table/field hierarchy, toggle propagation, dirty
//!   tracking, changeset extraction)
//! - the mapping session service (lazy field fetch, save/commit)
//! - the environment service (listing, connection testing)
//!
//! This library is platform-independent: storage and remote access are
//! abstracted through traits so frontends can inject their own implementations.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::ServiceContext;
pub use traits::{ConnectorRegistry, EnvironmentRepository};
