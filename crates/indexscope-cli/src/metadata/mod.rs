//! Live database metadata provider for index introspection.
//!
//! This module fetches index metadata straight from a MySQL server's
//! `information_schema` at runtime and maps the rows into the typed
//! catalog the core crate consumes.
//!
//! Note: this is a CLI-only concern. Offline use goes through the catalog
//! file input instead.

#[cfg(feature = "metadata-provider")]
mod sqlx_provider;

#[cfg(feature = "metadata-provider")]
pub use sqlx_provider::{
    fetch_catalog_from_database, list_schemas_from_database, SqlxMetadataProvider,
};
