//! Shared application state for the server.
//!
//! Selection state lives in the browser; the server holds only the
//! configuration and the metadata backend. Every request runs the full
//! pipeline from scratch against the backend.

use std::error::Error;

use indexscope_core::{BuildError, SchemaCatalog};

#[cfg(feature = "metadata-provider")]
use crate::metadata::SqlxMetadataProvider;

/// Server configuration derived from CLI arguments.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Database connection URL for live introspection
    pub database_url: Option<String>,
    /// Default layout seed for graph requests
    pub seed: u64,
    /// Port to listen on
    pub port: u16,
    /// Whether to open browser on startup
    pub open_browser: bool,
}

/// Where schema metadata comes from. Closed set: a live MySQL connection
/// or a catalog loaded from a file (also what the API tests run against).
pub enum MetadataBackend {
    #[cfg(feature = "metadata-provider")]
    Live(SqlxMetadataProvider),
    Static(SchemaCatalog),
}

impl MetadataBackend {
    /// List schema names the backend can serve.
    pub async fn list_schemas(&self) -> Result<Vec<String>, Box<dyn Error + Send + Sync>> {
        match self {
            #[cfg(feature = "metadata-provider")]
            Self::Live(provider) => provider.list_schemas().await,
            Self::Static(catalog) => Ok(vec![catalog.schema.clone()]),
        }
    }

    /// List tables of a schema.
    pub async fn list_tables(
        &self,
        schema: &str,
    ) -> Result<Vec<String>, Box<dyn Error + Send + Sync>> {
        match self {
            #[cfg(feature = "metadata-provider")]
            Self::Live(provider) => provider.list_tables(schema).await,
            Self::Static(catalog) => {
                if catalog.schema == schema {
                    Ok(catalog.table_names())
                } else {
                    Err(Box::new(BuildError::SchemaNotFound {
                        schema: schema.to_string(),
                    }))
                }
            }
        }
    }

    /// Produce the full typed catalog for a schema.
    pub async fn catalog(
        &self,
        schema: &str,
    ) -> Result<SchemaCatalog, Box<dyn Error + Send + Sync>> {
        match self {
            #[cfg(feature = "metadata-provider")]
            Self::Live(provider) => provider.fetch_catalog(schema).await,
            Self::Static(catalog) => {
                if catalog.schema == schema {
                    Ok(catalog.clone())
                } else {
                    Err(Box::new(BuildError::SchemaNotFound {
                        schema: schema.to_string(),
                    }))
                }
            }
        }
    }

    /// Short description for the config endpoint.
    pub fn describe(&self) -> &'static str {
        match self {
            #[cfg(feature = "metadata-provider")]
            Self::Live(_) => "live",
            Self::Static(_) => "static",
        }
    }
}

/// Shared application state.
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,
    /// Schema metadata source
    pub backend: MetadataBackend,
}

impl AppState {
    pub fn new(config: ServerConfig, backend: MetadataBackend) -> Self {
        Self { config, backend }
    }
}
