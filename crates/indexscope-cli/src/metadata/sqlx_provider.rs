//! SQLx-based metadata provider for live MySQL introspection.

use indexscope_core::{BuildError, SchemaCatalog, StatisticsRow};
use sqlx::mysql::{MySqlPool, MySqlRow};
use sqlx::Row;
use std::error::Error;

/// A metadata provider that queries a MySQL server's `information_schema`
/// for schemas, tables, and index statistics.
pub struct SqlxMetadataProvider {
    pool: MySqlPool,
}

impl SqlxMetadataProvider {
    /// Connect to the server at the given URL.
    ///
    /// # Errors
    /// Returns an error when the connection cannot be established. No
    /// retry is attempted; the caller surfaces the failure as a single
    /// user-visible message.
    pub async fn connect(url: &str) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let pool = MySqlPool::connect(url).await?;
        Ok(Self { pool })
    }

    /// List all schema names visible to the connected user.
    pub async fn list_schemas(&self) -> Result<Vec<String>, Box<dyn Error + Send + Sync>> {
        let rows = sqlx::query(
            r#"
            SELECT SCHEMA_NAME AS schema_name
            FROM information_schema.SCHEMATA
            ORDER BY SCHEMA_NAME
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| row.get::<String, _>("schema_name"))
            .collect())
    }

    /// List base tables of a schema, including tables without indexes.
    pub async fn list_tables(
        &self,
        schema: &str,
    ) -> Result<Vec<String>, Box<dyn Error + Send + Sync>> {
        let rows = sqlx::query(
            r#"
            SELECT TABLE_NAME AS table_name
            FROM information_schema.TABLES
            WHERE TABLE_SCHEMA = ? AND TABLE_TYPE = 'BASE TABLE'
            ORDER BY TABLE_NAME
            "#,
        )
        .bind(schema)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| row.get::<String, _>("table_name"))
            .collect())
    }

    /// Fetch the raw index statistics rows of a schema.
    ///
    /// The size estimate follows the server's own accounting: cardinality
    /// scaled by the InnoDB page size, rounded to two decimals.
    pub async fn fetch_statistics(
        &self,
        schema: &str,
    ) -> Result<Vec<StatisticsRow>, Box<dyn Error + Send + Sync>> {
        let rows = sqlx::query(
            r#"
            SELECT
                s.TABLE_NAME AS table_name,
                s.INDEX_NAME AS index_name,
                s.SEQ_IN_INDEX AS seq_in_index,
                s.COLUMN_NAME AS column_name,
                s.NON_UNIQUE AS non_unique,
                s.INDEX_TYPE AS index_type,
                s.CARDINALITY AS cardinality,
                CAST(ROUND(s.CARDINALITY * @@innodb_page_size / 1024 / 1024, 2) AS DOUBLE)
                    AS index_size_mb
            FROM information_schema.STATISTICS s
            INNER JOIN information_schema.TABLES t
                ON s.TABLE_SCHEMA = t.TABLE_SCHEMA
                AND s.TABLE_NAME = t.TABLE_NAME
            WHERE s.TABLE_SCHEMA = ?
            ORDER BY s.TABLE_NAME, s.INDEX_NAME, s.SEQ_IN_INDEX
            "#,
        )
        .bind(schema)
        .fetch_all(&self.pool)
        .await?;

        let mut statistics = Vec::with_capacity(rows.len());
        for row in &rows {
            // Functional index parts have no column name; they cannot be
            // drawn as column nodes, so skip them.
            let column: Option<String> = row.try_get("column_name")?;
            let Some(column) = column else { continue };

            statistics.push(StatisticsRow {
                table: row.get("table_name"),
                index: row.get("index_name"),
                seq_in_index: get_unsigned(row, "seq_in_index") as u32,
                column,
                non_unique: get_unsigned(row, "non_unique") != 0,
                index_type: row.get("index_type"),
                cardinality: get_unsigned(row, "cardinality"),
                size_mb: get_float(row, "index_size_mb"),
            });
        }

        Ok(statistics)
    }

    /// Introspect one schema into a typed catalog.
    ///
    /// # Errors
    /// `BuildError::SchemaNotFound` when the schema does not exist on the
    /// server; connection and query failures pass through.
    pub async fn fetch_catalog(
        &self,
        schema: &str,
    ) -> Result<SchemaCatalog, Box<dyn Error + Send + Sync>> {
        let tables = self.list_tables(schema).await?;
        if tables.is_empty() {
            let known = self.list_schemas().await;
            let exists = match known {
                Ok(schemas) => schemas.iter().any(|s| s == schema),
                Err(_) => false,
            };
            if !exists {
                return Err(Box::new(BuildError::SchemaNotFound {
                    schema: schema.to_string(),
                }));
            }
        }

        let rows = self.fetch_statistics(schema).await?;
        Ok(SchemaCatalog::from_rows(schema, &tables, &rows))
    }
}

/// Read an integer column that may decode as signed or unsigned depending
/// on the server version, clamping negatives to zero.
fn get_unsigned(row: &MySqlRow, column: &str) -> u64 {
    if let Ok(val) = row.try_get::<u64, _>(column) {
        return val;
    }
    if let Ok(val) = row.try_get::<u32, _>(column) {
        return u64::from(val);
    }
    if let Ok(val) = row.try_get::<i64, _>(column) {
        return val.max(0) as u64;
    }
    if let Ok(val) = row.try_get::<i32, _>(column) {
        return val.max(0) as u64;
    }
    if let Ok(val) = row.try_get::<Option<i64>, _>(column) {
        return val.unwrap_or(0).max(0) as u64;
    }
    0
}

/// Read a float column, tolerating NULL (tables analyzed before any rows
/// exist report no size).
fn get_float(row: &MySqlRow, column: &str) -> f64 {
    if let Ok(val) = row.try_get::<f64, _>(column) {
        return val;
    }
    if let Ok(val) = row.try_get::<Option<f64>, _>(column) {
        return val.unwrap_or(0.0);
    }
    0.0
}

/// Connect to a database and introspect one schema.
///
/// This is the main entry point for one-shot CLI usage; it owns a private
/// runtime so the synchronous caller does not need one.
pub fn fetch_catalog_from_database(
    url: &str,
    schema: &str,
) -> Result<SchemaCatalog, Box<dyn Error + Send + Sync>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let provider = SqlxMetadataProvider::connect(url).await?;
        provider.fetch_catalog(schema).await
    })
}

/// Connect to a database and list its schemas.
pub fn list_schemas_from_database(url: &str) -> Result<Vec<String>, Box<dyn Error + Send + Sync>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let provider = SqlxMetadataProvider::connect(url).await?;
        provider.list_schemas().await
    })
}
