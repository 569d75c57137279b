//! Typed index metadata, mapped from `information_schema` rows.
//!
//! Driver rows are converted into these types at the provider boundary so
//! that nothing downstream depends on a driver-specific row shape. A
//! [`SchemaCatalog`] serde round-trips (camelCase), which lets a catalog be
//! saved to JSON and replayed without a database connection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One flat row of `information_schema.STATISTICS` joined with `TABLES`.
///
/// `seq_in_index` is 1-based; MySQL reports NULL cardinality for freshly
/// created tables, which the provider maps to 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsRow {
    pub table: String,
    pub index: String,
    pub seq_in_index: u32,
    pub column: String,
    pub non_unique: bool,
    pub index_type: String,
    pub cardinality: u64,
    pub size_mb: f64,
}

/// Index access method, as reported by `INDEX_TYPE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum IndexMethod {
    Btree,
    Hash,
    Fulltext,
    Rtree,
    Other,
}

impl IndexMethod {
    /// Parse the `INDEX_TYPE` column. Unrecognized methods collapse to `Other`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "BTREE" => Self::Btree,
            "HASH" => Self::Hash,
            "FULLTEXT" => Self::Fulltext,
            "RTREE" | "SPATIAL" => Self::Rtree,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for IndexMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Btree => "BTREE",
            Self::Hash => "HASH",
            Self::Fulltext => "FULLTEXT",
            Self::Rtree => "RTREE",
            Self::Other => "OTHER",
        };
        f.write_str(name)
    }
}

/// A column covered by an index, with its 1-based position in the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndexColumn {
    pub name: String,
    pub ordinal: u32,
}

/// One index of a table, with the statistics the visualizer surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndexMeta {
    pub name: String,
    pub method: IndexMethod,
    pub unique: bool,
    /// Distinct values observed over the indexed column set.
    pub cardinality: u64,
    /// Estimated on-disk size in megabytes.
    pub size_mb: f64,
    /// Covered columns, sorted by ordinal.
    pub columns: Vec<IndexColumn>,
}

/// A table and its indexes. `indexes` is empty for tables without any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableIndexes {
    pub name: String,
    #[serde(default)]
    pub indexes: Vec<IndexMeta>,
}

/// The full typed result of introspecting one schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchemaCatalog {
    pub schema: String,
    pub tables: Vec<TableIndexes>,
}

impl SchemaCatalog {
    /// Group flat statistics rows into a catalog.
    ///
    /// `table_names` is the authoritative table list for the schema; tables
    /// without statistics rows (no indexes) are kept with an empty index
    /// list. Rows are grouped by (table, index) in first-seen order and
    /// columns are sorted by ordinal within each index.
    pub fn from_rows(
        schema: impl Into<String>,
        table_names: &[String],
        rows: &[StatisticsRow],
    ) -> Self {
        let mut tables: Vec<TableIndexes> = table_names
            .iter()
            .map(|name| TableIndexes {
                name: name.clone(),
                indexes: Vec::new(),
            })
            .collect();

        for row in rows {
            let table_slot = match tables.iter().position(|t| t.name == row.table) {
                Some(slot) => slot,
                // Statistics for a table missing from the table list; keep it
                // rather than silently dropping rows.
                None => {
                    tables.push(TableIndexes {
                        name: row.table.clone(),
                        indexes: Vec::new(),
                    });
                    tables.len() - 1
                }
            };
            let table = &mut tables[table_slot];

            let index_slot = match table.indexes.iter().position(|i| i.name == row.index) {
                Some(slot) => slot,
                None => {
                    table.indexes.push(IndexMeta {
                        name: row.index.clone(),
                        method: IndexMethod::parse(&row.index_type),
                        unique: !row.non_unique,
                        cardinality: row.cardinality,
                        size_mb: row.size_mb,
                        columns: Vec::new(),
                    });
                    table.indexes.len() - 1
                }
            };
            let index = &mut table.indexes[index_slot];

            // Per-index statistics repeat on every column row; the last row of
            // an index carries the cardinality of the full key.
            index.cardinality = index.cardinality.max(row.cardinality);
            index.size_mb = index.size_mb.max(row.size_mb);
            index.columns.push(IndexColumn {
                name: row.column.clone(),
                ordinal: row.seq_in_index,
            });
        }

        for table in &mut tables {
            for index in &mut table.indexes {
                index.columns.sort_by_key(|c| c.ordinal);
            }
        }

        Self {
            schema: schema.into(),
            tables,
        }
    }

    /// Look up a table by name.
    pub fn table(&self, name: &str) -> Option<&TableIndexes> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Names of all tables in the catalog.
    pub fn table_names(&self) -> Vec<String> {
        self.tables.iter().map(|t| t.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        table: &str,
        index: &str,
        seq: u32,
        column: &str,
        non_unique: bool,
        cardinality: u64,
    ) -> StatisticsRow {
        StatisticsRow {
            table: table.to_string(),
            index: index.to_string(),
            seq_in_index: seq,
            column: column.to_string(),
            non_unique,
            index_type: "BTREE".to_string(),
            cardinality,
            size_mb: 0.5,
        }
    }

    #[test]
    fn test_method_parse() {
        assert_eq!(IndexMethod::parse("BTREE"), IndexMethod::Btree);
        assert_eq!(IndexMethod::parse("btree"), IndexMethod::Btree);
        assert_eq!(IndexMethod::parse("HASH"), IndexMethod::Hash);
        assert_eq!(IndexMethod::parse("FULLTEXT"), IndexMethod::Fulltext);
        assert_eq!(IndexMethod::parse("SPATIAL"), IndexMethod::Rtree);
        assert_eq!(IndexMethod::parse("weird"), IndexMethod::Other);
    }

    #[test]
    fn test_method_display_round_trip() {
        for method in [
            IndexMethod::Btree,
            IndexMethod::Hash,
            IndexMethod::Fulltext,
            IndexMethod::Rtree,
        ] {
            assert_eq!(IndexMethod::parse(&method.to_string()), method);
        }
    }

    #[test]
    fn test_from_rows_groups_by_table_and_index() {
        let tables = vec!["orders".to_string(), "logs".to_string()];
        let rows = vec![
            row("orders", "PRIMARY", 1, "id", false, 1000),
            row("orders", "idx_customer", 1, "customer_id", true, 40),
            row("orders", "idx_customer", 2, "created_at", true, 900),
        ];

        let catalog = SchemaCatalog::from_rows("shop", &tables, &rows);
        assert_eq!(catalog.schema, "shop");
        assert_eq!(catalog.tables.len(), 2);

        let orders = catalog.table("orders").unwrap();
        assert_eq!(orders.indexes.len(), 2);
        assert!(orders.indexes[0].unique);
        assert_eq!(orders.indexes[1].columns.len(), 2);
        // Composite index cardinality comes from its widest prefix.
        assert_eq!(orders.indexes[1].cardinality, 900);

        // A table with no statistics rows keeps an empty index list.
        let logs = catalog.table("logs").unwrap();
        assert!(logs.indexes.is_empty());
    }

    #[test]
    fn test_from_rows_sorts_columns_by_ordinal() {
        let tables = vec!["t".to_string()];
        let rows = vec![
            row("t", "idx_multi", 3, "c", true, 10),
            row("t", "idx_multi", 1, "a", true, 10),
            row("t", "idx_multi", 2, "b", true, 10),
        ];

        let catalog = SchemaCatalog::from_rows("s", &tables, &rows);
        let columns: Vec<_> = catalog.table("t").unwrap().indexes[0]
            .columns
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(columns, ["a", "b", "c"]);
    }

    #[test]
    fn test_from_rows_keeps_unlisted_table() {
        let rows = vec![row("ghost", "PRIMARY", 1, "id", false, 5)];
        let catalog = SchemaCatalog::from_rows("s", &[], &rows);
        assert!(catalog.table("ghost").is_some());
    }

    #[test]
    fn test_catalog_serde_round_trip() {
        let tables = vec!["orders".to_string()];
        let rows = vec![row("orders", "PRIMARY", 1, "id", false, 1000)];
        let catalog = SchemaCatalog::from_rows("shop", &tables, &rows);

        let json = serde_json::to_string(&catalog).unwrap();
        assert!(json.contains("\"sizeMb\""));
        let back: SchemaCatalog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, catalog);
    }
}
